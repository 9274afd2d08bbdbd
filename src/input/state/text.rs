use std::time::{Duration, Instant};

use crate::draw::{Operation, TextLabel};
use crate::input::events::Key;

use super::{DrawingState, Session};

/// Delay between a text input losing focus and its text being committed.
/// Focus returning within the delay (e.g. a click on the toolbar) keeps
/// the input open.
pub const BLUR_COMMIT_DELAY: Duration = Duration::from_millis(100);

impl Session {
    pub(crate) fn open_text_input(&mut self, x: f64, y: f64) {
        let anchor = self.viewport.to_document(x, y);
        log::debug!("Opening text input at {:?}", anchor);
        self.state = DrawingState::TextInput {
            anchor,
            buffer: String::new(),
            blur_deadline: None,
        };
        self.needs_redraw = true;
    }

    /// Routes a key press.
    ///
    /// While a text input is open, Return commits it, Shift+Return inserts a
    /// line break and Escape cancels it. Escape also returns to the navigate
    /// tool. Returns whether the key was consumed.
    pub fn on_key_press(&mut self, key: Key) -> bool {
        if key == Key::Escape {
            self.on_key_escape();
            return true;
        }
        if !matches!(self.state, DrawingState::TextInput { .. }) {
            return false;
        }

        match key {
            Key::Char(ch) => self.on_text_char(ch),
            Key::Return => self.on_text_submit(),
            Key::ShiftReturn => self.on_text_newline(),
            Key::Backspace => self.on_text_backspace(),
            Key::Escape | Key::Unknown => return false,
        }
        true
    }

    pub fn on_text_char(&mut self, ch: char) {
        if let DrawingState::TextInput { buffer, .. } = &mut self.state {
            buffer.push(ch);
            self.needs_redraw = true;
        }
    }

    pub fn on_text_backspace(&mut self) {
        if let DrawingState::TextInput { buffer, .. } = &mut self.state
            && buffer.pop().is_some()
        {
            self.needs_redraw = true;
        }
    }

    pub fn on_text_newline(&mut self) {
        self.on_text_char('\n');
    }

    /// Commits the open text input, one label per non-blank line.
    ///
    /// Blank input commits nothing. The input is closed either way.
    pub fn on_text_submit(&mut self) {
        let DrawingState::TextInput { anchor, buffer, .. } =
            std::mem::replace(&mut self.state, DrawingState::Idle)
        else {
            return;
        };

        let labels = TextLabel::from_input(&buffer, anchor, self.current_color, &self.font);
        let count = labels.len();
        for label in labels {
            self.annotations.commit(Operation::Text(label));
        }
        if count > 0 {
            log::debug!("Committed {} text line(s) at {:?}", count, anchor);
        }
        self.redraw();
        self.needs_redraw = true;
    }

    /// Closes the open text input without committing.
    pub fn on_text_cancel(&mut self) {
        if matches!(self.state, DrawingState::TextInput { .. }) {
            self.state = DrawingState::Idle;
            self.needs_redraw = true;
        }
    }

    /// Focus came back to the text input; a pending blur commit is dropped.
    pub fn on_text_focus(&mut self) {
        if let DrawingState::TextInput { blur_deadline, .. } = &mut self.state {
            *blur_deadline = None;
        }
    }

    /// The text input lost focus at `now`; it commits once
    /// [`BLUR_COMMIT_DELAY`] has passed (see [`Session::tick`]).
    pub fn on_text_blur(&mut self, now: Instant) {
        if let DrawingState::TextInput { blur_deadline, .. } = &mut self.state {
            *blur_deadline = Some(now + BLUR_COMMIT_DELAY);
        }
    }

    /// Runs timers due at `now`. Returns whether a blurred input was committed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let due = matches!(
            self.state,
            DrawingState::TextInput { blur_deadline: Some(deadline), .. } if deadline <= now
        );
        if due {
            self.on_text_submit();
        }
        due
    }
}
