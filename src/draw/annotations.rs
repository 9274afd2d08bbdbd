//! Annotation log with batch-based undo/redo history.

use super::operation::Operation;
use std::collections::VecDeque;

/// How a history batch came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    /// Operations removed by a run of single-step undos
    Undo,
    /// Snapshot of the whole log taken by "clear"
    Clear,
}

/// Operations restored together as one history step.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    kind: BatchKind,
    operations: VecDeque<Operation>,
}

impl Batch {
    pub fn kind(&self) -> BatchKind {
        self.kind
    }

    /// Operations in the order redo puts them back.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn to_vec(&self) -> Vec<Operation> {
        self.operations.iter().cloned().collect()
    }
}

/// Ordered annotation log plus its undo/redo history.
///
/// Insertion order is paint order. The history is a stack of [`Batch`]es:
/// - each contiguous run of single-step undos (not interrupted by a redo,
///   commit, clear or replace) collects into one batch, newest first;
/// - `clear` always pushes a fresh batch holding the entire log;
/// - redo moves the front operation of the top batch back onto the log.
///
/// Committing a new operation discards all redo state. History depth is
/// unbounded for the lifetime of the owning session.
#[derive(Debug, Clone, Default)]
pub struct Annotations {
    operations: Vec<Operation>,
    history: Vec<Batch>,
    /// Whether the top batch is still collecting consecutive undos
    undo_run_open: bool,
}

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current log in paint order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// History stack, bottom first.
    pub fn history(&self) -> &[Batch] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.operations.is_empty()
            || matches!(self.history.last(), Some(batch) if batch.kind == BatchKind::Clear)
    }

    pub fn can_redo(&self) -> bool {
        self.history.last().is_some_and(|batch| !batch.is_empty())
    }

    /// Appends an operation on top of the log and drops all redo state.
    ///
    /// Returns `false` (leaving log and history untouched) when the operation
    /// is degenerate, see [`Operation::is_committable`].
    pub fn commit(&mut self, operation: Operation) -> bool {
        if !operation.is_committable() {
            log::debug!("Rejecting degenerate '{}' operation", operation.tool_name());
            return false;
        }
        self.operations.push(operation);
        self.history.clear();
        self.undo_run_open = false;
        true
    }

    /// Removes the newest operation into the history.
    ///
    /// With an empty log, a clear snapshot on top of the history is restored
    /// in one step. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        let Some(operation) = self.operations.pop() else {
            return self.restore_cleared();
        };

        let extends_run = self.undo_run_open
            && matches!(self.history.last(), Some(batch) if batch.kind == BatchKind::Undo);
        match self.history.last_mut() {
            Some(batch) if extends_run => batch.operations.push_front(operation),
            _ => self.history.push(Batch {
                kind: BatchKind::Undo,
                operations: VecDeque::from([operation]),
            }),
        }
        self.undo_run_open = true;
        true
    }

    fn restore_cleared(&mut self) -> bool {
        if !matches!(self.history.last(), Some(batch) if batch.kind == BatchKind::Clear) {
            return false;
        }
        let Some(batch) = self.history.pop() else {
            return false;
        };
        self.operations.extend(batch.operations);
        self.undo_run_open = false;
        true
    }

    /// Moves one operation from the top history batch back onto the log.
    pub fn redo(&mut self) -> bool {
        let Some(batch) = self.history.last_mut() else {
            return false;
        };
        let Some(operation) = batch.operations.pop_front() else {
            return false;
        };
        if batch.operations.is_empty() {
            self.history.pop();
        }
        self.operations.push(operation);
        self.undo_run_open = false;
        true
    }

    /// Snapshots the whole log as one history batch and empties the log.
    ///
    /// Earlier history is discarded. Returns `false` when the log was empty.
    pub fn clear(&mut self) -> bool {
        if self.operations.is_empty() {
            return false;
        }
        self.history.clear();
        self.history.push(Batch {
            kind: BatchKind::Clear,
            operations: self.operations.drain(..).collect(),
        });
        self.undo_run_open = false;
        true
    }

    /// Replaces the log wholesale and forgets all history.
    ///
    /// Used when a shared set is loaded; entries are taken as-is.
    pub fn replace_all(&mut self, operations: Vec<Operation>) {
        self.operations = operations;
        self.history.clear();
        self.undo_run_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::RED;
    use crate::draw::operation::{CompositeMode, FreehandStroke, Point, Segment, StrokeKind};

    fn stroke(x: f64) -> Operation {
        Operation::Freehand(FreehandStroke {
            kind: StrokeKind::Pen,
            points: vec![Point::new(x, 0.0), Point::new(x + 10.0, 10.0)],
            color: RED,
            line_width: 5.0,
            composite: CompositeMode::SourceOver,
        })
    }

    fn rect(x1: f64, y1: f64, x2: f64, y2: f64) -> Operation {
        Operation::Rectangle(Segment {
            color: RED,
            line_width: 5.0,
            start: Point::new(x1, y1),
            end: Point::new(x2, y2),
        })
    }

    fn log_with(n: usize) -> (Annotations, Vec<Operation>) {
        let mut annotations = Annotations::new();
        let ops: Vec<Operation> = (0..n).map(|i| stroke(i as f64)).collect();
        for op in &ops {
            assert!(annotations.commit(op.clone()));
        }
        (annotations, ops)
    }

    #[test]
    fn undo_all_then_redo_all_restores_order() {
        for n in 1..6 {
            let (mut annotations, ops) = log_with(n);
            for _ in 0..n {
                assert!(annotations.undo());
            }
            assert!(annotations.is_empty());
            assert_eq!(annotations.history().len(), 1);

            for _ in 0..n {
                assert!(annotations.redo());
            }
            assert_eq!(annotations.operations(), ops.as_slice());
            assert!(annotations.history().is_empty());
        }
    }

    #[test]
    fn stroke_then_rectangle_scenario() {
        let mut annotations = Annotations::new();
        let pen = stroke(0.0);
        let rectangle = rect(0.0, 0.0, 10.0, 10.0);
        annotations.commit(pen.clone());
        annotations.commit(rectangle.clone());
        assert_eq!(annotations.operations(), &[pen.clone(), rectangle.clone()]);

        annotations.undo();
        assert_eq!(annotations.operations(), &[pen.clone()]);
        annotations.undo();
        assert!(annotations.is_empty());
        assert_eq!(
            annotations.history().last().unwrap().to_vec(),
            vec![pen.clone(), rectangle.clone()]
        );

        annotations.redo();
        annotations.redo();
        assert_eq!(annotations.operations(), &[pen, rectangle]);
    }

    #[test]
    fn clear_snapshots_whole_log_and_undo_restores_it_at_once() {
        let (mut annotations, ops) = log_with(3);

        assert!(annotations.clear());
        assert!(annotations.is_empty());
        assert_eq!(annotations.history().len(), 1);
        assert_eq!(annotations.history()[0].kind(), BatchKind::Clear);
        assert_eq!(annotations.history()[0].to_vec(), ops);

        assert!(annotations.undo());
        assert_eq!(annotations.operations(), ops.as_slice());
        assert!(annotations.history().is_empty());
    }

    #[test]
    fn redo_after_clear_restores_one_operation_at_a_time() {
        let (mut annotations, ops) = log_with(3);
        annotations.clear();

        assert!(annotations.redo());
        assert_eq!(annotations.operations(), &ops[..1]);
        assert_eq!(annotations.history()[0].len(), 2);
    }

    #[test]
    fn commit_discards_redo_state() {
        let (mut annotations, _) = log_with(3);
        annotations.undo();
        annotations.undo();
        assert!(annotations.can_redo());

        assert!(annotations.commit(stroke(42.0)));
        assert!(!annotations.can_redo());
        assert!(!annotations.redo());
        assert_eq!(annotations.len(), 2);
    }

    #[test]
    fn redo_interrupts_undo_run() {
        let (mut annotations, ops) = log_with(3);
        annotations.undo();
        annotations.undo();
        annotations.redo();
        annotations.undo();

        let history: Vec<Vec<Operation>> = annotations.history().iter().map(Batch::to_vec).collect();
        assert_eq!(history, vec![vec![ops[2].clone()], vec![ops[1].clone()]]);

        annotations.redo();
        annotations.redo();
        assert_eq!(annotations.operations(), ops.as_slice());
    }

    #[test]
    fn degenerate_operations_leave_log_unchanged() {
        let (mut annotations, _) = log_with(1);
        annotations.undo();

        assert!(!annotations.commit(rect(10.0, 10.0, 10.0, 10.0)));
        assert!(!annotations.commit(Operation::Line(Segment {
            color: RED,
            line_width: 1.0,
            start: Point::new(5.0, 5.0),
            end: Point::new(5.0, 5.0),
        })));
        let at = Point::new(1.0, 1.0);
        assert!(!annotations.commit(Operation::circle_from_drag(RED, 1.0, at, at)));

        assert!(annotations.is_empty());
        // rejected commits do not clear redo state either
        assert!(annotations.can_redo());
    }

    #[test]
    fn noops_on_empty_state() {
        let mut annotations = Annotations::new();
        assert!(!annotations.undo());
        assert!(!annotations.redo());
        assert!(!annotations.clear());
        assert!(!annotations.can_undo());
    }

    #[test]
    fn replace_all_resets_history_without_validation() {
        let (mut annotations, _) = log_with(2);
        annotations.undo();

        let shared = vec![
            stroke(1.0),
            Operation::Unsupported {
                tool: "sticker".to_string(),
            },
        ];
        annotations.replace_all(shared.clone());
        assert_eq!(annotations.operations(), shared.as_slice());
        assert!(annotations.history().is_empty());

        let json = serde_json::to_string(annotations.operations()).unwrap();
        let mut reloaded = Annotations::new();
        reloaded.replace_all(serde_json::from_str(&json).unwrap());
        assert_eq!(serde_json::to_string(reloaded.operations()).unwrap(), json);
    }
}
