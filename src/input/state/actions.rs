//! Toolbar actions that talk to the outside world: share, invite, load and
//! export. Each one leaves its outcome for the host to present (see
//! [`Session::take_dialog`] and [`Session::take_alert`]).

use std::sync::Arc;

use crate::export::{ExportDependencies, ExportRequest, ExportResult, perform_export};
use crate::input::tool::Tool;
use crate::share::types::NO_ANNOTATIONS_FOUND_MESSAGE;
use crate::share::{
    Dialog, SessionInfoSource, ShareError, ShareStore, ShareTarget, fetch_shared, invite_link,
    publish,
};

use super::Session;

impl Session {
    /// Publishes the log and leaves a share dialog.
    ///
    /// Returns the public link on success. An empty log leaves the
    /// "draw something first" message instead and makes no request.
    pub async fn share(
        &mut self,
        store: &dyn ShareStore,
        page_url: &str,
        view_host: &str,
    ) -> Option<String> {
        self.select_tool(Tool::Navigate);
        let (width, height) = self.viewport_size();

        let result = publish(
            store,
            self.annotations.operations(),
            page_url,
            width,
            view_host,
        )
        .await;

        let dialog = match result {
            Ok(published) => Dialog::ShareLink {
                link: published.link,
                width,
                height,
            },
            Err(err) => {
                if !matches!(err, ShareError::NothingToShare) {
                    log::error!("Error sharing annotations: {}", err);
                }
                Dialog::Message(err.share_message().to_string())
            }
        };
        let link = dialog.link().map(str::to_owned);
        self.pending_dialog = Some(dialog);
        link
    }

    /// Builds a live-session invite link and leaves an invite dialog.
    pub async fn invite(
        &mut self,
        source: &dyn SessionInfoSource,
        invite_base: &str,
    ) -> Option<String> {
        self.select_tool(Tool::Navigate);

        let dialog = match invite_link(source, invite_base).await {
            Ok(link) => Dialog::InviteLink(link),
            Err(err) => {
                log::warn!("No invite link: {}", err);
                Dialog::Message(err.invite_message().to_string())
            }
        };
        let link = dialog.link().map(str::to_owned);
        self.pending_dialog = Some(dialog);
        link
    }

    /// Loads the shared set named by the `#ant=` fragment of `page_url`.
    ///
    /// Pages without a share fragment are left alone. A payload that is not
    /// an array leaves the log untouched; a failed request leaves the
    /// "No annotations found" message. Returns whether the log was replaced.
    pub async fn load_shared(&mut self, store: &dyn ShareStore, page_url: &str) -> bool {
        let Ok(target) = ShareTarget::from_page_url(page_url) else {
            return false;
        };
        log::info!(
            "Loading shared annotations: width={:?}, id={}",
            target.viewport_width,
            target.id
        );

        match fetch_shared(store, &target.id).await {
            Ok(operations) => {
                self.apply_shared(operations);
                true
            }
            Err(ShareError::NotAnArray) => false,
            Err(err) => {
                log::error!("Error loading shared annotations: {}", err);
                self.pending_dialog = Some(Dialog::Message(NO_ANNOTATIONS_FOUND_MESSAGE.to_string()));
                false
            }
        }
    }

    /// Exports the page with the annotations drawn on top.
    ///
    /// The toolbar is hidden while the page is captured and its visibility is
    /// restored afterwards whether or not the export worked. Failures leave an
    /// alert and return `None`.
    pub async fn export(
        &mut self,
        dependencies: Arc<ExportDependencies>,
        request: ExportRequest,
    ) -> Option<ExportResult> {
        let was_visible = self.toolbar.hide();
        self.needs_redraw = true;

        let operations = self.annotations.operations().to_vec();
        let result = perform_export(request, operations, dependencies).await;

        self.toolbar.restore(was_visible);
        self.needs_redraw = true;

        match result {
            Ok(export) => {
                log::info!("Exported {}", export.filename);
                Some(export)
            }
            Err(err) => {
                log::error!("Error capturing page: {}", err);
                self.pending_alert = Some(format!("Failed to export image: {}", err));
                None
            }
        }
    }

    fn viewport_size(&self) -> (u32, u32) {
        (
            self.viewport.width.max(0.0).round() as u32,
            self.viewport.height.max(0.0).round() as u32,
        )
    }
}
