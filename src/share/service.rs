use serde_json::Value;

use crate::draw::Operation;
use crate::share::{
    id::generate_share_id,
    link::ShareTarget,
    store::ShareStore,
    types::ShareError,
};

/// A stored annotation set and its public link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedShare {
    pub target: ShareTarget,
    pub link: String,
}

/// Stores `operations` under a fresh id and builds the public link.
pub async fn publish(
    store: &dyn ShareStore,
    operations: &[Operation],
    page_url: &str,
    viewport_width: u32,
    view_host: &str,
) -> Result<PublishedShare, ShareError> {
    if operations.is_empty() {
        return Err(ShareError::NothingToShare);
    }

    let target = ShareTarget::new(page_url, viewport_width, generate_share_id());
    let payload = serde_json::to_value(operations)?;
    store.save(&target.id, &payload).await?;

    let link = target.to_view_link(view_host)?;
    log::info!(
        "Shared {} annotations as '{}' ({}px wide)",
        operations.len(),
        target.id,
        viewport_width
    );
    Ok(PublishedShare { target, link })
}

/// Loads the set stored under `id`.
pub async fn fetch_shared(store: &dyn ShareStore, id: &str) -> Result<Vec<Operation>, ShareError> {
    let payload = store.load(id).await?;
    decode_payload(payload)
}

/// Turns a stored payload into operations.
///
/// The payload must be a JSON array. Entries are not validated: anything that
/// cannot be read as an operation is kept as [`Operation::Unsupported`] so the
/// log length matches the payload.
pub fn decode_payload(payload: Value) -> Result<Vec<Operation>, ShareError> {
    let Value::Array(items) = payload else {
        log::warn!("Shared payload is not an array, ignoring it");
        return Err(ShareError::NotAnArray);
    };

    Ok(items
        .into_iter()
        .map(|item| {
            let tool = item
                .get("tool")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            serde_json::from_value(item).unwrap_or_else(|err| {
                log::debug!("Keeping unreadable '{}' entry as unsupported: {}", tool, err);
                Operation::Unsupported { tool }
            })
        })
        .collect())
}
