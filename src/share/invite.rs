use async_trait::async_trait;

use crate::share::types::ShareError;

/// Host capability reporting the current live session.
#[async_trait]
pub trait SessionInfoSource: Send + Sync {
    /// Opaque id of the running session; may be empty when there is none.
    async fn session_id(&self) -> Result<String, ShareError>;
}

/// Session source with a fixed id, for hosts that know it up front.
#[derive(Debug, Clone, Default)]
pub struct StaticSessionInfo(pub String);

#[async_trait]
impl SessionInfoSource for StaticSessionInfo {
    async fn session_id(&self) -> Result<String, ShareError> {
        Ok(self.0.clone())
    }
}

/// Builds `{invite_base}{session id}`.
pub async fn invite_link(
    source: &dyn SessionInfoSource,
    invite_base: &str,
) -> Result<String, ShareError> {
    let session_id = source.session_id().await.inspect_err(|err| {
        log::error!("Error getting session ID: {}", err);
    })?;
    if session_id.is_empty() {
        return Err(ShareError::MissingSessionId);
    }
    Ok(format!("{invite_base}{session_id}"))
}
