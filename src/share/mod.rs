//! Share links, the remote annotation store and live-session invites.
//!
//! Publishing stores the log as a JSON array under a random id and returns a
//! link to the viewer host; loading reverses that. The store and the
//! session-info capability are traits so hosts and tests can substitute
//! their own.

pub mod id;
pub mod invite;
pub mod link;
pub mod service;
pub mod store;
pub mod types;

#[cfg(test)]
mod tests;

pub use id::generate_share_id;
pub use invite::{SessionInfoSource, StaticSessionInfo, invite_link};
pub use link::{FRAGMENT_PREFIX, ShareTarget, parse_fragment};
pub use service::{PublishedShare, decode_payload, fetch_shared, publish};
pub use store::{HttpShareStore, ShareStore};
pub use types::{Dialog, ShareError};
