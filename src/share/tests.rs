use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{
    invite::{SessionInfoSource, StaticSessionInfo, invite_link},
    link::ShareTarget,
    service::{decode_payload, fetch_shared, publish},
    store::ShareStore,
    types::ShareError,
};
use crate::draw::{
    Operation, Point, Segment,
    color::{BLACK, RED},
};

#[derive(Clone, Default)]
struct MockStore {
    entries: Arc<Mutex<HashMap<String, Value>>>,
    fail_with_status: Option<u16>,
}

#[async_trait]
impl ShareStore for MockStore {
    async fn save(&self, id: &str, payload: &Value) -> Result<(), ShareError> {
        if let Some(status) = self.fail_with_status {
            return Err(ShareError::Status(status));
        }
        self.entries
            .lock()
            .unwrap()
            .insert(id.to_string(), payload.clone());
        Ok(())
    }

    async fn load(&self, id: &str) -> Result<Value, ShareError> {
        self.entries
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| ShareError::NotFound(id.to_string()))
    }
}

struct FailingSession;

#[async_trait]
impl SessionInfoSource for FailingSession {
    async fn session_id(&self) -> Result<String, ShareError> {
        Err(ShareError::SessionInfo("not in a live session".to_string()))
    }
}

fn line() -> Operation {
    Operation::Line(Segment {
        color: RED,
        line_width: 5.0,
        start: Point::new(1.0, 2.0),
        end: Point::new(30.0, 40.0),
    })
}

#[tokio::test]
async fn publish_then_fetch_round_trips_the_log() {
    let store = MockStore::default();
    let ops = vec![line(), Operation::circle_from_drag(RED, 2.0, Point::new(5.0, 5.0), Point::new(8.0, 9.0))];

    let shared = publish(
        &store,
        &ops,
        "https://example.com/article#section",
        1280,
        "https://annotateweb.com/",
    )
    .await
    .unwrap();

    assert_eq!(shared.target.page_url, "https://example.com/article");
    assert_eq!(shared.target.viewport_width, Some(1280));
    assert_eq!(ShareTarget::from_view_link(&shared.link).unwrap(), shared.target);

    let loaded = fetch_shared(&store, &shared.target.id).await.unwrap();
    assert_eq!(loaded, ops);
    assert_eq!(
        serde_json::to_string(&loaded).unwrap(),
        serde_json::to_string(&ops).unwrap()
    );
}

#[tokio::test]
async fn publish_refuses_empty_log() {
    let store = MockStore::default();
    let err = publish(&store, &[], "https://example.com/", 800, "https://annotateweb.com/")
        .await
        .unwrap_err();
    assert!(matches!(err, ShareError::NothingToShare));
    assert!(store.entries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn store_failure_is_reported() {
    let store = MockStore {
        fail_with_status: Some(503),
        ..Default::default()
    };
    let err = publish(&store, &[line()], "https://example.com/", 800, "https://annotateweb.com/")
        .await
        .unwrap_err();
    assert!(matches!(err, ShareError::Status(503)));
    assert_eq!(err.share_message(), "Error generating share URL");
}

#[tokio::test]
async fn missing_set_is_not_found() {
    let store = MockStore::default();
    let err = fetch_shared(&store, "nope").await.unwrap_err();
    assert!(matches!(err, ShareError::NotFound(id) if id == "nope"));
}

#[test]
fn non_array_payload_is_rejected() {
    assert!(matches!(
        decode_payload(json!({"tool": "pen"})),
        Err(ShareError::NotAnArray)
    ));
    assert!(matches!(decode_payload(Value::Null), Err(ShareError::NotAnArray)));
}

#[test]
fn malformed_entries_are_kept_as_unsupported() {
    let ops = decode_payload(json!([
        {"tool": "line", "startX": 1, "startY": 1, "endX": 4, "endY": 5},
        {"tool": "pen", "points": "not a list"},
        42,
        {"tool": "sticker"}
    ]))
    .unwrap();

    assert_eq!(ops.len(), 4);
    assert!(matches!(ops[0], Operation::Line(_)));
    assert_eq!(ops[1], Operation::Unsupported { tool: "pen".to_string() });
    assert_eq!(ops[2], Operation::Unsupported { tool: String::new() });
    assert_eq!(ops[3], Operation::Unsupported { tool: "sticker".to_string() });
}

#[test]
fn non_ascii_colors_fall_back_to_black() {
    let ops = decode_payload(json!([
        {"tool": "line", "color": "#1é234", "lineWidth": 5,
         "startX": 0, "startY": 0, "endX": 10, "endY": 10},
        {"tool": "circle", "color": "#é1", "centerX": 5, "centerY": 5, "radius": 3}
    ]))
    .unwrap();

    let Operation::Line(segment) = &ops[0] else {
        panic!("expected a line");
    };
    assert_eq!(segment.color, BLACK);
    let Operation::Circle(circle) = &ops[1] else {
        panic!("expected a circle");
    };
    assert_eq!(circle.color, BLACK);
}

#[tokio::test]
async fn invite_link_appends_session_id() {
    let link = invite_link(&StaticSessionInfo("s-123".to_string()), "https://annotateweb.com/?join=")
        .await
        .unwrap();
    assert_eq!(link, "https://annotateweb.com/?join=s-123");
}

#[tokio::test]
async fn invite_errors_map_to_dialog_messages() {
    let empty = invite_link(&StaticSessionInfo::default(), "https://annotateweb.com/?join=")
        .await
        .unwrap_err();
    assert_eq!(empty.invite_message(), "Could not get session ID");

    let failed = invite_link(&FailingSession, "https://annotateweb.com/?join=")
        .await
        .unwrap_err();
    assert_eq!(failed.invite_message(), "Error getting session ID");
}
