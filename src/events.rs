//! Event bridge
//!
//! Stores, the progress tracker and the folder cache publish every change as
//! a named event with a JSON payload. Front ends plug in an `EventSink`.

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::broadcast;

pub const PROGRESS_UPDATED: &str = "progress-updated";
pub const PROGRESS_REMOVED: &str = "progress-removed";
pub const CACHE_UPDATED: &str = "cache-updated";

pub type SharedSink = Arc<dyn EventSink>;

#[derive(Debug, Clone, Serialize)]
pub struct DriveEvent {
    pub name: String,
    pub payload: Value,
}

pub trait EventSink: Send + Sync {
    fn emit_value(&self, event: &str, payload: Value);
}

/// Serialize and publish. Failures are logged, never propagated.
pub(crate) fn emit<P: Serialize + ?Sized>(sink: &dyn EventSink, event: &str, payload: &P) {
    match serde_json::to_value(payload) {
        Ok(value) => sink.emit_value(event, value),
        Err(e) => log::warn!("Failed to serialize {} event: {}", event, e),
    }
}

/// Drops every event
pub struct NullSink;

impl EventSink for NullSink {
    fn emit_value(&self, _event: &str, _payload: Value) {}
}

/// Writes events to the `log` facade at debug level
pub struct LogSink;

impl EventSink for LogSink {
    fn emit_value(&self, event: &str, payload: Value) {
        log::debug!("event {}: {}", event, payload);
    }
}

/// Fans events out to any number of subscribers
pub struct ChannelSink {
    sender: broadcast::Sender<DriveEvent>,
}

impl ChannelSink {
    pub fn new(capacity: usize) -> (Self, broadcast::Receiver<DriveEvent>) {
        let (sender, receiver) = broadcast::channel(capacity.max(1));
        (ChannelSink { sender }, receiver)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DriveEvent> {
        self.sender.subscribe()
    }
}

impl EventSink for ChannelSink {
    fn emit_value(&self, event: &str, payload: Value) {
        // No subscribers is not an error
        let _ = self.sender.send(DriveEvent {
            name: event.to_string(),
            payload,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Payload {
        key: String,
        loaded: u64,
    }

    #[test]
    fn channel_sink_delivers_serialized_payloads() {
        let (sink, mut receiver) = ChannelSink::new(8);
        emit(
            &sink,
            PROGRESS_UPDATED,
            &Payload {
                key: "k".to_string(),
                loaded: 3,
            },
        );

        let event = receiver.try_recv().unwrap();
        assert_eq!(event.name, PROGRESS_UPDATED);
        assert_eq!(event.payload, json!({ "key": "k", "loaded": 3 }));
    }

    #[test]
    fn channel_sink_without_subscribers_does_not_panic() {
        let (sink, receiver) = ChannelSink::new(1);
        drop(receiver);
        sink.emit_value(CACHE_UPDATED, json!(null));
    }
}
