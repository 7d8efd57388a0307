//! Events the picker emits to renderers, notification toasts and host bridges.
//!
//! The engine only writes to an [`EventSink`]; it never reads UI state back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::catalog::AssetKind;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// Events emitted by the picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PickerEvent {
    /// The selection of one asset kind changed.
    SelectionChanged {
        kind: AssetKind,
        /// Display names of selected entries, in catalog order.
        selected: Vec<String>,
    },
    /// A toggle was refused because the cap was reached.
    SelectionRejected { kind: AssetKind, max: usize },
    /// A catalog was (re)loaded.
    CatalogLoaded { kind: AssetKind, total: usize },
    /// A user-visible message.
    Notification { message: String, severity: Severity },
}

impl PickerEvent {
    pub fn notification(message: impl Into<String>, severity: Severity) -> Self {
        PickerEvent::Notification {
            message: message.into(),
            severity,
        }
    }

    /// Short name used for metrics labels and logs.
    pub fn event_type(&self) -> &'static str {
        match self {
            PickerEvent::SelectionChanged { .. } => "selection_changed",
            PickerEvent::SelectionRejected { .. } => "selection_rejected",
            PickerEvent::CatalogLoaded { .. } => "catalog_loaded",
            PickerEvent::Notification { .. } => "notification",
        }
    }
}

/// Envelope wrapping an event with its emission time.
#[derive(Debug, Clone, Serialize)]
pub struct PickerEventEnvelope {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: PickerEvent,
}

/// Receiver of picker events.
///
/// Emission is fire-and-forget: implementations must not block and must not
/// fail the caller.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: PickerEvent);
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: PickerEvent) {}
}

/// Sink fanning events out to any number of subscribers over a tokio
/// broadcast channel.
#[derive(Debug, Clone)]
pub struct BroadcastSink {
    sender: broadcast::Sender<PickerEventEnvelope>,
}

impl BroadcastSink {
    /// Create a new sink with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to receive events.
    pub fn subscribe(&self) -> broadcast::Receiver<PickerEventEnvelope> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastSink {
    fn default() -> Self {
        Self::new(256)
    }
}

impl EventSink for BroadcastSink {
    fn emit(&self, event: PickerEvent) {
        tracing::trace!("Emitting {} event", event.event_type());
        let envelope = PickerEventEnvelope {
            timestamp: Utc::now(),
            event,
        };
        // A send error only means no one is listening
        let _ = self.sender.send(envelope);
    }
}
