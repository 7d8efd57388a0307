//! Recording event sink for testing.

use std::sync::{Mutex, MutexGuard};

use crate::catalog::AssetKind;
use crate::events::{EventSink, PickerEvent, Severity};

/// Event sink that keeps every event for later assertions.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use modelpicker_core::testing::RecordingSink;
///
/// let sink = Arc::new(RecordingSink::new());
/// let mut picker = ModelPicker::new(&config, sink.clone(), store);
///
/// picker.toggle(AssetKind::Model, "model_0")?;
/// assert_eq!(sink.selection_changes(AssetKind::Model).len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<PickerEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, Vec<PickerEvent>> {
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// All recorded events, oldest first.
    pub fn events(&self) -> Vec<PickerEvent> {
        self.guard().clone()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.guard().clear();
    }

    /// The `selected` payload of every selection change for `kind`.
    pub fn selection_changes(&self, kind: AssetKind) -> Vec<Vec<String>> {
        self.guard()
            .iter()
            .filter_map(|event| match event {
                PickerEvent::SelectionChanged {
                    kind: changed,
                    selected,
                } if *changed == kind => Some(selected.clone()),
                _ => None,
            })
            .collect()
    }

    /// Every notification as `(message, severity)`.
    pub fn notifications(&self) -> Vec<(String, Severity)> {
        self.guard()
            .iter()
            .filter_map(|event| match event {
                PickerEvent::Notification { message, severity } => {
                    Some((message.clone(), *severity))
                }
                _ => None,
            })
            .collect()
    }

    /// The most recent notification, if any.
    pub fn last_notification(&self) -> Option<(String, Severity)> {
        self.notifications().pop()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: PickerEvent) {
        self.guard().push(event);
    }
}
