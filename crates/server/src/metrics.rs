//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the model picker server:
//! - HTTP request metrics (latency, counts)
//! - WebSocket connection metrics
//! - Picker state gauges (collected dynamically)
//! - Engine metrics registered from the core crate

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, IntGaugeVec,
    Opts, Registry, TextEncoder,
};

use modelpicker_core::AssetKind;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "modelpicker_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("modelpicker_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "modelpicker_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// WebSocket Metrics
// =============================================================================

/// Active WebSocket connections.
pub static WS_CONNECTIONS_ACTIVE: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "modelpicker_ws_connections_active",
        "Number of active WebSocket connections",
    )
    .unwrap()
});

/// Total WebSocket connections (cumulative).
pub static WS_CONNECTIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "modelpicker_ws_connections_total",
        "Total WebSocket connections since startup",
    )
    .unwrap()
});

/// WebSocket messages sent by event type.
pub static WS_MESSAGES_SENT: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("modelpicker_ws_messages_sent_total", "WebSocket messages sent"),
        &["type"],
    )
    .unwrap()
});

/// WebSocket lag events (when client falls behind).
pub static WS_LAG_EVENTS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "modelpicker_ws_lag_events_total",
        "WebSocket lag events (client fell behind)",
    )
    .unwrap()
});

// =============================================================================
// Picker Metrics (collected dynamically)
// =============================================================================

/// Current selection size by asset kind.
pub static SELECTED_ENTRIES: Lazy<IntGaugeVec> = Lazy::new(|| {
    IntGaugeVec::new(
        Opts::new(
            "modelpicker_selected_entries",
            "Currently selected entries by asset kind",
        ),
        &["kind"],
    )
    .unwrap()
});

/// Working modes (1 = on, 0 = off).
pub static MODE_ENABLED: Lazy<IntGaugeVec> = Lazy::new(|| {
    IntGaugeVec::new(
        Opts::new("modelpicker_mode_enabled", "Whether a working mode is on"),
        &["mode"],
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // WebSocket
    registry
        .register(Box::new(WS_CONNECTIONS_ACTIVE.clone()))
        .unwrap();
    registry
        .register(Box::new(WS_CONNECTIONS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(WS_MESSAGES_SENT.clone()))
        .unwrap();
    registry.register(Box::new(WS_LAG_EVENTS.clone())).unwrap();

    // Picker
    registry
        .register(Box::new(SELECTED_ENTRIES.clone()))
        .unwrap();
    registry.register(Box::new(MODE_ENABLED.clone())).unwrap();

    // Core metrics (catalog, selection, settings)
    for metric in modelpicker_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Update the picker gauges from current application state.
///
/// Called before encoding so the gauges reflect the live picker.
pub fn collect_dynamic_metrics(state: &crate::state::AppState) {
    let Ok(picker) = state.picker() else {
        return;
    };

    for kind in AssetKind::ALL {
        SELECTED_ENTRIES
            .with_label_values(&[kind.id_prefix()])
            .set(picker.selection(kind).len() as i64);
    }

    let flags = picker.flags();
    MODE_ENABLED
        .with_label_values(&["sdxl"])
        .set(i64::from(flags.sdxl));
    MODE_ENABLED
        .with_label_values(&["inpainting"])
        .set(i64::from(flags.inpainting));
}

/// Normalize a path for metric labels.
///
/// Preset names are free-form, so the segment after `/presets/` is replaced
/// by a placeholder.
pub fn normalize_path(path: &str) -> String {
    let mut previous = "";
    let segments: Vec<&str> = path
        .split('/')
        .map(|segment| {
            let normalized = if previous == "presets" && !segment.is_empty() {
                "{name}"
            } else {
                segment
            };
            previous = segment;
            normalized
        })
        .collect();
    segments.join("/")
}
