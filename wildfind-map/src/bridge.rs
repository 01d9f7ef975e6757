//! Notifications sent from the map view to the embedding host application.

use log::{debug, info, warn};
use maybe_sync::{MaybeSend, MaybeSync};
use serde::Serialize;

/// Host-provided receiver of map view notifications.
///
/// All notifications are fire-and-forget. List payloads are JSON encoded arrays, so that the
/// host can pass them through any string based channel unchanged.
pub trait HostBridge: MaybeSend + MaybeSync {
    /// The user panned or zoomed the map.
    fn on_interaction(&self);
    /// Names of the available basemap layers as a JSON array of strings.
    fn on_layer_names(&self, names: &str);
    /// Frequencies of the locations selected with a drag box as a JSON array of numbers.
    fn on_selected(&self, frequencies: &str);
    /// A long running operation (heatmap image load) finished. The host raises the busy state
    /// itself when it requests the operation, so `busy` is always `false`.
    fn on_busy(&self, _busy: bool) {}
    /// The heatmap image could not be loaded.
    fn on_heatmap_error(&self, _message: &str) {}
}

/// Bridge that writes every notification to the log. Used when running a view outside of a host.
pub struct LoggingBridge {}

impl HostBridge for LoggingBridge {
    fn on_interaction(&self) {
        info!("interaction");
    }

    fn on_layer_names(&self, names: &str) {
        info!("layer names: {names}");
    }

    fn on_selected(&self, frequencies: &str) {
        info!("selected: {frequencies}");
    }

    fn on_busy(&self, busy: bool) {
        info!("busy: {busy}");
    }

    fn on_heatmap_error(&self, message: &str) {
        warn!("heatmap error: {message}");
    }
}

/// Optional bridge connection. Without a bridge the view runs headless and notifications are
/// dropped.
#[derive(Default)]
pub(crate) struct BridgeLink {
    bridge: Option<Box<dyn HostBridge>>,
}

impl BridgeLink {
    pub(crate) fn new(bridge: Option<Box<dyn HostBridge>>) -> Self {
        Self { bridge }
    }

    pub(crate) fn is_headless(&self) -> bool {
        self.bridge.is_none()
    }

    pub(crate) fn interaction(&self) {
        if let Some(bridge) = &self.bridge {
            bridge.on_interaction();
        }
    }

    pub(crate) fn layer_names<S: Serialize>(&self, names: &[S]) {
        let Some(bridge) = &self.bridge else {
            debug!("No bridge, {} layer names not sent", names.len());
            return;
        };

        match serde_json::to_string(names) {
            Ok(json) => bridge.on_layer_names(&json),
            Err(err) => warn!("Failed to encode layer names: {err}"),
        }
    }

    pub(crate) fn selected(&self, frequencies: &[u64]) {
        let Some(bridge) = &self.bridge else {
            debug!("No bridge, selection of {} locations not sent", frequencies.len());
            return;
        };

        match serde_json::to_string(frequencies) {
            Ok(json) => bridge.on_selected(&json),
            Err(err) => warn!("Failed to encode selection: {err}"),
        }
    }

    pub(crate) fn busy(&self, busy: bool) {
        if let Some(bridge) = &self.bridge {
            bridge.on_busy(busy);
        }
    }

    pub(crate) fn heatmap_error(&self, message: &str) {
        if let Some(bridge) = &self.bridge {
            bridge.on_heatmap_error(message);
        }
    }
}
