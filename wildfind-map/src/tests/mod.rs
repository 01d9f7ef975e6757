use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use crate::bridge::HostBridge;
use crate::error::MapError;
use crate::loader::ImageLoader;
use crate::messenger::Messenger;

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Interaction,
    LayerNames(String),
    Selected(String),
    Busy(bool),
    HeatmapError(String),
}

#[derive(Clone, Default)]
pub struct RecordingBridge {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingBridge {
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.notifications.lock().unwrap())
    }

    pub fn interactions(&self) -> usize {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| **n == Notification::Interaction)
            .count()
    }

    fn push(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

impl HostBridge for RecordingBridge {
    fn on_interaction(&self) {
        self.push(Notification::Interaction);
    }

    fn on_layer_names(&self, names: &str) {
        self.push(Notification::LayerNames(names.to_string()));
    }

    fn on_selected(&self, frequencies: &str) {
        self.push(Notification::Selected(frequencies.to_string()));
    }

    fn on_busy(&self, busy: bool) {
        self.push(Notification::Busy(busy));
    }

    fn on_heatmap_error(&self, message: &str) {
        self.push(Notification::HeatmapError(message.to_string()));
    }
}

#[derive(Clone, Default)]
pub struct CountingMessenger {
    redraws: Arc<AtomicUsize>,
}

impl CountingMessenger {
    pub fn redraws(&self) -> usize {
        self.redraws.load(Ordering::Relaxed)
    }
}

impl Messenger for CountingMessenger {
    fn request_redraw(&self) {
        self.redraws.fetch_add(1, Ordering::Relaxed);
    }
}

/// Serves a small PNG for every url, or fails with the given status.
pub struct TestImageLoader {
    pub status: Option<u16>,
    pub requested: Mutex<Vec<String>>,
}

impl TestImageLoader {
    pub fn ok() -> Self {
        Self {
            status: None,
            requested: Mutex::new(vec![]),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            status: Some(status),
            requested: Mutex::new(vec![]),
        }
    }
}

#[async_trait]
impl ImageLoader for TestImageLoader {
    async fn load_bytes(&self, url: &str) -> Result<Bytes, MapError> {
        self.requested.lock().unwrap().push(url.to_string());
        if let Some(status) = self.status {
            return Err(MapError::IO(format!("{url}: {status}")));
        }

        let image = image::RgbaImage::from_pixel(4, 4, image::Rgba([255, 0, 0, 200]));
        let mut bytes = std::io::Cursor::new(Vec::new());
        image
            .write_to(&mut bytes, image::ImageOutputFormat::Png)
            .map_err(MapError::from)?;
        Ok(Bytes::from(bytes.into_inner()))
    }
}
