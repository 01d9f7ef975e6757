//! Map view of the Wild Find wildlife tracking application.
//!
//! The crate keeps the visual state of the tracking map without drawing it: a set of basemap
//! layers of which exactly one is visible, the detected signal locations with the track that
//! connects them, the position of the tracking receiver ("harrier") and a heatmap image produced
//! by the tracking server.
//!
//! # Quick start
//!
//! ```
//! use wildfind_map::{MapConfig, MapViewBuilder, LoggingBridge};
//!
//! let mut map = MapViewBuilder::default()
//!     .with_config(MapConfig::default())
//!     .with_bridge(LoggingBridge {})
//!     .build()
//!     .unwrap();
//! map.initialize().unwrap();
//!
//! map.add_location(150_120_000, 60.0, -42.5, -1.0, 51.0).unwrap();
//! map.add_location(150_120_000, 60.0, -41.0, -1.01, 51.02).unwrap();
//! map.set_harrier(-1.005, 51.01).unwrap();
//! map.follow();
//!
//! assert_eq!(map.track().len(), 2);
//! ```
//!
//! # Main components
//!
//! * [`MapView`] owns the state and exposes the operations the host calls.
//! * [`HostBridge`] is implemented by the host to receive notifications: user interaction, the
//!   list of basemap names, drag-box selections and the progress of heatmap loads.
//! * [`Messenger`] is implemented by the renderer to learn that the map must be repainted.
//! * [`control::EventProcessor`] converts raw window events into clicks and drags, which the
//!   map view turns into panning, zooming, popups and selections.
//! * [`loader::ImageLoader`] fetches the heatmap image.

pub mod bridge;
mod color;
pub mod config;
pub mod control;
pub mod decoded_image;
pub mod error;
pub mod layer;
pub mod loader;
mod map_view;
mod messenger;
pub mod popup;
pub mod scale;
mod view;

pub use bridge::{HostBridge, LoggingBridge};
pub use color::Color;
pub use config::MapConfig;
pub use error::MapError;
pub use layer::symbol;
pub use map_view::{MapView, MapViewBuilder, SecondaryView, SelectionResult};
pub use messenger::{DummyMessenger, Messenger};
pub use view::{resolution_to_zoom, zoom_to_resolution, Viewport};

// Reexport wildfind_types
pub use wildfind_types;

#[cfg(test)]
mod tests;
