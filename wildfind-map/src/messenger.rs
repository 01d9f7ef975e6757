use maybe_sync::{MaybeSend, MaybeSync};

/// Hook of the rendering backend. The map view calls it every time its visual state changes.
pub trait Messenger: MaybeSend + MaybeSync {
    /// Notifies the renderer that the map must be repainted.
    fn request_redraw(&self);
}

/// Messenger that ignores all redraw requests. Useful for headless operation.
pub struct DummyMessenger {}

impl Messenger for DummyMessenger {
    fn request_redraw(&self) {}
}
