//! Media Manager - owns the page's audio and video elements.
//! The playback controller drives them through [`MediaBackend`]; element
//! events come back as [`SessionEvent`]s through an [`EventSink`].

use std::rc::Rc;

use crate::player::SessionEvent;
#[cfg(not(target_arch = "wasm32"))]
use crate::player::{MediaBackend, MediaKind, PlayerError, SessionId};

#[cfg(target_arch = "wasm32")]
mod shortcuts;
#[cfg(target_arch = "wasm32")]
mod web_backend;

#[cfg(target_arch = "wasm32")]
pub use shortcuts::install_keyboard_shortcuts;
#[cfg(target_arch = "wasm32")]
pub use web_backend::WebMediaBackend;

pub const AUDIO_ELEMENT_ID: &str = "mediadeck-audio";
pub const VIDEO_ELEMENT_ID: &str = "mediadeck-video";

/// Where element listeners and timers deliver their events.
pub type EventSink = Rc<dyn Fn(SessionEvent)>;

#[cfg(target_arch = "wasm32")]
pub type PageBackend = WebMediaBackend;
#[cfg(target_arch = "wasm32")]
pub type MediaSource = web_sys::File;

#[cfg(not(target_arch = "wasm32"))]
pub type PageBackend = DetachedBackend;
#[cfg(not(target_arch = "wasm32"))]
pub type MediaSource = String;

/// Stand-in used off the web, where there are no media elements to drive.
#[cfg(not(target_arch = "wasm32"))]
pub struct DetachedBackend;

#[cfg(not(target_arch = "wasm32"))]
impl DetachedBackend {
    pub fn attach(_sink: EventSink) -> Option<Self> {
        None
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl MediaBackend for DetachedBackend {
    type Source = MediaSource;
    type Binding = ();
    type Timer = ();

    fn bind(
        &mut self,
        _session: SessionId,
        _kind: MediaKind,
        _source: &MediaSource,
    ) -> Result<(), PlayerError> {
        Err(PlayerError::SourceUnavailable(
            "media elements require a browser".to_string(),
        ))
    }

    fn set_visible(&mut self, _kind: MediaKind, _visible: bool) {}

    fn play(&mut self, _session: SessionId, _kind: MediaKind) {}

    fn pause(&mut self, _kind: MediaKind) {}

    fn position(&self, _kind: MediaKind) -> f64 {
        0.0
    }

    fn seek(&mut self, _kind: MediaKind, _seconds: f64) {}

    fn schedule(&mut self, _delay: std::time::Duration, _event: SessionEvent) {}
}
