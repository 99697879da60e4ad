//! The seam between the playback state machine and the media elements.
//!
//! A backend owns one audio and one video element. The controller decides
//! which of them is active; the backend only carries out element operations
//! and reports element events back as [`SessionEvent`]s.

use std::time::Duration;

use super::{MediaKind, PlayerError};

/// Identifies one load of one item. Every event a binding emits carries the
/// id of the session that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub(crate) u64);

#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// The `play()` request resolved and the element is running.
    Started,
    /// The `play()` request was refused by the element.
    PlayRejected(String),
    TimeUpdate(f64),
    DurationChange(f64),
    Ended,
    /// The rewind preview timer with this token elapsed.
    PreviewElapsed(u64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionEvent {
    pub session: SessionId,
    pub event: MediaEvent,
}

impl SessionEvent {
    pub fn new(session: SessionId, event: MediaEvent) -> Self {
        Self { session, event }
    }
}

pub trait MediaBackend {
    /// Handle to the user-selected data, e.g. a browser `File`.
    type Source;

    /// Everything scoped to one session: the element listeners and the
    /// playable source URL. Dropping it detaches the listeners and releases
    /// the source.
    type Binding;

    /// A scheduled [`SessionEvent`]. Dropping it cancels delivery.
    type Timer;

    /// Bind `source` to the element of `kind` and attach exactly one set of
    /// `ended`, `timeupdate` and `durationchange` listeners tagged with
    /// `session`.
    fn bind(
        &mut self,
        session: SessionId,
        kind: MediaKind,
        source: &Self::Source,
    ) -> Result<Self::Binding, PlayerError>;

    fn set_visible(&mut self, kind: MediaKind, visible: bool);

    /// Request playback. The outcome arrives later as
    /// [`MediaEvent::Started`] or [`MediaEvent::PlayRejected`].
    fn play(&mut self, session: SessionId, kind: MediaKind);

    fn pause(&mut self, kind: MediaKind);

    /// Pause and rewind to the start.
    fn stop(&mut self, kind: MediaKind) {
        self.pause(kind);
        self.seek(kind, 0.0);
    }

    fn position(&self, kind: MediaKind) -> f64;

    fn seek(&mut self, kind: MediaKind, seconds: f64);

    fn schedule(&mut self, delay: Duration, event: SessionEvent) -> Self::Timer;
}
