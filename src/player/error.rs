use thiserror::Error;

/// Failures the player absorbs locally. None of them end the session or
/// leave the catalog pointing at a missing item.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlayerError {
    /// The selection contained files, but none of them were audio or video.
    #[error("Please select valid audio or video files.")]
    NoValidFiles,

    #[error("playlist index {index} is out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// The media element refused to start, usually because of autoplay policy.
    #[error("playback was rejected: {0}")]
    PlaybackRejected(String),

    /// No playable source could be bound to the element.
    #[error("media source unavailable: {0}")]
    SourceUnavailable(String),
}
