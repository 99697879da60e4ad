//! Render models for the playlist and the transport bar.
//!
//! Both are recomputed from the catalog and the session status on every
//! render and hold no state of their own.

use super::{Catalog, ItemId, MediaKind, SessionStatus};

pub const EMPTY_PLAYLIST: &str = "No files selected";

#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistRow {
    pub id: ItemId,
    pub index: usize,
    pub label: String,
    pub kind: MediaKind,
    pub is_playing: bool,
}

pub fn playlist_rows<S>(catalog: &Catalog<S>) -> Vec<PlaylistRow> {
    let active = catalog.active_index();
    catalog
        .items()
        .iter()
        .enumerate()
        .map(|(index, item)| PlaylistRow {
            id: item.id(),
            index,
            label: item.display_name().to_string(),
            kind: item.kind(),
            is_playing: active == Some(index),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransportModel {
    pub button_label: &'static str,
    pub enabled: bool,
    pub elapsed: String,
    pub total: String,
    pub now_playing: Option<String>,
    pub kind: Option<MediaKind>,
    pub notice: Option<String>,
}

impl TransportModel {
    pub fn time_text(&self) -> String {
        format!("{} / {}", self.elapsed, self.total)
    }
}

pub fn transport_model(status: Option<&SessionStatus>) -> TransportModel {
    match status {
        Some(status) => TransportModel {
            button_label: if status.state.is_playing() { "Pause" } else { "Play" },
            enabled: true,
            elapsed: format_time(status.position),
            total: format_time(status.duration),
            now_playing: Some(status.display_name.clone()),
            kind: Some(status.kind),
            notice: status.notice.as_ref().map(ToString::to_string),
        },
        None => TransportModel {
            button_label: "Play",
            enabled: false,
            elapsed: format_time(0.0),
            total: format_time(0.0),
            now_playing: None,
            kind: None,
            notice: None,
        },
    }
}

/// Format seconds as zero-padded `mm:ss`. Unknown or unbounded times read `00:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "00:00".to_string();
    }
    let whole = seconds.floor() as u64;
    format!("{:02}:{:02}", whole / 60, whole % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{Candidate, ItemId, PlaybackState, PlayerError, SessionId};

    fn status(state: PlaybackState) -> SessionStatus {
        SessionStatus {
            id: SessionId(1),
            item: catalog_item_id(),
            display_name: "track.mp3".to_string(),
            kind: MediaKind::Audio,
            state,
            position: 65.4,
            duration: f64::NAN,
            notice: None,
        }
    }

    fn catalog_item_id() -> ItemId {
        let mut catalog = Catalog::new();
        catalog
            .add(vec![Candidate::new((), "track.mp3", "audio/mpeg")])
            .unwrap();
        catalog.items()[0].id()
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(65.0), "01:05");
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(59.99), "00:59");
        assert_eq!(format_time(f64::NAN), "00:00");
        assert_eq!(format_time(f64::INFINITY), "00:00");
        assert_eq!(format_time(-4.0), "00:00");
        assert_eq!(format_time(6000.0), "100:00");
    }

    #[test]
    fn test_playlist_rows_mark_active() {
        let mut catalog = Catalog::new();
        catalog
            .add(vec![
                Candidate::new((), "a.mp3", "audio/mpeg"),
                Candidate::new((), "b.mp4", "video/mp4"),
            ])
            .unwrap();
        assert!(playlist_rows(&catalog).iter().all(|row| !row.is_playing));

        catalog.set_active(1).unwrap();
        let rows = playlist_rows(&catalog);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "a.mp3");
        assert!(!rows[0].is_playing);
        assert!(rows[1].is_playing);
        assert_eq!(rows[1].kind, MediaKind::Video);
    }

    #[test]
    fn test_transport_without_session_is_disabled() {
        let model = transport_model(None);
        assert!(!model.enabled);
        assert_eq!(model.button_label, "Play");
        assert_eq!(model.time_text(), "00:00 / 00:00");
    }

    #[test]
    fn test_transport_labels_follow_state() {
        assert_eq!(transport_model(Some(&status(PlaybackState::Loading))).button_label, "Pause");
        assert_eq!(transport_model(Some(&status(PlaybackState::Playing))).button_label, "Pause");
        assert_eq!(transport_model(Some(&status(PlaybackState::Paused))).button_label, "Play");
        assert_eq!(transport_model(Some(&status(PlaybackState::Idle))).button_label, "Play");

        let model = transport_model(Some(&status(PlaybackState::Playing)));
        assert!(model.enabled);
        assert_eq!(model.time_text(), "01:05 / 00:00");
        assert_eq!(model.now_playing.as_deref(), Some("track.mp3"));
    }

    #[test]
    fn test_transport_shows_notice() {
        let mut paused = status(PlaybackState::Paused);
        paused.notice = Some(PlayerError::PlaybackRejected("NotAllowedError".into()));

        let model = transport_model(Some(&paused));

        assert_eq!(model.button_label, "Play");
        assert_eq!(
            model.notice.as_deref(),
            Some("playback was rejected: NotAllowedError")
        );
    }
}
