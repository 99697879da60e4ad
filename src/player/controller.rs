//! Playback state machine.
//!
//! The controller owns at most one [`PlaybackSession`]: the live binding
//! between the active catalog item and one of the backend's two elements.
//! Per session the state moves
//! `Idle -> Loading -> Playing <-> Paused -> (Ended -> Idle | Loading)`.
//!
//! Catalog and controller are separate values. Every operation that can
//! move the active index takes the catalog by reference, so the active item
//! and the bound session never drift apart.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::{
    Candidate, Catalog, ItemId, MediaBackend, MediaEvent, MediaKind, PlayerError,
    PlayerSettings, Removal, SessionEvent, SessionId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Loading,
    Playing,
    Paused,
    Ended,
}

impl PlaybackState {
    /// Whether the transport should offer "Pause".
    pub fn is_playing(self) -> bool {
        matches!(self, PlaybackState::Loading | PlaybackState::Playing)
    }
}

/// Display-facing state of the bound session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStatus {
    pub id: SessionId,
    pub item: ItemId,
    pub display_name: String,
    pub kind: MediaKind,
    pub state: PlaybackState,
    pub position: f64,
    pub duration: f64,
    /// Last recoverable failure, cleared on the next successful command.
    pub notice: Option<PlayerError>,
}

pub struct PlaybackSession<B: MediaBackend> {
    status: SessionStatus,
    // Dropped with the session; detaches listeners and releases the source.
    _binding: B::Binding,
}

struct Preview<T> {
    token: u64,
    session: SessionId,
    _timer: T,
}

pub struct PlaybackController<B: MediaBackend> {
    backend: B,
    settings: PlayerSettings,
    session: Option<PlaybackSession<B>>,
    preview: Option<Preview<B::Timer>>,
    next_session: u64,
    next_preview: u64,
}

impl<B: MediaBackend> PlaybackController<B> {
    pub fn new(backend: B, settings: PlayerSettings) -> Self {
        Self {
            backend,
            settings,
            session: None,
            preview: None,
            next_session: 0,
            next_preview: 0,
        }
    }

    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    pub fn status(&self) -> Option<&SessionStatus> {
        self.session.as_ref().map(|session| &session.status)
    }

    pub fn state(&self) -> PlaybackState {
        self.status()
            .map(|status| status.state)
            .unwrap_or(PlaybackState::Idle)
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.state().is_playing()
    }

    /// Add a file selection and start playing if nothing is active yet.
    pub fn enqueue<I>(
        &mut self,
        catalog: &mut Catalog<B::Source>,
        batch: I,
    ) -> Result<usize, PlayerError>
    where
        I: IntoIterator<Item = Candidate<B::Source>>,
    {
        let accepted = catalog.add(batch)?;
        info!(accepted, total = catalog.len(), "added files to playlist");

        if catalog.active().is_none() && !catalog.is_empty() {
            self.load(catalog, 0)?;
        }
        Ok(accepted)
    }

    /// Remove a playlist entry, stopping playback if it was the active one.
    pub fn remove(
        &mut self,
        catalog: &mut Catalog<B::Source>,
        index: usize,
    ) -> Result<Removal<B::Source>, PlayerError> {
        let removal = catalog.remove_at(index)?;
        if removal.invalidates_active() {
            self.invalidate();
        }
        Ok(removal)
    }

    /// Make `index` the active entry and start playing it.
    ///
    /// The previous session is torn down first, so its listeners are gone
    /// before the new element gets any.
    pub fn load(
        &mut self,
        catalog: &mut Catalog<B::Source>,
        index: usize,
    ) -> Result<(), PlayerError> {
        if catalog.get(index).is_none() {
            return Err(PlayerError::IndexOutOfRange {
                index,
                len: catalog.len(),
            });
        }

        self.release_session();

        let item = catalog.set_active(index)?;
        let (item_id, kind) = (item.id(), item.kind());
        let display_name = item.display_name().to_string();

        self.next_session += 1;
        let session_id = SessionId(self.next_session);

        let other = kind.other();
        self.backend.stop(other);
        self.backend.set_visible(other, false);

        let binding = match self.backend.bind(session_id, kind, item.source()) {
            Ok(binding) => binding,
            Err(err) => {
                warn!(item = %display_name, "failed to bind media source: {err}");
                catalog.deactivate();
                return Err(err);
            }
        };
        self.backend.set_visible(kind, true);

        info!(item = %display_name, %kind, index, "loading media");
        self.session = Some(PlaybackSession {
            status: SessionStatus {
                id: session_id,
                item: item_id,
                display_name,
                kind,
                state: PlaybackState::Loading,
                position: 0.0,
                duration: f64::NAN,
                notice: None,
            },
            _binding: binding,
        });
        self.backend.play(session_id, kind);
        Ok(())
    }

    pub fn toggle_play_pause(&mut self) {
        self.cancel_preview();
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let status = &mut session.status;

        if status.state.is_playing() {
            self.backend.pause(status.kind);
            status.state = PlaybackState::Paused;
        } else {
            status.notice = None;
            status.state = PlaybackState::Playing;
            self.backend.play(status.id, status.kind);
        }
    }

    /// Move the playhead by `delta` seconds, never before the start.
    ///
    /// Seeking past the end is left to the element. Rewinding while paused
    /// plays a short preview unless another command supersedes it.
    pub fn skip(&mut self, delta: f64) {
        self.cancel_preview();
        let was_playing = self.is_playing();
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let status = &mut session.status;

        let target = (self.backend.position(status.kind) + delta).max(0.0);
        self.backend.seek(status.kind, target);
        status.position = target;

        if delta < 0.0 && self.settings.preview_on_rewind && !was_playing {
            let (session_id, kind) = (status.id, status.kind);
            self.start_preview(session_id, kind);
        }
    }

    pub fn skip_back(&mut self) {
        self.skip(-self.settings.skip_seconds);
    }

    pub fn skip_forward(&mut self) {
        self.skip(self.settings.skip_seconds);
    }

    /// The bound item finished. Advances to the next entry when there is one.
    pub fn handle_ended(&mut self, catalog: &mut Catalog<B::Source>) {
        self.preview = None;
        let next = catalog.next_index();
        let Some(session) = self.session.as_mut() else {
            return;
        };

        session.status.state = match next {
            Some(_) => PlaybackState::Ended,
            None => PlaybackState::Idle,
        };

        match next {
            Some(index) => {
                if let Err(err) = self.load(catalog, index) {
                    warn!(index, "auto-advance failed: {err}");
                }
            }
            None => info!("reached end of playlist"),
        }
    }

    /// The bound item left the catalog.
    pub fn invalidate(&mut self) {
        if self.has_session() {
            info!("active item removed, stopping playback");
        }
        self.release_session();
    }

    pub fn shutdown(&mut self) {
        self.release_session();
    }

    /// Apply an event reported by the backend.
    pub fn handle_event(&mut self, catalog: &mut Catalog<B::Source>, event: SessionEvent) {
        if let Some(MediaEvent::Ended) = self.apply_event(event) {
            self.handle_ended(catalog);
        }
    }

    /// Apply the part of a backend event that leaves the catalog alone.
    ///
    /// Events that need the catalog (`Ended`) are handed back for
    /// [`Self::handle_ended`]. Events from superseded sessions are dropped.
    pub fn apply_event(&mut self, event: SessionEvent) -> Option<MediaEvent> {
        let current = self.status().map(|status| status.id);
        if current != Some(event.session) {
            debug!(?event, "dropping event from a superseded session");
            return None;
        }

        match event.event {
            MediaEvent::Started => {
                if let Some(session) = self.session.as_mut() {
                    if session.status.state == PlaybackState::Loading {
                        session.status.state = PlaybackState::Playing;
                    }
                }
            }
            MediaEvent::PlayRejected(reason) => self.on_play_rejected(reason),
            MediaEvent::TimeUpdate(position) => {
                if let Some(session) = self.session.as_mut() {
                    session.status.position = position;
                }
            }
            MediaEvent::DurationChange(duration) => {
                if let Some(session) = self.session.as_mut() {
                    session.status.duration = duration;
                }
            }
            MediaEvent::Ended => return Some(MediaEvent::Ended),
            MediaEvent::PreviewElapsed(token) => self.on_preview_elapsed(token),
        }
        None
    }

    fn on_play_rejected(&mut self, reason: String) {
        // A pause issued while play() was pending aborts that request.
        if !self.is_playing() {
            debug!(%reason, "ignoring rejection of a superseded play request");
            return;
        }
        let err = PlayerError::PlaybackRejected(reason);
        warn!("{err}");
        self.preview = None;
        if let Some(session) = self.session.as_mut() {
            session.status.state = PlaybackState::Paused;
            session.status.notice = Some(err);
        }
    }

    fn start_preview(&mut self, session: SessionId, kind: MediaKind) {
        self.next_preview += 1;
        let token = self.next_preview;
        self.backend.play(session, kind);

        let delay = Duration::from_millis(u64::from(self.settings.preview_ms));
        let timer = self.backend.schedule(
            delay,
            SessionEvent::new(session, MediaEvent::PreviewElapsed(token)),
        );
        self.preview = Some(Preview {
            token,
            session,
            _timer: timer,
        });
    }

    fn on_preview_elapsed(&mut self, token: u64) {
        match &self.preview {
            Some(preview) if preview.token == token => {}
            _ => {
                debug!(token, "ignoring superseded preview timer");
                return;
            }
        }
        self.preview = None;
        if let Some(status) = self.status() {
            if !status.state.is_playing() {
                let kind = status.kind;
                self.backend.pause(kind);
            }
        }
    }

    /// Drop a pending preview. A preview that has not elapsed yet is still
    /// playing audibly, so the element goes back to paused.
    fn cancel_preview(&mut self) {
        let Some(preview) = self.preview.take() else {
            return;
        };
        if let Some(status) = self.status() {
            if status.id == preview.session && !status.state.is_playing() {
                let kind = status.kind;
                self.backend.pause(kind);
            }
        }
    }

    fn release_session(&mut self) {
        self.preview = None;
        if let Some(session) = self.session.take() {
            let kind = session.status.kind;
            self.backend.stop(kind);
            drop(session);
            self.backend.set_visible(kind, false);
        }
    }
}

impl<B: MediaBackend> Drop for PlaybackController<B> {
    fn drop(&mut self) {
        self.release_session();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Bind(SessionId, MediaKind, &'static str),
        Release(SessionId),
        Show(MediaKind),
        Hide(MediaKind),
        Play(SessionId, MediaKind),
        Pause(MediaKind),
        Seek(MediaKind, f64),
        Schedule(SessionEvent),
        DropTimer(SessionEvent),
    }

    #[derive(Default)]
    struct Shared {
        ops: Vec<Op>,
        position: f64,
        fail_bind: bool,
    }

    #[derive(Clone, Default)]
    struct FakeBackend(Rc<RefCell<Shared>>);

    struct FakeBinding {
        session: SessionId,
        shared: Rc<RefCell<Shared>>,
    }

    impl Drop for FakeBinding {
        fn drop(&mut self) {
            self.shared.borrow_mut().ops.push(Op::Release(self.session));
        }
    }

    struct FakeTimer {
        event: SessionEvent,
        shared: Rc<RefCell<Shared>>,
    }

    impl Drop for FakeTimer {
        fn drop(&mut self) {
            let event = self.event.clone();
            self.shared.borrow_mut().ops.push(Op::DropTimer(event));
        }
    }

    impl FakeBackend {
        fn record(&self, op: Op) {
            self.0.borrow_mut().ops.push(op);
        }

        fn ops(&self) -> Vec<Op> {
            self.0.borrow().ops.clone()
        }

        fn clear(&self) {
            self.0.borrow_mut().ops.clear();
        }

        fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
            self.0.borrow().ops.iter().filter(|op| pred(op)).count()
        }
    }

    impl MediaBackend for FakeBackend {
        type Source = &'static str;
        type Binding = FakeBinding;
        type Timer = FakeTimer;

        fn bind(
            &mut self,
            session: SessionId,
            kind: MediaKind,
            source: &Self::Source,
        ) -> Result<FakeBinding, PlayerError> {
            if self.0.borrow().fail_bind {
                return Err(PlayerError::SourceUnavailable("no object url".into()));
            }
            self.record(Op::Bind(session, kind, *source));
            self.0.borrow_mut().position = 0.0;
            Ok(FakeBinding {
                session,
                shared: self.0.clone(),
            })
        }

        fn set_visible(&mut self, kind: MediaKind, visible: bool) {
            self.record(if visible { Op::Show(kind) } else { Op::Hide(kind) });
        }

        fn play(&mut self, session: SessionId, kind: MediaKind) {
            self.record(Op::Play(session, kind));
        }

        fn pause(&mut self, kind: MediaKind) {
            self.record(Op::Pause(kind));
        }

        fn position(&self, _kind: MediaKind) -> f64 {
            self.0.borrow().position
        }

        fn seek(&mut self, kind: MediaKind, seconds: f64) {
            self.0.borrow_mut().position = seconds;
            self.record(Op::Seek(kind, seconds));
        }

        fn schedule(&mut self, _delay: Duration, event: SessionEvent) -> FakeTimer {
            self.record(Op::Schedule(event.clone()));
            FakeTimer {
                event,
                shared: self.0.clone(),
            }
        }
    }

    type Fixture = (
        FakeBackend,
        PlaybackController<FakeBackend>,
        Catalog<&'static str>,
    );

    fn fixture() -> Fixture {
        let backend = FakeBackend::default();
        let controller = PlaybackController::new(backend.clone(), PlayerSettings::default());
        (backend, controller, Catalog::new())
    }

    fn audio(name: &'static str) -> Candidate<&'static str> {
        Candidate::new(name, name, "audio/mpeg")
    }

    fn video(name: &'static str) -> Candidate<&'static str> {
        Candidate::new(name, name, "video/mp4")
    }

    fn session_id(controller: &PlaybackController<FakeBackend>) -> SessionId {
        controller.status().expect("session bound").id
    }

    #[test]
    fn test_enqueue_autoloads_first_item() {
        let (backend, mut controller, mut catalog) = fixture();

        let accepted = controller
            .enqueue(&mut catalog, vec![video("clip.mp4"), audio("song.mp3")])
            .unwrap();

        assert_eq!(accepted, 2);
        assert_eq!(catalog.active_index(), Some(0));
        let status = controller.status().unwrap();
        assert_eq!(status.kind, MediaKind::Video);
        assert_eq!(status.state, PlaybackState::Loading);
        assert!(controller.is_playing());

        let ops = backend.ops();
        assert!(ops.contains(&Op::Hide(MediaKind::Audio)));
        assert!(ops.contains(&Op::Show(MediaKind::Video)));
        assert_eq!(ops.last(), Some(&Op::Play(status.id, MediaKind::Video)));
    }

    #[test]
    fn test_enqueue_keeps_current_session() {
        let (backend, mut controller, mut catalog) = fixture();
        controller.enqueue(&mut catalog, vec![audio("a")]).unwrap();
        let first = session_id(&controller);

        controller.enqueue(&mut catalog, vec![audio("b")]).unwrap();

        assert_eq!(session_id(&controller), first);
        assert_eq!(backend.count(|op| matches!(op, Op::Bind(..))), 1);
    }

    #[test]
    fn test_enqueue_without_media_changes_nothing() {
        let (backend, mut controller, mut catalog) = fixture();

        let result = controller.enqueue(
            &mut catalog,
            vec![Candidate::new("doc", "readme.txt", "text/plain")],
        );

        assert_eq!(result, Err(PlayerError::NoValidFiles));
        assert!(catalog.is_empty());
        assert!(!controller.has_session());
        assert!(backend.ops().is_empty());
    }

    #[test]
    fn test_remove_active_then_select_swaps_element() {
        let (backend, mut controller, mut catalog) = fixture();
        controller
            .enqueue(&mut catalog, vec![video("clip.mp4"), audio("song.mp3")])
            .unwrap();
        let video_session = session_id(&controller);

        let removal = controller.remove(&mut catalog, 0).unwrap();
        assert!(removal.invalidates_active());
        assert_eq!(catalog.active_index(), None);
        assert!(!controller.has_session());
        assert_eq!(controller.state(), PlaybackState::Idle);
        assert!(backend.ops().contains(&Op::Release(video_session)));

        backend.clear();
        controller.load(&mut catalog, 0).unwrap();

        assert_eq!(controller.status().unwrap().kind, MediaKind::Audio);
        let ops = backend.ops();
        assert!(ops.contains(&Op::Hide(MediaKind::Video)));
        assert!(ops.contains(&Op::Show(MediaKind::Audio)));
    }

    #[test]
    fn test_remove_before_active_keeps_session() {
        let (backend, mut controller, mut catalog) = fixture();
        controller
            .enqueue(&mut catalog, vec![audio("a"), audio("b"), audio("c")])
            .unwrap();
        controller.load(&mut catalog, 2).unwrap();
        let session = session_id(&controller);
        let item = controller.status().unwrap().item;
        backend.clear();

        controller.remove(&mut catalog, 0).unwrap();

        assert_eq!(catalog.active_index(), Some(1));
        assert_eq!(catalog.active().unwrap().id(), item);
        assert_eq!(session_id(&controller), session);
        assert!(backend.ops().is_empty());
    }

    #[test]
    fn test_remove_out_of_range_is_a_no_op() {
        let (backend, mut controller, mut catalog) = fixture();
        controller.enqueue(&mut catalog, vec![audio("a")]).unwrap();
        backend.clear();

        assert!(controller.remove(&mut catalog, 5).is_err());
        assert!(controller.has_session());
        assert!(backend.ops().is_empty());
    }

    #[test]
    fn test_load_detaches_before_attaching() {
        let (backend, mut controller, mut catalog) = fixture();
        controller
            .enqueue(&mut catalog, vec![audio("a"), video("b")])
            .unwrap();
        let first = session_id(&controller);

        controller.load(&mut catalog, 1).unwrap();
        let second = session_id(&controller);

        let ops = backend.ops();
        let released = ops.iter().position(|op| *op == Op::Release(first)).unwrap();
        let bound = ops
            .iter()
            .position(|op| *op == Op::Bind(second, MediaKind::Video, "b"))
            .unwrap();
        assert!(released < bound);
        assert_eq!(backend.count(|op| matches!(op, Op::Release(_))), 1);
    }

    #[test]
    fn test_load_out_of_range_keeps_session() {
        let (_backend, mut controller, mut catalog) = fixture();
        controller.enqueue(&mut catalog, vec![audio("a")]).unwrap();
        let session = session_id(&controller);

        assert!(controller.load(&mut catalog, 4).is_err());
        assert_eq!(session_id(&controller), session);
        assert_eq!(catalog.active_index(), Some(0));
    }

    #[test]
    fn test_failed_bind_leaves_player_idle() {
        let (backend, mut controller, mut catalog) = fixture();
        backend.0.borrow_mut().fail_bind = true;

        let result = controller.enqueue(&mut catalog, vec![audio("a")]);

        assert!(matches!(result, Err(PlayerError::SourceUnavailable(_))));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.active_index(), None);
        assert!(!controller.has_session());
    }

    #[test]
    fn test_stale_events_are_ignored() {
        let (_backend, mut controller, mut catalog) = fixture();
        controller
            .enqueue(&mut catalog, vec![audio("a"), audio("b"), audio("c")])
            .unwrap();
        let stale = session_id(&controller);
        controller.load(&mut catalog, 1).unwrap();
        let current = session_id(&controller);

        controller.handle_event(&mut catalog, SessionEvent::new(stale, MediaEvent::Ended));
        controller.handle_event(
            &mut catalog,
            SessionEvent::new(stale, MediaEvent::TimeUpdate(42.0)),
        );

        assert_eq!(session_id(&controller), current);
        assert_eq!(catalog.active_index(), Some(1));
        assert_eq!(controller.status().unwrap().position, 0.0);
    }

    #[test]
    fn test_time_and_duration_updates() {
        let (_backend, mut controller, mut catalog) = fixture();
        controller.enqueue(&mut catalog, vec![audio("a")]).unwrap();
        let session = session_id(&controller);

        controller.handle_event(&mut catalog, SessionEvent::new(session, MediaEvent::Started));
        controller.handle_event(
            &mut catalog,
            SessionEvent::new(session, MediaEvent::DurationChange(180.0)),
        );
        controller.handle_event(
            &mut catalog,
            SessionEvent::new(session, MediaEvent::TimeUpdate(12.5)),
        );

        let status = controller.status().unwrap();
        assert_eq!(status.state, PlaybackState::Playing);
        assert_eq!(status.duration, 180.0);
        assert_eq!(status.position, 12.5);
    }

    #[test]
    fn test_ended_advances_to_next_item() {
        let (backend, mut controller, mut catalog) = fixture();
        controller
            .enqueue(&mut catalog, vec![audio("a"), video("b")])
            .unwrap();
        let first = session_id(&controller);

        controller.handle_event(&mut catalog, SessionEvent::new(first, MediaEvent::Ended));

        assert_eq!(catalog.active_index(), Some(1));
        let status = controller.status().unwrap();
        assert_ne!(status.id, first);
        assert_eq!(status.kind, MediaKind::Video);
        assert_eq!(status.state, PlaybackState::Loading);
        assert_eq!(backend.count(|op| matches!(op, Op::Bind(..))), 2);
    }

    #[test]
    fn test_ended_on_last_item_goes_idle() {
        let (backend, mut controller, mut catalog) = fixture();
        controller
            .enqueue(&mut catalog, vec![audio("a"), audio("b")])
            .unwrap();
        controller.load(&mut catalog, 1).unwrap();
        let binds = backend.count(|op| matches!(op, Op::Bind(..)));

        controller.handle_ended(&mut catalog);

        assert_eq!(controller.state(), PlaybackState::Idle);
        assert!(!controller.is_playing());
        assert!(controller.has_session());
        assert_eq!(catalog.active_index(), Some(1));
        assert_eq!(backend.count(|op| matches!(op, Op::Bind(..))), binds);

        // The last item can be replayed from the transport.
        controller.toggle_play_pause();
        assert_eq!(controller.state(), PlaybackState::Playing);
    }

    #[test]
    fn test_toggle_play_pause() {
        let (backend, mut controller, mut catalog) = fixture();
        controller.toggle_play_pause();
        assert!(backend.ops().is_empty());

        controller.enqueue(&mut catalog, vec![audio("a")]).unwrap();
        let session = session_id(&controller);

        controller.toggle_play_pause();
        assert_eq!(controller.state(), PlaybackState::Paused);
        assert_eq!(backend.ops().last(), Some(&Op::Pause(MediaKind::Audio)));

        controller.toggle_play_pause();
        assert_eq!(controller.state(), PlaybackState::Playing);
        assert_eq!(backend.ops().last(), Some(&Op::Play(session, MediaKind::Audio)));
    }

    #[test]
    fn test_play_rejection_reverts_to_paused() {
        let (_backend, mut controller, mut catalog) = fixture();
        controller.enqueue(&mut catalog, vec![audio("a")]).unwrap();
        let session = session_id(&controller);

        controller.handle_event(
            &mut catalog,
            SessionEvent::new(session, MediaEvent::PlayRejected("NotAllowedError".into())),
        );

        let status = controller.status().unwrap();
        assert_eq!(status.state, PlaybackState::Paused);
        assert_eq!(
            status.notice,
            Some(PlayerError::PlaybackRejected("NotAllowedError".into()))
        );
        assert_eq!(catalog.active_index(), Some(0));

        controller.toggle_play_pause();
        let status = controller.status().unwrap();
        assert_eq!(status.state, PlaybackState::Playing);
        assert_eq!(status.notice, None);
    }

    #[test]
    fn test_rejection_after_user_pause_is_ignored() {
        let (_backend, mut controller, mut catalog) = fixture();
        controller.enqueue(&mut catalog, vec![audio("a")]).unwrap();
        let session = session_id(&controller);

        // Paused while the initial play() was still pending.
        controller.toggle_play_pause();
        controller.handle_event(
            &mut catalog,
            SessionEvent::new(session, MediaEvent::PlayRejected("AbortError".into())),
        );

        let status = controller.status().unwrap();
        assert_eq!(status.state, PlaybackState::Paused);
        assert_eq!(status.notice, None);
    }

    #[test]
    fn test_apply_event_hands_back_ended() {
        let (_backend, mut controller, mut catalog) = fixture();
        controller
            .enqueue(&mut catalog, vec![audio("a"), video("b")])
            .unwrap();
        let session = session_id(&controller);

        let follow_up =
            controller.apply_event(SessionEvent::new(session, MediaEvent::TimeUpdate(3.5)));
        assert_eq!(follow_up, None);
        assert_eq!(controller.status().unwrap().position, 3.5);

        let follow_up = controller.apply_event(SessionEvent::new(session, MediaEvent::Ended));
        assert_eq!(follow_up, Some(MediaEvent::Ended));
        assert_eq!(session_id(&controller), session);
        assert_eq!(catalog.active_index(), Some(0));

        controller.handle_ended(&mut catalog);
        assert_eq!(catalog.active_index(), Some(1));
        assert_ne!(session_id(&controller), session);
    }

    #[test]
    fn test_apply_event_drops_stale_ended() {
        let (_backend, mut controller, mut catalog) = fixture();
        controller
            .enqueue(&mut catalog, vec![audio("a"), audio("b")])
            .unwrap();
        let stale = session_id(&controller);
        controller.load(&mut catalog, 1).unwrap();

        assert_eq!(
            controller.apply_event(SessionEvent::new(stale, MediaEvent::Ended)),
            None
        );
    }

    #[test]
    fn test_skip_clamps_at_start() {
        let (backend, mut controller, mut catalog) = fixture();
        controller.skip(15.0);
        assert!(backend.ops().is_empty());

        controller.enqueue(&mut catalog, vec![audio("a")]).unwrap();
        controller.skip_forward();
        controller.skip_forward();
        assert_eq!(controller.status().unwrap().position, 30.0);

        controller.skip(-100.0);
        assert_eq!(backend.ops().last(), Some(&Op::Seek(MediaKind::Audio, 0.0)));
        assert_eq!(controller.status().unwrap().position, 0.0);
        assert_eq!(controller.state(), PlaybackState::Loading);
    }

    #[test]
    fn test_rewind_while_paused_previews() {
        let (backend, mut controller, mut catalog) = fixture();
        controller.enqueue(&mut catalog, vec![audio("a")]).unwrap();
        let session = session_id(&controller);
        controller.skip(40.0);
        controller.toggle_play_pause();
        backend.clear();

        controller.skip_back();

        let scheduled = SessionEvent::new(session, MediaEvent::PreviewElapsed(1));
        assert_eq!(
            backend.ops(),
            vec![
                Op::Seek(MediaKind::Audio, 25.0),
                Op::Play(session, MediaKind::Audio),
                Op::Schedule(scheduled.clone()),
            ]
        );
        assert_eq!(controller.state(), PlaybackState::Paused);

        controller.handle_event(&mut catalog, scheduled);
        assert_eq!(backend.ops().last(), Some(&Op::Pause(MediaKind::Audio)));
        assert_eq!(controller.state(), PlaybackState::Paused);
    }

    #[test]
    fn test_superseded_preview_never_pauses() {
        let (backend, mut controller, mut catalog) = fixture();
        controller.enqueue(&mut catalog, vec![audio("a")]).unwrap();
        let session = session_id(&controller);
        controller.skip(40.0);
        controller.toggle_play_pause();
        controller.skip_back();
        let preview = SessionEvent::new(session, MediaEvent::PreviewElapsed(1));

        // The user resumes before the preview timer fires.
        controller.toggle_play_pause();
        assert!(backend.ops().contains(&Op::DropTimer(preview.clone())));
        assert_eq!(controller.state(), PlaybackState::Playing);
        backend.clear();

        controller.handle_event(&mut catalog, preview);
        assert!(backend.ops().is_empty());
        assert_eq!(controller.state(), PlaybackState::Playing);
    }

    #[test]
    fn test_preview_cancelled_by_load() {
        let (backend, mut controller, mut catalog) = fixture();
        controller
            .enqueue(&mut catalog, vec![audio("a"), audio("b")])
            .unwrap();
        let session = session_id(&controller);
        controller.skip(40.0);
        controller.toggle_play_pause();
        controller.skip_back();

        controller.load(&mut catalog, 1).unwrap();
        let preview = SessionEvent::new(session, MediaEvent::PreviewElapsed(1));
        assert!(backend.ops().contains(&Op::DropTimer(preview.clone())));
        backend.clear();

        controller.handle_event(&mut catalog, preview);
        assert!(backend.ops().is_empty());
        assert_eq!(controller.state(), PlaybackState::Loading);
    }

    #[test]
    fn test_rewind_while_playing_has_no_preview() {
        let (backend, mut controller, mut catalog) = fixture();
        controller.enqueue(&mut catalog, vec![audio("a")]).unwrap();
        backend.clear();

        controller.skip_back();

        assert!(!backend
            .ops()
            .iter()
            .any(|op| matches!(op, Op::Schedule(_) | Op::Play(..))));
    }

    #[test]
    fn test_shutdown_releases_every_binding() {
        let (backend, mut controller, mut catalog) = fixture();
        controller
            .enqueue(&mut catalog, vec![audio("a"), video("b"), audio("c")])
            .unwrap();
        controller.load(&mut catalog, 1).unwrap();
        controller.load(&mut catalog, 2).unwrap();

        controller.shutdown();

        let binds = backend.count(|op| matches!(op, Op::Bind(..)));
        let releases = backend.count(|op| matches!(op, Op::Release(_)));
        assert_eq!(binds, 3);
        assert_eq!(releases, binds);
        assert!(!controller.has_session());
    }

    #[test]
    fn test_dropping_controller_releases_session() {
        let (backend, mut controller, mut catalog) = fixture();
        controller.enqueue(&mut catalog, vec![video("a")]).unwrap();
        let id = session_id(&controller);

        drop(controller);

        let ops = backend.ops();
        assert!(ops.contains(&Op::Release(id)));
        assert_eq!(ops.last(), Some(&Op::Hide(MediaKind::Video)));
    }
}
