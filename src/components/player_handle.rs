use dioxus::prelude::*;
use tracing::{info, warn};

use crate::components::media_manager::{MediaSource, PageBackend};
use crate::player::{
    playlist_rows, transport_model, Candidate, Catalog, MediaEvent, PlaybackController,
    PlayerError, PlayerSettings, PlaylistRow, SessionEvent, TransportModel,
};

pub type PageController = PlaybackController<PageBackend>;

/// Context handle over the catalog and the playback controller.
///
/// Components only forward gestures through this; every mutation borrows
/// both values together so the active index and the session move as one.
#[derive(Clone, Copy, PartialEq)]
pub struct PlayerHandle {
    catalog: Signal<Catalog<MediaSource>>,
    controller: Signal<Option<PageController>>,
    warning: Signal<Option<String>>,
}

impl PlayerHandle {
    pub fn new(
        catalog: Signal<Catalog<MediaSource>>,
        controller: Signal<Option<PageController>>,
        warning: Signal<Option<String>>,
    ) -> Self {
        Self {
            catalog,
            controller,
            warning,
        }
    }

    fn with_player<R>(
        &self,
        f: impl FnOnce(&mut Catalog<MediaSource>, &mut PageController) -> R,
    ) -> Option<R> {
        let mut catalog_signal = self.catalog;
        let mut controller_signal = self.controller;
        let mut catalog = catalog_signal.write();
        let mut controller = controller_signal.write();
        let controller = (*controller).as_mut()?;
        Some(f(&mut catalog, controller))
    }

    fn report(&self, result: Result<(), PlayerError>) {
        let mut warning = self.warning;
        match result {
            Ok(()) => {
                if warning.peek().is_some() {
                    warning.set(None);
                }
            }
            Err(err @ PlayerError::NoValidFiles) => warning.set(Some(err.to_string())),
            Err(err) => {
                warn!("{err}");
                warning.set(Some(err.to_string()));
            }
        }
    }

    pub fn warning(&self) -> Option<String> {
        (self.warning)()
    }

    pub fn dismiss_warning(&self) {
        let mut warning = self.warning;
        warning.set(None);
    }

    pub fn playlist_rows(&self) -> Vec<PlaylistRow> {
        let catalog = self.catalog.read();
        playlist_rows(&*catalog)
    }

    pub fn transport(&self) -> TransportModel {
        let controller = self.controller.read();
        transport_model((*controller).as_ref().and_then(|c| c.status()))
    }

    pub fn settings(&self) -> PlayerSettings {
        let controller = self.controller.read();
        (*controller)
            .as_ref()
            .map(|c| c.settings().clone())
            .unwrap_or_default()
    }

    pub fn enqueue(&self, batch: Vec<Candidate<MediaSource>>) {
        let result = self
            .with_player(|catalog, controller| controller.enqueue(catalog, batch).map(|_| ()))
            .unwrap_or_else(|| {
                Err(PlayerError::SourceUnavailable(
                    "the player is still starting".to_string(),
                ))
            });
        self.report(result);
    }

    pub fn select(&self, index: usize) {
        if let Some(result) = self.with_player(|catalog, controller| controller.load(catalog, index)) {
            self.report(result);
        }
    }

    pub fn remove(&self, index: usize) {
        match self.with_player(|catalog, controller| controller.remove(catalog, index)) {
            Some(Ok(removal)) => info!(item = %removal.item().display_name(), "removed from playlist"),
            Some(Err(err)) => warn!("ignoring playlist removal: {err}"),
            None => {}
        }
    }

    pub fn toggle_play_pause(&self) {
        self.with_player(|_, controller| controller.toggle_play_pause());
    }

    pub fn skip_back(&self) {
        self.with_player(|_, controller| controller.skip_back());
    }

    pub fn skip_forward(&self) {
        self.with_player(|_, controller| controller.skip_forward());
    }

    /// Apply an element event. Only `Ended` can move the active entry, so
    /// only that one writes the catalog.
    pub fn dispatch(&self, event: SessionEvent) {
        let follow_up = {
            let mut controller_signal = self.controller;
            let mut controller = controller_signal.write();
            match (*controller).as_mut() {
                Some(controller) => controller.apply_event(event),
                None => None,
            }
        };
        if let Some(MediaEvent::Ended) = follow_up {
            self.with_player(|catalog, controller| controller.handle_ended(catalog));
        }
    }

    /// Release the bound session. Does nothing if the controller signal is
    /// already gone.
    pub fn shutdown(&self) {
        let mut controller_signal = self.controller;
        if let Ok(mut controller) = controller_signal.try_write() {
            if let Some(controller) = (*controller).as_mut() {
                controller.shutdown();
            }
        };
    }
}
