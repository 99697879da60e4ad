use serde::Deserialize;

#[cfg(target_arch = "wasm32")]
use gloo_storage::{LocalStorage, Storage};

#[cfg(target_arch = "wasm32")]
const SETTINGS_KEY: &str = "mediadeck.settings";

/// Player tuning. Read once at startup; never written back.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlayerSettings {
    /// Seconds moved by the skip buttons.
    #[serde(default = "default_skip_seconds")]
    pub skip_seconds: f64,
    /// Play a short snippet after rewinding while paused.
    #[serde(default = "default_preview_on_rewind")]
    pub preview_on_rewind: bool,
    #[serde(default = "default_preview_ms")]
    pub preview_ms: u32,
}

fn default_skip_seconds() -> f64 {
    15.0
}

fn default_preview_on_rewind() -> bool {
    true
}

fn default_preview_ms() -> u32 {
    200
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            skip_seconds: default_skip_seconds(),
            preview_on_rewind: default_preview_on_rewind(),
            preview_ms: default_preview_ms(),
        }
    }
}

impl PlayerSettings {
    /// Replace values that would break the transport with their defaults.
    pub fn normalized(mut self) -> Self {
        if !self.skip_seconds.is_finite() || self.skip_seconds <= 0.0 {
            self.skip_seconds = default_skip_seconds();
        }
        if self.preview_ms == 0 {
            self.preview_on_rewind = false;
        }
        self
    }
}

/// Load settings from browser storage, falling back to defaults.
#[cfg(target_arch = "wasm32")]
pub fn load_settings() -> PlayerSettings {
    match LocalStorage::get::<PlayerSettings>(SETTINGS_KEY) {
        Ok(settings) => settings.normalized(),
        Err(err) => {
            tracing::debug!("using default player settings: {err}");
            PlayerSettings::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_settings() -> PlayerSettings {
    PlayerSettings::default()
}
