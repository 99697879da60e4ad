//! The components module contains all shared components for our app.

mod app;
mod file_picker;
mod icons;
pub mod media_manager;
mod media_surface;
mod player_handle;
mod playlist;
pub mod transport;

pub use app::*;
pub use file_picker::*;
pub use icons::*;
pub use media_surface::*;
pub use player_handle::*;
pub use playlist::*;
pub use transport::TransportBar;
