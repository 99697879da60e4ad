//! Playlist and playback core.
//!
//! Nothing in here touches the DOM; the web element pair lives behind
//! [`MediaBackend`] so the state machine runs the same in tests.

mod backend;
mod catalog;
mod controller;
mod error;
mod settings;
mod views;

pub use backend::*;
pub use catalog::*;
pub use controller::*;
pub use error::*;
pub use settings::*;
pub use views::*;
