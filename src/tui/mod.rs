//! Terminal dashboard: Elm-style model/update/render plus the event
//! loop and terminal lifecycle plumbing.

pub mod input;
pub mod layout;
pub mod model;
pub mod render;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;
pub mod update;
pub mod widgets;

pub use runtime::{ViewerConfig, run};
