//! Terminal host for the completion grid.
//!
//! [`App`] keeps a [`SessionStack`](frz_grid_core::SessionStack), maps key
//! presses onto grid operations through a [`Keymap`] and draws the active
//! session at the bottom of the screen.

pub mod app;
pub mod input;
pub mod keymap;
pub mod panel;
pub mod theme;

pub use app::{App, Outcome, Selected, SessionOpener, Status, run};
pub use input::QueryInput;
pub use keymap::{KeySpec, KeySpecError, Keymap};
pub use panel::{GridPanel, GridWidget};
pub use theme::Theme;
