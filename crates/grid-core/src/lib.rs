//! Core of the `frz-grid` completion overlay.
//!
//! Turns a flat, ordered list of candidates into a column-aligned grid, moves
//! a selection around that grid with 2D semantics, and resolves short jump
//! labels to candidates. Everything here is terminal-agnostic: the host
//! supplies candidates through [`CandidateSource`], shows the grid through a
//! [`RenderSurface`] and maps its keys onto [`Operation`]s.

pub mod dispatch;
mod error;
pub mod jump;
pub mod layout;
pub mod navigation;
mod operation;
pub mod session;
pub mod source;
pub mod surface;

pub use dispatch::{ActionDispatcher, ActionEntry, ActionMenu, ActionResult};
pub use error::SessionError;
pub use jump::{JumpInput, LabelGenerator, TreeLabeler};
pub use layout::{GridCell, GridLayout, layout};
pub use navigation::{Navigator, Selection};
pub use operation::{Operation, UnknownOperation};
pub use session::{Effect, Mode, Session, SessionBuilder, SessionStack};
pub use source::{CandidateSource, StaticCandidates};
pub use surface::RenderSurface;
