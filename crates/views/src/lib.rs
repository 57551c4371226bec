//! Screen view-models.
//!
//! Each screen loads an immutable [`Snapshot`](screens::dashboard::Snapshot)
//! of the collections it needs and derives its rendered view with a pure
//! `view` function. [`ScreenSlot`] keeps the last good snapshot across
//! failed or cancelled reloads.

pub mod actions;
pub mod error;
pub mod screens;
pub mod slot;

pub use error::{ViewError, ViewResult};
pub use slot::{LoadOutcome, ScreenSlot, ScreenTask};
