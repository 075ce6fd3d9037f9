//! **autotile** — a background reconciler that keeps the active workspace
//! tiled.
//!
//! The daemon polls the windowing system at a fixed cadence.  Whenever the
//! visible workspace's window set or geometry changes, every window there
//! is de-maximized and repositioned into a fixed grid; a workspace that
//! accumulates more windows than the configured capacity has its newest
//! windows relocated to the next workspace with room.
//!
//! # Architecture
//!
//! The crate is organised around one core trait:
//!
//! * [`traits::WindowSystem`] — abstracts window enumeration, property
//!   reads, and geometry mutation so the reconciliation logic is not
//!   coupled to any specific windowing system, and can be unit-tested
//!   against an in-memory fake.
//!
//! On top of it sit a pure layout function ([`layout`]), a snapshot/diff
//! model of the workspace ([`snapshot`]), the per-workspace window limit
//! ([`overflow`]), and the polling loop that ties them together
//! ([`reconciler`]).  The only concrete backend lives in [`x11`]
//! (EWMH-conformant X11 sessions).

pub mod config;
pub mod layout;
pub mod overflow;
pub mod reconciler;
pub mod snapshot;
pub mod traits;
pub mod x11;
