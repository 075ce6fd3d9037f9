//! X11-specific implementation.
//!
//! This module provides the concrete backend for the
//! [`WindowSystem`](crate::traits::WindowSystem) trait, powered by the
//! EWMH root-window properties and client messages that pagers and
//! taskbars use.
//!
//! Nothing outside this module should reference X11 directly.

pub mod ws;

pub use ws::{X11Error, X11WindowSystem};
