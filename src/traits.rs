//! The trait that decouples the reconciler from any concrete windowing
//! system.
//!
//! Every concrete backend (X11/EWMH, a test harness, …) implements
//! [`WindowSystem`].  The [`Reconciler`](crate::reconciler::Reconciler) only
//! depends on this abstraction, so the whole reconciliation pipeline can be
//! unit-tested against an in-memory fake.

use crate::layout::Placement;
use std::fmt;

/// Opaque, externally-assigned identifier for a window.
///
/// Handles are created by the window system, never by the core.  The core
/// only stores and compares them; a handle may stop being valid at any
/// moment (the window closed), which every consumer must tolerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(u64);

impl WindowHandle {
    /// Wrap a raw id handed out by a backend.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id, for backends that need to talk to the window system.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// Identifier of a virtual desktop.  The window system owns the numbering;
/// the core treats it as an opaque non-negative integer.
pub type WorkspaceId = u32;

/// Abstraction over a windowing system that can enumerate windows, read
/// their properties, and reposition them.
///
/// # Contract
///
/// The window set is owned by the desktop session and mutates underneath
/// the caller at any time.  Implementations must therefore:
///
/// * report a window that disappears between two calls as `None` from the
///   per-window queries ([`workspace_of`](WindowSystem::workspace_of),
///   [`geometry`](WindowSystem::geometry)) rather than failing hard;
/// * treat mutation requests as **best-effort**: a request against a
///   now-invalid handle returns `Err` (or surfaces later through
///   [`drain_async_errors`](WindowSystem::drain_async_errors)) and must
///   never terminate the process;
/// * never block indefinitely on their own initiative — the reconciler has
///   no per-call timeout and a hang here stalls the whole loop.
pub trait WindowSystem {
    /// The error type produced by this window system.
    type Error: std::error::Error + Send + 'static;

    /// List every window the window system currently knows about, in its
    /// native enumeration order.
    fn enumerate_windows(&self) -> Result<Vec<WindowHandle>, Self::Error>;

    /// The workspace `window` belongs to, or `None` if the property cannot
    /// be read (closing window, non-conformant client).
    fn workspace_of(&self, window: WindowHandle) -> Option<WorkspaceId>;

    /// The workspace currently visible to the user.
    fn current_workspace(&self) -> Result<WorkspaceId, Self::Error>;

    /// Current on-screen `(width, height)` of `window`, or `None` if the
    /// handle is no longer valid.
    fn geometry(&self, window: WindowHandle) -> Option<(u32, u32)>;

    /// Move and resize `window`.  Best-effort: the window manager may
    /// override or ignore the request.
    fn set_geometry(&self, window: WindowHandle, placement: &Placement) -> Result<(), Self::Error>;

    /// Ask the window manager to drop `window`'s maximized state.
    ///
    /// This is an asynchronous request; success only means the request was
    /// delivered, not that the state changed.  A maximized window fights
    /// geometry requests, so this must be sent before
    /// [`set_geometry`](WindowSystem::set_geometry).
    fn request_demaximize(&self, window: WindowHandle) -> Result<(), Self::Error>;

    /// Ask the window manager to move `window` to `workspace`.
    fn move_to_workspace(
        &self,
        window: WindowHandle,
        workspace: WorkspaceId,
    ) -> Result<(), Self::Error>;

    /// The window at the top of the stacking order — the best available
    /// signal for "most recently opened".
    fn most_recently_stacked(&self) -> Option<WindowHandle>;

    /// Number of workspaces the session currently has.
    fn workspace_count(&self) -> Result<u32, Self::Error>;

    /// Usable screen size in pixels.
    fn screen_size(&self) -> (u32, u32);

    /// Errors the window system reported asynchronously since the last
    /// drain (typically operations that targeted a window that had already
    /// closed).  Informational only; callers log and move on.
    fn drain_async_errors(&self) -> Vec<String> {
        Vec::new()
    }
}

//  Shared test double
