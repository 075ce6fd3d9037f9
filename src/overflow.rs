//! Per-workspace window-count enforcement.
//!
//! When a workspace holds more windows than the configured capacity, the
//! newest windows are relocated forward to the first workspace that still
//! has room.  The probe re-counts the candidate after every hop, so a
//! chain of nearly-full workspaces is walked iteratively rather than
//! overflowing one into the next blindly.

use crate::layout;
use crate::snapshot::Snapshot;
use crate::traits::{WindowHandle, WindowSystem, WorkspaceId};
use log::{info, warn};
use std::collections::HashSet;
use std::thread;
use std::time::Duration;

/// Pause after a relocation before re-reading the window set, giving the
/// window manager time to apply the move.  The effect of the move is only
/// ever *observed*, never assumed.
pub const SETTLE_AFTER_MOVE: Duration = Duration::from_secs(1);

/// Relocate windows off `workspace` until its member count is at most
/// `capacity`.
///
/// Each relocated window is de-maximized, moved to the first workspace past
/// `workspace` with spare capacity, and the destination workspace is then
/// re-arranged.  `settle` is slept after each successful move (see
/// [`SETTLE_AFTER_MOVE`]; tests pass [`Duration::ZERO`]).
///
/// Every failure is logged and contained: a window whose relocation is
/// rejected is not retried within this call, and the function always
/// returns so the surrounding poll cycle can continue.
pub fn enforce_capacity<W: WindowSystem>(
    sys: &W,
    workspace: WorkspaceId,
    capacity: usize,
    settle: Duration,
) {
    let count = match member_count(sys, workspace) {
        Some(count) => count,
        None => return,
    };
    let excess = count.saturating_sub(capacity);
    if excess == 0 {
        return;
    }
    info!(
        "workspace {} holds {} window(s), limit is {}; relocating {}",
        workspace, count, capacity, excess
    );

    let mut attempted = HashSet::new();
    for _ in 0..excess {
        let newest = match newest_member(sys, workspace) {
            Some(window) => window,
            None => {
                warn!("cannot identify the newest window, deferring overflow to the next cycle");
                return;
            }
        };
        if !attempted.insert(newest) {
            // The previous relocation of this window did not take; retrying
            // within the same cycle would spin.
            warn!("{} is still the newest member, deferring to the next cycle", newest);
            return;
        }

        let destination = match find_destination(sys, workspace, capacity) {
            Some(ws) => ws,
            None => {
                warn!(
                    "no workspace after {} has room for another window, leaving the overflow",
                    workspace
                );
                return;
            }
        };

        if let Err(e) = sys.request_demaximize(newest) {
            warn!("de-maximize request for {} failed: {}", newest, e);
        }
        if let Err(e) = sys.move_to_workspace(newest, destination) {
            warn!(
                "relocating {} to workspace {} failed, skipping: {}",
                newest, destination, e
            );
            continue;
        }
        info!("relocated {} to workspace {}", newest, destination);

        if !settle.is_zero() {
            thread::sleep(settle);
        }

        let dest_members = Snapshot::capture(sys, destination);
        layout::arrange(sys, &dest_members.handles());
    }
}

/// The newest window on `workspace`.
///
/// Prefers the top of the stacking order; when that window belongs to a
/// different workspace (it usually does right after a relocation, since
/// moving a window does not restack it), falls back to the last member in
/// enumeration order, which the window system reports oldest-first.
fn newest_member<W: WindowSystem>(sys: &W, workspace: WorkspaceId) -> Option<WindowHandle> {
    if let Some(top) = sys.most_recently_stacked() {
        if sys.workspace_of(top) == Some(workspace) {
            return Some(top);
        }
    }
    sys.enumerate_windows()
        .ok()?
        .into_iter()
        .rev()
        .find(|w| sys.workspace_of(*w) == Some(workspace))
}

/// Number of windows currently on `workspace`, or `None` if the window
/// list cannot be read this cycle.
fn member_count<W: WindowSystem>(sys: &W, workspace: WorkspaceId) -> Option<usize> {
    let handles = match sys.enumerate_windows() {
        Ok(handles) => handles,
        Err(e) => {
            warn!("window enumeration failed, skipping capacity check: {}", e);
            return None;
        }
    };
    Some(
        handles
            .into_iter()
            .filter(|w| sys.workspace_of(*w) == Some(workspace))
            .count(),
    )
}

/// First workspace after `from` whose member count is below `capacity`.
///
/// Counts are re-queried per candidate, so earlier relocations in the same
/// cycle are taken into account.
fn find_destination<W: WindowSystem>(
    sys: &W,
    from: WorkspaceId,
    capacity: usize,
) -> Option<WorkspaceId> {
    let total = match sys.workspace_count() {
        Ok(total) => total,
        Err(e) => {
            warn!("workspace count unavailable: {}", e);
            return None;
        }
    };
    for candidate in (from + 1)..total {
        match member_count(sys, candidate) {
            Some(count) if count < capacity => return Some(candidate),
            _ => {}
        }
    }
    None
}

//  Tests
