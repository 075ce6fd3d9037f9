//! Point-in-time model of one workspace's windows.
//!
//! A [`Snapshot`] is rebuilt from a fresh enumeration every poll cycle; the
//! core keeps no state that outlives the window system's answers.  Change
//! detection is keyed by [`WindowHandle`] identity, not by enumeration
//! position, so a reordered listing with unchanged geometry is not
//! mistaken for a change and never mispairs a handle with another window's
//! size.

use crate::layout::Placement;
use crate::traits::{WindowHandle, WindowSystem, WorkspaceId};
use log::{debug, error};
use std::collections::{HashMap, HashSet};

/// Last-observed state of one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRecord {
    pub handle: WindowHandle,
    pub workspace: WorkspaceId,
    pub width: u32,
    pub height: u32,
}

/// An ordered set of [`WindowRecord`]s for a single workspace, captured
/// from one enumeration plus per-window property reads.
///
/// No two records share a handle; duplicates in the enumeration are
/// dropped at capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    workspace: WorkspaceId,
    records: Vec<WindowRecord>,
}

impl Snapshot {
    /// A snapshot with no windows.
    pub fn empty(workspace: WorkspaceId) -> Self {
        Self {
            workspace,
            records: Vec::new(),
        }
    }

    /// Capture the current members of `workspace`.
    ///
    /// Windows whose workspace property cannot be read are silently
    /// excluded (they are usually mid-close).  A window that vanishes
    /// between the enumeration and its geometry query is likewise dropped.
    /// If the enumeration itself fails the snapshot comes back empty —
    /// a degraded cycle, not an error the caller needs to handle.
    pub fn capture<W: WindowSystem>(sys: &W, workspace: WorkspaceId) -> Self {
        let handles = match sys.enumerate_windows() {
            Ok(handles) => handles,
            Err(e) => {
                error!("window enumeration failed: {}", e);
                return Self::empty(workspace);
            }
        };

        let mut seen = HashSet::new();
        let mut records = Vec::new();
        for handle in handles {
            if !seen.insert(handle) {
                continue;
            }
            match sys.workspace_of(handle) {
                Some(ws) if ws == workspace => {}
                _ => continue,
            }
            match sys.geometry(handle) {
                Some((width, height)) => records.push(WindowRecord {
                    handle,
                    workspace,
                    width,
                    height,
                }),
                None => {
                    debug!("window {} vanished during capture, skipping", handle);
                }
            }
        }

        Self { workspace, records }
    }

    /// The workspace this snapshot was captured for.
    pub fn workspace(&self) -> WorkspaceId {
        self.workspace
    }

    pub fn records(&self) -> &[WindowRecord] {
        &self.records
    }

    /// Handles in capture order, for pairing with a placement list.
    pub fn handles(&self) -> Vec<WindowHandle> {
        self.records.iter().map(|r| r.handle).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether this snapshot differs from `baseline`: a window appeared or
    /// disappeared, or any window common to both changed size.
    ///
    /// Comparison is by handle identity, so enumeration order plays no
    /// role.
    pub fn changed_since(&self, baseline: &Snapshot) -> bool {
        if self.records.len() != baseline.records.len() {
            return true;
        }
        let base: HashMap<WindowHandle, (u32, u32)> = baseline
            .records
            .iter()
            .map(|r| (r.handle, (r.width, r.height)))
            .collect();
        self.records
            .iter()
            .any(|r| base.get(&r.handle) != Some(&(r.width, r.height)))
    }

    /// A copy of this snapshot with the geometry each record *asked for*
    /// via `placements`, rather than what was last observed.
    ///
    /// Used for the post-retile baseline: if the window manager honors the
    /// requests, the next capture matches and the loop idles.
    pub(crate) fn with_placements(&self, placements: &[Placement]) -> Snapshot {
        let records = self
            .records
            .iter()
            .zip(placements)
            .map(|(r, p)| WindowRecord {
                handle: r.handle,
                workspace: r.workspace,
                width: p.width,
                height: p.height,
            })
            .collect();
        Snapshot {
            workspace: self.workspace,
            records,
        }
    }
}

//  Tests
