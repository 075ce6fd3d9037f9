//! The polling loop that keeps the active workspace tiled.
//!
//! [`Reconciler`] owns the baseline [`Snapshot`] and drives the cycle
//! `Bootstrap → Poll → CapacityCheck → (Retile | Idle) → Poll → …` until
//! the process is terminated.  It is generic over any [`WindowSystem`]
//! implementation, making it completely independent of X11 or any other
//! concrete backend.
//!
//! All state lives in the one reconciler instance; nothing is global.
//! Every failure inside a cycle is logged and contained — the only fatal
//! condition of the daemon is failing to open the window-system connection
//! in the first place, which happens before a reconciler exists.

use crate::config::Config;
use crate::layout;
use crate::overflow;
use crate::snapshot::Snapshot;
use crate::traits::WindowSystem;
use log::{debug, info, warn};
use std::thread;

/// Orchestrates capacity enforcement and re-tiling against a window
/// system.
///
/// # Typical usage
///
/// ```ignore
/// let sys = X11WindowSystem::connect()?;
/// let mut reconciler = Reconciler::new(sys, config);
/// reconciler.bootstrap();
/// reconciler.run();
/// ```
pub struct Reconciler<W: WindowSystem> {
    sys: W,
    config: Config,
    baseline: Snapshot,
}

impl<W: WindowSystem> Reconciler<W> {
    /// Create a reconciler with an empty baseline.  Call
    /// [`bootstrap`](Reconciler::bootstrap) before
    /// [`run`](Reconciler::run).
    pub fn new(sys: W, config: Config) -> Self {
        Self {
            sys,
            config,
            baseline: Snapshot::empty(0),
        }
    }

    /// The last snapshot the reconciler settled on.
    pub fn baseline(&self) -> &Snapshot {
        &self.baseline
    }

    /// Capture the current workspace and tile whatever is already there.
    ///
    /// A failure to read the current workspace degrades to an empty
    /// baseline; the first poll cycle will pick the real state up.
    pub fn bootstrap(&mut self) {
        let workspace = match self.sys.current_workspace() {
            Ok(ws) => ws,
            Err(e) => {
                warn!("cannot read the current workspace yet: {}", e);
                self.baseline = Snapshot::empty(0);
                return;
            }
        };
        let snapshot = Snapshot::capture(&self.sys, workspace);
        info!(
            "bootstrap: workspace {} has {} window(s)",
            workspace,
            snapshot.len()
        );
        let placements = layout::arrange(&self.sys, &snapshot.handles());
        self.baseline = snapshot.with_placements(&placements);
    }

    /// One poll cycle: drain async errors, re-read the current workspace,
    /// enforce the window limit, and re-tile if anything changed.
    ///
    /// A workspace switch between cycles is business as usual — the fresh
    /// snapshot simply describes the newly visible workspace and the
    /// membership diff triggers a re-tile there.
    pub fn run_cycle(&mut self) {
        for err in self.sys.drain_async_errors() {
            debug!("window system reported asynchronously: {}", err);
        }

        let workspace = match self.sys.current_workspace() {
            Ok(ws) => ws,
            Err(e) => {
                warn!("current workspace unreadable, skipping cycle: {}", e);
                return;
            }
        };

        overflow::enforce_capacity(
            &self.sys,
            workspace,
            self.config.workspace_capacity,
            overflow::SETTLE_AFTER_MOVE,
        );

        let fresh = Snapshot::capture(&self.sys, workspace);
        if fresh.changed_since(&self.baseline) {
            info!(
                "workspace {}: {} -> {} window(s), re-tiling",
                workspace,
                self.baseline.len(),
                fresh.len()
            );
            let placements = layout::arrange(&self.sys, &fresh.handles());
            self.baseline = fresh.with_placements(&placements);
        }
    }

    /// Poll forever at the configured cadence.
    ///
    /// Never returns under normal operation; the daemon stops by external
    /// signal.  Window-system calls are synchronous, so a backend that
    /// hangs stalls the loop — an accepted limitation of the polling
    /// design.
    pub fn run(&mut self) {
        let interval = self.config.poll_interval();
        info!(
            "reconciling every {:?}, workspace capacity {}",
            interval, self.config.workspace_capacity
        );
        loop {
            self.run_cycle();
            thread::sleep(interval);
        }
    }
}

//  Tests
