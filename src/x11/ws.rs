//! [`WindowSystem`] implementation backed by X11/EWMH.
//!
//! Talks to the X server through [`x11rb`] and drives the window manager
//! the way a pager would: window membership and geometry come from EWMH
//! root properties, and mutations are `_NET_WM_STATE` / `_NET_WM_DESKTOP`
//! client messages sent to the root window.  Mutations are fire and
//! forget — their effect is observed on a later poll, never awaited.
//!
//! Requests are left unchecked, so a request against a window that closed
//! in the meantime does not fail the call; the X server's error lands on
//! the event queue instead and is collected by
//! [`drain_async_errors`](WindowSystem::drain_async_errors).

use crate::layout::Placement;
use crate::traits::{WindowHandle, WindowSystem, WorkspaceId};
use x11rb::connection::Connection;
use x11rb::errors::{ConnectError, ConnectionError, ReplyError};
use x11rb::protocol::xproto::{
    Atom, AtomEnum, ClientMessageEvent, ConfigureWindowAux, ConnectionExt as _, EventMask, Window,
};
use x11rb::protocol::Event;
use x11rb::rust_connection::RustConnection;

x11rb::atom_manager! {
    /// The EWMH atoms the backend needs, interned once at connect time.
    Atoms:
    AtomsCookie {
        _NET_CLIENT_LIST,
        _NET_CLIENT_LIST_STACKING,
        _NET_WM_DESKTOP,
        _NET_CURRENT_DESKTOP,
        _NET_NUMBER_OF_DESKTOPS,
        _NET_WM_STATE,
        _NET_WM_STATE_MAXIMIZED_HORZ,
        _NET_WM_STATE_MAXIMIZED_VERT,
    }
}

/// `_NET_WM_STATE` client-message action: remove the listed states.
const NET_WM_STATE_REMOVE: u32 = 0;

/// Errors that can occur when talking to the X server.
#[derive(Debug, thiserror::Error)]
pub enum X11Error {
    #[error("cannot open display: {0}")]
    Connect(#[from] ConnectError),
    #[error("connection to the X server failed: {0}")]
    Connection(#[from] ConnectionError),
    #[error("X request failed: {0}")]
    Reply(#[from] ReplyError),
    #[error("root property {0} is missing or malformed")]
    MissingProperty(&'static str),
}

/// EWMH-backed window system.
///
/// Construction connects to the display named by `$DISPLAY` and interns
/// every atom the backend uses; a window manager that does not expose
/// these properties is detected up front rather than per call.
pub struct X11WindowSystem {
    conn: RustConnection,
    root: Window,
    screen_width: u32,
    screen_height: u32,
    atoms: Atoms,
}

impl X11WindowSystem {
    /// Connect to the X server.
    ///
    /// This is the daemon's only fatal failure point: without a
    /// connection there is nothing to reconcile.
    pub fn connect() -> Result<Self, X11Error> {
        let (conn, screen_num) = x11rb::connect(None)?;
        let screen = &conn.setup().roots[screen_num];
        let root = screen.root;
        let screen_width = u32::from(screen.width_in_pixels);
        let screen_height = u32::from(screen.height_in_pixels);
        let atoms = Atoms::new(&conn)?.reply()?;
        Ok(Self {
            conn,
            root,
            screen_width,
            screen_height,
            atoms,
        })
    }

    /// Read a single CARDINAL from a root-window property.
    fn root_cardinal(&self, atom: Atom, name: &'static str) -> Result<u32, X11Error> {
        let reply = self
            .conn
            .get_property(false, self.root, atom, AtomEnum::CARDINAL, 0, 1)?
            .reply()?;
        reply
            .value32()
            .and_then(|mut values| values.next())
            .ok_or(X11Error::MissingProperty(name))
    }

    /// Read a WINDOW list from a root-window property.
    fn root_window_list(&self, atom: Atom) -> Result<Vec<Window>, X11Error> {
        let reply = self
            .conn
            .get_property(false, self.root, atom, AtomEnum::WINDOW, 0, u32::MAX)?
            .reply()?;
        Ok(reply
            .value32()
            .map(|values| values.collect())
            .unwrap_or_default())
    }

    /// Send a client message to the root with the substructure masks the
    /// window manager listens on, without waiting for a reply.
    fn send_root_message(&self, event: ClientMessageEvent) -> Result<(), X11Error> {
        self.conn.send_event(
            false,
            self.root,
            EventMask::SUBSTRUCTURE_REDIRECT | EventMask::SUBSTRUCTURE_NOTIFY,
            event,
        )?;
        self.conn.flush()?;
        Ok(())
    }
}

/// X window ids are 32-bit; the handle stores them widened.
fn xid(window: WindowHandle) -> Window {
    window.raw() as Window
}

impl WindowSystem for X11WindowSystem {
    type Error = X11Error;

    fn enumerate_windows(&self) -> Result<Vec<WindowHandle>, X11Error> {
        Ok(self
            .root_window_list(self.atoms._NET_CLIENT_LIST)?
            .into_iter()
            .map(|w| WindowHandle::from_raw(u64::from(w)))
            .collect())
    }

    fn workspace_of(&self, window: WindowHandle) -> Option<WorkspaceId> {
        let reply = self
            .conn
            .get_property(
                false,
                xid(window),
                self.atoms._NET_WM_DESKTOP,
                AtomEnum::CARDINAL,
                0,
                1,
            )
            .ok()?
            .reply()
            .ok()?;
        let value = reply.value32()?.next();
        value
    }

    fn current_workspace(&self) -> Result<WorkspaceId, X11Error> {
        self.root_cardinal(self.atoms._NET_CURRENT_DESKTOP, "_NET_CURRENT_DESKTOP")
    }

    fn geometry(&self, window: WindowHandle) -> Option<(u32, u32)> {
        let reply = self.conn.get_geometry(xid(window)).ok()?.reply().ok()?;
        Some((u32::from(reply.width), u32::from(reply.height)))
    }

    fn set_geometry(&self, window: WindowHandle, placement: &Placement) -> Result<(), X11Error> {
        let aux = ConfigureWindowAux::new()
            .x(placement.x)
            .y(placement.y)
            .width(placement.width)
            .height(placement.height);
        self.conn.configure_window(xid(window), &aux)?;
        self.conn.flush()?;
        Ok(())
    }

    fn request_demaximize(&self, window: WindowHandle) -> Result<(), X11Error> {
        let event = ClientMessageEvent::new(
            32,
            xid(window),
            self.atoms._NET_WM_STATE,
            [
                NET_WM_STATE_REMOVE,
                self.atoms._NET_WM_STATE_MAXIMIZED_HORZ,
                self.atoms._NET_WM_STATE_MAXIMIZED_VERT,
                0,
                0,
            ],
        );
        self.send_root_message(event)
    }

    fn move_to_workspace(
        &self,
        window: WindowHandle,
        workspace: WorkspaceId,
    ) -> Result<(), X11Error> {
        let event = ClientMessageEvent::new(
            32,
            xid(window),
            self.atoms._NET_WM_DESKTOP,
            [workspace, 0, 0, 0, 0],
        );
        self.send_root_message(event)
    }

    fn most_recently_stacked(&self) -> Option<WindowHandle> {
        // Bottom-to-top order; the last entry is the top of the stack.
        self.root_window_list(self.atoms._NET_CLIENT_LIST_STACKING)
            .ok()?
            .last()
            .map(|w| WindowHandle::from_raw(u64::from(*w)))
    }

    fn workspace_count(&self) -> Result<u32, X11Error> {
        self.root_cardinal(
            self.atoms._NET_NUMBER_OF_DESKTOPS,
            "_NET_NUMBER_OF_DESKTOPS",
        )
    }

    fn screen_size(&self) -> (u32, u32) {
        (self.screen_width, self.screen_height)
    }

    fn drain_async_errors(&self) -> Vec<String> {
        let mut drained = Vec::new();
        while let Ok(Some(event)) = self.conn.poll_for_event() {
            if let Event::Error(err) = event {
                // Typically BadWindow from a request that raced a closing
                // window.
                drained.push(format!(
                    "{:?} targeting resource 0x{:x}",
                    err.error_kind, err.bad_value
                ));
            }
        }
        drained
    }
}
