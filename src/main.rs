//! Entry point for the **autotile** daemon.
//!
//! Checks that the session is an X11 one, loads the configuration, opens
//! the window-system connection (the only fatal failure point), and hands
//! control to the [`Reconciler`], which polls until the process is
//! terminated externally.

use autotile::config::Config;
use autotile::reconciler::Reconciler;
use autotile::x11::X11WindowSystem;
use log::{error, info};

/// Resolve the config directory (`$XDG_CONFIG_HOME/autotile`).
fn config_dir() -> std::path::PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    std::path::PathBuf::from(base).join("autotile")
}

/// Try to load the config from `$XDG_CONFIG_HOME/autotile/config.json`,
/// falling back to compiled-in defaults.
fn load_config() -> Config {
    let path = config_dir().join("config.json");
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

/// Only X11 sessions are supported; the compositor protocols of Wayland
/// sessions have no equivalent of the EWMH pager interface.
fn check_session_type() {
    match std::env::var("XDG_SESSION_TYPE") {
        Ok(ref session) if session == "x11" => {}
        Ok(session) => {
            error!("the session type {} is not supported", session);
            std::process::exit(1);
        }
        Err(_) => {
            error!("XDG_SESSION_TYPE is not set");
            std::process::exit(1);
        }
    }
}

fn main() {
    env_logger::init();

    check_session_type();
    let config = load_config();

    let sys = match X11WindowSystem::connect() {
        Ok(sys) => sys,
        Err(e) => {
            error!("cannot acquire the window system: {}", e);
            std::process::exit(1);
        }
    };

    let mut reconciler = Reconciler::new(sys, config);
    reconciler.bootstrap();
    reconciler.run();
}
