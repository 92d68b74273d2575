//! Core types - mode resolution and process state.

mod mode;
mod state;

pub use mode::{Mode, ModePolicy, PRODUCTION_ENV_VALUE, resolve_mode};
pub use state::{is_shutdown, register_server, setup_shutdown_handler};
