//! Dev server handshake.
//!
//! Runs inside the development server process. Once the server listens, the
//! reachable URL is written to the hot file; the engine in the page-serving
//! process only ever reads it. The file is removed when the dev server
//! process exits, on any exit path.
//!
//! # Usage
//!
//! ```ignore
//! let cleanup = MarkerCleanup::new(HotFile::new("public/hot"));
//! hot::install_signal_handler(Arc::clone(&cleanup), |_| std::process::exit(0))?;
//! let (url, guard) = hot::announce(cleanup, bound_addr, &options)?;
//! run_server(); // guard drops on return and removes the file
//! ```

mod address;
mod cleanup;
mod marker;

pub use address::{DevServerOptions, resolve_dev_server_url};
pub use cleanup::{CleanupOutcome, MarkerCleanup, MarkerGuard, install_signal_handler};
pub use marker::HotFile;

use crate::debug;
use std::{io, net::SocketAddr, sync::Arc};

/// Write the dev server URL for `addr` into the hot file owned by `cleanup`.
///
/// Install the signal handler on `cleanup` first. If a signal already ran
/// the cleanup, the fresh file is removed again and the call fails with
/// [`io::ErrorKind::Interrupted`].
///
/// Returns the URL and a guard that removes the file when dropped.
pub fn announce(
    cleanup: Arc<MarkerCleanup>,
    addr: SocketAddr,
    options: &DevServerOptions,
) -> io::Result<(String, MarkerGuard)> {
    let url = resolve_dev_server_url(addr, options);
    let hot_file = cleanup.hot_file();
    hot_file.write(&url)?;

    if cleanup.has_run() {
        hot_file.remove()?;
        return Err(io::Error::new(
            io::ErrorKind::Interrupted,
            "terminated before the hot file was announced",
        ));
    }
    debug!("hot"; "wrote {} to {}", url, hot_file.path().display());

    Ok((url, MarkerGuard::new(cleanup)))
}
