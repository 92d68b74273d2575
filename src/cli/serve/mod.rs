//! Minimal development server.
//!
//! Serves `[serve] root` as-is plus stand-ins for the bundler client and the
//! React refresh runtime. Its only job in this crate is the hot file
//! handshake: once listening, the reachable URL is written to the hot file
//! so page-serving processes switch to development mode, and the file is
//! removed when the server exits.

mod lifecycle;
mod response;

use crate::{
    config::ViteConfig,
    embed::serve::{CLIENT_JS, REFRESH_RUNTIME_JS},
    hot::{self, HotFile, MarkerCleanup},
    log,
    utils::path::{has_url_scheme, resolve_under},
};
use anyhow::{Context, Result};
use std::{io, path::PathBuf, sync::Arc};
use tiny_http::{Request, Server};

/// Request handling inputs shared by the worker pool.
struct ServeContext {
    root: PathBuf,
    /// `/@vite/client`, when served locally
    client_path: Option<String>,
    /// `/@react-refresh`, when served locally
    refresh_path: Option<String>,
}

impl ServeContext {
    fn new(config: &ViteConfig) -> Self {
        Self {
            root: config.serve.root.clone(),
            client_path: module_path(&config.hot.client),
            refresh_path: module_path(&config.hot.refresh_runtime),
        }
    }
}

/// Request path for a dev server module; absolute URLs live elsewhere.
fn module_path(module: &str) -> Option<String> {
    (!has_url_scheme(module)).then(|| format!("/{}", module.trim_start_matches('/')))
}

/// Bind, announce through the hot file, and serve until shutdown.
///
/// The hot file is removed on return and on termination signals.
pub fn serve(config: &ViteConfig) -> Result<()> {
    if !config.serve.root.is_dir() {
        log!("warning"; "serve root {} does not exist", config.serve.root.display());
    }

    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    let hot_path = config.hot_file_path();
    let cleanup = MarkerCleanup::new(HotFile::new(&hot_path));
    lifecycle::register_for_shutdown(Arc::clone(&server), Arc::clone(&cleanup))?;

    let guard = match hot::announce(cleanup, addr, &config.serve.dev_server_options()) {
        Ok((url, guard)) => {
            log!("serve"; "{}", url);
            guard
        }
        Err(e) if e.kind() == io::ErrorKind::Interrupted => return Ok(()),
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to write hot file {}", hot_path.display()));
        }
    };

    log!("hot"; "{}", hot_path.display());

    let context = Arc::new(ServeContext::new(config));
    let result = run_request_loop(&server, context);

    drop(guard);
    result
}

fn run_request_loop(server: &Server, context: Arc<ServeContext>) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .context("Failed to create thread pool")?;

    for request in server.incoming_requests() {
        let context = Arc::clone(&context);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &context) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(request: Request, context: &ServeContext) -> Result<()> {
    if crate::core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    let path = request.url().split(['?', '#']).next().unwrap_or_default();
    if context.client_path.as_deref() == Some(path) {
        return response::respond_module(request, CLIENT_JS);
    }
    if context.refresh_path.as_deref() == Some(path) {
        return response::respond_module(request, REFRESH_RUNTIME_JS);
    }

    match resolve_under(request.url(), &context.root) {
        Some(file) => response::respond_file(request, &file),
        None => response::respond_not_found(request),
    }
}
