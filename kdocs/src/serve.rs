//! Local preview server.
use std::{net::SocketAddr, path::Path};

use axum::Router;
use color_eyre::eyre::{Context, Result};
use log::info;
use tower_http::services::{ServeDir, ServeFile};

/// Serve `output_dir` until the process is interrupted.
///
/// Directories resolve to their `index.html`; unknown paths get `404.html`
/// with a 404 status.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created or the address cannot be
/// bound.
pub fn serve(output_dir: &Path, address: SocketAddr) -> Result<()> {
  let service = ServeDir::new(output_dir)
    .not_found_service(ServeFile::new(output_dir.join("404.html")));
  let app = Router::new().fallback_service(service);

  let runtime = tokio::runtime::Builder::new_multi_thread()
    .enable_all()
    .build()
    .wrap_err("Failed to start the async runtime")?;

  runtime.block_on(async move {
    let listener = tokio::net::TcpListener::bind(address)
      .await
      .wrap_err_with(|| format!("Failed to bind {address}"))?;
    info!(
      "Serving {} at http://{address}",
      output_dir.display()
    );
    axum::serve(listener, app)
      .await
      .wrap_err("Preview server stopped unexpectedly")
  })
}
