use std::path::Path;

use tower_http::services::{ServeDir, ServeFile};

/// Serve files from `dir`, answering unknown paths with `index.html` so the
/// front end's client-side router can take over.
pub fn service(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))
}
