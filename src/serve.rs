//! A static file server for previewing the generated site.
//!
//! Requests are resolved relative to the output directory. Paths that would
//! leave it are answered with 404.

use crate::error::CliError;
use percent_encoding::percent_decode_str;
use std::fs::File;
use std::path::{Component, Path, PathBuf};
use tiny_http::{Header, Method, Response, ResponseBox, Server};

/// Resolves request paths to files under a directory.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    base: PathBuf,
}

impl StaticFiles {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Map a request target such as `/blog/post.html?x=1` to a file.
    ///
    /// Directories resolve to their `index.html`. Returns `None` for missing
    /// files and for anything escaping the base directory.
    pub fn resolve(&self, target: &str) -> Option<PathBuf> {
        let path = target.split(['?', '#']).next().unwrap_or("");
        let decoded = percent_decode_str(path).decode_utf8().ok()?;

        let mut relative = PathBuf::new();
        for segment in decoded.split('/').filter(|s| !s.is_empty()) {
            match Path::new(segment).components().next() {
                Some(Component::Normal(part)) if Path::new(segment).components().count() == 1 => {
                    relative.push(part)
                }
                Some(Component::CurDir) => {}
                _ => return None,
            }
        }

        let mut full = self.base.join(relative);
        if full.is_dir() {
            full.push("index.html");
        }
        if !full.is_file() {
            return None;
        }

        // Reject symlinks pointing outside the base.
        match (full.canonicalize(), self.base.canonicalize()) {
            (Ok(file), Ok(base)) if file.starts_with(&base) => Some(file),
            _ => None,
        }
    }
}

/// Content type for a file, by extension.
pub fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("wasm") => "application/wasm",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("xml") => "application/xml",
        Some("pdf") => "application/pdf",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}

fn not_found() -> ResponseBox {
    Response::from_string("404 Not Found")
        .with_status_code(404)
        .boxed()
}

fn respond(files: &StaticFiles, method: &Method, target: &str) -> ResponseBox {
    if !matches!(method, Method::Get | Method::Head) {
        return Response::from_string("405 Method Not Allowed")
            .with_status_code(405)
            .boxed();
    }

    let Some(path) = files.resolve(target) else {
        return not_found();
    };
    let file = match File::open(&path) {
        Ok(file) => file,
        Err(e) => {
            log::warn!("Failed to open {}: {e}", path.display());
            return not_found();
        }
    };

    let response = Response::from_file(file);
    match Header::from_bytes(&b"Content-Type"[..], content_type(&path).as_bytes()) {
        Ok(header) => response.with_header(header).boxed(),
        Err(()) => response.boxed(),
    }
}

/// Serve `files` on `port` until the process is stopped.
pub fn serve(files: &StaticFiles, port: u16) -> Result<(), CliError> {
    let server = Server::http(("0.0.0.0", port)).map_err(|e| CliError::Server(e.to_string()))?;
    log::info!("Serving {} at http://localhost:{port}/", files.base().display());

    for request in server.incoming_requests() {
        let response = respond(files, request.method(), request.url());
        log::debug!(
            "{} {} -> {}",
            request.method(),
            request.url(),
            response.status_code().0
        );
        if let Err(e) = request.respond(response) {
            log::warn!("Failed to send response: {e}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn site() -> (tempfile::TempDir, StaticFiles) {
        let dir = tempdir().unwrap();
        let docs = dir.path().join("docs");
        fs::create_dir_all(docs.join("blog")).unwrap();
        fs::write(docs.join("index.html"), "home").unwrap();
        fs::write(docs.join("blog").join("index.html"), "blog home").unwrap();
        fs::write(docs.join("blog").join("hello world.html"), "post").unwrap();
        fs::write(dir.path().join("secret.txt"), "nope").unwrap();
        let files = StaticFiles::new(docs);
        (dir, files)
    }

    #[test]
    fn test_resolve_root_and_directories() {
        let (_dir, files) = site();
        let root = files.resolve("/").unwrap();
        assert_eq!(fs::read_to_string(root).unwrap(), "home");

        let blog = files.resolve("/blog/").unwrap();
        assert_eq!(fs::read_to_string(blog).unwrap(), "blog home");
    }

    #[test]
    fn test_resolve_strips_query_and_decodes() {
        let (_dir, files) = site();
        let post = files.resolve("/blog/hello%20world.html?ref=1#top").unwrap();
        assert_eq!(fs::read_to_string(post).unwrap(), "post");
    }

    #[test]
    fn test_resolve_blocks_traversal() {
        let (_dir, files) = site();
        assert!(files.resolve("/../secret.txt").is_none());
        assert!(files.resolve("/blog/../../secret.txt").is_none());
        assert!(files.resolve("/%2e%2e/secret.txt").is_none());
        assert!(files.resolve("/blog%2f..%2f..%2fsecret.txt").is_none());
    }

    #[test]
    fn test_resolve_missing_and_malformed() {
        let (_dir, files) = site();
        assert!(files.resolve("/nope.html").is_none());
        assert!(files.resolve("/bad%zz").is_none());
        assert!(files.resolve("/truncated%2").is_none());
        assert!(files.resolve("/%ff%fe.html").is_none());
    }

    #[test]
    fn test_content_type() {
        assert_eq!(content_type(Path::new("a/index.html")), "text/html; charset=utf-8");
        assert_eq!(content_type(Path::new("js/lucius_wasm_bg.wasm")), "application/wasm");
        assert_eq!(content_type(Path::new("IMG.PNG")), "image/png");
        assert_eq!(content_type(Path::new("LICENSE")), "application/octet-stream");
    }

    #[test]
    fn test_respond_status_codes() {
        let (_dir, files) = site();
        assert_eq!(respond(&files, &Method::Get, "/").status_code().0, 200);
        assert_eq!(respond(&files, &Method::Head, "/blog/").status_code().0, 200);
        assert_eq!(respond(&files, &Method::Get, "/missing").status_code().0, 404);
        assert_eq!(respond(&files, &Method::Post, "/").status_code().0, 405);
    }
}
