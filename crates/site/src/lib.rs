//! Static site generation for Lucius.
//!
//! Posts are markdown files with a metadata header under the content
//! directory. Each one is rendered through `post.html` into the blog folder of
//! the output directory, and the shared `index.html` and per-category pages
//! are rebuilt from the post database after every run.
//!
//! ## Modules
//!
//! - [`config`]: `lucius.json` settings
//! - [`post`]: metadata parsing, markdown rendering, slugs
//! - [`render`]: handlebars page templates
//! - [`db`]: the post database
//! - [`generator`]: full and incremental builds

pub mod assets;
pub mod config;
pub mod db;
pub mod error;
pub mod generator;
pub mod post;
pub mod render;

pub use config::SiteConfig;
pub use db::PostDb;
pub use error::SiteError;
pub use generator::{BuildReport, PostOutcome, SiteGenerator};
pub use post::{MANDATORY_FIELDS, ParsedPost, PostMeta, parse_post, slugify};
pub use render::Renderer;
