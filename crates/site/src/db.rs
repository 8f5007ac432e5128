//! The post database: metadata of every rendered post, keyed by source path.
//!
//! Stored as a JSON object so incremental builds know which posts already
//! exist and index/category pages can be rebuilt without re-reading sources.

use crate::error::SiteError;
use crate::post::PostMeta;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct PostDb {
    path: PathBuf,
    posts: BTreeMap<String, PostMeta>,
}

impl PostDb {
    /// An empty database that will be saved to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            posts: BTreeMap::new(),
        }
    }

    /// Read the database at `path`; a missing file is an empty database.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, SiteError> {
        let mut db = Self::new(path);
        db.reload()?;
        Ok(db)
    }

    /// Replace the in-memory entries with the file's contents.
    pub fn reload(&mut self) -> Result<(), SiteError> {
        if !self.path.is_file() {
            self.posts.clear();
            return Ok(());
        }
        let text = std::fs::read_to_string(&self.path).map_err(SiteError::io(&self.path))?;
        self.posts = serde_json::from_str(&text).map_err(SiteError::json(&self.path))?;
        log::debug!("Loaded {} posts from {}", self.posts.len(), self.path.display());
        Ok(())
    }

    pub fn save(&self) -> Result<(), SiteError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(SiteError::io(parent))?;
        }
        let json = serde_json::to_string_pretty(&self.posts).map_err(SiteError::json(&self.path))?;
        std::fs::write(&self.path, json).map_err(SiteError::io(&self.path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, source: &str) -> bool {
        self.posts.contains_key(source)
    }

    pub fn get(&self, source: &str) -> Option<&PostMeta> {
        self.posts.get(source)
    }

    pub fn insert(&mut self, source: impl Into<String>, meta: PostMeta) {
        self.posts.insert(source.into(), meta);
    }

    pub fn clear(&mut self) {
        self.posts.clear();
    }

    /// Metadata of every post, ordered by source path.
    pub fn posts(&self) -> impl Iterator<Item = &PostMeta> {
        self.posts.values()
    }

    /// Posts grouped by their `category` field.
    ///
    /// Entries written before a default category existed fall under
    /// `fallback`.
    pub fn by_category<'a>(&'a self, fallback: &'a str) -> BTreeMap<&'a str, Vec<&'a PostMeta>> {
        let mut groups: BTreeMap<&str, Vec<&PostMeta>> = BTreeMap::new();
        for meta in self.posts.values() {
            let category = meta.category().unwrap_or(fallback);
            groups.entry(category).or_default().push(meta);
        }
        groups
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
