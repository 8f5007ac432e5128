//! Project configuration, read from `lucius.json` in the project root.

use crate::error::SiteError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Settings for one site. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory scanned recursively for `*.md` posts.
    pub content_dir: PathBuf,
    /// Directory the site is written to. Cleared by a full build.
    pub output_dir: PathBuf,
    /// Directory holding `post.html`, `index.html`, `category.html` and the
    /// `css`, `js`, `img` asset folders.
    pub template_dir: PathBuf,
    /// Sub-directory of the output that receives rendered posts.
    pub blog_dir: String,
    /// Category assigned to posts that do not declare one.
    pub default_category: String,
    /// Folders next to a post that are copied to the output root.
    pub copy_dirs: Vec<String>,
    /// Post database, relative to the project root.
    pub db_file: PathBuf,
    /// Free-form data passed to every template as `site`.
    pub site: Value,
    /// Port used by `lucius serve`.
    pub port: u16,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            output_dir: PathBuf::from("docs"),
            template_dir: PathBuf::from("templates"),
            blog_dir: "blog".to_string(),
            default_category: "General".to_string(),
            copy_dirs: vec!["img".to_string(), "files".to_string()],
            db_file: PathBuf::from("posts.db"),
            site: Value::Object(Default::default()),
            port: 8000,
        }
    }
}

impl SiteConfig {
    pub const FILE_NAME: &'static str = "lucius.json";

    /// Load `lucius.json` from `root`, falling back to defaults when absent.
    pub fn load(root: &Path) -> Result<Self, SiteError> {
        let path = root.join(Self::FILE_NAME);
        if !path.is_file() {
            log::debug!("No {} in {}, using defaults", Self::FILE_NAME, root.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path).map_err(SiteError::io(&path))?;
        let config: SiteConfig = serde_json::from_str(&text).map_err(SiteError::json(&path))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SiteError> {
        if self.output_dir.as_os_str().is_empty() || self.output_dir == Path::new(".") {
            return Err(SiteError::Config(
                "'output_dir' must name a dedicated directory".to_string(),
            ));
        }
        if self.output_dir == self.content_dir || self.output_dir == self.template_dir {
            return Err(SiteError::Config(format!(
                "'output_dir' ({}) would overwrite sources",
                self.output_dir.display()
            )));
        }
        if self.default_category.trim().is_empty() {
            return Err(SiteError::Config(
                "'default_category' must not be empty".to_string(),
            ));
        }
        if !self.site.is_object() {
            return Err(SiteError::Config("'site' must be a JSON object".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = SiteConfig::load(dir.path()).unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.output_dir, PathBuf::from("docs"));
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(SiteConfig::FILE_NAME),
            r#"{"output_dir": "public", "site": {"title": "Notes"}}"#,
        )
        .unwrap();

        let config = SiteConfig::load(dir.path()).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("public"));
        assert_eq!(config.site["title"], "Notes");
        assert_eq!(config.blog_dir, "blog");
    }

    #[test]
    fn test_malformed_file_is_json_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(SiteConfig::FILE_NAME), "{ not json").unwrap();
        assert!(matches!(
            SiteConfig::load(dir.path()),
            Err(SiteError::Json { .. })
        ));
    }

    #[test]
    fn test_output_dir_must_not_overlap_sources() {
        let config = SiteConfig {
            output_dir: PathBuf::from("content"),
            ..SiteConfig::default()
        };
        assert!(matches!(config.validate(), Err(SiteError::Config(_))));

        let config = SiteConfig {
            output_dir: PathBuf::from("."),
            ..SiteConfig::default()
        };
        assert!(matches!(config.validate(), Err(SiteError::Config(_))));
    }

    #[test]
    fn test_site_must_be_object() {
        let config = SiteConfig {
            site: Value::String("oops".to_string()),
            ..SiteConfig::default()
        };
        assert!(matches!(config.validate(), Err(SiteError::Config(_))));
    }
}
