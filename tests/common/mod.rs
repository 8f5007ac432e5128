pub mod fixtures;

use std::path::Path;
use tempfile::TempDir;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// A throwaway site project rendered with the bundled theme.
pub struct Project {
    pub dir: TempDir,
}

impl Project {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let theme = Path::new(env!("CARGO_MANIFEST_DIR")).join("theme");
        let config = serde_json::json!({
            "template_dir": theme,
            "site": { "title": "Test Site" }
        });
        std::fs::write(dir.path().join("lucius.json"), config.to_string())?;
        std::fs::create_dir_all(dir.path().join("content"))?;
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_post(&self, relative: &str, text: &str) -> std::io::Result<()> {
        let path = self.root().join("content").join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, text)
    }

    pub fn read_output(&self, relative: &str) -> std::io::Result<String> {
        std::fs::read_to_string(self.root().join("docs").join(relative))
    }

    pub fn output_exists(&self, relative: &str) -> bool {
        self.root().join("docs").join(relative).exists()
    }
}
