//! Site generation: posts, index, category pages and assets.

use crate::assets::copy_tree;
use crate::config::SiteConfig;
use crate::db::PostDb;
use crate::error::SiteError;
use crate::post::{parse_post, slugify};
use crate::render::{CategoryPage, IndexPage, PostPage, Renderer};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Asset folders copied from the template directory on every build.
pub const TEMPLATE_ASSET_DIRS: [&str; 3] = ["css", "js", "img"];

/// Result of generating a single post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostOutcome {
    /// Written to `output` under `slug`.
    Generated { slug: String, output: PathBuf },
    /// Not written because mandatory metadata is missing.
    Rejected { missing: Vec<&'static str> },
}

/// Summary of a build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Source paths of posts written in this run.
    pub generated: Vec<String>,
    /// Source paths of rejected posts with the fields they lack.
    pub rejected: Vec<(String, Vec<&'static str>)>,
    /// Category pages written in this run.
    pub categories: usize,
}

impl BuildReport {
    fn record(&mut self, source: String, outcome: PostOutcome) {
        match outcome {
            PostOutcome::Generated { .. } => self.generated.push(source),
            PostOutcome::Rejected { missing } => self.rejected.push((source, missing)),
        }
    }
}

/// Generates a site from markdown posts and handlebars templates.
///
/// All configured directories are resolved against `root`.
#[derive(Debug)]
pub struct SiteGenerator {
    root: PathBuf,
    config: SiteConfig,
    renderer: Renderer,
    db: PostDb,
}

impl SiteGenerator {
    /// Create a generator, loading the templates once up front.
    pub fn new(root: impl Into<PathBuf>, config: SiteConfig) -> Result<Self, SiteError> {
        let root = root.into();
        config.validate()?;
        let renderer = Renderer::load(&root.join(&config.template_dir))?;
        let db = PostDb::new(root.join(&config.db_file));
        Ok(Self {
            root,
            config,
            renderer,
            db,
        })
    }

    /// Read `lucius.json` from `root` and create a generator.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, SiteError> {
        let root = root.into();
        let config = SiteConfig::load(&root)?;
        Self::new(root, config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn db(&self) -> &PostDb {
        &self.db
    }

    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.config.output_dir)
    }

    /// All markdown files under the content directory, relative to the root,
    /// in a stable order.
    pub fn list_content(&self) -> Result<Vec<PathBuf>, SiteError> {
        let content = self.root.join(&self.config.content_dir);
        if !content.is_dir() {
            log::warn!("Content directory {} does not exist", content.display());
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&content).sort_by_file_name() {
            let entry = entry?;
            let is_markdown = entry.path().extension().is_some_and(|ext| ext == "md");
            if entry.file_type().is_file() && is_markdown {
                let relative = entry
                    .path()
                    .strip_prefix(&self.root)
                    .unwrap_or(entry.path())
                    .to_path_buf();
                files.push(relative);
            }
        }
        Ok(files)
    }

    /// Render one post to `<output>/<blog_dir>/<slug>.html` and record it.
    ///
    /// `source` is relative to the root. Posts missing a mandatory field are
    /// reported as rejected and nothing is written for them.
    pub fn generate_post(&mut self, source: &Path) -> Result<PostOutcome, SiteError> {
        log::info!("Generating post {}", source.display());
        let path = self.root.join(source);
        let text = std::fs::read_to_string(&path).map_err(SiteError::io(&path))?;
        let mut post = parse_post(&text);

        let missing = post.meta.missing_fields();
        if !missing.is_empty() {
            for field in &missing {
                log::warn!("{}: metadata '{field}' is mandatory", source.display());
            }
            log::warn!("{}: errors found, post not created", source.display());
            return Ok(PostOutcome::Rejected { missing });
        }

        let title_slug = || slugify(post.meta.title().unwrap_or_default());
        let slug = match post.meta.slug() {
            Some(slug) if is_file_stem(slug) => slug.to_string(),
            Some(slug) => {
                log::warn!("{}: slug '{slug}' is not a plain file name", source.display());
                Some(slugify(slug))
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(title_slug)
            }
            None => title_slug(),
        };
        post.meta.set("slug", slug.clone());
        if post.meta.category().is_none() {
            post.meta.set("category", self.config.default_category.clone());
        }

        let html = self.renderer.render_post(&PostPage {
            site: &self.config.site,
            content: &post.html,
            post: &post.meta,
            blog_path: &self.config.blog_dir,
        })?;

        let output = self
            .output_path()
            .join(&self.config.blog_dir)
            .join(format!("{slug}.html"));
        write_file(&output, &html)?;
        log::info!("  created {}", output.display());

        self.db.insert(db_key(source), post.meta);

        if let Some(post_dir) = source.parent() {
            self.copy_post_files(post_dir)?;
        }
        Ok(PostOutcome::Generated { slug, output })
    }

    /// Copy the configured folders found in `post_dir` to the output root.
    pub fn copy_post_files(&self, post_dir: &Path) -> Result<(), SiteError> {
        for dir in &self.config.copy_dirs {
            let src = self.root.join(post_dir).join(dir);
            if src.is_dir() {
                let dst = self.output_path().join(dir);
                log::info!("Copying {} to {}", src.display(), dst.display());
                copy_tree(&src, &dst)?;
            }
        }
        Ok(())
    }

    /// Copy the `css`, `js` and `img` folders of the template directory.
    pub fn copy_template_files(&self) -> Result<(), SiteError> {
        let templates = self.root.join(&self.config.template_dir);
        for dir in TEMPLATE_ASSET_DIRS {
            let src = templates.join(dir);
            if src.is_dir() {
                let copied = copy_tree(&src, &self.output_path().join(dir))?;
                log::debug!("Copied {copied} template files from {}", src.display());
            }
        }
        Ok(())
    }

    /// Render `<output>/index.html` listing every recorded post.
    pub fn generate_index(&self) -> Result<PathBuf, SiteError> {
        log::info!("Generating index.html");
        let html = self.renderer.render_index(&IndexPage {
            site: &self.config.site,
            posts: self.db.posts().collect(),
            blog_path: &self.config.blog_dir,
        })?;
        let output = self.output_path().join("index.html");
        write_file(&output, &html)?;
        Ok(output)
    }

    /// Render `<output>/category/<slug>.html` for every category in use.
    pub fn generate_categories(&self) -> Result<usize, SiteError> {
        log::info!("Generating category pages");
        let groups = self.db.by_category(&self.config.default_category);
        for (category, posts) in &groups {
            let html = self.renderer.render_category(&CategoryPage {
                site: &self.config.site,
                category,
                posts,
                blog_path: &self.config.blog_dir,
            })?;
            let output = self
                .output_path()
                .join("category")
                .join(format!("{}.html", slugify(category)));
            write_file(&output, &html)?;
            log::info!("  created category/{}.html", slugify(category));
        }
        Ok(groups.len())
    }

    /// Remove the output directory.
    pub fn clear_output(&self) -> Result<(), SiteError> {
        let output = self.output_path();
        if output.exists() {
            std::fs::remove_dir_all(&output).map_err(SiteError::io(&output))?;
        }
        Ok(())
    }

    /// Rebuild the whole site from scratch.
    pub fn generate_all(&mut self) -> Result<BuildReport, SiteError> {
        self.reload_templates()?;
        self.clear_output()?;
        self.db.clear();

        let mut report = BuildReport::default();
        for source in self.list_content()? {
            let outcome = self.generate_post(&source)?;
            report.record(db_key(&source), outcome);
        }
        self.finish(report)
    }

    /// Render only posts not yet in the database, then refresh the shared pages.
    pub fn update(&mut self) -> Result<BuildReport, SiteError> {
        self.reload_templates()?;
        self.db.reload()?;

        let mut report = BuildReport::default();
        for source in self.list_content()? {
            if self.db.contains(&db_key(&source)) {
                continue;
            }
            let outcome = self.generate_post(&source)?;
            report.record(db_key(&source), outcome);
        }
        self.finish(report)
    }

    fn finish(&mut self, mut report: BuildReport) -> Result<BuildReport, SiteError> {
        self.copy_template_files()?;
        self.generate_index()?;
        report.categories = self.generate_categories()?;
        self.db.save()?;
        log::info!(
            "Build finished: {} generated, {} rejected, {} categories",
            report.generated.len(),
            report.rejected.len(),
            report.categories
        );
        Ok(report)
    }

    /// Templates are re-read on every build so edits show up while serving.
    fn reload_templates(&mut self) -> Result<(), SiteError> {
        self.renderer = Renderer::load(&self.root.join(&self.config.template_dir))?;
        Ok(())
    }
}

/// Whether `slug` can be used as a file name directly under the blog folder.
fn is_file_stem(slug: &str) -> bool {
    let mut components = Path::new(slug).components();
    matches!(components.next(), Some(Component::Normal(_)))
        && components.next().is_none()
        && !slug.contains(['/', '\\'])
}

/// Database key for a source path: relative, with `/` separators.
fn db_key(source: &Path) -> String {
    source
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn write_file(path: &Path, contents: &str) -> Result<(), SiteError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(SiteError::io(parent))?;
    }
    std::fs::write(path, contents).map_err(SiteError::io(path))
}
