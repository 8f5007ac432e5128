//! Handlebars rendering of the post, index and category pages.

use crate::error::SiteError;
use crate::post::{PostMeta, slugify};
use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

pub const POST_TEMPLATE: &str = "post";
pub const INDEX_TEMPLATE: &str = "index";
pub const CATEGORY_TEMPLATE: &str = "category";

const TEMPLATES: [&str; 3] = [POST_TEMPLATE, INDEX_TEMPLATE, CATEGORY_TEMPLATE];

/// `{{slugify post.category}}` yields the file name used for category pages.
fn slugify_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let param = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
    out.write(&slugify(param))?;
    Ok(())
}

fn registry() -> Handlebars<'static> {
    let mut registry = Handlebars::new();
    registry.register_helper("slugify", Box::new(slugify_helper));
    registry
}

/// Data for `post.html`. The rendered body is in `content`; templates should
/// emit it with `{{{content}}}`.
#[derive(Debug, Serialize)]
pub struct PostPage<'a> {
    pub site: &'a Value,
    pub content: &'a str,
    pub post: &'a PostMeta,
    pub blog_path: &'a str,
}

/// Data for `index.html`.
#[derive(Debug, Serialize)]
pub struct IndexPage<'a> {
    pub site: &'a Value,
    pub posts: Vec<&'a PostMeta>,
    pub blog_path: &'a str,
}

/// Data for `category.html`.
#[derive(Debug, Serialize)]
pub struct CategoryPage<'a> {
    pub site: &'a Value,
    pub category: &'a str,
    pub posts: &'a [&'a PostMeta],
    pub blog_path: &'a str,
}

/// The three page templates of a site.
pub struct Renderer {
    registry: Handlebars<'static>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("templates", &self.registry.get_templates().keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Renderer {
    /// Load `post.html`, `index.html` and `category.html` from `template_dir`.
    pub fn load(template_dir: &Path) -> Result<Self, SiteError> {
        let mut registry = registry();
        for name in TEMPLATES {
            let path = template_dir.join(format!("{name}.html"));
            let source = std::fs::read_to_string(&path).map_err(SiteError::io(&path))?;
            registry
                .register_template_string(name, source)
                .map_err(|e| SiteError::Template {
                    name: name.to_string(),
                    source: Box::new(e),
                })?;
        }
        log::debug!("Loaded templates from {}", template_dir.display());
        Ok(Self { registry })
    }

    /// Build a renderer from in-memory template sources, keyed by template name.
    pub fn from_sources<'s>(
        sources: impl IntoIterator<Item = (&'s str, &'s str)>,
    ) -> Result<Self, SiteError> {
        let mut registry = registry();
        for (name, source) in sources {
            registry
                .register_template_string(name, source)
                .map_err(|e| SiteError::Template {
                    name: name.to_string(),
                    source: Box::new(e),
                })?;
        }
        for name in TEMPLATES {
            if !registry.has_template(name) {
                return Err(SiteError::Config(format!("template '{name}' is not registered")));
            }
        }
        Ok(Self { registry })
    }

    pub fn render_post(&self, page: &PostPage<'_>) -> Result<String, SiteError> {
        self.render(POST_TEMPLATE, page)
    }

    pub fn render_index(&self, page: &IndexPage<'_>) -> Result<String, SiteError> {
        self.render(INDEX_TEMPLATE, page)
    }

    pub fn render_category(&self, page: &CategoryPage<'_>) -> Result<String, SiteError> {
        self.render(CATEGORY_TEMPLATE, page)
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, SiteError> {
        self.registry
            .render(name, data)
            .map_err(|e| SiteError::Render {
                name: name.to_string(),
                source: Box::new(e),
            })
    }
}
