//! Built-in theme templates using Tera template engine
//!
//! Templates are embedded in the binary. HTML autoescaping stays on since
//! every rendered value comes from CMS content.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{DetailPage, PostPagination};
use crate::helpers::post_path;

/// Template renderer with the embedded theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("theme/layout.html")),
            ("index.html", include_str!("theme/index.html")),
            ("post.html", include_str!("theme/post.html")),
            ("error.html", include_str!("theme/error.html")),
        ])?;

        tera.register_filter("truncate_chars", truncate_chars_filter);
        tera.register_filter("post_path", post_path_filter);
        tera.register_filter("reading_time_label", reading_time_label_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Render the listing page
    pub fn render_index(&self, site: &SiteData, posts: &PostPagination) -> Result<String> {
        let mut context = base_context(site);
        context.insert("posts", posts);
        self.render("index.html", &context)
    }

    /// Render a post page, or its placeholder while it is being produced
    pub fn render_post(
        &self,
        site: &SiteData,
        page: &DetailPage,
        words_per_minute: usize,
    ) -> Result<String> {
        let mut context = base_context(site);
        match page {
            DetailPage::Ready(post) => {
                context.insert("post", post);
                context.insert("reading_time", &post.reading_time(words_per_minute));
                context.insert("description", &post.lead());
            }
            DetailPage::Fallback => {
                context.insert("post", &None::<()>);
                context.insert("description", &None::<String>);
            }
        }
        self.render("post.html", &context)
    }

    /// Render an error page
    pub fn render_error(&self, site: &SiteData, status: u16, message: &str) -> Result<String> {
        let mut context = base_context(site);
        context.insert("status", &status);
        context.insert("message", message);
        self.render("error.html", &context)
    }
}

fn base_context(site: &SiteData) -> Context {
    let mut context = Context::new();
    context.insert("site", site);
    context
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "...".to_string(),
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!(
            "{}{}",
            truncated.trim_end(),
            omission
        )))
    }
}

/// Tera filter: site path of a post UID
fn post_path_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let uid = tera::try_get_value!("post_path", "value", String, value);
    Ok(tera::Value::String(post_path(&uid)))
}

/// Tera filter: "{n} min" label for a reading time
fn reading_time_label_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let minutes = tera::try_get_value!("reading_time_label", "value", u64, value);
    Ok(tera::Value::String(format!("{} min", minutes)))
}

/// Site-wide template data
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub lang: String,
}

impl SiteData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            lang: config.html_lang(),
        }
    }
}
