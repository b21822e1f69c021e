//! cms-blog: a server-rendered blog front end backed by a headless CMS
//!
//! Posts live in a Prismic repository. This crate queries them, shapes the
//! responses into listing and post views, and renders them with embedded
//! Tera templates, either ahead of time (`generate`) or per request (`server`).

pub mod cms;
pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// The main blog application
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Blog {
    /// Create a new blog instance from a directory.
    ///
    /// Reads `_config.yml` when present, then applies CMS overrides from
    /// the environment.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No _config.yml in {:?}, using defaults", base_dir);
            config::SiteConfig::default()
        };
        config.apply_env();

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a blog instance from an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let public_dir = base_dir.join(&config.public_dir);
        Self {
            config,
            base_dir,
            public_dir,
        }
    }

    /// Create a post loader for this site
    pub fn loader(&self) -> Result<content::PostLoader> {
        content::PostLoader::new(self)
    }

    /// Render the site into the public directory
    pub async fn generate(&self, all_posts: bool) -> Result<commands::generate::Report> {
        commands::generate::run(self, all_posts).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
