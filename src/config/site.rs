//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable overriding `cms.endpoint`
pub const ENDPOINT_ENV: &str = "PRISMIC_API_ENDPOINT";

/// Environment variable overriding `cms.access_token`
pub const ACCESS_TOKEN_ENV: &str = "PRISMIC_ACCESS_TOKEN";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: String,
    pub timezone: String,

    // Date format (Moment.js style)
    pub date_format: String,

    // Listing
    pub per_page: usize,

    // Reading time
    pub words_per_minute: usize,

    // Directory
    pub public_dir: String,

    // Content source
    #[serde(default)]
    pub cms: CmsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "spacetraveling".to_string(),
            description: String::new(),
            language: "pt_BR".to_string(),
            timezone: "UTC".to_string(),

            date_format: "DD MMM YYYY".to_string(),

            per_page: 2,

            words_per_minute: 200,

            public_dir: "public".to_string(),

            cms: CmsConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply `PRISMIC_API_ENDPOINT` / `PRISMIC_ACCESS_TOKEN` from the environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(ENDPOINT_ENV).ok(),
            std::env::var(ACCESS_TOKEN_ENV).ok(),
        );
    }

    /// Override CMS connection settings; empty values are ignored
    pub fn apply_overrides(&mut self, endpoint: Option<String>, access_token: Option<String>) {
        if let Some(endpoint) = endpoint.filter(|v| !v.trim().is_empty()) {
            tracing::debug!("CMS endpoint overridden from environment");
            self.cms.endpoint = endpoint;
        }
        if let Some(token) = access_token.filter(|v| !v.trim().is_empty()) {
            self.cms.access_token = Some(token);
        }
    }

    /// BCP 47 tag for the `lang` attribute (`pt_BR` -> `pt-BR`)
    pub fn html_lang(&self) -> String {
        self.language.replace('_', "-")
    }
}

/// Headless CMS connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    /// API root, e.g. `https://my-repo.cdn.prismic.io/api/v2`
    pub endpoint: String,
    pub access_token: Option<String>,
    pub document_type: String,
    pub timeout_secs: u64,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            access_token: None,
            document_type: "post".to_string(),
            timeout_secs: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.per_page, 2);
        assert_eq!(config.words_per_minute, 200);
        assert_eq!(config.date_format, "DD MMM YYYY");
        assert_eq!(config.cms.document_type, "post");
        assert!(config.cms.endpoint.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
language: en_US
per_page: 5
cms:
  endpoint: https://blog.cdn.prismic.io/api/v2
  access_token: secret
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.language, "en_US");
        assert_eq!(config.per_page, 5);
        assert_eq!(config.cms.endpoint, "https://blog.cdn.prismic.io/api/v2");
        assert_eq!(config.cms.access_token.as_deref(), Some("secret"));
        // Unset keys keep their defaults
        assert_eq!(config.cms.document_type, "post");
        assert_eq!(config.cms.timeout_secs, 10);
        assert_eq!(config.words_per_minute, 200);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "title: From Disk\ntimezone: America/Sao_Paulo\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.title, "From Disk");
        assert_eq!(config.timezone, "America/Sao_Paulo");
    }

    #[test]
    fn test_overrides() {
        let mut config = SiteConfig::default();
        config.apply_overrides(Some("http://localhost/api/v2".into()), Some(" ".into()));
        assert_eq!(config.cms.endpoint, "http://localhost/api/v2");
        assert_eq!(config.cms.access_token, None);

        config.apply_overrides(None, Some("token".into()));
        assert_eq!(config.cms.endpoint, "http://localhost/api/v2");
        assert_eq!(config.cms.access_token.as_deref(), Some("token"));
    }

    #[test]
    fn test_html_lang() {
        assert_eq!(SiteConfig::default().html_lang(), "pt-BR");
    }
}
