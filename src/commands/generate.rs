//! Generate static files

use anyhow::{Context, Result};
use std::path::Path;

use crate::content::DetailPage;
use crate::helpers::post_output_path;
use crate::templates::{SiteData, TemplateRenderer};
use crate::Blog;

/// What a generation run wrote
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Posts on the listing page
    pub listed: usize,
    /// Post pages rendered ahead of time
    pub posts: usize,
}

/// Render the listing page (and, with `all_posts`, every post page)
pub async fn run(blog: &Blog, all_posts: bool) -> Result<Report> {
    let start = std::time::Instant::now();

    let loader = blog.loader()?;
    let renderer = TemplateRenderer::new()?;
    let site = SiteData::from_config(&blog.config);

    tokio::fs::create_dir_all(&blog.public_dir).await?;

    let listing = loader.load_listing().await?;
    let html = renderer.render_index(&site, &listing)?;
    write_page(&blog.public_dir.join("index.html"), &html).await?;
    tracing::info!("Rendered listing with {} posts", listing.results.len());

    let html = renderer.render_error(&site, 404, "Página não encontrada")?;
    write_page(&blog.public_dir.join("404.html"), &html).await?;

    let mut report = Report {
        listed: listing.results.len(),
        posts: 0,
    };

    if all_posts {
        for summary in loader.load_all().await? {
            let post = loader
                .load_post(&summary.uid)
                .await
                .with_context(|| format!("Failed to load post {}", summary.uid))?;
            let html = renderer.render_post(
                &site,
                &DetailPage::Ready(post),
                blog.config.words_per_minute,
            )?;
            write_page(&blog.public_dir.join(post_output_path(&summary.uid)), &html).await?;
            tracing::debug!("Rendered post {}", summary.uid);
            report.posts += 1;
        }
    }

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(report)
}

async fn write_page(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, html)
        .await
        .with_context(|| format!("Failed to write {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn doc(uid: &str) -> serde_json::Value {
        json!({
            "id": uid, "uid": uid, "type": "post",
            "first_publication_date": "2021-03-15T19:25:28+0000",
            "data": {
                "title": format!("Title {}", uid),
                "author": "Ana",
                "banner": { "url": "https://images.prismic.io/b.png" },
                "content": [{ "heading": "Intro", "body": [{ "type": "paragraph", "text": "Hello world" }] }]
            }
        })
    }

    async fn mock_cms(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/v2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "refs": [{ "id": "master", "ref": "MASTER", "isMasterRef": true }]
            })))
            .mount(server)
            .await;
        for uid in ["a", "b", "c"] {
            Mock::given(method("GET"))
                .and(path("/api/v2/documents/search"))
                .and(query_param("q", format!(r#"[[at(my.post.uid, "{}")]]"#, uid)))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "next_page": null, "prev_page": null, "results": [doc(uid)]
                })))
                .mount(server)
                .await;
        }
        Mock::given(method("GET"))
            .and(path("/api/v2/documents/search"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "next_page": null, "prev_page": null, "results": [doc("c")]
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/documents/search"))
            .and(query_param("q", r#"[[at(document.type, "post")]]"#))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "next_page": format!("{}/api/v2/documents/search?ref=MASTER&page=2&pageSize=2", server.uri()),
                "prev_page": null,
                "results": [doc("a"), doc("b")]
            })))
            .mount(server)
            .await;
    }

    fn blog_for(server: &MockServer, dir: &Path) -> Blog {
        let mut config = SiteConfig::default();
        config.language = "en_US".to_string();
        config.cms.endpoint = format!("{}/api/v2", server.uri());
        Blog::with_config(dir, config)
    }

    #[tokio::test]
    async fn test_generate_listing_only() {
        let server = MockServer::start().await;
        mock_cms(&server).await;
        let dir = tempfile::tempdir().unwrap();
        let blog = blog_for(&server, dir.path());

        let report = run(&blog, false).await.unwrap();
        assert_eq!(report, Report { listed: 2, posts: 0 });

        let index = std::fs::read_to_string(blog.public_dir.join("index.html")).unwrap();
        assert!(index.contains("Title a"));
        assert!(index.contains("15 Mar 2021"));
        assert!(blog.public_dir.join("404.html").exists());
        assert!(!blog.public_dir.join("post").exists());
    }

    #[tokio::test]
    async fn test_generate_all_posts() {
        let server = MockServer::start().await;
        mock_cms(&server).await;
        let dir = tempfile::tempdir().unwrap();
        let blog = blog_for(&server, dir.path());

        let report = run(&blog, true).await.unwrap();
        assert_eq!(report, Report { listed: 2, posts: 3 });

        let page = std::fs::read_to_string(blog.public_dir.join("post/c/index.html")).unwrap();
        assert!(page.contains("<h1>Title c</h1>"));
        assert!(page.contains("1 min"));
    }
}
