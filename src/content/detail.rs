//! Post pages: projection of a single document and reading time

use anyhow::Result;

use super::post::{Banner, ContentSection, PostDetail, PostFields, TextFragment};
use crate::cms::Document;
use crate::helpers::DateFormatter;

/// Render state of a post page
#[derive(Debug, Clone)]
pub enum DetailPage {
    /// The page is still being produced; render a placeholder.
    /// The server renders blocking on first request, so it never serves this.
    Fallback,
    Ready(PostDetail),
}

/// Normalize a post document
pub fn project_detail(
    document: Document<PostFields>,
    formatter: &DateFormatter,
) -> Result<PostDetail> {
    let formatted_date = document
        .first_publication_date
        .as_deref()
        .map(|date| formatter.format(date))
        .transpose()?;

    let data = document.data;
    let banner = data
        .banner
        .map(|image| Banner {
            url: image.url.unwrap_or_default(),
            alt: image.alt,
        })
        .unwrap_or_default();

    let content = data
        .content
        .into_iter()
        .map(|group| ContentSection {
            heading: group.heading.unwrap_or_default(),
            body: group
                .body
                .into_iter()
                .map(|block| TextFragment { text: block.text })
                .collect(),
        })
        .collect();

    Ok(PostDetail {
        uid: document.uid.unwrap_or_default(),
        first_publication_date: document.first_publication_date,
        formatted_date,
        title: data.title.unwrap_or_default(),
        subtitle: data.subtitle.filter(|s| !s.is_empty()),
        banner,
        author: data.author.unwrap_or_default(),
        content,
    })
}

/// Minutes to read the given sections, rounded up
pub fn reading_time(content: &[ContentSection], words_per_minute: usize) -> usize {
    let words: usize = content
        .iter()
        .map(|section| {
            count_words(&section.heading)
                + section
                    .body
                    .iter()
                    .map(|fragment| count_words(&fragment.text))
                    .sum::<usize>()
        })
        .sum();

    words.div_ceil(words_per_minute.max(1))
}

/// Whitespace-separated words
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn formatter() -> DateFormatter {
        DateFormatter::new("DD MMM YYYY", "en_US", "UTC").unwrap()
    }

    fn section(heading: &str, paragraphs: &[&str]) -> ContentSection {
        ContentSection {
            heading: heading.to_string(),
            body: paragraphs
                .iter()
                .map(|text| TextFragment {
                    text: text.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_reading_time_empty() {
        assert_eq!(reading_time(&[], 200), 0);
    }

    #[test]
    fn test_reading_time_rounds_up() {
        let body = vec!["word"; 199].join(" ");
        // 1 heading word + 199 body words = 200 -> exactly one minute
        assert_eq!(reading_time(&[section("Intro", &[&body])], 200), 1);
        // one more word spills into a second minute
        assert_eq!(reading_time(&[section("Two words", &[&body])], 200), 2);
    }

    #[test]
    fn test_reading_time_counts_all_sections() {
        let content = vec![
            section("One two", &["three four", "five"]),
            section("six", &["  seven\neight\t nine "]),
        ];
        assert_eq!(reading_time(&content, 3), 3);
        assert_eq!(reading_time(&content, 4), 3);
        assert_eq!(reading_time(&content, 5), 2);
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("  "), 0);
        assert_eq!(count_words("Lorem ipsum,  dolor\nsit"), 4);
    }

    #[test]
    fn test_project_detail_preserves_order() {
        let document: Document<PostFields> = serde_json::from_value(json!({
            "id": "X", "uid": "criando-um-app", "type": "post",
            "first_publication_date": "2021-03-25T19:27:35+0000",
            "data": {
                "title": "Criando um app CRA do zero",
                "subtitle": "",
                "banner": { "url": "https://images.prismic.io/banner.png", "alt": "Banner" },
                "author": "Danilo Vieira",
                "content": [
                    { "heading": "Proin et varius", "body": [
                        { "type": "paragraph", "text": "First", "spans": [] },
                        { "type": "paragraph", "text": "Second", "spans": [] }
                    ]},
                    { "heading": "Cras laoreet", "body": [
                        { "type": "paragraph", "text": "Third", "spans": [] }
                    ]}
                ]
            }
        }))
        .unwrap();

        let post = project_detail(document, &formatter()).unwrap();
        assert_eq!(post.uid, "criando-um-app");
        assert_eq!(post.formatted_date.as_deref(), Some("25 Mar 2021"));
        assert_eq!(
            post.first_publication_date.as_deref(),
            Some("2021-03-25T19:27:35+0000")
        );
        assert_eq!(post.subtitle, None);
        assert_eq!(post.banner.url, "https://images.prismic.io/banner.png");
        assert_eq!(post.content.len(), 2);
        assert_eq!(post.content[0].heading, "Proin et varius");
        let texts: Vec<_> = post.content[0].body.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, ["First", "Second"]);
        assert_eq!(post.content[1].body[0].text, "Third");
        assert_eq!(post.lead(), Some("First"));
    }

    #[test]
    fn test_project_detail_without_content() {
        let document: Document<PostFields> = serde_json::from_value(json!({
            "id": "X", "uid": "empty", "type": "post",
            "data": { "title": "Empty" }
        }))
        .unwrap();

        let post = project_detail(document, &formatter()).unwrap();
        assert!(post.content.is_empty());
        assert_eq!(post.formatted_date, None);
        assert_eq!(post.banner, Banner::default());
        assert_eq!(post.reading_time(200), 0);
        assert_eq!(post.lead(), None);
    }
}
