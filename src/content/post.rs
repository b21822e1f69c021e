//! Post models: raw CMS field shapes and the normalized views rendered by templates

use serde::{Deserialize, Serialize};

/// Fields projected by the listing query (`post.title`, `post.subtitle`, `post.author`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SummaryFields {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub author: Option<String>,
}

/// Full post document fields
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PostFields {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub banner: Option<ImageField>,
    pub author: Option<String>,
    pub content: Vec<ContentGroup>,
}

/// Image field; empty images come back as `{}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImageField {
    pub url: Option<String>,
    pub alt: Option<String>,
}

/// One repeatable `content` group entry
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContentGroup {
    pub heading: Option<String>,
    pub body: Vec<RichTextBlock>,
}

/// A rich text block; only its plain text is kept
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RichTextBlock {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub text: String,
}

/// A post as shown on the listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub uid: String,
    /// Already formatted for display
    pub first_publication_date: Option<String>,
    pub title: String,
    pub subtitle: Option<String>,
    pub author: String,
}

/// A full post as shown on its own page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostDetail {
    pub uid: String,
    /// Raw CMS timestamp
    pub first_publication_date: Option<String>,
    /// Display form of `first_publication_date`
    pub formatted_date: Option<String>,
    pub title: String,
    pub subtitle: Option<String>,
    pub banner: Banner,
    pub author: String,
    pub content: Vec<ContentSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub url: String,
    pub alt: Option<String>,
}

/// A heading followed by its body paragraphs, in source order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentSection {
    pub heading: String,
    pub body: Vec<TextFragment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextFragment {
    pub text: String,
}

impl PostDetail {
    /// Estimated minutes to read the post
    pub fn reading_time(&self, words_per_minute: usize) -> usize {
        super::detail::reading_time(&self.content, words_per_minute)
    }

    /// First body paragraph, used as page description
    pub fn lead(&self) -> Option<&str> {
        self.content
            .iter()
            .flat_map(|section| section.body.iter())
            .map(|fragment| fragment.text.trim())
            .find(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_fields_missing_subtitle() {
        let fields: SummaryFields = serde_json::from_value(json!({
            "title": "Como utilizar Hooks",
            "author": "Joseph Oliveira"
        }))
        .unwrap();
        assert_eq!(fields.title.as_deref(), Some("Como utilizar Hooks"));
        assert_eq!(fields.subtitle, None);
    }

    #[test]
    fn test_post_fields_with_nulls_and_empty_banner() {
        let fields: PostFields = serde_json::from_value(json!({
            "title": "Post",
            "subtitle": null,
            "banner": {},
            "author": "Ana",
            "content": [{
                "heading": "Intro",
                "body": [
                    { "type": "paragraph", "text": "Hello there", "spans": [] },
                    { "type": "image", "url": "https://images.prismic.io/x.png" }
                ]
            }]
        }))
        .unwrap();
        assert_eq!(fields.subtitle, None);
        assert_eq!(fields.banner.unwrap().url, None);
        assert_eq!(fields.content[0].body.len(), 2);
        assert_eq!(fields.content[0].body[1].text, "");
        assert_eq!(fields.content[0].body[1].kind.as_deref(), Some("image"));
    }
}
