//! Site path helpers

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'&')
    .add(b'\'')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Site path of a post page
///
/// # Examples
/// ```ignore
/// post_path("hello world") // -> /post/hello%20world
/// ```
pub fn post_path(uid: &str) -> String {
    format!("/post/{}", utf8_percent_encode(uid, SEGMENT))
}

/// Output file of a pre-rendered post page, relative to the public dir
pub fn post_output_path(uid: &str) -> std::path::PathBuf {
    std::path::Path::new("post")
        .join(utf8_percent_encode(uid, SEGMENT).to_string())
        .join("index.html")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_path() {
        assert_eq!(post_path("como-utilizar-hooks"), "/post/como-utilizar-hooks");
        assert_eq!(post_path("a b/c"), "/post/a%20b%2Fc");
    }

    #[test]
    fn test_post_output_path() {
        assert_eq!(
            post_output_path("a/b"),
            std::path::Path::new("post/a%2Fb/index.html")
        );
    }
}
