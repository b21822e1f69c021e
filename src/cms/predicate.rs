//! Query predicates in the CMS query language

use std::fmt;

/// A single search predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Exact match of a field path against a value
    At { path: String, value: String },
}

impl Predicate {
    /// `[at(path, "value")]`
    pub fn at(path: impl Into<String>, value: impl Into<String>) -> Self {
        Predicate::At {
            path: path.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::At { path, value } => {
                write!(f, "[at({}, \"{}\")]", path, escape_value(value))
            }
        }
    }
}

/// Combine predicates into the `q` parameter, e.g. `[[at(document.type, "post")]]`
pub fn query_string(predicates: &[Predicate]) -> String {
    let joined: String = predicates.iter().map(|p| p.to_string()).collect();
    format!("[{}]", joined)
}

fn escape_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_predicate() {
        let q = query_string(&[Predicate::at("document.type", "post")]);
        assert_eq!(q, r#"[[at(document.type, "post")]]"#);
    }

    #[test]
    fn test_multiple_predicates() {
        let q = query_string(&[
            Predicate::at("document.type", "post"),
            Predicate::at("my.post.uid", "hello-world"),
        ]);
        assert_eq!(
            q,
            r#"[[at(document.type, "post")][at(my.post.uid, "hello-world")]]"#
        );
    }

    #[test]
    fn test_value_is_escaped() {
        let p = Predicate::at("my.post.uid", r#"a"b"#);
        assert_eq!(p.to_string(), r#"[at(my.post.uid, "a\"b")]"#);
    }
}
