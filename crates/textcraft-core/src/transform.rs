/// Case transforms applied to a surface's full text.
use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};

/// The supported text transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    Uppercase,
    Lowercase,
    /// Uppercases the first letter of each whitespace-separated word and
    /// lowercases the rest.
    Titlecase,
}

impl TransformKind {
    /// Applies the transform to `text`, returning the new content.
    pub fn apply(&self, text: &str) -> String {
        match self {
            Self::Uppercase => text.to_uppercase(),
            Self::Lowercase => text.to_lowercase(),
            Self::Titlecase => titlecase(text),
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uppercase => "uppercase",
            Self::Lowercase => "lowercase",
            Self::Titlecase => "titlecase",
        };
        write!(f, "{name}")
    }
}

impl FromStr for TransformKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uppercase" => Ok(Self::Uppercase),
            "lowercase" => Ok(Self::Lowercase),
            "titlecase" => Ok(Self::Titlecase),
            other => bail!("Unknown transform kind: {other}"),
        }
    }
}

/// Title-cases each whitespace-separated word, preserving the original
/// whitespace exactly.
fn titlecase(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uppercase() {
        assert_eq!(TransformKind::Uppercase.apply("hello World"), "HELLO WORLD");
    }

    #[test]
    fn test_lowercase() {
        assert_eq!(TransformKind::Lowercase.apply("Hello WORLD"), "hello world");
    }

    #[test]
    fn test_titlecase_basic() {
        assert_eq!(
            TransformKind::Titlecase.apply("hello world AGAIN"),
            "Hello World Again"
        );
    }

    #[test]
    fn test_titlecase_preserves_whitespace() {
        assert_eq!(
            TransformKind::Titlecase.apply("two  spaces\nnew line"),
            "Two  Spaces\nNew Line"
        );
    }

    #[test]
    fn test_transforms_on_empty_text() {
        for kind in [
            TransformKind::Uppercase,
            TransformKind::Lowercase,
            TransformKind::Titlecase,
        ] {
            assert_eq!(kind.apply(""), "");
        }
    }

    #[test]
    fn test_from_str_roundtrip() {
        for kind in [
            TransformKind::Uppercase,
            TransformKind::Lowercase,
            TransformKind::Titlecase,
        ] {
            let parsed: TransformKind = kind.to_string().parse().expect("parse");
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("sentencecase".parse::<TransformKind>().is_err());
    }

    #[test]
    fn test_serde_wire_names() {
        let json = serde_json::to_string(&TransformKind::Titlecase).expect("serialize");
        assert_eq!(json, "\"titlecase\"");
        let kind: TransformKind = serde_json::from_str("\"uppercase\"").expect("deserialize");
        assert_eq!(kind, TransformKind::Uppercase);
    }
}
