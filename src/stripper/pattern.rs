use crate::config::DEFAULT_PLACEHOLDER;
use crate::error::Result;
use regex::{Captures, Regex};
use std::borrow::Cow;

pub const DOC_COMMENT_OPENER: &str = "/**";

// `(?s)` lets `.` cross line breaks; `.*?` stops at the first closer.
const DOC_COMMENT_REGEX: &str = r"(?s)/\*\*.*?\*/";

/// Result of running the substitution over one file's text.
#[derive(Debug)]
pub struct Stripped<'a> {
    pub content: Cow<'a, str>,
    pub replacements: usize,
}

impl Stripped<'_> {
    pub fn is_changed(&self, original: &str) -> bool {
        self.content != original
    }
}

/// Matches documentation block comments (`/** ... */`) lexically.
///
/// There is no awareness of string or template literals: an opener inside a
/// quoted string is matched like any other.
#[derive(Debug, Clone)]
pub struct DocCommentPattern {
    regex: Regex,
    placeholder: String,
}

impl DocCommentPattern {
    pub fn new() -> Result<Self> {
        Ok(Self {
            regex: Regex::new(DOC_COMMENT_REGEX)?,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        })
    }

    pub fn with_placeholder<S: Into<String>>(mut self, placeholder: S) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Replaces every non-overlapping match with the placeholder, taken literally.
    pub fn strip<'a>(&self, text: &'a str) -> Stripped<'a> {
        let mut replacements = 0;
        let content = self.regex.replace_all(text, |_: &Captures<'_>| {
            replacements += 1;
            self.placeholder.as_str()
        });

        Stripped {
            content,
            replacements,
        }
    }
}
