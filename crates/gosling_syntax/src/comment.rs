//! Comment trivia attached to a parsed file.

use gosling_source::Span;

/// A single line or block comment, including its marker characters.
#[derive(Clone, Debug)]
pub struct Comment {
    /// The raw comment text (`// like this` or `/* like this */`).
    pub text: String,
    /// Source location.
    pub span: Span,
}

impl Comment {
    /// Returns the comment text with its `//` or `/* */` markers and
    /// surrounding whitespace stripped.
    pub fn content(&self) -> &str {
        let t = self.text.trim();
        if let Some(rest) = t.strip_prefix("//") {
            rest.trim()
        } else if let Some(rest) = t.strip_prefix("/*") {
            rest.strip_suffix("*/").unwrap_or(rest).trim()
        } else {
            t
        }
    }

    /// Returns `true` if this is a `//` line comment.
    pub fn is_line_comment(&self) -> bool {
        self.text.trim_start().starts_with("//")
    }
}

/// A run of adjacent comments with no blank line between them.
#[derive(Clone, Debug)]
pub struct CommentGroup {
    /// The comments of the group, in source order.
    pub comments: Vec<Comment>,
    /// Span covering the whole group.
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(text: &str) -> Comment {
        Comment {
            text: text.to_string(),
            span: Span::DUMMY,
        }
    }

    #[test]
    fn line_comment_content() {
        assert_eq!(comment("// hello").content(), "hello");
        assert_eq!(comment("//no space").content(), "no space");
    }

    #[test]
    fn block_comment_content() {
        assert_eq!(comment("/* inner */").content(), "inner");
    }

    #[test]
    fn line_comment_detection() {
        assert!(comment("// x").is_line_comment());
        assert!(!comment("/* x */").is_line_comment());
    }
}
