//! File-exclusion filters attached to rules and to the run as a whole.
//!
//! A filter is parsed from one of four textual forms: a literal path, a
//! match-everything wildcard (`*` or `~`), a glob (where `**` crosses
//! directory separators and `*` does not), or a `~`-prefixed raw regular
//! expression. The special literal `TEST` matches any file with the
//! `_test.go` naming convention. Matching is a pure function of the filter
//! text and the normalized path.

use gosling_config::ConfigError;
use regex::Regex;

/// The suffix convention identifying test files.
const TEST_SUFFIX: &str = "_test.go";

#[derive(Clone, Debug)]
enum FilterKind {
    /// The empty string: matches nothing.
    Empty,
    /// `*` or `~`: matches every path.
    All,
    /// The `TEST` sugar: matches the test-file suffix convention.
    Test,
    /// A glob or raw regex, compiled.
    Pattern(Regex),
    /// Exact path equality.
    Literal(String),
}

/// One file-exclusion filter.
///
/// A rule is applied to a file unless at least one of its configured
/// exclude filters matches that file's normalized path.
#[derive(Clone, Debug)]
pub struct FileFilter {
    raw: String,
    kind: FilterKind,
}

impl FileFilter {
    /// Parses a filter from its textual form.
    ///
    /// Returns a [`ConfigError::BadPattern`] when an embedded regular
    /// expression does not compile.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let kind = if text.is_empty() {
            FilterKind::Empty
        } else if text == "*" || text == "~" {
            FilterKind::All
        } else if text == "TEST" {
            FilterKind::Test
        } else if let Some(raw_regex) = text.strip_prefix('~') {
            FilterKind::Pattern(compile(text, raw_regex)?)
        } else if text.contains('*') {
            FilterKind::Pattern(compile(text, &glob_to_regex(text))?)
        } else {
            FilterKind::Literal(normalize(text))
        };
        Ok(Self {
            raw: text.to_string(),
            kind,
        })
    }

    /// Returns the original filter text.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns `true` if the filter matches the given file path.
    ///
    /// Path separators are normalized before testing, so the same filter
    /// matches regardless of host-platform separator conventions.
    pub fn matches(&self, path: &str) -> bool {
        let path = normalize(path);
        match &self.kind {
            FilterKind::Empty => false,
            FilterKind::All => true,
            FilterKind::Test => path.ends_with(TEST_SUFFIX),
            FilterKind::Pattern(re) => re.is_match(&path),
            FilterKind::Literal(lit) => &path == lit,
        }
    }
}

fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

fn compile(raw: &str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|e| ConfigError::BadPattern {
        pattern: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Translates a glob into an anchored regular expression.
///
/// `**/` may also match zero directories, so `a/**/x.go` covers `a/x.go`;
/// a single `*` never crosses a `/`.
fn glob_to_regex(glob: &str) -> String {
    let glob = normalize(glob);
    let mut out = String::from("^");
    let bytes = glob.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'*' => {
                if bytes.get(i + 1) == Some(&b'*') {
                    if bytes.get(i + 2) == Some(&b'/') {
                        out.push_str("(?:.*/)?");
                        i += 3;
                    } else {
                        out.push_str(".*");
                        i += 2;
                    }
                } else {
                    out.push_str("[^/]*");
                    i += 1;
                }
            }
            c => {
                let ch = c as char;
                if "\\.+()[]{}^$|?".contains(ch) {
                    out.push('\\');
                }
                out.push(ch);
                i += 1;
            }
        }
    }
    out.push('$');
    out
}
