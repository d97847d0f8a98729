//! Inline directive parsing: `gosling:` comments that enable or disable
//! checks over regions of a file.
//!
//! The recognized grammar, always inside a `//` line comment:
//!
//! ```text
//! gosling:disable[:<rule>[,<rule>...]]
//! gosling:enable[:<rule>[,<rule>...]]
//! gosling:disable-line[:<rule>...]
//! gosling:enable-line[:<rule>...]
//! gosling:disable-next-line[:<rule>...]
//! gosling:enable-next-line[:<rule>...]
//! ```
//!
//! Bare forms apply to every rule through the wildcard key. Text that does
//! not match the grammar is an ordinary comment and is ignored; unknown
//! rule names produce intervals that simply never match a real rule.

use gosling_source::SourceFile;
use gosling_syntax::CommentGroup;
use std::collections::HashMap;

/// The marker token opening every directive comment.
pub const DIRECTIVE_MARKER: &str = "gosling:";

/// The wildcard key under which bare `disable`/`enable` directives are kept.
const WILDCARD: &str = "all";

/// An inclusive range of source lines during which a rule is affected.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Interval {
    /// First affected line (1-indexed, inclusive).
    pub from: u32,
    /// Last affected line (inclusive). [`Interval::OPEN_END`] for an
    /// unterminated block `disable`.
    pub to: u32,
}

impl Interval {
    /// Sentinel end line meaning "through end of file". Compares after any
    /// real line number, which is observably the same as end-of-file.
    pub const OPEN_END: u32 = u32::MAX;

    /// Returns `true` if the given line falls inside this interval.
    pub fn contains(&self, line: u32) -> bool {
        self.from <= line && line <= self.to
    }
}

/// Per-rule suppression intervals for one compilation unit.
///
/// `disabled` holds the regions in which findings are dropped; `enabled`
/// holds single-line re-enable overrides that punch holes into an
/// enclosing block-level disable.
#[derive(Clone, Debug, Default)]
pub struct SuppressionMap {
    disabled: HashMap<String, Vec<Interval>>,
    enabled: HashMap<String, Vec<Interval>>,
}

impl SuppressionMap {
    /// Returns `true` if a finding for `rule` on `line` must be dropped.
    ///
    /// A line is suppressed iff it falls in a disable interval recorded for
    /// the rule or for the wildcard, and no enable override covers it.
    pub fn is_suppressed(&self, rule: &str, line: u32) -> bool {
        if !Self::covered(&self.disabled, rule, line) {
            return false;
        }
        !Self::covered(&self.enabled, rule, line)
    }

    /// Returns the disable intervals recorded for a rule name (not
    /// including the wildcard's).
    pub fn intervals(&self, rule: &str) -> &[Interval] {
        self.disabled.get(rule).map(Vec::as_slice).unwrap_or(&[])
    }

    fn covered(map: &HashMap<String, Vec<Interval>>, rule: &str, line: u32) -> bool {
        let direct = map
            .get(rule)
            .is_some_and(|iv| iv.iter().any(|i| i.contains(line)));
        if direct {
            return true;
        }
        map.get(WILDCARD)
            .is_some_and(|iv| iv.iter().any(|i| i.contains(line)))
    }

    fn push(&mut self, enable: bool, rule: &str, interval: Interval) {
        let map = if enable {
            &mut self.enabled
        } else {
            &mut self.disabled
        };
        map.entry(rule.to_string()).or_default().push(interval);
    }

    /// Closes the innermost open interval for `rule`, setting its end to
    /// `line`. An enable with no open interval is a no-op.
    fn close(&mut self, rule: &str, line: u32) {
        if let Some(intervals) = self.disabled.get_mut(rule) {
            if let Some(open) = intervals
                .iter_mut()
                .rev()
                .find(|i| i.to == Interval::OPEN_END)
            {
                open.to = line;
            }
        }
    }
}

/// The six recognized directive verbs.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Verb {
    Disable,
    Enable,
    DisableLine,
    EnableLine,
    DisableNextLine,
    EnableNextLine,
}

impl Verb {
    fn parse(text: &str) -> Option<Verb> {
        match text {
            "disable" => Some(Verb::Disable),
            "enable" => Some(Verb::Enable),
            "disable-line" => Some(Verb::DisableLine),
            "enable-line" => Some(Verb::EnableLine),
            "disable-next-line" => Some(Verb::DisableNextLine),
            "enable-next-line" => Some(Verb::EnableNextLine),
            _ => None,
        }
    }
}

/// Scans a unit's comment trivia and builds its [`SuppressionMap`].
///
/// Comment groups must be given in source order; block `disable`s left
/// unterminated keep their sentinel end and cover through end of file.
pub fn parse_directives(comments: &[CommentGroup], source: &SourceFile) -> SuppressionMap {
    let mut map = SuppressionMap::default();

    for group in comments {
        for comment in &group.comments {
            if !comment.is_line_comment() {
                continue;
            }
            let content = comment.content();
            let Some(rest) = content.strip_prefix(DIRECTIVE_MARKER) else {
                continue;
            };
            let (verb_text, rule_list) = match rest.split_once(':') {
                Some((v, rules)) => (v.trim(), Some(rules)),
                None => (rest.trim(), None),
            };
            let Some(verb) = Verb::parse(verb_text) else {
                // A directive-looking comment with a typo'd verb is an
                // ordinary comment, never an error.
                continue;
            };
            let (line, _) = source.line_col(comment.span.start);
            let rules: Vec<&str> = match rule_list {
                Some(list) => list
                    .split(',')
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .collect(),
                None => vec![WILDCARD],
            };

            for rule in rules {
                match verb {
                    Verb::Disable => map.push(
                        false,
                        rule,
                        Interval {
                            from: line,
                            to: Interval::OPEN_END,
                        },
                    ),
                    Verb::Enable => map.close(rule, line),
                    Verb::DisableLine => map.push(false, rule, Interval { from: line, to: line }),
                    Verb::EnableLine => map.push(true, rule, Interval { from: line, to: line }),
                    Verb::DisableNextLine => map.push(
                        false,
                        rule,
                        Interval {
                            from: line + 1,
                            to: line + 1,
                        },
                    ),
                    Verb::EnableNextLine => map.push(
                        true,
                        rule,
                        Interval {
                            from: line + 1,
                            to: line + 1,
                        },
                    ),
                }
            }
        }
    }

    map
}
