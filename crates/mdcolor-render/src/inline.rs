//! Inline style resolution: emphasis, code spans and links within one line.
//!
//! Resolution is an ordered list of rules, each a pattern plus a
//! substitution, applied one after the other to the whole line. Order
//! matters in two ways:
//!
//! - Longer delimiter runs are consumed before shorter ones. `***x***` must be
//!   taken by the triple rule before the double rule sees `**`, and `**x**`
//!   before the single rule sees `*`.
//! - Later rules see the output of earlier ones. That output only adds
//!   escape sequences, which contain none of `*`, `_` or `` ` ``, and the link
//!   rule refuses a `[` that opens an escape sequence. A resolved line
//!   therefore resolves to itself.
//!
//! The `regex` crate has no lookaround, so the delimiter constraints are
//! expressed in three parts: the body pattern forbids whitespace at either
//! edge, a trailing "not followed by" check is matched as one extra
//! character that is not consumed (resolution resumes at the end of the
//! `close` group), and a "not preceded by" check is an opener guard run
//! against the character before the match.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::error;

use crate::style::{StyleName, Styles};

type OpenerGuard = fn(Option<char>) -> bool;

#[derive(Debug, Clone, Copy)]
enum Substitution {
    /// Replace the whole match with the `lead`, `body` and `trail` groups,
    /// joined and painted in one style. Only nested forms use `lead`/`trail`.
    Span(StyleName),
    /// Paint `[text]` and `url` separately, keeping the delimiters.
    Link,
}

/// One matcher-and-substitution step of the resolver.
#[derive(Debug)]
pub struct InlineRule {
    name: &'static str,
    pattern: Regex,
    substitution: Substitution,
    guard: Option<OpenerGuard>,
}

impl InlineRule {
    fn new(
        name: &'static str,
        pattern: &str,
        substitution: Substitution,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            pattern: Regex::new(pattern)?,
            substitution,
            guard: None,
        })
    }

    fn guarded(mut self, guard: OpenerGuard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Name of the rule, for diagnostics and tests.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Applies this rule alone to every non-overlapping match in `line`.
    pub fn apply<'a>(&self, line: &'a str, styles: &Styles) -> Cow<'a, str> {
        let mut out = String::new();
        let mut copied = 0;
        let mut at = 0;
        let mut replaced = false;

        while at <= line.len() {
            let Some(caps) = self.pattern.captures_at(line, at) else {
                break;
            };
            let Some(whole) = caps.get(0) else {
                break;
            };
            let start = whole.start();

            if let Some(guard) = self.guard {
                if !guard(line[..start].chars().next_back()) {
                    at = start + line[start..].chars().next().map_or(1, char::len_utf8);
                    continue;
                }
            }

            let end = caps.name("close").map_or(whole.end(), |close| close.end());
            out.push_str(&line[copied..start]);
            out.push_str(&self.substitute(&caps, styles));
            copied = end;
            at = end;
            replaced = true;
        }

        if !replaced {
            return Cow::Borrowed(line);
        }
        out.push_str(&line[copied..]);
        Cow::Owned(out)
    }

    fn substitute(&self, caps: &Captures<'_>, styles: &Styles) -> String {
        let group = |name: &str| caps.name(name).map_or("", |m| m.as_str());
        match self.substitution {
            Substitution::Span(style) => {
                let text = [group("lead"), group("body"), group("trail")].concat();
                styles.paint(style, &text)
            }
            Substitution::Link => format!(
                "{}({})",
                styles.paint(StyleName::LinkText, &format!("[{}]", group("text"))),
                styles.paint(StyleName::LinkUrl, group("url")),
            ),
        }
    }
}

fn not_after_asterisk(prev: Option<char>) -> bool {
    prev != Some('*')
}

fn not_inside_word(prev: Option<char>) -> bool {
    !matches!(prev, Some(c) if c.is_alphanumeric() || c == '_')
}

fn not_escape_sequence(prev: Option<char>) -> bool {
    prev != Some('\x1b')
}

fn build_rules() -> Result<Vec<InlineRule>, regex::Error> {
    use Substitution::{Link, Span};
    use StyleName::{Bold, BoldItalic, InlineCode, Italic};

    Ok(vec![
        // mixed delimiters collapse into one bold-italic span
        InlineRule::new(
            "asterisk_bold_underscore_italic",
            r"\*\*_(?P<body>[^_\s](?:.*?\S)??)_\*\*",
            Span(BoldItalic),
        )?,
        InlineRule::new(
            "asterisk_italic_underscore_bold",
            r"\*__(?P<body>[^_\s](?:.*?\S)??)__\*",
            Span(BoldItalic),
        )?,
        InlineRule::new(
            "underscore_bold_asterisk_italic",
            r"__\*(?P<body>[^*\s](?:.*?\S)??)\*__",
            Span(BoldItalic),
        )?,
        InlineRule::new(
            "underscore_italic_asterisk_bold",
            r"_\*\*(?P<body>[^*\s](?:.*?\S)??)\*\*_",
            Span(BoldItalic),
        )?,
        // an italic span inside an italic span of the other delimiter; the
        // inner underscores keep the identifier rule of `single_underscore`
        InlineRule::new(
            "asterisk_italic_around_underscore_italic",
            r"\*(?P<lead>[^*_\s\p{Alphabetic}\p{N}]|[^*_\s][^*_]*[^*_\p{Alphabetic}\p{N}])?_(?P<body>[^*_\s](?:[^*_]*[^*_\s])?)_(?P<trail>[^*_\s\p{Alphabetic}\p{N}]|[^*_\p{Alphabetic}\p{N}][^*_]*[^*_\s])?(?P<close>\*)(?:[^*]|$)",
            Span(BoldItalic),
        )?
        .guarded(not_after_asterisk),
        InlineRule::new(
            "underscore_italic_around_asterisk_italic",
            r"_(?P<lead>[^*_\s][^*_]*)?\*(?P<body>[^*_\s](?:[^*_]*[^*_\s])?)\*(?P<trail>[^*_]*[^*_\s])?(?P<close>_)(?:[^\p{Alphabetic}\p{N}_]|$)",
            Span(BoldItalic),
        )?
        .guarded(not_inside_word),
        InlineRule::new(
            "triple_asterisk",
            r"\*\*\*(?P<body>\S(?:.*?\S)??)\*\*\*",
            Span(BoldItalic),
        )?,
        InlineRule::new(
            "triple_underscore",
            r"___(?P<body>\S(?:.*?\S)??)___",
            Span(BoldItalic),
        )?,
        InlineRule::new(
            "double_asterisk",
            r"\*\*(?P<body>\S(?:.*?\S)??)\*\*",
            Span(Bold),
        )?,
        InlineRule::new(
            "double_underscore",
            r"__(?P<body>\S(?:.*?\S)??)__",
            Span(Bold),
        )?,
        InlineRule::new(
            "single_asterisk",
            r"\*(?P<body>\S(?:.*?\S)??)(?P<close>\*)(?:[^*]|$)",
            Span(Italic),
        )?
        .guarded(not_after_asterisk),
        InlineRule::new(
            "single_underscore",
            r"_(?P<body>[^_\s](?:.*?\S)??)(?P<close>_)(?:[^\p{Alphabetic}\p{N}_]|$)",
            Span(Italic),
        )?
        .guarded(not_inside_word),
        InlineRule::new(
            "code_span",
            r"`(?P<body>[^`\s](?:[^`]*?[^`\s])??)`",
            Span(InlineCode),
        )?,
        InlineRule::new(
            "link",
            r"\[(?P<text>\S(?:.*?\S)??)\]\((?P<url>.*?)\)",
            Link,
        )?
        .guarded(not_escape_sequence),
    ])
}

// Empty only if a pattern fails to compile; lines then pass through as-is.
static RULES: Lazy<Vec<InlineRule>> = Lazy::new(|| {
    build_rules().unwrap_or_else(|err| {
        error!(error = %err, "inline rules failed to compile");
        Vec::new()
    })
});

/// The resolver's rules, in application order.
pub fn rules() -> &'static [InlineRule] {
    &RULES
}

/// Resolves every inline construct in `line`.
///
/// Lines without markup come back unchanged.
///
/// ```rust
/// use mdcolor_render::inline::resolve;
/// use mdcolor_render::style::{StyleName, Styles};
///
/// let styles = Styles::new();
/// assert_eq!(
///     resolve("a **b** c", &styles),
///     format!("a {} c", styles.paint(StyleName::Bold, "b")),
/// );
/// assert_eq!(resolve("snake_case_name", &styles), "snake_case_name");
/// ```
pub fn resolve(line: &str, styles: &Styles) -> String {
    let mut current = Cow::Borrowed(line);
    for rule in rules() {
        let replaced = match rule.apply(&current, styles) {
            Cow::Borrowed(_) => None,
            Cow::Owned(next) => Some(next),
        };
        if let Some(next) = replaced {
            current = Cow::Owned(next);
        }
    }
    current.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str) -> &'static InlineRule {
        rules()
            .iter()
            .find(|rule| rule.name() == name)
            .unwrap_or_else(|| panic!("no rule named {}", name))
    }

    fn apply(name: &str, line: &str) -> String {
        rule(name).apply(line, &Styles::new()).into_owned()
    }

    fn paint(style: StyleName, text: &str) -> String {
        Styles::new().paint(style, text)
    }

    // =========================================================================
    // Rule order
    // =========================================================================

    #[test]
    fn test_rules_compile() {
        assert_eq!(build_rules().map(|rules| rules.len()).ok(), Some(14));
        assert_eq!(rules().len(), 14);
    }

    #[test]
    fn test_rule_order() {
        let names: Vec<&str> = rules().iter().map(InlineRule::name).collect();
        assert_eq!(
            names,
            vec![
                "asterisk_bold_underscore_italic",
                "asterisk_italic_underscore_bold",
                "underscore_bold_asterisk_italic",
                "underscore_italic_asterisk_bold",
                "asterisk_italic_around_underscore_italic",
                "underscore_italic_around_asterisk_italic",
                "triple_asterisk",
                "triple_underscore",
                "double_asterisk",
                "double_underscore",
                "single_asterisk",
                "single_underscore",
                "code_span",
                "link",
            ]
        );
    }

    // =========================================================================
    // Rules in isolation
    // =========================================================================

    #[test]
    fn test_mixed_rules_each_match_their_own_form() {
        let expected = paint(StyleName::BoldItalic, "x");
        assert_eq!(apply("asterisk_bold_underscore_italic", "**_x_**"), expected);
        assert_eq!(apply("asterisk_italic_underscore_bold", "*__x__*"), expected);
        assert_eq!(apply("underscore_bold_asterisk_italic", "__*x*__"), expected);
        assert_eq!(apply("underscore_italic_asterisk_bold", "_**x**_"), expected);
    }

    #[test]
    fn test_mixed_rules_ignore_other_forms() {
        assert_eq!(apply("asterisk_bold_underscore_italic", "__*x*__"), "__*x*__");
        assert_eq!(apply("underscore_italic_asterisk_bold", "**_x_**"), "**_x_**");
    }

    #[test]
    fn test_nested_italic_rules() {
        let expected = paint(StyleName::BoldItalic, "bold italic bold");
        assert_eq!(
            apply("asterisk_italic_around_underscore_italic", "*bold _italic_ bold*"),
            expected
        );
        assert_eq!(
            apply("underscore_italic_around_asterisk_italic", "_bold *italic* bold_"),
            expected
        );
    }

    #[test]
    fn test_nested_italic_rules_need_an_inner_span() {
        for line in ["*plain italic*", "*a* and _b_", "*x* _y_ *z*", "**b _i_ b**"] {
            assert_eq!(apply("asterisk_italic_around_underscore_italic", line), line);
        }
        for line in ["_plain italic_", "_a_ and *b*", "snake_*x*_case"] {
            assert_eq!(apply("underscore_italic_around_asterisk_italic", line), line);
        }
    }

    #[test]
    fn test_nested_italic_keeps_identifier_underscores() {
        assert_eq!(
            apply("asterisk_italic_around_underscore_italic", "*snake_case_name*"),
            "*snake_case_name*"
        );
    }

    #[test]
    fn test_triple_rules() {
        let expected = paint(StyleName::BoldItalic, "both");
        assert_eq!(apply("triple_asterisk", "***both***"), expected);
        assert_eq!(apply("triple_underscore", "___both___"), expected);
    }

    #[test]
    fn test_double_rules() {
        assert_eq!(
            apply("double_asterisk", "a **b c** d"),
            format!("a {} d", paint(StyleName::Bold, "b c"))
        );
        assert_eq!(
            apply("double_underscore", "__b__"),
            paint(StyleName::Bold, "b")
        );
    }

    #[test]
    fn test_body_may_not_touch_whitespace() {
        assert_eq!(apply("double_asterisk", "** b**"), "** b**");
        assert_eq!(apply("double_asterisk", "**b **"), "**b **");
        assert_eq!(apply("single_asterisk", "2 * 3 * 4"), "2 * 3 * 4");
    }

    #[test]
    fn test_single_asterisk() {
        assert_eq!(
            apply("single_asterisk", "an *emphasised* word"),
            format!("an {} word", paint(StyleName::Italic, "emphasised"))
        );
    }

    #[test]
    fn test_single_asterisk_needs_closing_delimiter() {
        assert_eq!(apply("single_asterisk", "2*3 = 6"), "2*3 = 6");
        assert_eq!(apply("single_asterisk", "*open"), "*open");
    }

    #[test]
    fn test_single_asterisk_resumes_after_closing_delimiter() {
        let italic = |s: &str| paint(StyleName::Italic, s);
        assert_eq!(
            apply("single_asterisk", "*a*b*c*"),
            format!("{}b{}", italic("a"), italic("c"))
        );
    }

    #[test]
    fn test_single_underscore() {
        assert_eq!(
            apply("single_underscore", "an _emphasised_ word."),
            format!("an {} word.", paint(StyleName::Italic, "emphasised"))
        );
    }

    #[test]
    fn test_single_underscore_inside_words() {
        assert_eq!(apply("single_underscore", "a_b_c"), "a_b_c");
        assert_eq!(apply("single_underscore", "snake_case_name"), "snake_case_name");
        assert_eq!(apply("single_underscore", "_leading_edge"), "_leading_edge");
        assert_eq!(apply("single_underscore", "trailing_edge_"), "trailing_edge_");
        assert_eq!(apply("single_underscore", "café_au_lait"), "café_au_lait");
    }

    #[test]
    fn test_single_underscore_after_identifier_retries_later() {
        assert_eq!(
            apply("single_underscore", "a_b _c_"),
            format!("a_b {}", paint(StyleName::Italic, "c"))
        );
    }

    #[test]
    fn test_code_span_keeps_inner_spacing() {
        assert_eq!(
            apply("code_span", "run `cargo  test` now"),
            format!("run {} now", paint(StyleName::InlineCode, "cargo  test"))
        );
    }

    #[test]
    fn test_code_span_may_not_touch_whitespace() {
        assert_eq!(apply("code_span", "a ` x` b"), "a ` x` b");
        assert_eq!(apply("code_span", "run `cargo test ` now"), "run `cargo test ` now");
        assert_eq!(apply("code_span", "empty `` ticks"), "empty `` ticks");
    }

    #[test]
    fn test_link() {
        let out = apply("link", "see [docs](https://example.com/a_b) here");
        let expected = format!(
            "see {}({}) here",
            paint(StyleName::LinkText, "[docs]"),
            paint(StyleName::LinkUrl, "https://example.com/a_b")
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_link_text_may_not_touch_whitespace() {
        assert_eq!(apply("link", "[ docs](u)"), "[ docs](u)");
        assert_eq!(apply("link", "[docs ](u)"), "[docs ](u)");
    }

    #[test]
    fn test_link_requires_both_parts() {
        assert_eq!(apply("link", "[just brackets] (and parens)"), "[just brackets] (and parens)");
    }

    #[test]
    fn test_unmatched_rule_borrows_input() {
        assert!(matches!(
            rule("double_asterisk").apply("plain", &Styles::new()),
            Cow::Borrowed("plain")
        ));
    }

    // =========================================================================
    // Full chain
    // =========================================================================

    #[test]
    fn test_resolve_bold() {
        let styles = Styles::new();
        assert_eq!(resolve("**bold**", &styles), styles.paint(StyleName::Bold, "bold"));
    }

    #[test]
    fn test_resolve_mixed_permutations_give_single_span() {
        let styles = Styles::new();
        let expected = styles.paint(StyleName::BoldItalic, "both");
        for line in ["**_both_**", "*__both__*", "__*both*__", "_**both**_"] {
            assert_eq!(resolve(line, &styles), expected, "input {}", line);
        }
    }

    #[test]
    fn test_resolve_triple_before_double() {
        let styles = Styles::new();
        assert_eq!(
            resolve("***x***", &styles),
            styles.paint(StyleName::BoldItalic, "x")
        );
    }

    #[test]
    fn test_resolve_nested_italics_give_single_span() {
        let styles = Styles::new();
        let expected = styles.paint(StyleName::BoldItalic, "bold italic bold");
        assert_eq!(resolve("*bold _italic_ bold*", &styles), expected);
        assert_eq!(resolve("_bold *italic* bold_", &styles), expected);
        assert_eq!(
            resolve("a *b _c_ d* e", &styles),
            format!("a {} e", styles.paint(StyleName::BoldItalic, "b c d"))
        );
    }

    #[test]
    fn test_resolve_code_span_keeps_identifier_underscores() {
        let styles = Styles::new();
        let out = resolve("`a_b_c`", &styles);
        assert_eq!(out, styles.paint(StyleName::InlineCode, "a_b_c"));
    }

    #[test]
    fn test_resolve_mixed_line() {
        let styles = Styles::new();
        let out = resolve("**b** and *i* with `c` at [t](u)", &styles);
        let expected = format!(
            "{} and {} with {} at {}({})",
            styles.paint(StyleName::Bold, "b"),
            styles.paint(StyleName::Italic, "i"),
            styles.paint(StyleName::InlineCode, "c"),
            styles.paint(StyleName::LinkText, "[t]"),
            styles.paint(StyleName::LinkUrl, "u"),
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_resolve_is_idempotent_on_links() {
        let styles = Styles::new();
        let once = resolve("[a](b) and [c](d)", &styles);
        assert_eq!(resolve(&once, &styles), once);
    }

    #[test]
    fn test_resolve_plain_styles_strip_markers() {
        let styles = Styles::plain();
        assert_eq!(resolve("**b** _i_ `c`", &styles), "b i c");
    }

    #[test]
    fn test_resolve_plain_prose_is_identity() {
        let styles = Styles::new();
        let line = "Nothing to see: 3 - 2 = 1, file_name.rs & (parens) [brackets]";
        assert_eq!(resolve(line, &styles), line);
    }
}
