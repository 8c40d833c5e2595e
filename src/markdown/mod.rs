//! Markdown subset renderer for reply bodies.
//!
//! This is a line classifier, not a parser: every input line becomes exactly
//! one [`MarkdownBlock`]. Consecutive list lines are not merged, lists do not
//! nest, and tables or fenced code are plain paragraphs.

mod inline;

use once_cell::sync::Lazy;
use regex::Regex;

pub use inline::{inline_runs, split_bold, InlineRun};

static ORDERED_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\.\s").expect("ordered list pattern is a valid regex"));

/// One unit of rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkdownBlock {
    /// Heading of level 1 to 3. Heading text carries no inline emphasis.
    Heading { level: u8, text: String },
    ListItem { ordered: bool, runs: Vec<InlineRun> },
    Paragraph { runs: Vec<InlineRun> },
    Spacer,
}

impl MarkdownBlock {
    /// Visible text of the block with emphasis markers removed.
    #[must_use]
    pub fn plain_text(&self) -> String {
        match self {
            Self::Heading { text, .. } => text.clone(),
            Self::ListItem { runs, .. } | Self::Paragraph { runs } => {
                runs.iter().map(InlineRun::text).collect()
            }
            Self::Spacer => String::new(),
        }
    }
}

/// Renders `text` into one block per line.
///
/// Empty input produces no blocks.
#[must_use]
pub fn render(text: &str) -> Vec<MarkdownBlock> {
    if text.is_empty() {
        return Vec::new();
    }

    text.split('\n')
        .map(|line| classify_line(line.strip_suffix('\r').unwrap_or(line)))
        .collect()
}

/// Classifies a single line. Prefix checks run in a fixed order so `### `
/// wins over `## ` and list markers win over the blank-line check.
#[must_use]
pub fn classify_line(line: &str) -> MarkdownBlock {
    if let Some(rest) = line.strip_prefix("### ") {
        return heading(3, rest);
    }
    if let Some(rest) = line.strip_prefix("## ") {
        return heading(2, rest);
    }
    if let Some(rest) = line.strip_prefix("# ") {
        return heading(1, rest);
    }

    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return MarkdownBlock::ListItem {
            ordered: false,
            runs: inline_runs(rest),
        };
    }

    if let Some(prefix) = ORDERED_PREFIX.find(line) {
        return MarkdownBlock::ListItem {
            ordered: true,
            runs: inline_runs(&line[prefix.end()..]),
        };
    }

    if line.trim().is_empty() {
        return MarkdownBlock::Spacer;
    }

    MarkdownBlock::Paragraph {
        runs: inline_runs(line),
    }
}

fn heading(level: u8, text: &str) -> MarkdownBlock {
    MarkdownBlock::Heading {
        level,
        text: text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{classify_line, render, InlineRun, MarkdownBlock};

    fn plain(text: &str) -> InlineRun {
        InlineRun::Plain(text.to_string())
    }

    fn bold(text: &str) -> InlineRun {
        InlineRun::Bold(text.to_string())
    }

    #[test]
    fn mixed_document_renders_one_block_per_line() {
        let blocks = render("### Hi\n- a\n- b\n\nHello **world**");
        assert_eq!(
            blocks,
            vec![
                MarkdownBlock::Heading {
                    level: 3,
                    text: "Hi".to_string(),
                },
                MarkdownBlock::ListItem {
                    ordered: false,
                    runs: vec![plain("a")],
                },
                MarkdownBlock::ListItem {
                    ordered: false,
                    runs: vec![plain("b")],
                },
                MarkdownBlock::Spacer,
                MarkdownBlock::Paragraph {
                    runs: vec![plain("Hello "), bold("world")],
                },
            ]
        );
    }

    #[test]
    fn heading_levels_use_longest_prefix_first() {
        assert_eq!(
            classify_line("# One"),
            MarkdownBlock::Heading {
                level: 1,
                text: "One".to_string()
            }
        );
        assert_eq!(
            classify_line("## Two"),
            MarkdownBlock::Heading {
                level: 2,
                text: "Two".to_string()
            }
        );
        assert_eq!(
            classify_line("### **Three**"),
            MarkdownBlock::Heading {
                level: 3,
                text: "**Three**".to_string()
            }
        );
    }

    #[test]
    fn hash_without_space_is_a_paragraph() {
        assert_eq!(
            classify_line("#hashtag"),
            MarkdownBlock::Paragraph {
                runs: vec![plain("#hashtag")]
            }
        );
        assert_eq!(
            classify_line("#### deep"),
            MarkdownBlock::Paragraph {
                runs: vec![plain("#### deep")]
            }
        );
    }

    #[test]
    fn both_bullet_markers_strip_two_character_prefix() {
        for line in ["- item **one**", "* item **one**"] {
            assert_eq!(
                classify_line(line),
                MarkdownBlock::ListItem {
                    ordered: false,
                    runs: vec![plain("item "), bold("one")],
                }
            );
        }
    }

    #[test]
    fn ordered_items_strip_number_and_whitespace() {
        assert_eq!(
            classify_line("12. Twelfth step"),
            MarkdownBlock::ListItem {
                ordered: true,
                runs: vec![plain("Twelfth step")],
            }
        );
        assert_eq!(
            classify_line("3.\tTabbed"),
            MarkdownBlock::ListItem {
                ordered: true,
                runs: vec![plain("Tabbed")],
            }
        );
        assert_eq!(
            classify_line("3.no space"),
            MarkdownBlock::Paragraph {
                runs: vec![plain("3.no space")]
            }
        );
    }

    #[test]
    fn only_ascii_digits_number_a_list_item() {
        assert_eq!(
            classify_line("\u{0663}. Arabic-indic three"),
            MarkdownBlock::Paragraph {
                runs: vec![plain("\u{0663}. Arabic-indic three")]
            }
        );
        assert_eq!(
            classify_line("\u{FF11}. Fullwidth one"),
            MarkdownBlock::Paragraph {
                runs: vec![plain("\u{FF11}. Fullwidth one")]
            }
        );
    }

    #[test]
    fn whitespace_only_lines_are_spacers() {
        assert_eq!(classify_line(""), MarkdownBlock::Spacer);
        assert_eq!(classify_line("   \t"), MarkdownBlock::Spacer);
    }

    #[test]
    fn indented_bullets_are_not_nested_lists() {
        assert_eq!(
            classify_line("  - nested"),
            MarkdownBlock::Paragraph {
                runs: vec![plain("  - nested")]
            }
        );
    }

    #[test]
    fn carriage_returns_are_dropped_at_line_ends() {
        assert_eq!(
            render("# Title\r\nBody\r\n"),
            vec![
                MarkdownBlock::Heading {
                    level: 1,
                    text: "Title".to_string()
                },
                MarkdownBlock::Paragraph {
                    runs: vec![plain("Body")]
                },
                MarkdownBlock::Spacer,
            ]
        );
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert!(render("").is_empty());
    }

    #[test]
    fn plain_text_flattens_runs() {
        let block = classify_line("1. Ship the **correct** item");
        assert_eq!(block.plain_text(), "Ship the correct item");
        assert_eq!(MarkdownBlock::Spacer.plain_text(), "");
    }
}
