//! Inline emphasis handling: `**bold**` pairs inside a single line.

use once_cell::sync::Lazy;
use regex::Regex;

static BOLD_PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern is a valid regex"));

/// A contiguous span of plain or bold text within a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineRun {
    Plain(String),
    Bold(String),
}

impl InlineRun {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Bold(text) => text,
        }
    }

    #[must_use]
    pub fn is_bold(&self) -> bool {
        matches!(self, Self::Bold(_))
    }
}

/// Splits `text` on non-greedy `**…**` pairs.
///
/// For `n` matched pairs the result always holds `2n + 1` runs alternating
/// `Plain`, `Bold`, `Plain`, … and concatenating their text (plus the removed
/// delimiters) reproduces the input. Unpaired `**` stays in a plain run.
#[must_use]
pub fn split_bold(text: &str) -> Vec<InlineRun> {
    let mut runs = Vec::new();
    let mut cursor = 0usize;

    for captures in BOLD_PAIR.captures_iter(text) {
        let (Some(whole), Some(inner)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        runs.push(InlineRun::Plain(text[cursor..whole.start()].to_string()));
        runs.push(InlineRun::Bold(inner.as_str().to_string()));
        cursor = whole.end();
    }

    runs.push(InlineRun::Plain(text[cursor..].to_string()));
    runs
}

/// Inline runs as they appear in rendered blocks: empty plain runs are dropped.
#[must_use]
pub fn inline_runs(text: &str) -> Vec<InlineRun> {
    split_bold(text)
        .into_iter()
        .filter(|run| !matches!(run, InlineRun::Plain(text) if text.is_empty()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{inline_runs, split_bold, InlineRun};

    fn plain(text: &str) -> InlineRun {
        InlineRun::Plain(text.to_string())
    }

    fn bold(text: &str) -> InlineRun {
        InlineRun::Bold(text.to_string())
    }

    #[test]
    fn text_without_delimiters_is_one_plain_run() {
        assert_eq!(split_bold("just words"), vec![plain("just words")]);
    }

    #[test]
    fn n_pairs_yield_two_n_plus_one_alternating_runs() {
        let runs = split_bold("**a** and **b** then **c**");
        assert_eq!(runs.len(), 7);
        for (index, run) in runs.iter().enumerate() {
            assert_eq!(run.is_bold(), index % 2 == 1, "run {index} has wrong kind");
        }
        assert_eq!(
            runs,
            vec![
                plain(""),
                bold("a"),
                plain(" and "),
                bold("b"),
                plain(" then "),
                bold("c"),
                plain(""),
            ]
        );
    }

    #[test]
    fn unpaired_delimiter_stays_literal() {
        assert_eq!(
            split_bold("a **b** c **d"),
            vec![plain("a "), bold("b"), plain(" c **d")]
        );
        assert_eq!(split_bold("**open"), vec![plain("**open")]);
    }

    #[test]
    fn bold_match_is_non_greedy() {
        assert_eq!(
            split_bold("**x** y **z**"),
            vec![plain(""), bold("x"), plain(" y "), bold("z"), plain("")]
        );
    }

    #[test]
    fn rendered_runs_drop_empty_plain_edges() {
        assert_eq!(
            inline_runs("Hello **world**"),
            vec![plain("Hello "), bold("world")]
        );
        assert_eq!(inline_runs("****"), vec![bold("")]);
        assert!(inline_runs("").is_empty());
    }
}
