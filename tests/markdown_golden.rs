mod fixture;

use echo_reply::{render, InlineRun, MarkdownBlock};

fn describe_runs(runs: &[InlineRun]) -> String {
    runs.iter()
        .map(|run| match run {
            InlineRun::Plain(text) => text.clone(),
            InlineRun::Bold(text) => format!("<b>{text}</b>"),
        })
        .collect()
}

fn describe(block: &MarkdownBlock) -> String {
    match block {
        MarkdownBlock::Heading { level, text } => format!("h{level}|{text}"),
        MarkdownBlock::ListItem { ordered: false, runs } => format!("ul|{}", describe_runs(runs)),
        MarkdownBlock::ListItem { ordered: true, runs } => format!("ol|{}", describe_runs(runs)),
        MarkdownBlock::Paragraph { runs } => format!("p|{}", describe_runs(runs)),
        MarkdownBlock::Spacer => "spacer".to_string(),
    }
}

fn assert_markdown_fixture(input_fixture: &str, expected_fixture: &str) {
    let input = fixture::read_trimmed(input_fixture);
    let actual: Vec<String> = render(&input).iter().map(describe).collect();
    let expected = fixture::read_lines(expected_fixture);
    assert_eq!(actual, expected, "markdown golden mismatch for {input_fixture}");
}

#[test]
fn markdown_reply_body_golden() {
    assert_markdown_fixture("reply_body.md", "reply_body.txt");
}

#[test]
fn markdown_unsupported_syntax_golden() {
    assert_markdown_fixture("unsupported_syntax.md", "unsupported_syntax.txt");
}

#[test]
fn markdown_block_count_matches_line_count() {
    let input = fixture::read_trimmed("reply_body.md");
    assert_eq!(render(&input).len(), input.split('\n').count());
}
