//! Shell-line codec: tokenizing, quoting and display highlighting.
use anyhow::{Context, Result};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use std::borrow::Cow;

/// Split a shell-style line into arguments.
pub(super) fn tokenize(line: &str) -> Result<Vec<String>> {
    shell_words::split(line).with_context(|| format!("parse command line: {line}"))
}

/// Quote a single value so it survives [`tokenize`] as exactly one token.
pub(super) fn quote(value: &str) -> Cow<'_, str> {
    shell_words::quote(value)
}

/// Join arguments back into a line, quoting where needed.
pub(super) fn join(args: &[String]) -> String {
    shell_words::join(args)
}

/// `--name` or `--name=<quoted value>`.
pub(super) fn flag_token(name: &str, value: Option<&str>) -> String {
    match value {
        Some(value) => format!("--{name}={}", quote(value)),
        None => format!("--{name}"),
    }
}

/// Styled spans for one token of a reconstructed line.
pub(super) fn highlight(token: &str) -> Vec<Span<'static>> {
    let flag_style = Style::default().fg(Color::Yellow);
    if !token.starts_with('-') {
        return vec![Span::raw(token.to_string())];
    }
    let Some((flag, value)) = token.split_once('=') else {
        return vec![Span::styled(token.to_string(), flag_style)];
    };
    vec![
        Span::styled(flag.to_string(), flag_style),
        Span::styled("=", Style::default().fg(Color::DarkGray)),
        Span::styled(value.to_string(), value_style(value)),
    ]
}

fn value_style(value: &str) -> Style {
    if value.starts_with('\'') || value.starts_with('"') {
        Style::default().fg(Color::Green)
    } else if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit() || c == '-') {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_values_stay_one_token() {
        for value in ["a b", "x;y", "it's", "$HOME", "a|b&c", "", "*.txt", "\"q\""] {
            let token = flag_token("name", Some(value));
            let args = tokenize(&token).expect("tokenize");
            assert_eq!(args, vec![format!("--name={value}")], "value {value:?}");
        }
    }

    #[test]
    fn plain_values_are_not_quoted() {
        assert_eq!(flag_token("count", Some("3")), "--count=3");
        assert_eq!(flag_token("verbose", None), "--verbose");
    }

    #[test]
    fn unbalanced_quotes_fail_to_tokenize() {
        assert!(tokenize("echo 'open").is_err());
    }

    #[test]
    fn highlight_splits_flag_and_value() {
        let spans = highlight("--name='a b'");
        let texts: Vec<&str> = spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(texts, vec!["--name", "=", "'a b'"]);
        assert_eq!(highlight("beta").len(), 1);
    }
}
