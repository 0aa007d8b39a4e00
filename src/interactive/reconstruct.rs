//! Command-line reconstruction from the current form state.
use super::builder::Builder;
use super::form::{ItemRole, TextKind, Widget};
use super::shell::{flag_token, highlight};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Command(String),
    Flag(String),
    Arguments(String),
}

/// The command line equivalent to the form, program name excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct CommandLine {
    parts: Vec<Part>,
}

impl CommandLine {
    pub(super) fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Highlighted display form, prefixed with `program`.
    pub(super) fn to_line(&self, program: &str) -> Line<'static> {
        let mut spans = vec![Span::styled(
            program.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        for part in &self.parts {
            spans.push(Span::raw(" "));
            match part {
                Part::Command(name) => spans.push(Span::styled(
                    name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Part::Flag(token) => spans.extend(highlight(token)),
                Part::Arguments(text) => spans.push(Span::raw(text.clone())),
            }
        }
        Line::from(spans)
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, part) in self.parts.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            let (Part::Command(text) | Part::Flag(text) | Part::Arguments(text)) = part;
            f.write_str(text)?;
        }
        Ok(())
    }
}

impl Builder<'_> {
    /// Command path, then flags in form order, then the arguments field.
    pub(super) fn command_line(&self) -> CommandLine {
        let mut parts: Vec<Part> = self
            .selected_path()
            .into_iter()
            .map(|name| Part::Command(name.to_string()))
            .collect();
        let mut arguments = None;

        for item in self.form().items() {
            let name = match &item.role {
                ItemRole::Command { .. } => continue,
                ItemRole::Arguments => {
                    arguments = item.text().map(str::trim).filter(|t| !t.is_empty());
                    continue;
                }
                ItemRole::Flag { name } => name,
            };
            match &item.widget {
                Widget::Checkbox { checked, default } => match (*checked, *default) {
                    (true, false) => parts.push(Part::Flag(flag_token(name, None))),
                    (false, true) => parts.push(Part::Flag(flag_token(name, Some("false")))),
                    _ => {}
                },
                Widget::Text { text, .. } if text.is_empty() => {}
                Widget::Text {
                    text,
                    kind: TextKind::List,
                } => {
                    for element in text.split(',').map(str::trim).filter(|e| !e.is_empty()) {
                        parts.push(Part::Flag(flag_token(name, Some(element))));
                    }
                }
                Widget::Text { text, .. } => {
                    parts.push(Part::Flag(flag_token(name, Some(text))));
                }
                Widget::Select {
                    options,
                    selected,
                    default,
                } => {
                    if let Some(idx) = selected.filter(|idx| Some(*idx) != *default) {
                        if let Some(value) = options.get(idx) {
                            parts.push(Part::Flag(flag_token(name, Some(value))));
                        }
                    }
                }
            }
        }

        if let Some(text) = arguments {
            parts.push(Part::Arguments(text.to_string()));
        }
        CommandLine { parts }
    }
}
