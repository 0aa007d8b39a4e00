use super::super::form::{FormItem, ItemRole, TextKind, Widget};
use super::App;
use crate::registry::FlagKind;
use ansi_to_tui::IntoText;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

const LEGEND: &str =
    "↑/↓ move | ←/→ choose | space toggle | ^R preview | ^W close | ^Q copy | ^X run | esc quit";

impl App<'_> {
    pub(in crate::interactive) fn draw(&self, frame: &mut Frame) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(frame.area());
        let main = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(layout[0]);

        self.draw_form(frame, main[0]);
        self.draw_docs(frame, main[1]);
        self.draw_command_line(frame, layout[1]);
        self.draw_footer(frame, layout[2]);

        if self.preview.is_some() {
            self.draw_preview(frame);
        }
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let form = self.builder.form();
        let label_width = form
            .items()
            .iter()
            .map(|item| item.label.chars().count())
            .max()
            .unwrap_or(0);
        let items = form
            .items()
            .iter()
            .enumerate()
            .map(|(idx, item)| form_row(item, label_width, idx == self.focus))
            .collect::<Vec<_>>();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Form"))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = ListState::default();
        state.select(Some(self.focus));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_docs(&self, frame: &mut Frame, area: Rect) {
        let node = self.builder.current_node();
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let mut lines = vec![Line::from(Span::styled(node.name.clone(), bold))];
        if let Some(about) = &node.about {
            lines.push(Line::from(about.clone()));
        }
        if let Some(help) = self
            .builder
            .form()
            .get(self.focus)
            .and_then(|item| item.help.as_deref())
        {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                help.to_string(),
                Style::default().fg(Color::Cyan),
            )));
        }
        if !node.flags.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("Flags:", bold)));
        }
        for flag in &node.flags {
            let mut spans = vec![
                Span::styled(format!("  --{}", flag.name), Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!(" <{}>", kind_label(&flag.kind)),
                    Style::default().fg(Color::DarkGray),
                ),
            ];
            if let Some(default) = &flag.default {
                spans.push(Span::raw(format!(" (default {default})")));
            }
            lines.push(Line::from(spans));
            if let Some(help) = &flag.help {
                lines.push(Line::from(format!("      {help}")));
            }
        }
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Docs"))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn draw_command_line(&self, frame: &mut Frame, area: Rect) {
        let line = self.builder.command_line().to_line(self.builder.program());
        let paragraph = Paragraph::new(line)
            .block(Block::default().borders(Borders::ALL).title("Command"))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let message = self.message.clone().unwrap_or_else(|| LEGEND.to_string());
        let paragraph =
            Paragraph::new(message).style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_widget(paragraph, area);
    }

    fn draw_preview(&self, frame: &mut Frame) {
        let Some(preview) = &self.preview else {
            return;
        };
        let area = centered_rect(85, 80, frame.area());
        let paragraph = Paragraph::new(preview_text(&preview.text))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Preview (^W close, ^Q copy)"),
            )
            .scroll((preview.scroll, 0));
        frame.render_widget(Clear, area);
        frame.render_widget(paragraph, area);
    }
}

fn form_row(item: &FormItem, label_width: usize, focused: bool) -> ListItem<'static> {
    let label_style = match item.role {
        ItemRole::Command { .. } => Style::default().add_modifier(Modifier::BOLD),
        ItemRole::Flag { .. } => Style::default().fg(Color::Yellow),
        ItemRole::Arguments => Style::default(),
    };
    let mut spans = vec![
        Span::styled(format!("{:>label_width$}", item.label), label_style),
        Span::raw("  "),
    ];
    match &item.widget {
        Widget::Select { .. } => {
            let value = item.selected_option().unwrap_or("(choose)").to_string();
            spans.push(Span::styled(
                format!("‹ {value} ›"),
                Style::default().fg(Color::Green),
            ));
        }
        Widget::Checkbox { checked, .. } => {
            spans.push(Span::raw(if *checked { "[x]" } else { "[ ]" }));
        }
        Widget::Text { text, kind } => {
            spans.push(Span::raw(text.clone()));
            if focused {
                spans.push(Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)));
            } else if text.is_empty() {
                spans.push(Span::styled(
                    placeholder(*kind),
                    Style::default().fg(Color::DarkGray),
                ));
            }
        }
    }
    ListItem::new(Line::from(spans))
}

fn placeholder(kind: TextKind) -> &'static str {
    match kind {
        TextKind::Free => "",
        TextKind::Integer => "number",
        TextKind::List => "a,b,c",
    }
}

fn kind_label(kind: &FlagKind) -> String {
    match kind {
        FlagKind::Boolean => "bool".to_string(),
        FlagKind::Integer => "int".to_string(),
        FlagKind::String => "string".to_string(),
        FlagKind::StringList => "list".to_string(),
        FlagKind::Duration => "duration".to_string(),
        FlagKind::Enumerated(choices) => choices.join("|"),
    }
}

/// Styled preview text; output with malformed escapes is shown raw.
fn preview_text(text: &str) -> Text<'static> {
    text.into_text().unwrap_or_else(|_| Text::raw(text.to_string()))
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
