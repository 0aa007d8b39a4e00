//! Seeding the form from an existing command line.
use super::builder::Builder;
use super::form::{ItemRole, TextKind, Widget, ARGS_LABEL};
use super::shell;
use super::widgets::title_case;
use anyhow::Result;
use std::path::Path;

impl Builder<'_> {
    /// Select the command path named by the leading tokens, then populate
    /// the leaf's widgets from the rest. Unknown command tokens stop the walk.
    pub(super) fn seed(&mut self, args: &[String]) -> Result<()> {
        let args = match args.split_first() {
            Some((first, rest)) if self.is_program(first) => rest,
            _ => args,
        };
        let mut node = self.root();
        let mut depth = 0;
        let mut rest = args;
        while node.has_subcommands() {
            let Some((token, tail)) = rest.split_first() else {
                break;
            };
            let Some(child) = node.child(token) else {
                tracing::debug!(token = %token, depth, "seed stopped at unknown command");
                break;
            };
            self.select(depth, token)?;
            node = child;
            depth += 1;
            rest = tail;
        }
        if node.has_subcommands() {
            return Ok(());
        }
        self.apply_flags(rest);
        Ok(())
    }

    fn is_program(&self, token: &str) -> bool {
        Path::new(token)
            .file_name()
            .is_some_and(|name| name.to_string_lossy() == self.program())
    }

    fn apply_flags(&mut self, tokens: &[String]) {
        let mut positional: Vec<String> = Vec::new();
        let mut iter = tokens.iter().peekable();
        while let Some(token) = iter.next() {
            if !token.starts_with('-') {
                positional.push(token.clone());
                continue;
            }
            let (flag, inline) = match token.split_once('=') {
                Some((flag, value)) => (flag, Some(value.to_string())),
                None => (token.as_str(), None),
            };
            let label = title_case(flag.trim_start_matches('-'));
            let Some(index) = self.flag_index(&label) else {
                positional.push(token.clone());
                continue;
            };
            let Some(item) = self.item_mut(index) else {
                positional.push(token.clone());
                continue;
            };

            let is_checkbox = matches!(item.widget, Widget::Checkbox { .. });
            let list_text = match &item.widget {
                Widget::Text {
                    text,
                    kind: TextKind::List,
                } if !text.is_empty() => Some(text.clone()),
                _ => None,
            };
            let has_inline = inline.is_some();
            let value = match inline {
                Some(value) => Some(value),
                None if !is_checkbox => iter.next_if(|next| !next.starts_with('-')).cloned(),
                None => None,
            };
            let applied = match value.as_deref() {
                None => is_checkbox && item.set_checked(true),
                Some(value) if is_checkbox => value
                    .parse::<bool>()
                    .is_ok_and(|checked| item.set_checked(checked)),
                Some(value) => {
                    let value = match &list_text {
                        Some(text) => format!("{text},{value}"),
                        None => value.to_string(),
                    };
                    item.select(&value) || item.set_text(&value)
                }
            };
            if !applied {
                positional.push(token.clone());
                if !has_inline {
                    positional.extend(value);
                }
            }
        }

        if let Some(index) = self.form().index_of(ARGS_LABEL) {
            if let Some(item) = self.item_mut(index) {
                item.set_text(&shell::join(&positional));
            }
        }
    }

    fn flag_index(&self, label: &str) -> Option<usize> {
        self.form()
            .items()
            .iter()
            .position(|item| item.label == label && matches!(item.role, ItemRole::Flag { .. }))
    }
}
