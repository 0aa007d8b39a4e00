//! Application state management for the builder TUI.

use super::super::builder::Builder;
use super::super::external::try_copy_to_clipboard;
use super::super::form::Widget;
use super::super::preview::{run_preview, CaptureMode};
use super::{App, Preview};
use crate::registry::Registry;
use anyhow::{anyhow, Result};

impl<'a> App<'a> {
    pub(in crate::interactive) fn new(
        builder: Builder<'a>,
        registry: &'a dyn Registry,
        clipboard: bool,
    ) -> Self {
        let mut app = Self {
            builder,
            registry,
            focus: 0,
            preview: None,
            message: None,
            clipboard,
        };
        app.focus_first_editable();
        app
    }

    pub(in crate::interactive) fn move_focus(&mut self, delta: isize) {
        let len = self.builder.form().len();
        if len == 0 {
            self.focus = 0;
            return;
        }
        let next = (self.focus as isize + delta).rem_euclid(len as isize);
        self.focus = next as usize;
    }

    /// Step the focused dropdown by `delta` options.
    pub(in crate::interactive) fn cycle(&mut self, delta: isize) -> Result<()> {
        if self.is_preview_open() {
            return Ok(());
        }
        let Some(option) = self
            .builder
            .form()
            .get(self.focus)
            .and_then(|item| item.cycled_option(delta))
        else {
            return Ok(());
        };
        self.builder.select_at(self.focus, &option)?;
        self.clamp_focus();
        Ok(())
    }

    /// Enter: toggle a checkbox, otherwise advance to the next item.
    pub(in crate::interactive) fn activate(&mut self) {
        if self.is_preview_open() {
            return;
        }
        if !self.toggle_focused() {
            self.move_focus(1);
        }
    }

    /// Typed character; space toggles a focused checkbox.
    pub(in crate::interactive) fn type_char(&mut self, c: char) {
        if self.is_preview_open() {
            return;
        }
        if c == ' ' && self.toggle_focused() {
            return;
        }
        if let Some(item) = self.builder.item_mut(self.focus) {
            item.push_char(c);
        }
    }

    pub(in crate::interactive) fn backspace(&mut self) {
        if self.is_preview_open() {
            return;
        }
        if let Some(item) = self.builder.item_mut(self.focus) {
            item.pop_char();
        }
    }

    /// Run the reconstructed command and open the preview pane.
    pub(in crate::interactive) fn run_preview(&mut self) -> Result<()> {
        let line = self.builder.command_line();
        if line.is_empty() {
            return Err(anyhow!("select a command first"));
        }
        let mode = CaptureMode::for_command(self.builder.leaf(), self.builder.output_format());
        let text = run_preview(self.registry, &line.to_string(), mode)?;
        self.preview = Some(Preview { text, scroll: 0 });
        Ok(())
    }

    pub(in crate::interactive) fn close_preview(&mut self) {
        self.preview = None;
    }

    pub(in crate::interactive) fn is_preview_open(&self) -> bool {
        self.preview.is_some()
    }

    /// Scroll by `delta` lines, stopping at the last line of the preview.
    pub(in crate::interactive) fn scroll_preview(&mut self, delta: i16) {
        if let Some(preview) = self.preview.as_mut() {
            let last = u16::try_from(preview.text.lines().count().saturating_sub(1))
                .unwrap_or(u16::MAX);
            preview.scroll = preview.scroll.saturating_add_signed(delta).min(last);
        }
    }

    /// Copy the preview text when it is open, the full command line otherwise.
    pub(in crate::interactive) fn copy(&mut self) -> Result<()> {
        if !self.clipboard {
            return Err(anyhow!("clipboard disabled in config"));
        }
        let target = match &self.preview {
            Some(preview) => preview.text.clone(),
            None => self.display_line(),
        };
        if try_copy_to_clipboard(&target)? {
            self.set_message("copied to clipboard".to_string());
            Ok(())
        } else {
            Err(anyhow!("no clipboard program found"))
        }
    }

    /// Arguments to execute on exit, program name excluded.
    pub(in crate::interactive) fn execute_line(&self) -> Option<String> {
        let line = self.builder.command_line();
        (!line.is_empty()).then(|| line.to_string())
    }

    pub(in crate::interactive) fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }

    pub(super) fn display_line(&self) -> String {
        let line = self.builder.command_line();
        if line.is_empty() {
            self.builder.program().to_string()
        } else {
            format!("{} {line}", self.builder.program())
        }
    }

    fn toggle_focused(&mut self) -> bool {
        match self.builder.item_mut(self.focus) {
            Some(item) if matches!(item.widget, Widget::Checkbox { .. }) => {
                item.toggle();
                true
            }
            _ => false,
        }
    }

    fn focus_first_editable(&mut self) {
        let items = self.builder.form().items();
        let first_unset = items.iter().position(|item| match &item.widget {
            Widget::Select { selected, .. } => selected.is_none(),
            _ => true,
        });
        self.focus = first_unset.unwrap_or(0);
    }

    fn clamp_focus(&mut self) {
        let len = self.builder.form().len();
        if self.focus >= len {
            self.focus = len.saturating_sub(1);
        }
    }
}
