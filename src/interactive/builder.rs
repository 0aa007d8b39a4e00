//! Form state for one interactive session.
use super::form::{Form, FormItem, ItemRole};
use super::section::Section;
use super::widgets::{title_case, OUTPUT_FLAG};
use crate::registry::CommandNode;
use anyhow::{anyhow, Result};

pub(super) struct Builder<'a> {
    root: &'a CommandNode,
    outputs: Vec<String>,
    form: Form,
    section: Section,
}

impl<'a> Builder<'a> {
    pub(super) fn new(root: &'a CommandNode, outputs: Vec<String>) -> Result<Self> {
        let mut form = Form::default();
        let section = if root.has_subcommands() {
            Section::command(root, 0, &mut form)
        } else {
            Section::flags(root, &mut form, &outputs)?
        };
        Ok(Self {
            root,
            outputs,
            form,
            section,
        })
    }

    pub(super) fn program(&self) -> &str {
        &self.root.name
    }

    pub(super) fn form(&self) -> &Form {
        &self.form
    }

    pub(super) fn root(&self) -> &'a CommandNode {
        self.root
    }

    /// Select `option` in the command dropdown at `depth`.
    pub(super) fn select(&mut self, depth: usize, option: &str) -> Result<bool> {
        let mut node = self.root;
        let mut section = &mut self.section;
        for level in 0..depth {
            let name = section
                .last_selected()
                .ok_or_else(|| anyhow!("no command selected at depth {level}"))?;
            node = node
                .child(name)
                .ok_or_else(|| anyhow!("{} has no sub-command {name:?}", node.name))?;
            section = section
                .child_mut()
                .ok_or_else(|| anyhow!("no section at depth {}", level + 1))?;
        }
        section.select(node, option, &mut self.form, &self.outputs)
    }

    /// Apply a dropdown choice to the item at `index`.
    pub(super) fn select_at(&mut self, index: usize, option: &str) -> Result<bool> {
        let item = self
            .form
            .get(index)
            .ok_or_else(|| anyhow!("no form item at {index}"))?;
        if let ItemRole::Command { depth } = item.role {
            return self.select(depth, option);
        }
        Ok(self
            .form
            .get_mut(index)
            .is_some_and(|item| item.select(option)))
    }

    /// Mutable access for value edits. Command dropdowns go through
    /// [`Builder::select_at`] so the section chain stays in sync.
    pub(super) fn item_mut(&mut self, index: usize) -> Option<&mut FormItem> {
        self.form
            .get_mut(index)
            .filter(|item| !matches!(item.role, ItemRole::Command { .. }))
    }

    /// Names of the selected commands, root excluded.
    pub(super) fn selected_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        let mut section = Some(&self.section);
        while let Some(current) = section {
            if let Some(name) = current.last_selected() {
                path.push(name);
            }
            section = current.child();
        }
        path
    }

    /// Deepest selected command, or the root when nothing is selected.
    pub(super) fn current_node(&self) -> &'a CommandNode {
        let mut node = self.root;
        for name in self.selected_path() {
            match node.child(name) {
                Some(child) => node = child,
                None => break,
            }
        }
        node
    }

    /// The selected command when it is a leaf.
    pub(super) fn leaf(&self) -> Option<&'a CommandNode> {
        let node = self.current_node();
        (!node.has_subcommands()).then_some(node)
    }

    /// Value of the output-format dropdown, when the leaf has one.
    pub(super) fn output_format(&self) -> Option<&str> {
        self.form
            .by_label(&title_case(OUTPUT_FLAG))
            .and_then(FormItem::selected_option)
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
