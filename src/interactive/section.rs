//! Section tree: one form section per command-tree depth.
//!
//! A section owns a contiguous run of form items and at most one child
//! section that follows it in the form. Changing a selection disposes the
//! whole child chain (deepest first) before building the replacement, so the
//! form only ever shows the widgets of the currently selected path.
use super::form::{Form, FormItem, ItemRole, Widget};
use super::widgets::widget_for;
use crate::registry::CommandNode;
use anyhow::{anyhow, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Command { depth: usize },
    Flags,
}

#[derive(Debug)]
pub(super) struct Section {
    kind: SectionKind,
    start: usize,
    len: usize,
    last_selected: Option<String>,
    child: Option<Box<Section>>,
}

impl Section {
    /// Dropdown listing the sub-commands of `node`.
    pub(super) fn command(node: &CommandNode, depth: usize, form: &mut Form) -> Self {
        let start = form.add(FormItem {
            label: command_label(depth),
            role: ItemRole::Command { depth },
            help: node.about.clone(),
            widget: Widget::Select {
                options: node.child_names(),
                selected: None,
                default: None,
            },
        });
        Self {
            kind: SectionKind::Command { depth },
            start,
            len: 1,
            last_selected: None,
            child: None,
        }
    }

    /// One widget per flag of the leaf `node`, then the free-text arguments.
    pub(super) fn flags(node: &CommandNode, form: &mut Form, outputs: &[String]) -> Result<Self> {
        let mut items: Vec<FormItem> = Vec::with_capacity(node.flags.len() + 1);
        for flag in &node.flags {
            let item = widget_for(flag, outputs)?;
            let duplicate = form.index_of(&item.label).is_some()
                || items.iter().any(|existing| existing.label == item.label);
            if !duplicate {
                items.push(item);
            }
        }
        items.push(FormItem::arguments());

        let start = form.len();
        let len = items.len();
        for item in items {
            form.add(item);
        }
        Ok(Self {
            kind: SectionKind::Flags,
            start,
            len,
            last_selected: None,
            child: None,
        })
    }

    pub(super) fn last_selected(&self) -> Option<&str> {
        self.last_selected.as_deref()
    }

    pub(super) fn child(&self) -> Option<&Section> {
        self.child.as_deref()
    }

    pub(super) fn child_mut(&mut self) -> Option<&mut Section> {
        self.child.as_deref_mut()
    }

    /// Select the sub-command `option` of `node`, rebuilding the child chain.
    ///
    /// Returns false when `option` is already selected.
    pub(super) fn select(
        &mut self,
        node: &CommandNode,
        option: &str,
        form: &mut Form,
        outputs: &[String],
    ) -> Result<bool> {
        let SectionKind::Command { depth } = self.kind else {
            return Err(anyhow!("flags of {} have no sub-command to select", node.name));
        };
        let selected = node
            .child(option)
            .ok_or_else(|| anyhow!("{} has no sub-command {option:?}", node.name))?;
        if self.last_selected.as_deref() == Some(option) {
            return Ok(false);
        }

        self.dispose_child(form);
        self.last_selected = None;
        if let Some(item) = form.get_mut(self.start) {
            item.select(option);
        }
        let child = if selected.has_subcommands() {
            Section::command(selected, depth + 1, form)
        } else {
            Section::flags(selected, form, outputs)?
        };
        self.child = Some(Box::new(child));
        self.last_selected = Some(option.to_string());
        tracing::debug!(depth, command = option, "selected command");
        Ok(true)
    }

    /// Remove this section's widgets, children first, newest item first.
    pub(super) fn dispose(&mut self, form: &mut Form) {
        self.dispose_child(form);
        for index in (self.start..self.start + self.len).rev() {
            form.remove(index);
        }
        self.len = 0;
        self.last_selected = None;
    }

    fn dispose_child(&mut self, form: &mut Form) {
        if let Some(mut child) = self.child.take() {
            child.dispose(form);
        }
    }
}

/// `Command`, `Sub-Command`, `Sub-Sub-Command`, ...
fn command_label(depth: usize) -> String {
    format!("{}Command", "Sub-".repeat(depth))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{FlagKind, FlagSpec};

    fn tree() -> CommandNode {
        let mut leaf = CommandNode::new("leaf");
        leaf.flags = vec![
            FlagSpec::new("verbose", FlagKind::Boolean),
            FlagSpec::new("name", FlagKind::String),
        ];
        let mut mid = CommandNode::new("mid");
        mid.children = vec![leaf, CommandNode::new("other")];
        let mut root = CommandNode::new("tool");
        root.children = vec![mid, CommandNode::new("solo")];
        root
    }

    #[test]
    fn selecting_builds_child_chain() {
        let root = tree();
        let mut form = Form::default();
        let mut section = Section::command(&root, 0, &mut form);
        assert!(section.select(&root, "mid", &mut form, &[]).unwrap());
        assert_eq!(form.len(), 2);
        assert_eq!(form.get(1).map(|i| i.label.as_str()), Some("Sub-Command"));

        let mid = root.child("mid").unwrap();
        let child = section.child_mut().unwrap();
        assert!(child.select(mid, "leaf", &mut form, &[]).unwrap());
        let labels: Vec<&str> = form.items().iter().map(|i| i.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Command", "Sub-Command", "Verbose", "Name", "Arguments"]
        );
    }

    #[test]
    fn reselecting_same_option_is_a_no_op() {
        let root = tree();
        let mut form = Form::default();
        let mut section = Section::command(&root, 0, &mut form);
        assert!(section.select(&root, "solo", &mut form, &[]).unwrap());
        let before = form.items().to_vec();
        assert!(!section.select(&root, "solo", &mut form, &[]).unwrap());
        assert_eq!(form.items(), before.as_slice());
        assert_eq!(section.last_selected(), Some("solo"));
    }

    #[test]
    fn switching_branch_tears_down_descendants() {
        let root = tree();
        let mut form = Form::default();
        let mut section = Section::command(&root, 0, &mut form);
        section.select(&root, "mid", &mut form, &[]).unwrap();
        let mid = root.child("mid").unwrap();
        section
            .child_mut()
            .unwrap()
            .select(mid, "leaf", &mut form, &[])
            .unwrap();
        assert_eq!(form.len(), 5);

        section.select(&root, "solo", &mut form, &[]).unwrap();
        let labels: Vec<&str> = form.items().iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["Command", "Arguments"]);
        assert!(section.child().unwrap().child().is_none());
    }

    #[test]
    fn dispose_removes_everything_that_was_added() {
        let root = tree();
        let mut form = Form::default();
        form.add(FormItem::arguments());
        let before = form.len();

        let mut section = Section::command(&root, 0, &mut form);
        section.select(&root, "mid", &mut form, &[]).unwrap();
        let mid = root.child("mid").unwrap();
        section
            .child_mut()
            .unwrap()
            .select(mid, "leaf", &mut form, &[])
            .unwrap();
        let added = form.len() - before;
        assert_eq!(added, 5);

        section.dispose(&mut form);
        assert_eq!(form.len(), before);
        assert!(section.child().is_none());
    }

    #[test]
    fn unknown_option_is_an_error() {
        let root = tree();
        let mut form = Form::default();
        let mut section = Section::command(&root, 0, &mut form);
        assert!(section.select(&root, "missing", &mut form, &[]).is_err());
        assert_eq!(form.len(), 1);
    }
}
