//! Form model drawn by the builder UI.
//!
//! Items live in one flat list; sections own contiguous index ranges of it.

pub(super) const ARGS_LABEL: &str = "Arguments";

/// What an item stands for in the reconstructed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum ItemRole {
    /// Sub-command dropdown at the given depth.
    Command { depth: usize },
    Flag { name: String },
    Arguments,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TextKind {
    Free,
    Integer,
    /// Comma-delimited list edited as one string.
    List,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Widget {
    Select {
        options: Vec<String>,
        selected: Option<usize>,
        default: Option<usize>,
    },
    Checkbox {
        checked: bool,
        default: bool,
    },
    Text {
        text: String,
        kind: TextKind,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct FormItem {
    pub(super) label: String,
    pub(super) role: ItemRole,
    pub(super) help: Option<String>,
    pub(super) widget: Widget,
}

impl FormItem {
    pub(super) fn arguments() -> Self {
        Self {
            label: ARGS_LABEL.to_string(),
            role: ItemRole::Arguments,
            help: Some("Positional arguments, in shell syntax".to_string()),
            widget: Widget::Text {
                text: String::new(),
                kind: TextKind::Free,
            },
        }
    }

    pub(super) fn selected_option(&self) -> Option<&str> {
        match &self.widget {
            Widget::Select {
                options, selected, ..
            } => selected.and_then(|idx| options.get(idx)).map(String::as_str),
            _ => None,
        }
    }

    pub(super) fn text(&self) -> Option<&str> {
        match &self.widget {
            Widget::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Select `option` by value; false when the dropdown does not offer it.
    pub(super) fn select(&mut self, option: &str) -> bool {
        if let Widget::Select {
            options, selected, ..
        } = &mut self.widget
        {
            if let Some(idx) = options.iter().position(|o| o == option) {
                *selected = Some(idx);
                return true;
            }
        }
        false
    }

    /// Option reached by moving `delta` steps; wraps around.
    pub(super) fn cycled_option(&self, delta: isize) -> Option<String> {
        let Widget::Select {
            options, selected, ..
        } = &self.widget
        else {
            return None;
        };
        if options.is_empty() {
            return None;
        }
        let len = options.len() as isize;
        let next = match selected {
            Some(idx) => (*idx as isize + delta).rem_euclid(len),
            None if delta < 0 => len - 1,
            None => 0,
        };
        options.get(next as usize).cloned()
    }

    pub(super) fn set_checked(&mut self, value: bool) -> bool {
        if let Widget::Checkbox { checked, .. } = &mut self.widget {
            *checked = value;
            return true;
        }
        false
    }

    pub(super) fn toggle(&mut self) {
        if let Widget::Checkbox { checked, .. } = &mut self.widget {
            *checked = !*checked;
        }
    }

    /// Replace the text; integer inputs refuse non-numeric text.
    pub(super) fn set_text(&mut self, value: &str) -> bool {
        if let Widget::Text { text, kind } = &mut self.widget {
            if *kind == TextKind::Integer && !is_integer_prefix(value) {
                return false;
            }
            *text = value.to_string();
            return true;
        }
        false
    }

    /// Type one character; integer inputs accept digits and a leading `-`.
    pub(super) fn push_char(&mut self, c: char) -> bool {
        if let Widget::Text { text, kind } = &mut self.widget {
            let accepted = match kind {
                TextKind::Integer => c.is_ascii_digit() || (c == '-' && text.is_empty()),
                TextKind::Free | TextKind::List => !c.is_control(),
            };
            if accepted {
                text.push(c);
            }
            return accepted;
        }
        false
    }

    pub(super) fn pop_char(&mut self) -> bool {
        if let Widget::Text { text, .. } = &mut self.widget {
            return text.pop().is_some();
        }
        false
    }
}

fn is_integer_prefix(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    digits.chars().all(|c| c.is_ascii_digit())
}

#[derive(Debug, Default)]
pub(super) struct Form {
    items: Vec<FormItem>,
}

impl Form {
    pub(super) fn len(&self) -> usize {
        self.items.len()
    }

    pub(super) fn add(&mut self, item: FormItem) -> usize {
        self.items.push(item);
        self.items.len() - 1
    }

    pub(super) fn remove(&mut self, index: usize) -> Option<FormItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub(super) fn get(&self, index: usize) -> Option<&FormItem> {
        self.items.get(index)
    }

    pub(super) fn get_mut(&mut self, index: usize) -> Option<&mut FormItem> {
        self.items.get_mut(index)
    }

    pub(super) fn index_of(&self, label: &str) -> Option<usize> {
        self.items.iter().position(|item| item.label == label)
    }

    pub(super) fn by_label(&self, label: &str) -> Option<&FormItem> {
        self.items.iter().find(|item| item.label == label)
    }

    pub(super) fn items(&self) -> &[FormItem] {
        &self.items
    }
}
