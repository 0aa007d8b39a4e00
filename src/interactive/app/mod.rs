mod state;
mod view;

use super::builder::Builder;
use crate::registry::Registry;

pub(super) struct App<'a> {
    builder: Builder<'a>,
    registry: &'a dyn Registry,
    /// Index of the focused form item.
    focus: usize,
    preview: Option<Preview>,
    message: Option<String>,
    clipboard: bool,
}

struct Preview {
    text: String,
    scroll: u16,
}
