//! Flag-to-widget mapping.
use super::form::{FormItem, ItemRole, TextKind, Widget};
use crate::registry::{FlagKind, FlagSpec};
use anyhow::{anyhow, Result};

/// The flag rendered as a dropdown over the output formats.
pub(super) const OUTPUT_FLAG: &str = "output";

/// Build the form item for `flag`. Malformed declarations are registry bugs.
pub(super) fn widget_for(flag: &FlagSpec, outputs: &[String]) -> Result<FormItem> {
    let widget = if flag.name == OUTPUT_FLAG {
        select(outputs.to_vec(), flag)?
    } else {
        match &flag.kind {
            FlagKind::Boolean => {
                let default = match flag.default.as_deref() {
                    None => false,
                    Some(value) => value.parse::<bool>().map_err(|_| {
                        anyhow!("flag --{} has non-boolean default {value:?}", flag.name)
                    })?,
                };
                Widget::Checkbox {
                    checked: default,
                    default,
                }
            }
            FlagKind::Integer => text(TextKind::Integer),
            FlagKind::String | FlagKind::Duration => text(TextKind::Free),
            FlagKind::StringList => text(TextKind::List),
            FlagKind::Enumerated(choices) => select(choices.clone(), flag)?,
        }
    };
    Ok(FormItem {
        label: title_case(&flag.name),
        role: ItemRole::Flag {
            name: flag.name.clone(),
        },
        help: flag.help.clone(),
        widget,
    })
}

fn text(kind: TextKind) -> Widget {
    Widget::Text {
        text: String::new(),
        kind,
    }
}

fn select(options: Vec<String>, flag: &FlagSpec) -> Result<Widget> {
    if options.is_empty() {
        return Err(anyhow!("flag --{} offers no choices", flag.name));
    }
    let default = flag
        .default
        .as_deref()
        .and_then(|value| options.iter().position(|option| option == value));
    Ok(Widget::Select {
        options,
        selected: default,
        default,
    })
}

/// `border-color` → `Border-Color`: upper-case the first letter of every
/// alphanumeric run.
pub(super) fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for c in name.chars() {
        if c.is_alphanumeric() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outputs() -> Vec<String> {
        ["csv", "json", "table"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn kinds_map_to_widgets() {
        let check = widget_for(&FlagSpec::new("verbose", FlagKind::Boolean), &outputs()).unwrap();
        assert_eq!(
            check.widget,
            Widget::Checkbox {
                checked: false,
                default: false
            }
        );

        let count = widget_for(&FlagSpec::new("count", FlagKind::Integer), &outputs()).unwrap();
        assert_eq!(count.widget, text(TextKind::Integer));

        for kind in [FlagKind::String, FlagKind::Duration] {
            let item = widget_for(&FlagSpec::new("x", kind), &outputs()).unwrap();
            assert_eq!(item.widget, text(TextKind::Free));
        }

        let list = widget_for(&FlagSpec::new("tag", FlagKind::StringList), &outputs()).unwrap();
        assert_eq!(list.widget, text(TextKind::List));
    }

    #[test]
    fn output_flag_becomes_format_dropdown() {
        let flag = FlagSpec::new("output", FlagKind::String).with_default("json");
        let item = widget_for(&flag, &outputs()).unwrap();
        assert_eq!(item.label, "Output");
        assert_eq!(item.selected_option(), Some("json"));
        assert_eq!(
            item.widget,
            Widget::Select {
                options: outputs(),
                selected: Some(1),
                default: Some(1)
            }
        );
    }

    #[test]
    fn boolean_default_must_parse() {
        let flag = FlagSpec::new("verbose", FlagKind::Boolean).with_default("maybe");
        assert!(widget_for(&flag, &outputs()).is_err());
        let flag = FlagSpec::new("verbose", FlagKind::Boolean).with_default("true");
        let item = widget_for(&flag, &outputs()).unwrap();
        assert_eq!(
            item.widget,
            Widget::Checkbox {
                checked: true,
                default: true
            }
        );
    }

    #[test]
    fn empty_enumeration_is_rejected() {
        let flag = FlagSpec::new("mode", FlagKind::Enumerated(Vec::new()));
        assert!(widget_for(&flag, &outputs()).is_err());
    }

    #[test]
    fn labels_are_title_cased() {
        assert_eq!(title_case("border-background"), "Border-Background");
        assert_eq!(title_case("jq"), "Jq");
        assert_eq!(title_case("LOG_level"), "Log_Level");
    }
}
