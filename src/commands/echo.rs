use crate::cli::EchoArgs;
use anyhow::{anyhow, Result};
use crossterm::style::{Attribute, Color, ContentStyle};
use std::io::Write;

pub(super) fn run(args: &EchoArgs, out: &mut dyn Write) -> Result<()> {
    let style = style_for(args)?;
    let text = args.text.join(" ");
    let widest = text.lines().map(|line| line.chars().count()).max().unwrap_or(0);
    let width = args.width.unwrap_or(0).max(widest);
    let pad = " ".repeat(args.padding);
    for line in text.lines() {
        let aligned = align(line, width, &args.align);
        writeln!(out, "{}", style.apply(format!("{pad}{aligned}{pad}")))?;
    }
    Ok(())
}

fn style_for(args: &EchoArgs) -> Result<ContentStyle> {
    let mut style = ContentStyle::new();
    if let Some(color) = &args.foreground {
        style.foreground_color = Some(parse_color(color)?);
    }
    if let Some(color) = &args.background {
        style.background_color = Some(parse_color(color)?);
    }
    let attributes = [
        (args.bold, Attribute::Bold),
        (args.faint, Attribute::Dim),
        (args.italic, Attribute::Italic),
        (args.underline, Attribute::Underlined),
        (args.strikethrough, Attribute::CrossedOut),
    ];
    for (enabled, attribute) in attributes {
        if enabled {
            style.attributes.set(attribute);
        }
    }
    Ok(style)
}

fn align(line: &str, width: usize, align: &str) -> String {
    let fill = width.saturating_sub(line.chars().count());
    match align {
        "right" => format!("{}{line}", " ".repeat(fill)),
        "center" => {
            let left = fill / 2;
            format!("{}{line}{}", " ".repeat(left), " ".repeat(fill - left))
        }
        _ => format!("{line}{}", " ".repeat(fill)),
    }
}

/// Accepts color names (`red`, `dark_blue`), `#rrggbb` and ANSI indices.
fn parse_color(input: &str) -> Result<Color> {
    let text = input.trim();
    if let Some(hex) = text.strip_prefix('#') {
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|part| u8::from_str_radix(part, 16).ok())
        };
        if hex.len() == 6 {
            if let (Some(r), Some(g), Some(b)) = (channel(0..2), channel(2..4), channel(4..6)) {
                return Ok(Color::Rgb { r, g, b });
            }
        }
        return Err(anyhow!("invalid hex color {input:?}"));
    }
    if let Ok(index) = text.parse::<u8>() {
        return Ok(Color::AnsiValue(index));
    }
    Color::try_from(text).map_err(|_| anyhow!("unknown color {input:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo_args(text: &str) -> EchoArgs {
        EchoArgs {
            foreground: None,
            background: None,
            bold: false,
            faint: false,
            italic: false,
            underline: false,
            strikethrough: false,
            align: "left".to_string(),
            width: None,
            padding: 0,
            text: vec![text.to_string()],
        }
    }

    #[test]
    fn bold_text_carries_sgr_sequence() {
        let args = EchoArgs {
            bold: true,
            ..echo_args("hello")
        };
        let mut buf = Vec::new();
        run(&args, &mut buf).expect("echo");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("\u{1b}[1m"));
        assert!(text.contains("hello"));
    }

    #[test]
    fn right_alignment_pads_to_width() {
        assert_eq!(align("ab", 5, "right"), "   ab");
        assert_eq!(align("ab", 5, "center"), " ab  ");
        assert_eq!(align("ab", 5, "left"), "ab   ");
    }

    #[test]
    fn colors_parse_from_several_notations() {
        assert_eq!(
            parse_color("#ff0080").unwrap(),
            Color::Rgb {
                r: 255,
                g: 0,
                b: 128
            }
        );
        assert_eq!(parse_color("7").unwrap(), Color::AnsiValue(7));
        assert_eq!(parse_color("red").unwrap(), Color::Red);
        assert!(parse_color("#12").is_err());
        assert!(parse_color("not-a-color").is_err());
    }
}
