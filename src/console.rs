//! Output formats for structured command results.
//!
//! Commands hand a `serde_json::Value` to [`emit`] together with the value of
//! their `--output` flag. Formats ending in `c` are colorized variants and
//! write ANSI escapes.
use anyhow::{anyhow, Context, Result};
use crossterm::style::Stylize;
use serde_json::Value;
use std::io::Write;

pub const OUTPUT_FORMATS: [&str; 6] = ["csv", "json", "jsonc", "table", "text", "tsv"];
pub const DEFAULT_OUTPUT: &str = "json";

/// Write `value` to `out` in the requested format.
pub fn emit(out: &mut dyn Write, value: &Value, format: &str) -> Result<()> {
    match format {
        "json" => {
            let text = serde_json::to_string_pretty(value).context("serialize output")?;
            writeln!(out, "{text}")?;
        }
        "jsonc" => {
            let mut text = String::new();
            colorize(&mut text, value, 0);
            writeln!(out, "{text}")?;
        }
        "text" => {
            for (key, val) in rows(value) {
                match key {
                    Some(key) => writeln!(out, "{key}={val}")?,
                    None => writeln!(out, "{val}")?,
                }
            }
        }
        "csv" => write_delimited(out, value, b',')?,
        "tsv" => write_delimited(out, value, b'\t')?,
        "table" => {
            let rows = rows(value);
            let width = rows
                .iter()
                .filter_map(|(key, _)| key.as_ref().map(|k| k.chars().count()))
                .max()
                .unwrap_or(0);
            for (key, val) in rows {
                match key {
                    Some(key) => writeln!(out, "{key:<width$}  {val}")?,
                    None => writeln!(out, "{val}")?,
                }
            }
        }
        other => return Err(anyhow!("invalid output format {other:?}")),
    }
    Ok(())
}

fn write_delimited(out: &mut dyn Write, value: &Value, delimiter: u8) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_writer(out);
    for (key, val) in rows(value) {
        match key {
            Some(key) => writer.write_record([key.as_str(), val.as_str()])?,
            None => writer.write_record([val.as_str()])?,
        }
    }
    writer.flush().context("flush delimited output")?;
    Ok(())
}

/// Flatten a value into (key, scalar) rows; arrays produce keyless rows.
fn rows(value: &Value) -> Vec<(Option<String>, String)> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, val)| (Some(key.clone()), scalar(val)))
            .collect(),
        Value::Array(items) => items.iter().map(|item| (None, scalar(item))).collect(),
        other => vec![(None, scalar(other))],
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn colorize(buf: &mut String, value: &Value, indent: usize) {
    let pad = "  ".repeat(indent + 1);
    let close = "  ".repeat(indent);
    match value {
        Value::Null => buf.push_str(&"null".dark_grey().to_string()),
        Value::Bool(flag) => buf.push_str(&flag.to_string().yellow().to_string()),
        Value::Number(number) => buf.push_str(&number.to_string().cyan().to_string()),
        Value::String(text) => {
            let quoted = Value::from(text.as_str()).to_string();
            buf.push_str(&quoted.green().to_string());
        }
        Value::Array(items) if items.is_empty() => buf.push_str("[]"),
        Value::Array(items) => {
            buf.push_str("[\n");
            for (idx, item) in items.iter().enumerate() {
                buf.push_str(&pad);
                colorize(buf, item, indent + 1);
                if idx + 1 < items.len() {
                    buf.push(',');
                }
                buf.push('\n');
            }
            buf.push_str(&close);
            buf.push(']');
        }
        Value::Object(map) if map.is_empty() => buf.push_str("{}"),
        Value::Object(map) => {
            buf.push_str("{\n");
            for (idx, (key, item)) in map.iter().enumerate() {
                buf.push_str(&pad);
                let key = Value::from(key.as_str()).to_string();
                buf.push_str(&key.blue().bold().to_string());
                buf.push_str(": ");
                colorize(buf, item, indent + 1);
                if idx + 1 < map.len() {
                    buf.push(',');
                }
                buf.push('\n');
            }
            buf.push_str(&close);
            buf.push('}');
        }
    }
}
