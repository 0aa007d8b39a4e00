use crate::cli::{EnvGetArgs, EnvListArgs};
use crate::console;
use anyhow::{anyhow, Result};
use serde_json::{Map, Value};
use std::io::Write;

pub(super) fn list(args: &EnvListArgs, out: &mut dyn Write) -> Result<()> {
    let mut vars: Vec<(String, String)> = std::env::vars()
        .filter(|(name, _)| match &args.prefix {
            Some(prefix) => name.starts_with(prefix.as_str()),
            None => true,
        })
        .filter(|(name, _)| !args.exclude.iter().any(|excluded| excluded == name))
        .collect();
    vars.sort();
    let map: Map<String, Value> = vars
        .into_iter()
        .map(|(name, value)| (name, Value::String(value)))
        .collect();
    console::emit(out, &Value::Object(map), &args.output.output)
}

pub(super) fn get(args: &EnvGetArgs, out: &mut dyn Write) -> Result<()> {
    let value = match (std::env::var(&args.name), &args.default) {
        (Ok(value), _) => value,
        (Err(_), Some(default)) => default.clone(),
        (Err(_), None) => return Err(anyhow!("environment variable {} is not set", args.name)),
    };
    writeln!(out, "{value}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputArgs;

    #[test]
    fn list_filters_by_prefix_and_exclusion() {
        let path = std::env::var("PATH").unwrap_or_default();
        let args = EnvListArgs {
            prefix: Some("PAT".to_string()),
            exclude: Vec::new(),
            output: OutputArgs {
                output: "text".to_string(),
            },
        };
        let mut buf = Vec::new();
        list(&args, &mut buf).expect("list");
        assert!(String::from_utf8_lossy(&buf).contains(&format!("PATH={path}")));

        let args = EnvListArgs {
            exclude: vec!["PATH".to_string()],
            ..args
        };
        let mut buf = Vec::new();
        list(&args, &mut buf).expect("list");
        assert!(!String::from_utf8_lossy(&buf).contains("PATH="));
    }

    #[test]
    fn get_falls_back_to_default() {
        let args = EnvGetArgs {
            default: Some("fallback".to_string()),
            name: "HEIMDALL_SURELY_UNSET_VARIABLE".to_string(),
        };
        let mut buf = Vec::new();
        get(&args, &mut buf).expect("get");
        assert_eq!(buf, b"fallback\n");
    }
}
