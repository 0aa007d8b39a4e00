use crate::cli::WaitArgs;
use anyhow::{anyhow, Context, Result};
use std::io::Write;
use std::time::{Duration, Instant};

/// Longest accepted wait; previews run the command on the UI thread.
const MAX_WAIT: Duration = Duration::from_secs(10 * 60);

pub(super) fn run(args: &WaitArgs, out: &mut dyn Write) -> Result<()> {
    let duration = parse_duration(&args.duration)?;
    let start = Instant::now();
    std::thread::sleep(duration);
    tracing::debug!(elapsed_ms = start.elapsed().as_millis() as u64, "wait complete");
    match &args.message {
        Some(message) => writeln!(out, "{message}")?,
        None => writeln!(out, "waited {}", args.duration.trim())?,
    }
    Ok(())
}

/// Parse `<number><unit>` with units `ms`, `s`, `m`, `h`; a bare number is seconds.
/// Values above [`MAX_WAIT`] are rejected.
pub(super) fn parse_duration(input: &str) -> Result<Duration> {
    let text = input.trim();
    let split = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    let (number, unit) = text.split_at(split);
    let value: u64 = number
        .parse()
        .with_context(|| format!("invalid duration {input:?}"))?;
    let duration = match unit {
        "ms" => Duration::from_millis(value),
        "" | "s" => Duration::from_secs(value),
        "m" => Duration::from_secs(scale(value, 60, input)?),
        "h" => Duration::from_secs(scale(value, 3600, input)?),
        other => return Err(anyhow!("invalid duration unit {other:?} in {input:?}")),
    };
    if duration > MAX_WAIT {
        return Err(anyhow!(
            "duration {input:?} exceeds the {}s limit",
            MAX_WAIT.as_secs()
        ));
    }
    Ok(duration)
}

fn scale(value: u64, factor: u64, input: &str) -> Result<u64> {
    value
        .checked_mul(factor)
        .ok_or_else(|| anyhow!("duration {input:?} out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_units() {
        assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("3").unwrap(), Duration::from_secs(3));
        assert_eq!(parse_duration("1m").unwrap(), Duration::from_secs(60));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_duration("soon").is_err());
        assert!(parse_duration("5 days").is_err());
    }

    #[test]
    fn rejects_overflow_and_overlong_waits() {
        let err = parse_duration("307445734561825861m").expect_err("overflow");
        assert!(err.to_string().contains("out of range"), "{err}");
        assert!(parse_duration("99999999999999999h").is_err());

        let err = parse_duration("2h").expect_err("too long");
        assert!(err.to_string().contains("limit"), "{err}");
        assert!(parse_duration("10m").is_ok());
        assert!(parse_duration("601s").is_err());
    }

    #[test]
    fn prints_message_after_waiting() {
        let args = WaitArgs {
            duration: "0ms".to_string(),
            message: Some("done".to_string()),
        };
        let mut buf = Vec::new();
        run(&args, &mut buf).expect("wait");
        assert_eq!(buf, b"done\n");
    }
}
