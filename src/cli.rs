use std::path::PathBuf;

use clap::Parser;

use crate::error::Error;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "focusmode - a pomodoro focus timer for study sessions")]
pub struct Args {
    /// Focus phase length, e.g. `25`, `25m`, `1h30m`
    #[arg(short, long, value_parser = parse_minutes)]
    pub focus: Option<u32>,
    /// Short break length
    #[arg(short = 'b', long, value_parser = parse_minutes)]
    pub short_break: Option<u32>,
    /// Long break length
    #[arg(short, long, value_parser = parse_minutes)]
    pub long_break: Option<u32>,
    /// Completed focus phases between long breaks
    #[arg(short, long)]
    pub interval: Option<u32>,
    #[arg(short = 't', long)]
    pub theme: Option<String>,
    #[arg(long)]
    pub no_sound: bool,
    /// Disable desktop notifications
    #[arg(long)]
    pub no_notify: bool,
    /// Continue from the timer position saved on last quit
    #[arg(long)]
    pub resume: bool,
    /// Directory for config, statistics and logs
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

/// Parse a duration into whole minutes.
///
/// A bare number is minutes. Otherwise the input is a sequence of
/// `<n>h` and `<n>m` parts.
pub fn parse_minutes(input: &str) -> Result<u32, Error> {
    let s = input.trim().to_lowercase();
    let err = |reason| Error::Duration {
        input: input.to_string(),
        reason,
    };

    if s.is_empty() {
        return Err(err("empty duration"));
    }
    if let Ok(m) = s.parse::<u32>() {
        return if m > 0 { Ok(m) } else { Err(err("duration must be > 0")) };
    }

    let mut total: u32 = 0;
    let mut num = String::new();
    for c in s.chars() {
        match c {
            '0'..='9' => num.push(c),
            'h' | 'm' => {
                let n: u32 = num.parse().map_err(|_| err("missing number before unit"))?;
                let minutes = if c == 'h' { n.checked_mul(60) } else { Some(n) };
                total = minutes
                    .and_then(|m| total.checked_add(m))
                    .ok_or_else(|| err("duration too large"))?;
                num.clear();
            }
            _ => return Err(err("expected minutes or h/m units")),
        }
    }

    if !num.is_empty() {
        return Err(err("trailing number without unit"));
    }
    if total == 0 {
        return Err(err("duration must be > 0"));
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_minutes("25").unwrap(), 25);
        assert_eq!(parse_minutes("25m").unwrap(), 25);
        assert_eq!(parse_minutes("1h").unwrap(), 60);
        assert_eq!(parse_minutes("1h30m").unwrap(), 90);
        assert_eq!(parse_minutes(" 2H ").unwrap(), 120);
    }

    #[test]
    fn test_parse_minutes_rejects_bad_input() {
        for bad in ["", "0", "0m", "abc", "30s", "1.5m", "h", "1h30"] {
            assert!(parse_minutes(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["focusmode", "-f", "50", "-b", "10m", "--resume"]);
        assert_eq!(args.focus, Some(50));
        assert_eq!(args.short_break, Some(10));
        assert_eq!(args.long_break, None);
        assert!(args.resume);
        assert!(!args.no_sound);
    }
}
