//! CLI argument validators.
//!
//! Shared validation functions for CLI argument parsing.

use crate::constants::similarity;

/// Parse and validate a similarity threshold (0-100).
pub fn parse_threshold(s: &str) -> Result<u8, String> {
    let value: u8 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a whole number between 0 and 100"))?;

    if !(similarity::MIN..=similarity::MAX).contains(&value) {
        return Err(format!(
            "threshold must be between {} and {}, got {value}",
            similarity::MIN,
            similarity::MAX
        ));
    }

    Ok(value)
}

/// Parse and validate a worker count (at least 1).
pub fn parse_jobs(s: &str) -> Result<usize, String> {
    let value: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if value == 0 {
        return Err("jobs must be at least 1".to_string());
    }

    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_threshold_valid() {
        assert_eq!(parse_threshold("0").ok(), Some(0));
        assert_eq!(parse_threshold("80").ok(), Some(80));
        assert_eq!(parse_threshold("100").ok(), Some(100));
    }

    #[test]
    fn test_parse_threshold_invalid() {
        assert!(parse_threshold("101").unwrap_err().contains("between 0 and 100"));
        assert!(parse_threshold("-1").is_err());
        assert!(parse_threshold("80.5").is_err());
        assert!(parse_threshold("abc").is_err());
    }

    #[test]
    fn test_parse_jobs() {
        assert_eq!(parse_jobs("4").ok(), Some(4));
        assert!(parse_jobs("0").unwrap_err().contains("at least 1"));
        assert!(parse_jobs("many").is_err());
    }
}
