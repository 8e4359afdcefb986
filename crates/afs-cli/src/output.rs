//! Output rendering shared by all subcommands.

use anyhow::{Context, Result};
use serde::Serialize;

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Pretty JSON followed by a newline.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    out.push('\n');
    Ok(out)
}

/// `{"error": "..."}` for a failed command, with the full context chain.
pub fn error_json(err: &anyhow::Error) -> String {
    serde_json::json!({ "error": format!("{err:#}") }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_output_ends_with_newline() {
        let out = to_json(&["a", "b"]).unwrap();
        assert!(out.ends_with("]\n"));
        let parsed: Vec<String> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, vec!["a", "b"]);
    }

    #[test]
    fn error_json_carries_context_chain() {
        let err = anyhow::anyhow!("connection refused").context("failed to list datasets");
        let value: serde_json::Value = serde_json::from_str(&error_json(&err)).unwrap();
        assert_eq!(value["error"], "failed to list datasets: connection refused");
    }

    #[test]
    fn flag_selects_format() {
        assert_eq!(OutputFormat::from_flag(true), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flag(false), OutputFormat::Text);
    }
}
