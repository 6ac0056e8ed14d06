//! Output formatters for loaded secrets.
//!
//! Responsibilities:
//! - Render published entries as dotenv, JSON, YAML, or shell `export` lines.
//! - Write rendered output to a file atomically.
//!
//! Invariants:
//! - Entries are rendered in publish order.
//! - JSON and YAML output is a single flat mapping; empty input renders `{}`.
//! - Shell output skips keys that are not valid shell identifiers.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::ser::{Serialize, SerializeMap, Serializer};
use tempfile::NamedTempFile;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// KEY="value" lines readable by dotenv loaders
    Dotenv,
    Json,
    Yaml,
    /// `export KEY='value'` lines for `eval`
    Shell,
}

/// Ordered entries serialized as a mapping.
struct Entries<'a>(&'a [(String, String)]);

impl Serialize for Entries<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Render `entries` in `format`.
pub fn format_entries(entries: &[(String, String)], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Dotenv => Ok(entries
            .iter()
            .map(|(key, value)| format!("{key}=\"{}\"\n", escape_double_quoted(value)))
            .collect()),
        OutputFormat::Shell => Ok(entries
            .iter()
            .filter(|(key, _)| {
                let valid = is_shell_identifier(key);
                if !valid {
                    warn!(key = %key, "Skipping key that is not a valid shell variable name");
                }
                valid
            })
            .map(|(key, value)| format!("export {key}={}\n", single_quote(value)))
            .collect()),
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(&Entries(entries))
                .context("Failed to serialize secrets as JSON")?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(&Entries(entries)).context("Failed to serialize secrets as YAML")
        }
    }
}

fn escape_double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

fn single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

pub(crate) fn is_shell_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Write `content` to `path` via a temp file in the same directory and an atomic rename.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent_dir)
        .with_context(|| format!("Failed to create directory: {}", parent_dir.display()))?;

    let mut temp_file = NamedTempFile::new_in(parent_dir)
        .with_context(|| format!("Failed to create temp file in: {}", parent_dir.display()))?;
    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temp file")?;
    temp_file.flush().context("Failed to flush temp file")?;
    temp_file
        .persist(path)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_dotenv_escapes() {
        let out = format_entries(
            &entries(&[("A", "plain"), ("B", "say \"hi\"\nnext $HOME \\")]),
            OutputFormat::Dotenv,
        )
        .unwrap();
        assert_eq!(out, "A=\"plain\"\nB=\"say \\\"hi\\\"\\nnext \\$HOME \\\\\"\n");
    }

    #[test]
    fn test_shell_quotes_and_skips_invalid_keys() {
        let out = format_entries(
            &entries(&[("DB:HOST", "x"), ("TOKEN", "it's"), ("_OK1", "")]),
            OutputFormat::Shell,
        )
        .unwrap();
        assert_eq!(out, "export TOKEN='it'\\''s'\nexport _OK1=''\n");
    }

    #[test]
    fn test_json_preserves_order() {
        let out =
            format_entries(&entries(&[("Z", "1"), ("A", "2")]), OutputFormat::Json).unwrap();
        assert_eq!(out, "{\n  \"Z\": \"1\",\n  \"A\": \"2\"\n}\n");

        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["A"], "2");
    }

    #[test]
    fn test_yaml_mapping() {
        let out = format_entries(
            &entries(&[("Logging:Level", "Debug"), ("PORT", "5432")]),
            OutputFormat::Yaml,
        )
        .unwrap();
        let parsed: serde_yaml::Mapping = serde_yaml::from_str(&out).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(
            parsed.get("Logging:Level").and_then(|v| v.as_str()),
            Some("Debug")
        );
        assert_eq!(parsed.get("PORT").and_then(|v| v.as_str()), Some("5432"));
    }

    #[test]
    fn test_empty_entries() {
        assert_eq!(format_entries(&[], OutputFormat::Dotenv).unwrap(), "");
        assert_eq!(format_entries(&[], OutputFormat::Json).unwrap(), "{}\n");
        assert_eq!(format_entries(&[], OutputFormat::Yaml).unwrap().trim(), "{}");
    }

    #[test]
    fn test_is_shell_identifier() {
        assert!(is_shell_identifier("FOO_BAR2"));
        assert!(is_shell_identifier("_x"));
        assert!(!is_shell_identifier("2FOO"));
        assert!(!is_shell_identifier("A:B"));
        assert!(!is_shell_identifier(""));
    }

    #[test]
    fn test_write_to_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("app.env");

        write_to_file("A=\"1\"\n", &path).unwrap();
        write_to_file("A=\"2\"\n", &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "A=\"2\"\n");
    }
}
