//! YAML Frontmatter Parser
//!
//! Handles parsing of YAML frontmatter from Markdown artifact files with:
//! - BOM (Byte Order Mark) stripping
//! - Line ending normalization (CRLF → LF)
//! - Documents without frontmatter (all fields fall back to their defaults)

use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::de::DeserializeOwned;
use std::sync::LazyLock;

/// Closing delimiter directly after the opening one (empty block)
static EMPTY_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^---[ \t]*(\n|$)").expect("valid empty-block pattern"));

/// Closing `---` at the start of a line, followed by `\n` or EOF
static CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n---[ \t]*\n|\n---[ \t]*$").expect("valid closing-delimiter pattern")
});

/// Parsed document with frontmatter and body separated
#[derive(Debug, Clone)]
pub struct ParsedDocument<T> {
    /// Deserialized frontmatter
    pub frontmatter: T,
    /// Markdown body (after frontmatter)
    pub body: String,
}

/// Parse a document whose frontmatter block is optional
///
/// A document that does not open with `---` yields `T::default()` and the
/// whole content as body. A document that opens a block must close it, and
/// the YAML inside must deserialize into `T`.
///
/// # Errors
/// * If the frontmatter block is not properly closed
/// * If YAML parsing fails
pub fn parse_document<T: DeserializeOwned + Default>(content: &str) -> Result<ParsedDocument<T>> {
    let normalized = normalize_content(content);

    if !has_opening_delimiter(&normalized) {
        return Ok(ParsedDocument {
            frontmatter: T::default(),
            body: normalized,
        });
    }

    let (frontmatter_str, body) = split_frontmatter(&normalized)?;
    let value = parse_yaml_value(&frontmatter_str)?;

    let frontmatter = if value.is_null() {
        T::default()
    } else {
        serde_yaml::from_value(value).context("Failed to parse YAML frontmatter")?
    };

    Ok(ParsedDocument { frontmatter, body })
}

/// Parse frontmatter only (without deserializing to a specific type)
///
/// Returns the raw YAML as serde_yaml::Value for dynamic inspection.
/// A document without frontmatter yields `Value::Null`.
pub fn parse_frontmatter_value(content: &str) -> Result<serde_yaml::Value> {
    let normalized = normalize_content(content);
    if !has_opening_delimiter(&normalized) {
        return Ok(serde_yaml::Value::Null);
    }
    let (frontmatter_str, _) = split_frontmatter(&normalized)?;
    parse_yaml_value(&frontmatter_str)
}

/// Normalize content: strip BOM, normalize line endings
///
/// Handles:
/// - UTF-8 BOM (EF BB BF / U+FEFF)
/// - CRLF → LF
/// - CR → LF (old Mac style)
fn normalize_content(content: &str) -> String {
    let s = content.strip_prefix('\u{FEFF}').unwrap_or(content);
    s.replace("\r\n", "\n").replace('\r', "\n")
}

/// Split frontmatter from body
///
/// Frontmatter requirements:
/// - Must start with `---` at line 1, column 0
/// - Must end with `---` at column 0 (not inside YAML multiline string)
/// - Closing `---` can have trailing whitespace
///
/// # Returns
/// * `(frontmatter_string, body_string)` tuple
fn split_frontmatter(content: &str) -> Result<(String, String)> {
    if !content.starts_with("---") {
        bail!("Document must start with YAML frontmatter (---)")
    }

    if content == "---" || content == "---\n" {
        bail!("Frontmatter not properly closed (--- must be at line start)")
    }

    let Some(content_after_open) = content.strip_prefix("---\n") else {
        bail!("Invalid frontmatter: opening --- must be followed by newline")
    };

    if let Some(m) = EMPTY_CLOSE_RE.find(content_after_open) {
        return Ok((String::new(), content_after_open[m.end()..].to_string()));
    }

    if let Some(m) = CLOSE_RE.find(content_after_open) {
        let frontmatter = content_after_open[..m.start()].to_string();
        let body = content_after_open[m.end()..].to_string();
        Ok((frontmatter, body))
    } else {
        bail!("Frontmatter not properly closed (--- must be at line start)")
    }
}

fn has_opening_delimiter(normalized: &str) -> bool {
    normalized == "---" || normalized.starts_with("---\n")
}

fn parse_yaml_value(frontmatter: &str) -> Result<serde_yaml::Value> {
    if frontmatter.trim().is_empty() {
        return Ok(serde_yaml::Value::Null);
    }
    serde_yaml::from_str(frontmatter).context("Failed to parse YAML frontmatter")
}

// =============================================================================
// Tests
// =============================================================================
