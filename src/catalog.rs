use anyhow::{Context, Result};
use serde::de::IgnoredAny;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::formatter::{FormatOptions, TitleCaseFormatter};

/// How strings are laid out inside a catalog file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    /// One UI string per line
    Lines,
    /// Every string value in a JSON document
    Json,
}

impl CatalogKind {
    /// Pick the layout from the file extension; anything but `.json` is line-based
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => CatalogKind::Json,
            _ => CatalogKind::Lines,
        }
    }
}

/// A string that is not in canonical form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// `line N` for line catalogs, a JSON pointer for JSON catalogs
    pub location: String,
    pub original: String,
    pub canonical: String,
}

/// Result of checking one catalog
#[derive(Debug, Clone)]
pub struct CatalogReport {
    pub path: PathBuf,
    pub kind: CatalogKind,
    pub strings_checked: u64,
    pub violations: Vec<Violation>,
    /// Canonical file contents, present only when something changed
    pub rewritten: Option<String>,
}

impl CatalogReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Read a catalog from disk and check every string in it
pub async fn audit_catalog(path: impl AsRef<Path>, formatter: &TitleCaseFormatter) -> Result<CatalogReport> {
    let path = path.as_ref();
    debug!("Starting catalog audit: {}", path.display());

    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;

    let kind = CatalogKind::from_path(path);
    let report = audit_content(path, kind, &content, formatter)
        .with_context(|| format!("Failed to audit catalog {}", path.display()))?;

    info!(
        "Audited {}: {} strings, {} violations",
        path.display(),
        report.strings_checked,
        report.violations.len()
    );
    Ok(report)
}

/// Check catalog contents already in memory
pub fn audit_content(
    path: &Path,
    kind: CatalogKind,
    content: &str,
    formatter: &TitleCaseFormatter,
) -> Result<CatalogReport> {
    let mut report = CatalogReport {
        path: path.to_path_buf(),
        kind,
        strings_checked: 0,
        violations: Vec::new(),
        rewritten: None,
    };

    let rewritten = match kind {
        CatalogKind::Lines => audit_lines(content, formatter, &mut report),
        CatalogKind::Json => audit_json(content, formatter, &mut report)?,
    };

    if !report.violations.is_empty() {
        report.rewritten = Some(rewritten);
    }
    Ok(report)
}

fn audit_lines(content: &str, formatter: &TitleCaseFormatter, report: &mut CatalogReport) -> String {
    let mut output = String::with_capacity(content.len());
    let mut buffer = String::new();

    for (index, line) in content.split_inclusive('\n').enumerate() {
        let body = line.trim_end_matches(['\n', '\r']);
        let ending = &line[body.len()..];

        report.strings_checked += 1;
        formatter.format_into(body, FormatOptions::default(), &mut buffer);
        if buffer != body {
            report.violations.push(Violation {
                location: format!("line {}", index + 1),
                original: body.to_string(),
                canonical: buffer.clone(),
            });
        }

        output.push_str(&buffer);
        output.push_str(ending);
    }
    output
}

/// Container the JSON scanner is currently inside
enum Frame {
    Object { key: String, expecting_key: bool },
    Array { index: usize },
}

fn audit_json(content: &str, formatter: &TitleCaseFormatter, report: &mut CatalogReport) -> Result<String> {
    serde_json::from_str::<IgnoredAny>(content).context("Invalid JSON catalog")?;

    // Document is valid, so a byte scan can track structure; only changed string
    // literals are replaced and every other byte is copied through
    let bytes = content.as_bytes();
    let mut output = String::with_capacity(content.len());
    let mut frames: Vec<Frame> = Vec::new();
    let mut copied = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'{' => frames.push(Frame::Object { key: String::new(), expecting_key: true }),
            b'[' => frames.push(Frame::Array { index: 0 }),
            b'}' | b']' => {
                frames.pop();
            }
            b',' => match frames.last_mut() {
                Some(Frame::Array { index }) => *index += 1,
                Some(Frame::Object { expecting_key, .. }) => *expecting_key = true,
                None => {}
            },
            b':' => {
                if let Some(Frame::Object { expecting_key, .. }) = frames.last_mut() {
                    *expecting_key = false;
                }
            }
            b'"' => {
                let end = string_literal_end(bytes, pos);
                let text: String = serde_json::from_str(&content[pos..end])
                    .with_context(|| format!("Invalid JSON string at byte {pos}"))?;

                let is_key = matches!(frames.last(), Some(Frame::Object { expecting_key: true, .. }));
                if is_key {
                    if let Some(Frame::Object { key, .. }) = frames.last_mut() {
                        *key = text;
                    }
                } else {
                    report.strings_checked += 1;
                    let canonical = formatter.format(&text, FormatOptions::default());
                    if canonical != text {
                        output.push_str(&content[copied..pos]);
                        output.push_str(&serde_json::to_string(&canonical)?);
                        copied = end;
                        report.violations.push(Violation {
                            location: json_pointer(&frames),
                            original: text,
                            canonical,
                        });
                    }
                }
                pos = end;
                continue;
            }
            _ => {}
        }
        pos += 1;
    }

    output.push_str(&content[copied..]);
    Ok(output)
}

/// Byte offset just past the closing quote of the literal opening at `start`
fn string_literal_end(bytes: &[u8], start: usize) -> usize {
    let mut pos = start + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'"' => return pos + 1,
            _ => pos += 1,
        }
    }
    bytes.len()
}

fn json_pointer(frames: &[Frame]) -> String {
    if frames.is_empty() {
        return "/".to_string();
    }
    let mut pointer = String::new();
    for frame in frames {
        pointer.push('/');
        match frame {
            Frame::Object { key, .. } => pointer.push_str(&key.replace('~', "~0").replace('/', "~1")),
            Frame::Array { index } => pointer.push_str(&index.to_string()),
        }
    }
    pointer
}
