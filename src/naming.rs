//! Stored filenames, storage keys and the typed values that guard them.
//!
//! A stored filename has the shape `<timestamp-ms>-<sanitized-base><ext>`.
//! Its bytes live in object storage under `<course-path>/<stored-filename>`,
//! where the course path is the course name with spaces turned into hyphens.
//! That mapping is lossy: `Intro Biology` and `Intro-Biology` share a prefix.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt;
use url::Url;

/// Characters left untouched when a value is used as a single URL path segment.
pub const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Splits the final path component off `path`, ignoring trailing slashes.
fn file_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Returns the extension of the final path component, including the dot.
///
/// A dot in first position does not start an extension, so `.env` has none,
/// and neither does `..`.
pub fn extension(path: &str) -> &str {
    let name = file_name(path);
    if name == ".." {
        return "";
    }
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[idx..],
        _ => "",
    }
}

/// Returns the final path component with its extension removed.
pub fn stem(path: &str) -> &str {
    let name = file_name(path);
    let ext = extension(name);
    &name[..name.len() - ext.len()]
}

/// Replaces everything outside `[A-Za-z0-9-]` with `-` and collapses runs of `-`.
pub fn sanitize_base_name(base: &str) -> String {
    let mut out = String::with_capacity(base.len());
    for c in base.chars() {
        let c = if c.is_ascii_alphanumeric() || c == '-' {
            c
        } else {
            '-'
        };
        if c == '-' && out.ends_with('-') {
            continue;
        }
        out.push(c);
    }
    out
}

/// Builds the stored filename for an upload.
///
/// The base comes from `desired_name` when it is present and not blank,
/// otherwise from `original_name`. The extension always comes from
/// `original_name`.
pub fn derive_stored_filename(
    original_name: &str,
    desired_name: Option<&str>,
    timestamp_ms: i64,
) -> String {
    let base = match desired_name.map(str::trim) {
        Some(desired) if !desired.is_empty() => stem(desired),
        _ => stem(original_name),
    };

    format!(
        "{}-{}{}",
        timestamp_ms,
        sanitize_base_name(base),
        extension(original_name)
    )
}

/// Maps a course name onto its storage prefix.
pub fn course_path(course_name: &str) -> String {
    course_name.replace(' ', "-")
}

/// Location of a stored file inside the bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKey {
    course_path: String,
    filename: String,
}

impl StorageKey {
    pub fn new(course_name: &str, stored_filename: &str) -> Self {
        Self {
            course_path: course_path(course_name),
            filename: stored_filename.to_string(),
        }
    }

    pub fn course_path(&self) -> &str {
        &self.course_path
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The key with both segments percent-encoded, for use inside a URL path.
    pub fn encoded(&self) -> String {
        format!(
            "{}/{}",
            utf8_percent_encode(&self.course_path, PATH_SEGMENT),
            utf8_percent_encode(&self.filename, PATH_SEGMENT)
        )
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.course_path, self.filename)
    }
}

/// Recovers the human-facing name of a file from its public URL.
///
/// The last URL segment is decoded and the timestamp prefix, everything up to
/// and including the first `-`, is dropped.
pub fn display_name(file_url: &str) -> String {
    let last = file_url.rsplit('/').next().unwrap_or(file_url);
    let decoded = percent_decode_str(last).decode_utf8_lossy();
    match decoded.find('-') {
        Some(idx) => decoded[idx + 1..].to_string(),
        None => decoded.into_owned(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredFileNameError {
    Empty,
    PathSeparator,
    PathTraversal,
    ControlCharacter,
}

impl fmt::Display for StoredFileNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "File name cannot be empty"),
            Self::PathSeparator => write!(f, "Invalid file name: path separators are not allowed"),
            Self::PathTraversal => write!(f, "Invalid file name: '..' is not allowed"),
            Self::ControlCharacter => {
                write!(f, "Invalid file name: control characters are not allowed")
            }
        }
    }
}

impl std::error::Error for StoredFileNameError {}

/// A stored filename that is safe to splice into a storage key.
///
/// Only names that could escape the course prefix are refused. Spaces and
/// non-ASCII text are fine because [`StorageKey::encoded`] percent-encodes
/// the segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFileName(String);

impl StoredFileName {
    pub fn parse(raw: &str) -> Result<Self, StoredFileNameError> {
        if raw.is_empty() {
            return Err(StoredFileNameError::Empty);
        }
        if raw.contains('/') || raw.contains('\\') {
            return Err(StoredFileNameError::PathSeparator);
        }
        if raw.chars().any(|c| c.is_control()) {
            return Err(StoredFileNameError::ControlCharacter);
        }
        if raw.starts_with('.') || raw.contains("..") {
            return Err(StoredFileNameError::PathTraversal);
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoredFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkUrlError {
    Malformed(String),
    UnsupportedScheme(String),
}

impl fmt::Display for LinkUrlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(reason) => write!(f, "Invalid link: {}", reason),
            Self::UnsupportedScheme(scheme) => {
                write!(f, "Invalid link: scheme '{}' is not allowed", scheme)
            }
        }
    }
}

impl std::error::Error for LinkUrlError {}

/// An absolute http(s) URL, kept exactly as the caller wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkUrl(String);

impl LinkUrl {
    pub fn parse(raw: &str) -> Result<Self, LinkUrlError> {
        let parsed = Url::parse(raw).map_err(|e| LinkUrlError::Malformed(e.to_string()))?;
        match parsed.scheme() {
            "http" | "https" => Ok(Self(raw.to_string())),
            other => Err(LinkUrlError::UnsupportedScheme(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
