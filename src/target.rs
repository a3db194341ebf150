//! File name and destination path resolution.
//!
//! Pure functions that turn a [`MediaRecord`] into the local file name and
//! destination path for the download. No filesystem access happens here;
//! the collision check belongs to the download step.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use url::Url;

use crate::api::MediaRecord;

/// Resolved download destination: the derived file name and the full path
/// it will be written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// File name derived from the source URL's final path segment.
    pub file_name: String,
    /// `file_name` joined with the destination directory.
    pub path: PathBuf,
}

/// Errors from target resolution. Both are malformed-input conditions.
#[derive(Debug, Error)]
pub enum TargetError {
    /// The selected media URL is not a valid URL.
    #[error("invalid media URL: {url}")]
    InvalidUrl {
        /// The malformed URL string.
        url: String,
    },

    /// The selected media URL has no usable final path segment.
    #[error("media URL has no usable file name: {url}")]
    NoFileName {
        /// The URL without a file name.
        url: String,
    },
}

/// Resolves the download target for a metadata record.
///
/// Selects the preferred media URL (`hdurl` when present and non-empty,
/// else `url`), derives the file name from its final path segment, and
/// joins it with `dir`.
///
/// # Errors
///
/// Returns [`TargetError::InvalidUrl`] when the selected URL does not
/// parse, and [`TargetError::NoFileName`] when it has no final path
/// segment to name the file after.
pub fn resolve_target(record: &MediaRecord, dir: &Path) -> Result<Target, TargetError> {
    let file_name = file_name_from_url(record.preferred_url())?;
    let path = dir.join(&file_name);
    Ok(Target { file_name, path })
}

/// Derives a local file name from a URL's final path segment.
///
/// The segment is percent-decoded and sanitized for filesystem safety.
/// Deriving twice from the same URL yields the same name.
///
/// # Errors
///
/// Returns [`TargetError::InvalidUrl`] for unparseable URLs and
/// [`TargetError::NoFileName`] when the path ends in a separator or the
/// segment sanitizes down to nothing.
pub fn file_name_from_url(url: &str) -> Result<String, TargetError> {
    let parsed = Url::parse(url).map_err(|_| TargetError::InvalidUrl {
        url: url.to_string(),
    })?;

    let last = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| TargetError::NoFileName {
            url: url.to_string(),
        })?;

    let decoded = urlencoding::decode(last).map_or_else(|_| last.to_string(), |d| d.into_owned());
    let sanitized = sanitize_file_name(&decoded);
    if sanitized.chars().all(|c| c == '_') {
        return Err(TargetError::NoFileName {
            url: url.to_string(),
        });
    }
    Ok(sanitized)
}

/// Sanitizes a file name for filesystem safety.
///
/// Replaces characters that are invalid on common filesystems:
/// / \ : * ? " < > |
fn sanitize_file_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if is_safe_file_name_segment(&sanitized) {
        sanitized
    } else {
        sanitized
            .chars()
            .map(|c| if c == '.' { '_' } else { c })
            .collect()
    }
}

fn is_safe_file_name_segment(name: &str) -> bool {
    !Path::new(name).components().any(|component| {
        matches!(
            component,
            Component::CurDir | Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn record(url: &str, hdurl: Option<&str>) -> MediaRecord {
        MediaRecord {
            title: "Test Picture".to_string(),
            explanation: String::new(),
            date: "2026-08-07".to_string(),
            media_type: "image".to_string(),
            url: url.to_string(),
            hdurl: hdurl.map(ToString::to_string),
            copyright: None,
            credit: None,
            service_version: "v1".to_string(),
        }
    }

    #[test]
    fn test_resolve_target_prefers_hdurl() {
        let record = record("https://x/img.jpg", Some("https://x/img_big.jpg"));
        let target = resolve_target(&record, Path::new("/work")).unwrap();
        assert_eq!(target.file_name, "img_big.jpg");
        assert_eq!(target.path, PathBuf::from("/work/img_big.jpg"));
    }

    #[test]
    fn test_resolve_target_falls_back_to_url_when_hdurl_missing() {
        let record = record("https://x/img.jpg", None);
        let target = resolve_target(&record, Path::new("/work")).unwrap();
        assert_eq!(target.file_name, "img.jpg");
    }

    #[test]
    fn test_resolve_target_falls_back_to_url_when_hdurl_empty() {
        let record = record("https://x/img.jpg", Some(""));
        let target = resolve_target(&record, Path::new("/work")).unwrap();
        assert_eq!(target.file_name, "img.jpg");
    }

    #[test]
    fn test_file_name_derivation_is_idempotent() {
        let url = "https://apod.nasa.gov/apod/image/2608/ngc1232_vlt_big.jpg";
        let first = file_name_from_url(url).unwrap();
        let second = file_name_from_url(url).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, "ngc1232_vlt_big.jpg");
    }

    #[test]
    fn test_file_name_from_url_uses_last_segment() {
        assert_eq!(
            file_name_from_url("https://example.com/a/b/c/photo.png").unwrap(),
            "photo.png"
        );
    }

    #[test]
    fn test_file_name_from_url_percent_decodes_segment() {
        assert_eq!(
            file_name_from_url("https://example.com/eagle%20nebula.jpg").unwrap(),
            "eagle nebula.jpg"
        );
    }

    #[test]
    fn test_file_name_from_url_sanitizes_invalid_chars() {
        let name = file_name_from_url("https://example.com/file%3Aname.jpg").unwrap();
        assert!(!name.contains(':'));
        assert_eq!(name, "file_name.jpg");
    }

    #[test]
    fn test_file_name_from_url_invalid_url() {
        let result = file_name_from_url("not a url");
        assert!(matches!(result, Err(TargetError::InvalidUrl { .. })));
    }

    #[test]
    fn test_file_name_from_url_trailing_slash_has_no_file_name() {
        let result = file_name_from_url("https://example.com/images/");
        assert!(matches!(result, Err(TargetError::NoFileName { .. })));
    }

    #[test]
    fn test_file_name_from_url_bare_host_has_no_file_name() {
        let result = file_name_from_url("https://example.com");
        assert!(matches!(result, Err(TargetError::NoFileName { .. })));
    }

    #[test]
    fn test_file_name_from_url_encoded_slash_stays_one_segment() {
        // %2F decodes to '/'; sanitization keeps the name a single segment
        let name = file_name_from_url("https://example.com/a%2Fb.jpg").unwrap();
        assert_eq!(name, "a_b.jpg");
        assert!(is_safe_file_name_segment(&name));
    }

    #[test]
    fn test_file_name_from_url_segment_of_only_replacements_rejected() {
        // ':' sanitizes to '_'; a name that is nothing but replacements is useless
        let result = file_name_from_url("https://example.com/%3A%3A");
        assert!(matches!(result, Err(TargetError::NoFileName { .. })));
    }

    #[test]
    fn test_sanitize_file_name_preserves_valid_chars() {
        assert_eq!(
            sanitize_file_name("valid-file_name.jpg"),
            "valid-file_name.jpg"
        );
        assert_eq!(sanitize_file_name("file (1).jpg"), "file (1).jpg");
    }

    #[test]
    fn test_target_error_display() {
        let error = TargetError::InvalidUrl {
            url: "nope".to_string(),
        };
        assert!(error.to_string().contains("invalid media URL"));
        assert!(error.to_string().contains("nope"));
    }
}
