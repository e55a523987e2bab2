use std::sync::LazyLock;

use regex::Regex;
use uuid::Uuid;

const KEY_PREFIX: &str = "images";
const FALLBACK_FILENAME: &str = "image";
/// Keeps object keys well under the 1024-byte S3 limit.
pub const MAX_FILENAME_LEN: usize = 128;
const MAX_EXTENSION_LEN: usize = 16;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// `images/<id>-<timestamp>-<sanitized filename>`
    pub fn for_record(record_id: Uuid, timestamp: i64, filename: &str) -> Self {
        Self(format!(
            "{}/{}-{}-{}",
            KEY_PREFIX,
            record_id,
            timestamp,
            sanitize_filename(filename)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

pub fn sanitize_filename(filename: &str) -> String {
    // Browsers may send a full path for the picked file.
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    let dashed = WHITESPACE.replace_all(base, "-");
    let cleaned = UNSAFE_CHARS.replace_all(&dashed, "");
    let cleaned = cleaned.trim_matches('.');

    if cleaned.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        truncate_filename(cleaned)
    }
}

// Input is ASCII at this point, so byte offsets are char boundaries.
fn truncate_filename(name: &str) -> String {
    if name.len() <= MAX_FILENAME_LEN {
        return name.to_string();
    }

    let extension = name
        .rfind('.')
        .map(|dot| &name[dot..])
        .filter(|ext| ext.len() <= MAX_EXTENSION_LEN)
        .unwrap_or("");
    let stem = &name[..MAX_FILENAME_LEN - extension.len()];

    format!("{stem}{extension}")
}

/// `<base>/<bucket>/<key>` with every key segment percent-encoded.
pub fn public_object_url(base_url: &str, bucket: &str, object_key: &str) -> String {
    let encoded_key = object_key
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");

    format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        bucket,
        encoded_key
    )
}
