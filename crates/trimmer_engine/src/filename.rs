use sha2::{Digest, Sha256};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

const MAX_FILENAME_LEN: usize = 200;
const FALLBACK_STEM: &str = "untitled";
const FALLBACK_EXTENSION: &str = "unknown";

/// Filesystem-safe file name derived from a URL: `{stem}.{ext}`.
///
/// The extension is whatever follows the last `.` after the last `/`, so
/// `https://example.com/a?b=c` becomes `https_example.comab_c.unknown` and
/// `https://example.com/index.html` becomes `https_example.comindex.html`.
pub fn sanitize_filename(url: &str) -> String {
    let (stem, extension) = split_extension(url);

    let mut stem = sanitize_component(stem);
    let mut extension = sanitize_component(extension.trim_start_matches('.'));
    stem = stem.trim_matches('.').to_string();
    extension = extension.trim_matches('.').to_string();
    if stem.is_empty() {
        stem = FALLBACK_STEM.to_string();
    }
    if extension.is_empty() {
        extension = FALLBACK_EXTENSION.to_string();
    }
    if is_reserved_windows_name(&stem) {
        stem.push('_');
    }

    let name = format!("{stem}.{extension}").replace('-', "_");
    if name.len() <= MAX_FILENAME_LEN {
        return name;
    }
    shorten(&name, &extension, url)
}

/// Go-style `filepath.Ext`: the suffix starting at the last `.` of the final
/// path segment, or empty.
fn split_extension(input: &str) -> (&str, &str) {
    let tail_start = input.rfind('/').map_or(0, |idx| idx + 1);
    match input[tail_start..].rfind('.') {
        Some(dot) => input.split_at(tail_start + dot),
        None => (input, ""),
    }
}

fn sanitize_component(input: &str) -> String {
    let mut cleaned = String::with_capacity(input.len());
    let mut prev_dash = false;
    for c in input.nfd().filter(|c| !is_combining_mark(*c)) {
        let mapped = match c {
            ' ' | '&' | '_' | '=' | '+' | ':' => '-',
            c if c.is_ascii_alphanumeric() || c == '-' || c == '.' => c,
            _ => continue,
        };
        // Collapse runs of dashes
        if mapped == '-' {
            if prev_dash {
                continue;
            }
            prev_dash = true;
        } else {
            prev_dash = false;
        }
        cleaned.push(mapped);
    }
    cleaned
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}

/// Truncates the stem and appends a hash of the full URL so that long URLs
/// sharing a prefix still map to different files.
fn shorten(name: &str, extension: &str, url: &str) -> String {
    let hash = short_hash(url);
    let extension = if extension.len() > 16 {
        &extension[..16]
    } else {
        extension
    };
    let keep = MAX_FILENAME_LEN - extension.len() - hash.len() - 2;
    // Sanitized names are pure ASCII, so byte slicing is safe.
    let stem = name[..keep].trim_end_matches(&['.', '_'][..]);
    format!("{stem}_{hash}.{extension}")
}

fn short_hash(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
