use crate::catalog::read_asset;

pub const MAX_SNIPPET_LENGTH: usize = 900;

const FALLBACK_ASSET: &str = "fallback.js";

/// Normalize line endings, trim, and hard-cut to `max` characters.
///
/// A cut snippet gets a trailing newline so the user still ends the sprint
/// on a line break. The cut ignores line and token boundaries.
pub fn prepare(raw: &str, max: usize) -> String {
    let cleaned = raw.replace("\r\n", "\n");
    let cleaned = cleaned.trim();

    match cleaned.char_indices().nth(max) {
        None => cleaned.to_string(),
        Some((cut, _)) => format!("{}\n", &cleaned[..cut]),
    }
}

/// The demo snippet shown whenever the network path fails
pub fn fallback_raw() -> &'static str {
    // the asset is part of the binary, a miss here is a packaging bug
    read_asset(FALLBACK_ASSET).unwrap_or("")
}

pub fn fallback(max: usize) -> String {
    prepare(fallback_raw(), max)
}
