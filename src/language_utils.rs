use anyhow::{anyhow, Result};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// Recognition language codes arrive either as bare ISO 639 codes ("en",
/// "deu") or as BCP 47-style regional tags ("en-US", "de-DE"); only the
/// primary subtag matters here.

/// Extract the primary language subtag from a possibly regional code
fn primary_subtag(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or("")
        .to_lowercase()
}

/// Look up the language for a 2- or 3-letter primary subtag
fn lookup(code: &str) -> Option<Language> {
    let subtag = primary_subtag(code);
    match subtag.len() {
        2 => Language::from_639_1(&subtag),
        3 => Language::from_639_3(&subtag),
        _ => None,
    }
}

/// Validate that a language code carries a recognizable ISO 639 subtag
pub fn validate_language_code(code: &str) -> Result<()> {
    lookup(code)
        .map(|_| ())
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Normalize a language code to its ISO 639-1 (2-letter) form if one exists,
/// falling back to ISO 639-3
pub fn normalize_to_part1(code: &str) -> Result<String> {
    let lang = lookup(code).ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))?;

    match lang.to_639_1() {
        Some(part1) => Ok(part1.to_string()),
        None => Ok(lang.to_639_3().to_string()),
    }
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let lang = lookup(code).ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;
    Ok(lang.to_name().to_string())
}
