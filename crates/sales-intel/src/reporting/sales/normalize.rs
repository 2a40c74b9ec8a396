use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Tags the team appends to client names ("Ana Pérez (Médica)") that must
/// not participate in identity comparison. Checked after accent stripping,
/// so the accented spellings fold into these.
const MEDICAL_TAGS: [&str; 4] = ["(medica)", "(medico)", "medica", "medico"];

/// Canonicalizes a person name into a deduplication key.
///
/// Lower-cases, strips diacritics (NFD, dropping combining marks), removes
/// medical tags and collapses whitespace. The result is only ever compared,
/// never displayed. Idempotent: a normalized key normalizes to itself.
pub fn normalize_identity(value: Option<&str>) -> String {
    let Some(raw) = value else {
        return String::new();
    };

    let mut text = strip_accents(&raw.to_lowercase());
    for tag in MEDICAL_TAGS {
        text = text.replace(tag, "");
    }
    collapse_whitespace(&text)
}

/// Canonicalizes a staff-member or channel label for comparison against an
/// allow-list, so "Thaïs" and "thais " name the same setter.
pub fn normalize_role(value: &str) -> String {
    collapse_whitespace(&strip_accents(&value.to_lowercase()))
}

fn strip_accents(value: &str) -> String {
    value.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
