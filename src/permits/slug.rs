use serde_json::Value;

/// Identifier shared by every record without a usable neighborhood label.
pub const NO_NEIGHBORHOOD: &str = "";

/// Normalize a label into a lowercase, hyphen-separated identifier.
///
/// Runs of non-alphanumeric characters collapse to a single `-` and the
/// result never starts or ends with one. Blank input maps to
/// [`NO_NEIGHBORHOOD`].
pub fn slugify(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut prev_dash = false;
    // Lowercasing can expand one char into several (`İ` -> `i` + U+0307),
    // so each produced char is classified on its own.
    for lc in label.trim().chars().flat_map(char::to_lowercase) {
        if lc.is_alphanumeric() {
            out.push(lc);
            prev_dash = false;
        } else if !prev_dash {
            out.push('-');
            prev_dash = true;
        }
    }
    out.trim_matches('-').to_string()
}

/// Slugify a raw JSON field. Anything that is not a string counts as blank.
pub fn slugify_value(value: &Value) -> String {
    match value {
        Value::String(label) => slugify(label),
        _ => slugify(NO_NEIGHBORHOOD),
    }
}
