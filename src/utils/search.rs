// Search pattern helpers

/// Escape character used in LIKE clauses built from [`like_pattern`]
pub const LIKE_ESCAPE: char = '\\';

/// Separator between fields in a [`search_text`] value
pub const SEARCH_FIELD_SEPARATOR: char = '\u{1f}';

/// Fold searchable fields into the stored `search_text` column.
///
/// Lower-casing happens here rather than in SQL because SQLite's `LOWER()`
/// only folds ASCII. Absent fields contribute an empty segment.
pub fn search_text(fields: &[Option<&str>]) -> String {
    fields
        .iter()
        .map(|field| field.unwrap_or_default().to_lowercase())
        .collect::<Vec<_>>()
        .join(&SEARCH_FIELD_SEPARATOR.to_string())
}

/// Build a case-insensitive substring LIKE pattern from user input.
///
/// The input is lower-cased the same way as [`search_text`] and `%`, `_`
/// and `\` are escaped so they match literally. Queries must use
/// `search_text LIKE ? ESCAPE '\'`.
pub fn like_pattern(input: &str) -> String {
    let mut pattern = String::with_capacity(input.len() + 2);
    pattern.push('%');
    for c in input.trim().to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Normalise an optional free-text filter: blank becomes `None`
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_wraps_and_lowercases() {
        assert_eq!(like_pattern(" Mentoring "), "%mentoring%");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("100%_a\\b"), "%100\\%\\_a\\\\b%");
    }

    #[test]
    fn test_search_text_folds_unicode() {
        assert_eq!(
            search_text(&[Some("École Support"), None, Some("ÅLAND Ørsted")]),
            "école support\u{1f}\u{1f}åland ørsted"
        );
        assert_eq!(like_pattern("ÉCOLE"), "%école%");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ")), None);
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some(" QLD ")), Some("QLD".to_string()));
    }
}
