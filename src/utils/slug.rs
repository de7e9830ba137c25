// Slug generation for admin-created content

/// Maximum slug length before a uniqueness suffix is appended
pub const MAX_SLUG_LEN: usize = 80;

/// Turn a title into a URL slug.
///
/// ASCII letters and digits are kept (lower-cased); every other run of
/// characters collapses into a single `-`. Leading and trailing dashes are
/// trimmed. The result may be empty when the input has no ASCII
/// alphanumerics.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }

        if slug.len() >= MAX_SLUG_LEN {
            break;
        }
    }

    slug.trim_end_matches('-').to_string()
}

/// Candidate slug for the given attempt: `base`, then `base-2`, `base-3`, ...
pub fn slug_candidate(base: &str, attempt: u32) -> String {
    if attempt <= 1 {
        base.to_string()
    } else {
        format!("{}-{}", base, attempt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Youth Justice Forum 2025"), "youth-justice-forum-2025");
    }

    #[test]
    fn test_slugify_collapses_punctuation() {
        assert_eq!(slugify("  Diagrama -- Spain's Model!  "), "diagrama-spain-s-model");
    }

    #[test]
    fn test_slugify_drops_non_ascii() {
        assert_eq!(slugify("Café Été"), "caf-t");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_truncates() {
        let long = "a".repeat(200);
        assert_eq!(slugify(&long).len(), MAX_SLUG_LEN);
    }

    #[test]
    fn test_slug_candidate() {
        assert_eq!(slug_candidate("forum", 1), "forum");
        assert_eq!(slug_candidate("forum", 2), "forum-2");
        assert_eq!(slug_candidate("forum", 10), "forum-10");
    }
}
