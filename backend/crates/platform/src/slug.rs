//! Slug Generation
//!
//! Transliterates human-readable names (Vietnamese included) into URL-safe
//! slugs: NFD decomposition, combining marks dropped, `đ` folded to `d`,
//! punctuation such as `.` and `'` dropped outright, lowercase ASCII
//! alphanumerics kept, everything else collapsed into a single separator.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Characters removed without leaving a separator behind
const STRIPPED: &[char] = &['*', '+', '~', '.', '(', ')', '\'', '"', '!', ':', '@'];

/// Length of the random suffix appended to post slugs
pub const POST_SLUG_SUFFIX_LEN: usize = 10;

/// Slugify with an arbitrary separator (may be empty)
///
/// ```rust
/// use platform::slug::slugify;
///
/// assert_eq!(slugify("Tin tức", "-"), "tin-tuc");
/// assert_eq!(slugify("  Đồng   bằng!! ", "_"), "dong_bang");
/// assert_eq!(slugify("Node.js", "-"), "nodejs");
/// ```
pub fn slugify(input: &str, separator: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_separator = false;

    for ch in input.nfd().filter(|c| !is_combining_mark(*c)) {
        let ch = match ch {
            'đ' | 'Đ' => 'd',
            other => other,
        };

        if STRIPPED.contains(&ch) {
            continue;
        }

        if ch.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push_str(separator);
            }
            pending_separator = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    out
}

/// Category slug: `-` separated
pub fn category_slug(name: &str) -> String {
    slugify(name, "-")
}

/// Tag slug: separators removed entirely, so "Lúa gạo" and "lua-gao" collide
pub fn tag_slug(name: &str) -> String {
    slugify(name, "")
}

/// Post slug: category-style slug plus a random nanoid suffix
pub fn post_slug(title: &str) -> String {
    let suffix = nid::Nanoid::<POST_SLUG_SUFFIX_LEN>::new();
    let base = category_slug(title);
    if base.is_empty() {
        suffix.to_string()
    } else {
        format!("{}-{}", base, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vietnamese_transliteration() {
        assert_eq!(category_slug("Tin tức"), "tin-tuc");
        assert_eq!(category_slug("Kỹ thuật nuôi trồng"), "ky-thuat-nuoi-trong");
        assert_eq!(category_slug("Đời sống"), "doi-song");
    }

    #[test]
    fn test_separators_collapse_and_trim() {
        assert_eq!(category_slug("--Hello,   World!--"), "hello-world");
        assert_eq!(category_slug("***"), "");
    }

    #[test]
    fn test_punctuation_is_dropped_without_separator() {
        assert_eq!(category_slug("Node.js"), "nodejs");
        assert_eq!(category_slug("Don't stop"), "dont-stop");
        assert_eq!(category_slug("C++ (cơ bản)"), "c-co-ban");
        assert_eq!(category_slug("user@host: ~note~"), "userhost-note");
    }

    #[test]
    fn test_tag_slug_has_no_separator() {
        assert_eq!(tag_slug("Lúa gạo"), "luagao");
        assert_eq!(tag_slug("lua-gao"), "luagao");
    }

    #[test]
    fn test_post_slug_suffix() {
        let a = post_slug("Mùa vụ mới");
        let b = post_slug("Mùa vụ mới");
        assert!(a.starts_with("mua-vu-moi-"));
        assert_eq!(a.len(), "mua-vu-moi-".len() + POST_SLUG_SUFFIX_LEN);
        assert_ne!(a, b);
    }

    #[test]
    fn test_post_slug_from_symbols_only() {
        assert_eq!(post_slug("!!!").len(), POST_SLUG_SUFFIX_LEN);
    }
}
