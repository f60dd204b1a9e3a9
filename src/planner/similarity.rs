use crate::planner::constants::{DISH_KEYWORDS, SIMILAR_KEYWORD_RATIO, SIMILAR_MIN_LEN};

/// Lower-case and drop all whitespace.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Longest dish keyword contained in both normalized names, in chars.
fn longest_shared_keyword(a: &str, b: &str) -> Option<usize> {
    DISH_KEYWORDS
        .iter()
        .map(|keyword| normalize(keyword))
        .filter(|keyword| a.contains(keyword.as_str()) && b.contains(keyword.as_str()))
        .map(|keyword| keyword.chars().count())
        .max()
}

/// Whether two menu names denote the same dish family.
///
/// Similar when the names are equal, when one whitespace-stripped name
/// contains the other, or when they share a dish keyword covering at least
/// [`SIMILAR_KEYWORD_RATIO`] of the shorter name. Symmetric in its arguments.
pub fn is_similar(name_a: &str, name_b: &str) -> bool {
    if name_a == name_b {
        return true;
    }

    let a = normalize(name_a);
    let b = normalize(name_b);
    let len_a = a.chars().count();
    let len_b = b.chars().count();

    if len_a >= SIMILAR_MIN_LEN && len_b >= SIMILAR_MIN_LEN && (a.contains(&b) || b.contains(&a)) {
        return true;
    }

    let Some(keyword_len) = longest_shared_keyword(&a, &b) else {
        return false;
    };

    let shorter = len_a.min(len_b);
    keyword_len >= SIMILAR_MIN_LEN && keyword_len as f64 >= shorter as f64 * SIMILAR_KEYWORD_RATIO
}

/// Whether `name` is similar to any of `others`.
pub fn is_similar_to_any<S: AsRef<str>>(name: &str, others: &[S]) -> bool {
    others.iter().any(|other| is_similar(name, other.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        assert!(is_similar("soybean-paste stew", "soybean-paste stew"));
    }

    #[test]
    fn test_substring_containment() {
        assert!(is_similar("beef-radish soup", "radish soup"));
        assert!(is_similar("radish soup", "beef-radish soup"));
        assert!(is_similar("Radish Soup", "radishsoup"));
    }

    #[test]
    fn test_short_substring_ignored() {
        // a single character is below the containment minimum
        assert!(!is_similar("a", "apple tart"));
    }

    #[test]
    fn test_shared_keyword_dominance() {
        assert!(is_similar("soybean-paste stew", "soybean-paste soup"));
        assert!(!is_similar("egg soup", "seaweed soup"));
    }

    #[test]
    fn test_keyword_too_small_a_fraction() {
        // "egg" covers 3 of 21 chars
        assert!(!is_similar("egg and chive pancake roll", "steamed egg custard bowl"));
    }

    #[test]
    fn test_commutative() {
        let pairs = [
            ("braised pork belly", "braised tofu"),
            ("chicken curry", "curry rice"),
            ("spinach namul", "bean sprout namul"),
            ("egg soup", "seaweed soup"),
        ];
        for (a, b) in pairs {
            assert_eq!(is_similar(a, b), is_similar(b, a), "{} / {}", a, b);
        }
    }

    #[test]
    fn test_similar_to_any() {
        let last_week = vec!["Beef Bulgogi".to_string(), "Radish Soup".to_string()];
        assert!(is_similar_to_any("beef-radish soup", &last_week));
        assert!(!is_similar_to_any("Mackerel Jorim", &last_week));
    }
}
