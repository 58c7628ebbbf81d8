//! Normalised Levenshtein similarity

/// Levenshtein distance over chars
///
/// `strsim` keeps one cached row sized to its second argument, so the
/// shorter input goes second.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    if a.chars().count() >= b.chars().count() {
        strsim::levenshtein(a, b)
    } else {
        strsim::levenshtein(b, a)
    }
}

/// `1 - distance / max(len_a, len_b)`
///
/// Identical strings (including two empty ones) score `1.0`; exactly one
/// empty string scores `0.0`.
pub fn normalized_edit_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }

    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }

    let distance = levenshtein_distance(a, b);
    1.0 - distance as f64 / len_a.max(len_b) as f64
}
