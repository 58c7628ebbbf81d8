//! Token-set Jaccard similarity

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Identifiers/keywords, integers, two-char comparisons, single-char punctuation
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z_]\w*|\d+|==|!=|<=|>=|[()\[\]{}.,:;+\-*/%<>]")
        .expect("token pattern must compile")
});

/// Split a body into tokens, in source order and with repeats
pub fn tokenize(body: &str) -> Vec<&str> {
    TOKEN_RE.find_iter(body).map(|m| m.as_str()).collect()
}

fn token_set(body: &str) -> HashSet<&str> {
    TOKEN_RE.find_iter(body).map(|m| m.as_str()).collect()
}

/// `|A ∩ B| / max(1, |A ∪ B|)` over token sets; two empty sets score `1.0`
pub fn token_jaccard(a: &str, b: &str) -> f64 {
    let tokens_a = token_set(a);
    let tokens_b = token_set(b);

    if tokens_a.is_empty() && tokens_b.is_empty() {
        return 1.0;
    }

    let intersection = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.len() + tokens_b.len() - intersection;

    intersection as f64 / union.max(1) as f64
}
