//! Matching-block sequence ratio
//!
//! Ratcliff/Obershelp: find the longest common block, then recurse on the
//! unmatched regions to its left and right. The ratio is `2 * M / T` where `M`
//! is the total length of all blocks and `T` the combined input length.

use std::collections::HashMap;

/// Longest common block inside `a[alo..ahi]` / `b[blo..bhi]`
///
/// Returns `(i, j, size)`. Among equally long blocks the one starting
/// earliest in `a`, then earliest in `b`, wins.
fn find_longest_match(
    a: &[char],
    b_index: &HashMap<char, Vec<usize>>,
    (alo, ahi): (usize, usize),
    (blo, bhi): (usize, usize),
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    let mut run_lengths: HashMap<usize, usize> = HashMap::new();

    for (i, ch) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next_lengths = HashMap::new();
        if let Some(positions) = b_index.get(ch) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = j
                    .checked_sub(1)
                    .and_then(|prev| run_lengths.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next_lengths.insert(j, k);
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            }
        }
        run_lengths = next_lengths;
    }

    (best_i, best_j, best_size)
}

/// Total length of the matching blocks between `a` and `b`
pub fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut b_index: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, ch) in b.iter().enumerate() {
        b_index.entry(*ch).or_default().push(j);
    }

    let mut matched = 0;
    // Explicit work list instead of recursion
    let mut pending = vec![((0, a.len()), (0, b.len()))];

    while let Some(((alo, ahi), (blo, bhi))) = pending.pop() {
        let (i, j, k) = find_longest_match(a, &b_index, (alo, ahi), (blo, bhi));
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            pending.push(((alo, i), (blo, j)));
        }
        if i + k < ahi && j + k < bhi {
            pending.push(((i + k, ahi), (j + k, bhi)));
        }
    }

    matched
}

/// `2 * M / T` over the characters of both strings; two empty strings score `1.0`
///
/// Inputs are put in a canonical order first so that `ratio(a, b)` and
/// `ratio(b, a)` always agree; leftmost-longest tie breaking alone is
/// direction dependent.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let (first, second) = if (a.len(), a) <= (b.len(), b) {
        (a, b)
    } else {
        (b, a)
    };

    let first: Vec<char> = first.chars().collect();
    let second: Vec<char> = second.chars().collect();

    let total = first.len() + second.len();
    if total == 0 {
        return 1.0;
    }

    let matched = matching_characters(&first, &second);
    (2 * matched) as f64 / total as f64
}
