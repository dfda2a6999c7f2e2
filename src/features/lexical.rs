//! Stateless numeric helpers for lexical URL analysis.

use std::collections::HashMap;

/// Shannon entropy over character frequency, base 2.
///
/// An empty string has entropy 0 by definition.
pub fn shannon_entropy(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }

    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut length = 0usize;
    for c in text.chars() {
        *counts.entry(c).or_insert(0) += 1;
        length += 1;
    }

    let length = length as f64;
    -counts
        .values()
        .map(|&count| {
            let p = count as f64 / length;
            p * p.log2()
        })
        .sum::<f64>()
}

/// Length of the longest run of identical consecutive characters.
pub fn max_consecutive_run(text: &str) -> usize {
    let mut max_run = 0usize;
    let mut current = 0usize;
    let mut previous: Option<char> = None;

    for c in text.chars() {
        if Some(c) == previous {
            current += 1;
        } else {
            current = 1;
            previous = Some(c);
        }
        max_run = max_run.max(current);
    }

    max_run
}
