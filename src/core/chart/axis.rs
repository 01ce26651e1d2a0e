//! Shared category axis for roll-aligned charts.

use std::collections::HashSet;

/// Distinct, non-blank roll numbers, sorted numerically when every one of
/// them is a run of digits and lexicographically otherwise.
pub fn roll_axis<'a, I>(rolls: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut axis: Vec<String> = rolls
        .into_iter()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .filter(|r| seen.insert(*r))
        .map(str::to_string)
        .collect();

    if axis.iter().all(|r| r.bytes().all(|b| b.is_ascii_digit())) {
        // "07" and "7" are distinct rolls with the same numeric key
        axis.sort_by(|a, b| numeric_key(a).cmp(&numeric_key(b)).then_with(|| a.cmp(b)));
    } else {
        axis.sort();
    }
    axis
}

/// Orders digit strings by value at any length: fewer significant digits
/// first, then digit by digit.
fn numeric_key(digits: &str) -> (usize, &str) {
    let significant = digits.trim_start_matches('0');
    (significant.len(), significant)
}
