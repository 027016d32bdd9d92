//! Natural-order string comparison.
//!
//! Lexicographic comparison, except that embedded runs of ASCII digits
//! compare by numeric value: `b2` sorts before `b10`. Used for the
//! `(subtitle, title)` track ordering so multi-part works list in the order
//! a human labelled them.

use std::cmp::Ordering;

/// Compare two strings in natural order.
///
/// Both strings are split into alternating non-digit/digit runs. Digit runs
/// compare numerically regardless of length or leading zeros (`"2" < "10"`);
/// a numeric tie (`"01"` vs `"1"`) falls back to the raw run text so the
/// order stays total. Non-digit runs compare as plain strings, as does a
/// digit run against a non-digit run. When one string is a run-prefix of the
/// other, the shorter orders first.
pub(crate) fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Runs::new(a);
    let mut right = Runs::new(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => match cmp_run(x, y) {
                Ordering::Equal => {},
                decided => return decided,
            },
        }
    }
}

fn cmp_run(a: &str, b: &str) -> Ordering {
    match (is_digit_run(a), is_digit_run(b)) {
        (true, true) => cmp_numeric(a, b),
        _ => a.cmp(b),
    }
}

/// Runs are homogeneous, so inspecting the first byte is enough.
fn is_digit_run(run: &str) -> bool {
    run.as_bytes().first().is_some_and(u8::is_ascii_digit)
}

/// Numeric comparison of two digit runs without parsing into an integer, so
/// arbitrarily long runs can't overflow.
fn cmp_numeric(a: &str, b: &str) -> Ordering {
    let a_stripped = a.trim_start_matches('0');
    let b_stripped = b.trim_start_matches('0');
    // More significant digits wins; equal widths compare digit by digit.
    a_stripped
        .len()
        .cmp(&b_stripped.len())
        .then_with(|| a_stripped.cmp(b_stripped))
        .then_with(|| a.cmp(b))
}

/// Iterator over maximal same-class (digit vs. non-digit) runs of a string.
struct Runs<'a> {
    rest: &'a str,
}

impl<'a> Runs<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }
}

impl<'a> Iterator for Runs<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let digits = self.rest.as_bytes().first()?.is_ascii_digit();
        // Digits are ASCII, so the class boundary is always a char boundary.
        let end = self
            .rest
            .bytes()
            .position(|byte| byte.is_ascii_digit() != digits)
            .unwrap_or(self.rest.len());
        let (run, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("b1.mp3", "b2.mp3", Ordering::Less)]
    #[case("b2.mp3", "b10.mp3", Ordering::Less)]
    #[case("track2", "track10", Ordering::Less)]
    #[case("2", "10", Ordering::Less)]
    #[case("10", "9", Ordering::Greater)]
    #[case("a", "a", Ordering::Equal)]
    #[case("a", "ab", Ordering::Less)]
    #[case("a10b2", "a10b10", Ordering::Less)]
    #[case("alpha", "beta", Ordering::Less)]
    // Numeric tie: raw text decides.
    #[case("007", "7", Ordering::Less)]
    fn test_natural_cmp(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        assert_eq!(natural_cmp(a, b), expected);
        assert_eq!(natural_cmp(b, a), expected.reverse());
    }

    #[test]
    fn test_digit_runs_sort_numerically() {
        let mut names = vec!["b2.mp3", "b10.mp3", "b1.mp3"];
        names.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(names, vec!["b1.mp3", "b2.mp3", "b10.mp3"]);
    }

    #[test]
    fn test_runs_longer_than_u64() {
        assert_eq!(
            natural_cmp("99999999999999999999999", "100000000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn test_leading_zeros_compare_by_value() {
        assert_eq!(natural_cmp("track09", "track10"), Ordering::Less);
        assert_eq!(natural_cmp("track010", "track9"), Ordering::Greater);
    }
}
