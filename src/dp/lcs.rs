//! Longest common subsequence.

use super::{DpTrace, Filler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LcsFrom {
    Empty,
    Match,
    /// Drop the last char of s1, dp[i - 1][j].
    SkipS1,
    /// Drop the last char of s2, dp[i][j - 1].
    SkipS2,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcsResult {
    pub length: i64,
    pub subsequence: String,
}

/// Ties between the two skips favour dropping from s1.
pub fn build_steps(s1: &str, s2: &str) -> DpTrace<LcsFrom, LcsResult> {
    let (a, b): (Vec<char>, Vec<char>) = (s1.chars().collect(), s2.chars().collect());
    let (m, n) = (a.len(), b.len());
    let mut f = Filler::new(m + 1, n + 1, "LCS", format!("of {s1:?} and {s2:?}"));
    let base = (0..=n)
        .map(|j| (0, j))
        .chain((1..=m).map(|i| (i, 0)))
        .map(|(i, j)| (i, j, 0, LcsFrom::Empty));
    f.base(base, "an empty prefix shares nothing".to_owned());
    for i in 1..=m {
        for j in 1..=n {
            let t = &f.state.table;
            if a[i - 1] == b[j - 1] {
                let v = t.value(i - 1, j - 1) + 1;
                f.fill((i, j), v, LcsFrom::Match, format!("'{}' matches", a[i - 1]));
                continue;
            }
            let (up, left) = (t.value(i - 1, j), t.value(i, j - 1));
            let (v, from) = if up >= left {
                (up, LcsFrom::SkipS1)
            } else {
                (left, LcsFrom::SkipS2)
            };
            f.fill(
                (i, j),
                v,
                from,
                format!("'{}' ≠ '{}', max({up}, {left})", a[i - 1], b[j - 1]),
            );
        }
    }
    let length = f.state.table.value(m, n);
    let mut rev = Vec::new();
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        match f.walk((i, j)) {
            LcsFrom::Match => {
                rev.push(a[i - 1]);
                (i, j) = (i - 1, j - 1);
            }
            LcsFrom::SkipS1 => i -= 1,
            LcsFrom::SkipS2 => j -= 1,
            LcsFrom::Empty => unreachable!("only row and column 0 are empty"),
        }
    }
    let subsequence: String = rev.into_iter().rev().collect();
    f.done(
        format!("LCS has length {length}"),
        format!("{subsequence:?}"),
        LcsResult {
            length,
            subsequence,
        },
    )
}

pub fn showcase() -> (&'static str, &'static str) {
    ("abcde", "ace")
}
