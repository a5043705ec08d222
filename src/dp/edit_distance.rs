//! Levenshtein distance with the edit script recovered from provenance.

use super::{DpTrace, Filler};

/// Recurrence branch of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditFrom {
    Start,
    Match,
    Insert,
    Delete,
    Replace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Keep(char),
    Insert(char),
    Delete(char),
    Replace(char, char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditResult {
    pub distance: i64,
    /// Turns the source into the target when applied left to right.
    pub script: Vec<Edit>,
}

/// Applies a script to its source string.
pub fn apply(source: &str, script: &[Edit]) -> String {
    let mut src = source.chars();
    let mut out = String::new();
    for e in script {
        match *e {
            Edit::Keep(c) => {
                assert_eq!(src.next(), Some(c), "script does not match its source");
                out.push(c);
            }
            Edit::Insert(c) => out.push(c),
            Edit::Delete(c) => {
                assert_eq!(src.next(), Some(c), "script does not match its source");
            }
            Edit::Replace(from, to) => {
                assert_eq!(src.next(), Some(from), "script does not match its source");
                out.push(to);
            }
        }
    }
    assert!(src.next().is_none(), "script leaves source characters behind");
    out
}

/// dp[i][j] is the distance between the first i chars of s1 and the first j
/// of s2. Mismatch ties go to insert, then delete, then replace.
pub fn build_steps(s1: &str, s2: &str) -> DpTrace<EditFrom, EditResult> {
    let (a, b): (Vec<char>, Vec<char>) = (s1.chars().collect(), s2.chars().collect());
    let (m, n) = (a.len(), b.len());
    let mut f = Filler::new(
        m + 1,
        n + 1,
        "Edit distance",
        format!("turn {s1:?} into {s2:?}"),
    );
    let base = (0..=n)
        .map(|j| (0, j, j as i64, if j == 0 { EditFrom::Start } else { EditFrom::Insert }))
        .chain((1..=m).map(|i| (i, 0, i as i64, EditFrom::Delete)));
    f.base(base, "an empty prefix needs one edit per character".to_owned());
    for i in 1..=m {
        for j in 1..=n {
            let t = &f.state.table;
            if a[i - 1] == b[j - 1] {
                let v = t.value(i - 1, j - 1);
                f.fill(
                    (i, j),
                    v,
                    EditFrom::Match,
                    format!("'{}' matches, copy dp[{}][{}]", a[i - 1], i - 1, j - 1),
                );
                continue;
            }
            let options = [
                (t.value(i, j - 1), EditFrom::Insert),
                (t.value(i - 1, j), EditFrom::Delete),
                (t.value(i - 1, j - 1), EditFrom::Replace),
            ];
            let (best, from) = options[1..]
                .iter()
                .fold(options[0], |best, &o| if o.0 < best.0 { o } else { best });
            f.fill(
                (i, j),
                best + 1,
                from,
                format!(
                    "'{}' ≠ '{}', 1 + min(insert {}, delete {}, replace {})",
                    a[i - 1],
                    b[j - 1],
                    options[0].0,
                    options[1].0,
                    options[2].0
                ),
            );
        }
    }
    let distance = f.state.table.value(m, n);
    let mut script = Vec::new();
    let (mut i, mut j) = (m, n);
    while (i, j) != (0, 0) {
        match f.walk((i, j)) {
            EditFrom::Match => {
                script.push(Edit::Keep(a[i - 1]));
                (i, j) = (i - 1, j - 1);
            }
            EditFrom::Replace => {
                script.push(Edit::Replace(a[i - 1], b[j - 1]));
                (i, j) = (i - 1, j - 1);
            }
            EditFrom::Insert => {
                script.push(Edit::Insert(b[j - 1]));
                j -= 1;
            }
            EditFrom::Delete => {
                script.push(Edit::Delete(a[i - 1]));
                i -= 1;
            }
            EditFrom::Start => unreachable!("only dp[0][0] starts"),
        }
    }
    script.reverse();
    f.done(
        format!("Distance {distance}"),
        format!("{script:?}"),
        EditResult { distance, script },
    )
}

pub fn showcase() -> (&'static str, &'static str) {
    ("horse", "ros")
}
