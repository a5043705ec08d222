//! Interval DP, filled diagonal by diagonal in order of increasing gap.

use super::{DpTrace, Filler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstFrom {
    /// Nothing lies strictly between i and j.
    Adjacent,
    /// Balloon k (padded index) is burst last inside (i, j).
    Last(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurstResult {
    pub coins: i64,
    /// Input indices in the order they are burst.
    pub order: Vec<usize>,
}

/// Coins earned by bursting in the given order. Bursting balloon k earns
/// the product of k and its current neighbours, with 1 past either end.
pub fn burst_value(nums: &[i64], order: &[usize]) -> i64 {
    let mut alive: Vec<usize> = (0..nums.len()).collect();
    let mut coins = 0;
    for &k in order {
        let pos = alive
            .iter()
            .position(|&x| x == k)
            .unwrap_or_else(|| panic!("balloon {k} burst twice"));
        let left = pos.checked_sub(1).map_or(1, |p| nums[alive[p]]);
        let right = alive.get(pos + 1).map_or(1, |&r| nums[r]);
        coins += left * nums[k] * right;
        alive.remove(pos);
    }
    coins
}

fn burst_order(f: &mut Filler<BurstFrom, BurstResult>, i: usize, j: usize, order: &mut Vec<usize>) {
    if j - i < 2 {
        return;
    }
    let BurstFrom::Last(k) = f.walk((i, j)) else {
        unreachable!("interval ({i}, {j}) has a balloon inside")
    };
    burst_order(f, i, k, order);
    burst_order(f, k, j, order);
    order.push(k - 1);
}

/// Pads nums with a 1 on each side. dp[i][j] is the best score for bursting
/// every balloon strictly between i and j, trying each one as the last.
pub fn burst_balloons(nums: &[i64]) -> DpTrace<BurstFrom, BurstResult> {
    let p: Vec<i64> = [1].into_iter().chain(nums.iter().copied()).chain([1]).collect();
    let size = p.len();
    let mut f = Filler::new(size, size, "Burst balloons", format!("padded {p:?}"));
    if nums.is_empty() {
        return f.done(
            "No balloons".to_owned(),
            "nothing to burst".to_owned(),
            BurstResult {
                coins: 0,
                order: Vec::new(),
            },
        );
    }
    f.base(
        (0..size - 1).map(|i| (i, i + 1, 0, BurstFrom::Adjacent)),
        "neighbouring walls enclose no balloon".to_owned(),
    );
    for gap in 2..size {
        f.gap(gap, format!("{} intervals", size - gap));
        for i in 0..size - gap {
            let j = i + gap;
            let t = &f.state.table;
            let (best, k) = (i + 1..j)
                .map(|k| (t.value(i, k) + t.value(k, j) + p[i] * p[k] * p[j], k))
                .fold((i64::MIN, 0), |best, o| if o.0 > best.0 { o } else { best });
            f.fill(
                (i, j),
                best,
                BurstFrom::Last(k),
                format!("burst {} last: {} × {} × {}", p[k], p[i], p[k], p[j]),
            );
        }
    }
    let coins = f.state.table.value(0, size - 1);
    let mut order = Vec::new();
    burst_order(&mut f, 0, size - 1, &mut order);
    f.done(
        format!("{coins} coins"),
        format!("burst order {order:?}"),
        BurstResult { coins, order },
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PalFrom {
    Single,
    /// Both ends match and wrap dp[i + 1][j - 1].
    Pair,
    /// Drop s[i].
    SkipLeft,
    /// Drop s[j].
    SkipRight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PalindromeResult {
    pub length: i64,
    pub subsequence: String,
}

/// Longest palindromic subsequence. Mismatch ties drop the left end.
pub fn longest_palindrome(s: &str) -> DpTrace<PalFrom, PalindromeResult> {
    let c: Vec<char> = s.chars().collect();
    let n = c.len();
    let mut f = Filler::new(n, n, "Longest palindromic subsequence", format!("of {s:?}"));
    if n == 0 {
        return f.done(
            "Empty string".to_owned(),
            "the empty palindrome".to_owned(),
            PalindromeResult {
                length: 0,
                subsequence: String::new(),
            },
        );
    }
    f.base(
        (0..n).map(|i| (i, i, 1, PalFrom::Single)),
        "every single char is a palindrome".to_owned(),
    );
    for gap in 1..n {
        f.gap(gap, format!("{} intervals", n - gap));
        for i in 0..n - gap {
            let j = i + gap;
            let t = &f.state.table;
            if c[i] == c[j] {
                let inner = if gap == 1 { 0 } else { t.value(i + 1, j - 1) };
                f.fill(
                    (i, j),
                    inner + 2,
                    PalFrom::Pair,
                    format!("'{}' at both ends", c[i]),
                );
                continue;
            }
            let (left, right) = (t.value(i + 1, j), t.value(i, j - 1));
            let (v, from) = if left >= right {
                (left, PalFrom::SkipLeft)
            } else {
                (right, PalFrom::SkipRight)
            };
            f.fill(
                (i, j),
                v,
                from,
                format!("'{}' ≠ '{}', max({left}, {right})", c[i], c[j]),
            );
        }
    }
    let length = f.state.table.value(0, n - 1);
    let (mut half, mut middle) = (String::new(), None);
    let (mut i, mut j) = (0, n - 1);
    while i <= j {
        match f.walk((i, j)) {
            PalFrom::Single => {
                middle = Some(c[i]);
                break;
            }
            PalFrom::Pair => {
                half.push(c[i]);
                if j - i == 1 {
                    break;
                }
                (i, j) = (i + 1, j - 1);
            }
            PalFrom::SkipLeft => i += 1,
            PalFrom::SkipRight => j -= 1,
        }
    }
    let subsequence: String = half
        .chars()
        .chain(middle)
        .chain(half.chars().rev())
        .collect();
    f.done(
        format!("Longest palindrome has length {length}"),
        format!("{subsequence:?}"),
        PalindromeResult {
            length,
            subsequence,
        },
    )
}

pub fn balloons_showcase() -> Vec<i64> {
    vec![3, 1, 5, 8]
}

pub fn palindrome_showcase() -> &'static str {
    "bbbab"
}
