//! Stock trading with a one day cooldown after each sale, as a three state
//! machine filled day by day.
//!
//! The table has one row per state and one column per day.

use super::{DpTrace, Filler};

pub const HOLD: usize = 0;
pub const SOLD: usize = 1;
pub const COOL: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockFrom {
    /// Day 0 with no position.
    Start,
    /// Kept holding from yesterday.
    Keep,
    /// Bought today out of yesterday's cooldown.
    Buy,
    /// Sold today what was held yesterday.
    Sell,
    /// Stayed idle after yesterday's idle day.
    Rest,
    /// Idle because yesterday was a sale.
    Cooled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockResult {
    pub profit: i64,
    /// (buy day, sell day) pairs in order.
    pub trades: Vec<(usize, usize)>,
}

/// Ties keep holding over buying and resting over cooling down. The final
/// answer takes the sale when it is at least the idle value.
pub fn build_steps(prices: &[i64]) -> DpTrace<StockFrom, StockResult> {
    let n = prices.len();
    let mut f = Filler::new(3, n, "Stock with cooldown", format!("prices {prices:?}"));
    if n == 0 {
        return f.done(
            "No trading days".to_owned(),
            "profit 0".to_owned(),
            StockResult {
                profit: 0,
                trades: Vec::new(),
            },
        );
    }
    f.base(
        [
            (HOLD, 0, -prices[0], StockFrom::Buy),
            (SOLD, 0, 0, StockFrom::Start),
            (COOL, 0, 0, StockFrom::Start),
        ],
        format!("day 0: buy at {} or stay out", prices[0]),
    );
    for d in 1..n {
        let t = &f.state.table;
        let price = prices[d];
        let (keep, buy) = (t.value(HOLD, d - 1), t.value(COOL, d - 1) - price);
        let hold = if keep >= buy {
            (HOLD, keep, StockFrom::Keep)
        } else {
            (HOLD, buy, StockFrom::Buy)
        };
        let sold = (SOLD, t.value(HOLD, d - 1) + price, StockFrom::Sell);
        let (rest, cooled) = (t.value(COOL, d - 1), t.value(SOLD, d - 1));
        let cool = if rest >= cooled {
            (COOL, rest, StockFrom::Rest)
        } else {
            (COOL, cooled, StockFrom::Cooled)
        };
        f.fill_column(
            d,
            [hold, sold, cool],
            format!("Day {d} at price {price}"),
            format!("hold {}, sold {}, cool {}", hold.1, sold.1, cool.1),
        );
    }
    let last = n - 1;
    let (sold, cool) = (f.state.table.value(SOLD, last), f.state.table.value(COOL, last));
    let (profit, mut row) = if sold >= cool {
        (sold, SOLD)
    } else {
        (cool, COOL)
    };
    let mut trades = Vec::new();
    let mut sell_day = None;
    let mut d = last;
    loop {
        let from = f.walk((row, d));
        let next = match from {
            StockFrom::Start => None,
            StockFrom::Keep => Some(HOLD),
            StockFrom::Rest => Some(COOL),
            StockFrom::Cooled => Some(SOLD),
            StockFrom::Sell => {
                sell_day = Some(d);
                Some(HOLD)
            }
            StockFrom::Buy => {
                let sell = sell_day
                    .take()
                    .unwrap_or_else(|| unreachable!("every buy on the best path is sold"));
                trades.push((d, sell));
                (d > 0).then_some(COOL)
            }
        };
        match next {
            Some(r) if d > 0 => {
                row = r;
                d -= 1;
            }
            _ => break,
        }
    }
    trades.reverse();
    f.done(
        format!("Max profit {profit}"),
        format!("trades {trades:?}"),
        StockResult { profit, trades },
    )
}

pub fn showcase() -> Vec<i64> {
    vec![1, 2, 3, 0, 2, 4, 1]
}
