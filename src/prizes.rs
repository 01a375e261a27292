//! Prize-pool distribution.
//!
//! Payouts are computed as a pure function of the pool and the number of
//! paying positions. Amounts are whole currency units: every position below
//! first is truncated and the cumulative truncation error goes to first
//! place, so the payouts always sum to the pool exactly.

use serde::{Deserialize, Serialize};

use crate::constants::{FIRST_PLACE_PERCENT, PAID_FIELD_PERCENT};
use crate::models::Usd;

/// One paying position.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Payout {
    /// 1-based finishing position.
    pub position: usize,
    pub amount: Usd,
}

/// Number of paying positions for a field of `total_players` entrants:
/// 40% of the field, rounded up.
#[must_use]
pub fn payout_spots(total_players: usize) -> usize {
    (total_players * PAID_FIELD_PERCENT).div_ceil(100)
}

/// Splits `prize_pool` across `spots` paying positions.
///
/// Fixed splits for small fields (100%, 65/35, 50/30/20). For four or more
/// spots, first place takes 35% and the remainder is shared over positions
/// 2..=N with weight `1/(i*ln N)`, normalized over that share.
#[must_use]
pub fn distribute_prizes(prize_pool: Usd, spots: usize) -> Vec<Payout> {
    match spots {
        0 => Vec::new(),
        1 => vec![Payout {
            position: 1,
            amount: prize_pool,
        }],
        2 => {
            let second = prize_pool * 35 / 100;
            vec![
                Payout {
                    position: 1,
                    amount: prize_pool - second,
                },
                Payout {
                    position: 2,
                    amount: second,
                },
            ]
        }
        3 => {
            let second = prize_pool * 30 / 100;
            let third = prize_pool * 20 / 100;
            vec![
                Payout {
                    position: 1,
                    amount: prize_pool - second - third,
                },
                Payout {
                    position: 2,
                    amount: second,
                },
                Payout {
                    position: 3,
                    amount: third,
                },
            ]
        }
        _ => distribute_weighted(prize_pool, spots),
    }
}

fn distribute_weighted(prize_pool: Usd, spots: usize) -> Vec<Payout> {
    let first_base = prize_pool * FIRST_PLACE_PERCENT / 100;
    let remaining = prize_pool - first_base;

    let ln_spots = (spots as f64).ln();
    let weights: Vec<f64> = (2..=spots).map(|i| 1.0 / (i as f64 * ln_spots)).collect();
    let total_weight: f64 = weights.iter().sum();

    let mut payouts = vec![Payout {
        position: 1,
        amount: first_base,
    }];
    let mut distributed = first_base;
    for (position, weight) in (2..=spots).zip(&weights) {
        let amount = (remaining as f64 * (weight / total_weight)).floor() as Usd;
        distributed += amount;
        payouts.push(Payout { position, amount });
    }
    // Whatever truncation shaved off goes to the leader, keeping the
    // total exact.
    payouts[0].amount += prize_pool - distributed;
    payouts
}
