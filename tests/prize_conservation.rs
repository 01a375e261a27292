//! Prize-pool conservation tests.
//!
//! Every payout schedule must sum to exactly the prize pool, whole
//! currency units only, with no leftover cents at any field size.

use tournament_director::{Payout, Usd, distribute_prizes, payout_spots};

fn total(payouts: &[Payout]) -> Usd {
    payouts.iter().map(|p| p.amount).sum()
}

#[test]
fn test_conservation_at_reference_field_sizes() {
    // The field sizes called out for the payout algorithm: empty, the
    // three fixed splits, and two weighted fields.
    for spots in [0, 1, 2, 3, 4, 10, 37] {
        for pool in [0, 1, 9, 100, 999, 1_000, 54_321, 1_000_000] {
            let payouts = distribute_prizes(pool, spots);
            assert_eq!(payouts.len(), spots);
            if spots > 0 {
                assert_eq!(
                    total(&payouts),
                    pool,
                    "pool {pool} leaked across {spots} spots: {payouts:?}"
                );
            }
        }
    }
}

#[test]
fn test_positions_are_contiguous_from_first() {
    let payouts = distribute_prizes(10_000, 10);
    for (idx, payout) in payouts.iter().enumerate() {
        assert_eq!(payout.position, idx + 1);
    }
}

#[test]
fn test_reference_scenario_pool_1000_four_spots() {
    let payouts = distribute_prizes(1_000, 4);

    // First place takes its 35% plus the truncation remainder; the rest
    // follow the 1/(i*ln N) weighting, truncated.
    assert_eq!(total(&payouts), 1_000);
    assert!(payouts[0].amount >= 350);
    assert!(payouts[1].amount > payouts[2].amount);
    assert!(payouts[2].amount > payouts[3].amount);
    // Nobody below first gets more than the 65% share.
    let below_first: Usd = payouts[1..].iter().map(|p| p.amount).sum();
    assert!(below_first <= 650);
}

#[test]
fn test_two_and_three_spot_splits() {
    let payouts = distribute_prizes(1_000, 2);
    assert_eq!(payouts[0].amount, 650);
    assert_eq!(payouts[1].amount, 350);

    let payouts = distribute_prizes(1_000, 3);
    assert_eq!(payouts[0].amount, 500);
    assert_eq!(payouts[1].amount, 300);
    assert_eq!(payouts[2].amount, 200);

    // Awkward pools truncate downward and reconcile to the leader.
    let payouts = distribute_prizes(999, 3);
    assert_eq!(total(&payouts), 999);
    assert_eq!(payouts[1].amount, 299); // floor(999 * 0.30)
    assert_eq!(payouts[2].amount, 199); // floor(999 * 0.20)
    assert_eq!(payouts[0].amount, 501);
}

#[test]
fn test_forty_percent_of_the_field_is_paid() {
    assert_eq!(payout_spots(0), 0);
    assert_eq!(payout_spots(1), 1);
    assert_eq!(payout_spots(5), 2);
    assert_eq!(payout_spots(10), 4);
    assert_eq!(payout_spots(37), 15);
    assert_eq!(payout_spots(100), 40);
}
