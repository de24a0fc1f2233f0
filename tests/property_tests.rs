/// Property-based tests using proptest
/// Tests invariants of the unpaid fines aggregation over arbitrary fine sets
use chariot_registry::db::Database;
use chariot_registry::data::db_storage::Storage;
use chariot_registry::core::fines::FinesAggregator;
use proptest::prelude::*;

/// (amount, paid, licence index) for one fine row.
fn fine() -> impl Strategy<Value = (i64, bool, usize)> {
    (0i64..10_000, proptest::bool::ANY, 0usize..3)
}

const LICENCES: [&str; 3] = ["LC-A", "LC-B", "LC-C"];

fn expected_total(fines: &[(i64, bool, usize)], licence: usize) -> i64 {
    fines
        .iter()
        .filter(|(_, paid, idx)| !paid && *idx == licence)
        .map(|(amount, _, _)| amount)
        .sum()
}

async fn totals_for(parking: &[(i64, bool, usize)], speeding: &[(i64, bool, usize)]) -> Vec<i64> {
    let db = Database::in_memory().await.unwrap();

    for (amount, paid, idx) in parking {
        sqlx::query("INSERT INTO parking_fines (licenceNumber, fineAmount, paid) VALUES (?, ?, ?)")
            .bind(LICENCES[*idx])
            .bind(amount)
            .bind(paid)
            .execute(&db.pool)
            .await
            .unwrap();
    }
    for (amount, paid, idx) in speeding {
        sqlx::query(
            "INSERT INTO speeding_fines (licenceNumber, citizenId, speed, fineAmount, paid) VALUES (?, 'C1', 50, ?, ?)",
        )
        .bind(LICENCES[*idx])
        .bind(amount)
        .bind(paid)
        .execute(&db.pool)
        .await
        .unwrap();
    }

    let aggregator = FinesAggregator::new(Storage::new(db.pool.clone()));
    let mut totals = Vec::new();
    for licence in LICENCES {
        totals.push(aggregator.total_unpaid_fines(licence).await.unwrap());
    }
    totals
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    // Property: total is the sum of unpaid amounts across both categories
    #[test]
    fn total_matches_sum_of_unpaid(
        parking in proptest::collection::vec(fine(), 0..12),
        speeding in proptest::collection::vec(fine(), 0..12),
    ) {
        let totals = runtime().block_on(totals_for(&parking, &speeding));
        for (idx, total) in totals.iter().enumerate() {
            let expected = expected_total(&parking, idx) + expected_total(&speeding, idx);
            prop_assert_eq!(*total, expected);
        }
    }

    // Property: swapping which category holds the fines does not change totals
    #[test]
    fn total_is_independent_of_category(
        parking in proptest::collection::vec(fine(), 0..8),
        speeding in proptest::collection::vec(fine(), 0..8),
    ) {
        let rt = runtime();
        let forward = rt.block_on(totals_for(&parking, &speeding));
        let swapped = rt.block_on(totals_for(&speeding, &parking));
        prop_assert_eq!(forward, swapped);
    }

    // Property: licences whose fines are all paid owe 0
    #[test]
    fn paid_fines_never_count(
        amounts in proptest::collection::vec(0i64..10_000, 0..10),
    ) {
        let paid: Vec<_> = amounts.iter().map(|a| (*a, true, 0usize)).collect();
        let totals = runtime().block_on(totals_for(&paid, &paid));
        prop_assert!(totals.iter().all(|t| *t == 0));
    }
}
