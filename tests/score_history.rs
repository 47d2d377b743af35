//! Randomized checks of the score-history invariants.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rummy_tracker_web::{
    derive_status, JsonStorage, MemoryBackend, PlayerStatus, RosterStore,
};

const NAMES: [&str; 4] = ["Annan", "Ajas", "Rahul", "Sonu"];

fn assert_consistent(store: &RosterStore<JsonStorage<MemoryBackend>>) {
    let target = store.state().target_score;
    for p in &store.state().list {
        assert_eq!(p.status, derive_status(p.points, target), "{}", p.name);
        assert_eq!(
            p.status == PlayerStatus::Eliminated,
            p.points > target,
            "{}",
            p.name
        );
    }
}

#[test]
fn recorded_points_always_sum_the_history() {
    for seed in 0..20u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut store = RosterStore::open(JsonStorage::new(MemoryBackend::new()));
        for name in NAMES {
            store.add_player(name, 0).unwrap();
        }
        store.start_game(rng.gen_range(50..=500)).unwrap();

        for _ in 0..60 {
            let name = NAMES[rng.gen_range(0..NAMES.len())];
            store.record_score(name, rng.gen_range(-20..=80)).unwrap();
            assert_consistent(&store);
        }
        for p in &store.state().list {
            assert_eq!(p.points, p.scores.iter().sum::<i64>(), "seed {}", seed);
        }
    }
}

#[test]
fn edits_move_points_by_the_difference() {
    for seed in 0..20u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut store = RosterStore::open(JsonStorage::new(MemoryBackend::new()));
        for name in NAMES {
            store.add_player(name, 0).unwrap();
        }
        store.start_game(320).unwrap();

        for _ in 0..40 {
            let name = NAMES[rng.gen_range(0..NAMES.len())];
            store.record_score(name, rng.gen_range(0..=80)).unwrap();

            let edited = NAMES[rng.gen_range(0..NAMES.len())];
            let before = store.state().player(edited).unwrap().clone();
            let new_last = rng.gen_range(-10..=90);
            let result = store.replace_last_score(edited, new_last);
            let after = store.state().player(edited).unwrap();

            match before.last_score() {
                Some(removed) => {
                    result.unwrap();
                    assert_eq!(after.scores.len(), before.scores.len());
                    assert_eq!(after.points - before.points, new_last - removed);
                    assert_eq!(after.last_score(), Some(new_last));
                }
                None => {
                    assert!(result.is_err());
                    assert_eq!(after, &before);
                }
            }
            assert_consistent(&store);
        }
    }
}
