// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use upgrade_path_model::prelude::*;
use upgrade_path_solver::prelude::*;

const DAY: usize = 86_400;

fn levels(pairs: &[(usize, u32)]) -> LevelState {
    let mut raw = [0u32; NUM_LEVEL_SLOTS];
    for &(i, v) in pairs {
        raw[i] = v;
    }
    LevelState::from_levels(raw)
}

fn start_resources() -> ResourceState {
    ResourceState::new([0.0, 500_000.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0])
}

fn simulator(total: usize, busy: BusySchedule) -> ResourceSimulator {
    ResourceSimulator::new(SimulationContext::new(total, busy, 10_000.0))
}

fn evaluator(total: usize, levels: LevelState) -> PathEvaluator {
    PathEvaluator::new(
        SimulationContext::new(total, BusySchedule::free(total), 10_000.0),
        ScoringFunction::new(ScoreWeights::default(), 10_000.0),
        levels,
        start_resources(),
    )
}

fn mixed_path(seed: u64, len: usize) -> UpgradePath {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    UpgradePath::random(len, true, &mut rng)
}

#[test]
fn simulation_is_deterministic() {
    let busy = BusySchedule::from_seconds(&[(10_000, 20_000), (50_000, 52_000)], 3 * DAY);
    let sim = simulator(3 * DAY, busy);
    let path = mixed_path(1, 72);

    let run = || {
        let mut l = levels(&[(1, 1), (0, 1)]);
        let mut r = start_resources();
        let left = sim.simulate_path(path.as_slice(), &mut l, &mut r, None);
        (l, r, left)
    };
    assert_eq!(run(), run());
}

#[test]
fn time_is_conserved_and_levels_only_grow() {
    let total = 5 * DAY;
    let busy = BusySchedule::from_seconds(&[(3_600, 30_000)], total);
    let sim = simulator(total, busy);
    let start = levels(&[(1, 1), (0, 2), (2, 1)]);

    for seed in 0..8 {
        let path = mixed_path(seed, 120);
        let mut l = start;
        let mut r = start_resources();
        let mut trace = SimulationTrace::new();
        let left = sim.simulate_path(path.as_slice(), &mut l, &mut r, Some(&mut trace));

        assert!(left >= 0.0);
        let spent: f64 = trace.steps().iter().map(|s| s.seconds_spent).sum();
        assert!(trace.steps().iter().all(|s| s.seconds_spent >= 0.0));
        assert!((spent + left - total as f64).abs() < 1e-2, "seed {seed}");

        for (before, after) in start.as_slice().iter().zip(l.as_slice()) {
            assert!(after >= before);
        }
        for res in ResourceIndex::all() {
            assert!(l.speed_level(res) <= SPEED_LEVEL_CAP);
        }
    }
}

#[test]
fn sentinel_only_path_accrues_linearly() {
    let total = 2 * DAY;
    let sim = simulator(total, BusySchedule::free(total));
    let start_levels = levels(&[(0, 3), (1, 2), (11, 4), (6, 1), (7, 5)]);
    let mut l = start_levels;
    let mut r = start_resources();
    let path = UpgradePath::from_codes(&[20]).unwrap();
    let left = sim.simulate_path(path.as_slice(), &mut l, &mut r, None);

    assert_eq!(left, 0.0);
    assert_eq!(l, start_levels);
    let rates = upgrade_path_solver::sim::simulator::production_rates(&start_levels);
    for i in ResourceIndex::all() {
        let expected = start_resources().get(i) + rates[i.get()] * total as f64;
        assert!((r.get(i) - expected).abs() < 1e-6, "resource {i}");
    }
}

#[test]
fn busy_window_adds_remaining_wait() {
    let total = 10_000;
    let free = simulator(total, BusySchedule::free(total));
    let busy = simulator(total, BusySchedule::from_seconds(&[(1_000, 2_000)], total));

    // Ghost level 1 costs 400 Bat at 1 Bat per second; start at second 1100
    // so it becomes affordable at 1500.
    let upgrade = UpgradeType::from_code(2).unwrap();
    let remaining = (total - 1_100) as f64;

    let mut l = levels(&[(1, 1)]);
    let mut r = ResourceState::default();
    let undelayed = free.perform_upgrade(&mut l, &mut r, upgrade, remaining);

    let mut l = levels(&[(1, 1)]);
    let mut r = ResourceState::default();
    let delayed = busy.perform_upgrade(&mut l, &mut r, upgrade, remaining);

    assert_eq!(undelayed, 400.0);
    assert!(delayed >= undelayed + 500.0);
}

#[test]
fn event_currency_stops_at_cap() {
    let total = 7 * DAY;
    let sim = simulator(total, BusySchedule::free(total));
    let mut l = levels(&[(9, 500), (19, 10)]);
    let mut r = start_resources();
    let path = UpgradePath::from_codes(&[20]).unwrap();
    sim.simulate_path(path.as_slice(), &mut l, &mut r, None);
    assert_eq!(r.event_currency(), 10_000.0);
}

#[test]
fn speed_past_cap_is_rejected_and_never_accepted() {
    let ev = evaluator(2 * DAY, levels(&[(1, 1), (11, 9)]));
    let bad = UpgradePath::from_codes(&[11, 11, 20]).unwrap();
    assert_eq!(ev.evaluate(&bad), f64::NEG_INFINITY);

    let path = UpgradePath::from_codes(&[1, 0, 20]).unwrap();
    let mut state = SearchState::evaluated(path, &ev, ChaCha8Rng::seed_from_u64(5));
    LocalSearchOptimizer::new(&ev)
        .with_max_stall(40)
        .run(&mut state, &mut NullObserver);

    assert!(ev.is_feasible(state.path().as_slice()));
    assert!(state.score().is_finite());
    let bat_speed = state
        .path()
        .iter()
        .filter(|u| *u == UpgradeType::from_code(11).unwrap())
        .count();
    assert!(bat_speed <= 1);
}

#[test]
fn optimization_never_lowers_the_score() {
    let ev = evaluator(3 * DAY, levels(&[(1, 1)]));
    for seed in [3, 11] {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let path = UpgradePath::random(24, false, &mut rng);
        let mut state = SearchState::evaluated(path, &ev, rng);
        let before = state.score();
        let out = LocalSearchOptimizer::new(&ev)
            .with_allow_speed(false)
            .with_max_stall(30)
            .run(&mut state, &mut NullObserver);
        assert!(out.final_score >= before);
        assert_eq!(out.final_score, ev.evaluate(state.path()));
    }
}

#[test]
fn same_seed_same_result() {
    let ev = evaluator(2 * DAY, levels(&[(1, 1)]));
    let run = || {
        let path = UpgradePath::from_codes(&[3, 1, 0, 2, 20]).unwrap();
        let mut state = SearchState::evaluated(path, &ev, ChaCha8Rng::seed_from_u64(99));
        let out = LocalSearchOptimizer::new(&ev)
            .with_max_stall(25)
            .run(&mut state, &mut NullObserver);
        (state.into_path(), out.iterations, out.final_score)
    };
    assert_eq!(run(), run());
}
