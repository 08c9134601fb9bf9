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

use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;
use upgrade_path_model::prelude::*;
use upgrade_path_solver::prelude::*;

/// Default settings with a couple of evening busy windows.
fn settings() -> Settings {
    let mut s = Settings::default();
    let mut raw = [0u32; NUM_LEVEL_SLOTS];
    raw[1] = 1;
    s.current_levels = LevelState::from_levels(raw);
    s.busy_times = (0..14)
        .map(|d| BusyHours {
            start: d as f64 * 24.0 + 23.0,
            end: d as f64 * 24.0 + 31.0,
        })
        .collect();
    s
}

fn bench_evaluate(c: &mut Criterion) {
    let s = settings();
    let ev = PathEvaluator::from_settings(&s);
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let path = UpgradePath::random(s.total_seconds() / 3600, false, &mut rng);

    c.bench_function("PathEvaluator::evaluate (336 steps, 14 days)", |b| {
        b.iter(|| black_box(ev.evaluate(black_box(&path))))
    });
}

fn bench_optimizer_slice(c: &mut Criterion) {
    let s = settings();
    let ev = PathEvaluator::from_settings(&s);

    c.bench_function("LocalSearchOptimizer::run (20 stalls, 48 steps)", |b| {
        b.iter(|| {
            let mut rng = ChaCha8Rng::seed_from_u64(7);
            let path = UpgradePath::random(48, false, &mut rng);
            let mut state = SearchState::evaluated(path, &ev, rng);
            let out = LocalSearchOptimizer::new(&ev)
                .with_allow_speed(false)
                .with_max_stall(20)
                .run(&mut state, &mut NullObserver);
            black_box(out.final_score)
        })
    });
}

criterion_group!(benches, bench_evaluate, bench_optimizer_slice);
criterion_main!(benches);
