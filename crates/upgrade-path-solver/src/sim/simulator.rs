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

use crate::sim::{
    busy::BusySchedule,
    trace::{SimulationTrace, TraceStep},
};
use upgrade_path_model::{
    settings::Settings,
    state::{LevelState, ResourceState},
    upgrade::{NUM_RESOURCES, ResourceIndex, UpgradeType},
};

/// Resource units produced per second and per production level.
pub const CYCLE_RATES: [f64; NUM_RESOURCES] = [
    1.0 / 3.0,
    1.0,
    1.0 / 3.0,
    1.0 / 3.0,
    1.0 / 3.0,
    1.0 / 3.0,
    1.0 / 1200.0,
    1.0 / 2500.0,
    1.0 / 1800.0,
    1.0 / 5000.0,
];

/// Production multiplier per speed level, `1.25^k`.
pub const SPEED_MULTIPLIERS: [f64; 11] = [
    1.0,
    1.25,
    1.5625,
    1.953125,
    2.44140625,
    3.0517578125,
    3.814697265625,
    4.76837158203125,
    5.960464477539063,
    7.450580596923828,
    9.313225746154785,
];

/// `(paying resource, factor of the base cost)` for each upgraded resource.
const COST_SHARES: [&[(usize, f64)]; NUM_RESOURCES] = [
    &[(1, 10.0)],
    &[(1, 0.8)],
    &[(1, 1.0)],
    &[(0, 1.0)],
    &[(0, 1.0)],
    &[(1, 1.0), (2, 1.0)],
    &[(0, 0.7), (3, 0.5)],
    &[(0, 1.0), (4, 3.0)],
    &[(2, 1.2), (5, 1.0)],
    &[(3, 1.0), (4, 1.0), (5, 1.0)],
];

/// Remaining time below which a path stops being simulated.
const NEGLIGIBLE_SECONDS: f64 = 1e-3;

/// Immutable event parameters shared by every simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationContext {
    total_seconds: usize,
    busy: BusySchedule,
    event_currency_cap: f64,
}

impl SimulationContext {
    pub fn new(total_seconds: usize, busy: BusySchedule, event_currency_cap: f64) -> Self {
        Self {
            total_seconds: total_seconds.max(1),
            busy,
            event_currency_cap,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let total = settings.total_seconds();
        Self::new(
            total,
            BusySchedule::from_hours(&settings.busy_times, total),
            settings.event_currency_cap,
        )
    }

    #[inline]
    pub fn total_seconds(&self) -> usize {
        self.total_seconds
    }

    #[inline]
    pub fn busy(&self) -> &BusySchedule {
        &self.busy
    }

    #[inline]
    pub fn event_currency_cap(&self) -> f64 {
        self.event_currency_cap
    }
}

/// Production rate of every resource at the given levels.
pub fn production_rates(levels: &LevelState) -> [f64; NUM_RESOURCES] {
    let mut rates = [0.0; NUM_RESOURCES];
    for r in ResourceIndex::all() {
        let speed = (levels.speed_level(r) as usize).min(SPEED_MULTIPLIERS.len() - 1);
        rates[r.get()] =
            levels.production_level(r) as f64 * CYCLE_RATES[r.get()] * SPEED_MULTIPLIERS[speed];
    }
    rates
}

/// Cost of the next level of `upgrade`, per paying resource.
pub fn upgrade_cost(levels: &LevelState, upgrade: UpgradeType) -> [f64; NUM_RESOURCES] {
    let mut cost = [0.0; NUM_RESOURCES];
    let Some(target) = upgrade.resource() else {
        return cost;
    };

    let next = (levels.level(upgrade) + 1) as f64;
    let mut base = (3.0 * next * next * next + 1.0) * 100.0;
    if upgrade.is_speed() {
        base *= 2.0;
    }
    for &(payer, factor) in COST_SHARES[target.get()] {
        cost[payer] = base * factor;
    }
    cost
}

/// Seconds of production needed before `cost` is covered; infinite when a
/// missing resource is not produced at all.
fn affordability_time(
    cost: &[f64; NUM_RESOURCES],
    resources: &ResourceState,
    rates: &[f64; NUM_RESOURCES],
) -> f64 {
    let mut needed: f64 = 0.0;
    for ((&c, have), &rate) in cost.iter().zip(resources.iter()).zip(rates) {
        let shortfall = c - have;
        if shortfall <= 0.0 {
            continue;
        }
        if rate == 0.0 {
            return f64::INFINITY;
        }
        needed = needed.max(shortfall / rate);
    }
    needed
}

/// Forward simulator for upgrade paths.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSimulator {
    ctx: SimulationContext,
}

impl ResourceSimulator {
    #[inline]
    pub fn new(ctx: SimulationContext) -> Self {
        Self { ctx }
    }

    #[inline]
    pub fn context(&self) -> &SimulationContext {
        &self.ctx
    }

    /// Performs a single upgrade and returns the seconds it took.
    ///
    /// When the upgrade cannot be afforded before `remaining_seconds` run
    /// out, or when it is the sentinel, production runs for all remaining
    /// time and the level is left unchanged. A speed upgrade whose track is
    /// already capped takes no time and changes nothing.
    pub fn perform_upgrade(
        &self,
        levels: &mut LevelState,
        resources: &mut ResourceState,
        upgrade: UpgradeType,
        remaining_seconds: f64,
    ) -> f64 {
        if levels.is_capped(upgrade) {
            return 0.0;
        }

        let rates = production_rates(levels);
        let cost = upgrade_cost(levels, upgrade);
        let elapsed = self.ctx.total_seconds as f64 - remaining_seconds;

        let mut needed = affordability_time(&cost, resources, &rates);
        needed += self.ctx.busy.time_until_free(elapsed + needed);

        if upgrade.is_complete() || needed >= remaining_seconds {
            self.accrue(resources, &rates, remaining_seconds, None);
            return remaining_seconds;
        }

        self.accrue(resources, &rates, needed, Some(&cost));
        levels.increment(upgrade);
        needed
    }

    fn accrue(
        &self,
        resources: &mut ResourceState,
        rates: &[f64; NUM_RESOURCES],
        seconds: f64,
        cost: Option<&[f64; NUM_RESOURCES]>,
    ) {
        for r in ResourceIndex::all() {
            let paid = cost.map_or(0.0, |c| c[r.get()]);
            *resources.get_mut(r) += rates[r.get()] * seconds - paid;
        }
        resources.clamp_event_currency(self.ctx.event_currency_cap);
    }

    /// Simulates `path` from the given state and returns the unused seconds.
    ///
    /// Speed upgrades whose track is capped are skipped. Simulation stops as
    /// soon as the remaining time becomes negligible.
    pub fn simulate_path(
        &self,
        path: &[UpgradeType],
        levels: &mut LevelState,
        resources: &mut ResourceState,
        mut trace: Option<&mut SimulationTrace>,
    ) -> f64 {
        let total = self.ctx.total_seconds as f64;
        let mut remaining = total;

        for &upgrade in path {
            if remaining < NEGLIGIBLE_SECONDS {
                return 0.0;
            }
            if levels.is_capped(upgrade) {
                continue;
            }

            let spent = self.perform_upgrade(levels, resources, upgrade, remaining);
            remaining -= spent;

            if let Some(trace) = trace.as_deref_mut() {
                trace.push(TraceStep {
                    upgrade,
                    level: levels.level(upgrade),
                    seconds_spent: spent,
                    elapsed_seconds: (total - remaining) as u64,
                });
            }
        }
        remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use upgrade_path_model::upgrade::{NUM_LEVEL_SLOTS, SPEED_LEVEL_CAP};

    const DAY: usize = 86_400;

    fn sim(total: usize) -> ResourceSimulator {
        ResourceSimulator::new(SimulationContext::new(total, BusySchedule::free(total), 10_000.0))
    }

    fn levels(pairs: &[(usize, u32)]) -> LevelState {
        let mut raw = [0u32; NUM_LEVEL_SLOTS];
        for &(i, v) in pairs {
            raw[i] = v;
        }
        LevelState::from_levels(raw)
    }

    fn up(code: i64) -> UpgradeType {
        UpgradeType::from_code(code).unwrap()
    }

    #[test]
    fn test_speed_multipliers_are_powers_of_one_and_a_quarter() {
        for (k, m) in SPEED_MULTIPLIERS.iter().enumerate() {
            assert!((m - 1.25f64.powi(k as i32)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_cost_table() {
        let l = LevelState::new();
        // next level 1: (3 + 1) * 100
        let c = upgrade_cost(&l, up(0));
        assert_eq!(c[1], 4_000.0);
        let c = upgrade_cost(&l, up(6));
        assert_eq!(c[0], 280.0);
        assert_eq!(c[3], 200.0);
        let c = upgrade_cost(&l, up(19));
        assert_eq!((c[3], c[4], c[5]), (800.0, 800.0, 800.0));
        assert_eq!(upgrade_cost(&l, UpgradeType::Complete), [0.0; NUM_RESOURCES]);
    }

    #[test]
    fn test_rates_scale_with_speed() {
        let l = levels(&[(1, 2), (11, 2)]);
        let rates = production_rates(&l);
        assert_eq!(rates[1], 2.0 * 1.5625);
        assert_eq!(rates[0], 0.0);
    }

    #[test]
    fn test_affordable_upgrade_is_paid_and_levelled() {
        let s = sim(DAY);
        let mut l = levels(&[(1, 1)]);
        let mut r = ResourceState::new([0.0, 1_000.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);

        // Ghost level 1 costs 400 Bat, which is on hand.
        let spent = s.perform_upgrade(&mut l, &mut r, up(2), DAY as f64);
        assert_eq!(spent, 0.0);
        assert_eq!(l.level(up(2)), 1);
        assert_eq!(r.get(ResourceIndex::new(1).unwrap()), 600.0);
    }

    #[test]
    fn test_waits_for_production() {
        let s = sim(DAY);
        let mut l = levels(&[(1, 1)]);
        let mut r = ResourceState::default();

        // 400 Bat at 1 per second.
        let spent = s.perform_upgrade(&mut l, &mut r, up(2), DAY as f64);
        assert_eq!(spent, 400.0);
        assert_eq!(r.get(ResourceIndex::new(1).unwrap()), 0.0);
    }

    #[test]
    fn test_unproduced_resource_consumes_remaining_time() {
        let s = sim(DAY);
        let mut l = levels(&[(1, 1)]);
        let mut r = ResourceState::default();

        // Witch_Book pays in Tomb, which is not produced.
        let spent = s.perform_upgrade(&mut l, &mut r, up(3), 100.0);
        assert_eq!(spent, 100.0);
        assert_eq!(l.level(up(3)), 0);
        assert_eq!(r.get(ResourceIndex::new(1).unwrap()), 100.0);
    }

    #[test]
    fn test_capped_speed_is_a_noop() {
        let s = sim(DAY);
        let mut l = levels(&[(1, 1), (11, SPEED_LEVEL_CAP)]);
        let mut r = ResourceState::new([1e9; NUM_RESOURCES]);
        let before = (l, r);
        assert_eq!(s.perform_upgrade(&mut l, &mut r, up(11), 50.0), 0.0);
        assert_eq!((l, r), before);
    }

    #[test]
    fn test_busy_window_delays_completion() {
        let total = 10_000;
        let busy = BusySchedule::from_seconds(&[(1_000, 2_000)], total);
        let s = ResourceSimulator::new(SimulationContext::new(total, busy, 10_000.0));
        let mut l = levels(&[(1, 1)]);
        // Ghost level 1 costs 400 Bat; start 1100 seconds into the event.
        let mut r = ResourceState::default();
        let spent = s.perform_upgrade(&mut l, &mut r, up(2), (total - 1_100) as f64);
        // Affordable at 1100 + 400 = 1500, busy until 2000.
        assert_eq!(spent, 900.0);
        assert_eq!(l.level(up(2)), 1);
        assert_eq!(r.get(ResourceIndex::new(1).unwrap()), 500.0);
    }

    #[test]
    fn test_event_currency_is_clamped_after_accrual() {
        let s = sim(DAY);
        let mut l = levels(&[(9, 1000)]);
        let mut r = ResourceState::default();
        s.perform_upgrade(&mut l, &mut r, UpgradeType::Complete, DAY as f64);
        assert_eq!(r.event_currency(), 10_000.0);
    }

    #[test]
    fn test_simulate_records_trace_and_returns_leftover() {
        let s = sim(DAY);
        let mut l = levels(&[(1, 1)]);
        let mut r = ResourceState::default();
        let mut trace = SimulationTrace::default();
        let path = [up(2), up(2)];
        let left = s.simulate_path(&path, &mut l, &mut r, Some(&mut trace));

        assert_eq!(trace.len(), 2);
        assert_eq!(trace.steps()[0].level, 1);
        assert_eq!(trace.steps()[0].elapsed_seconds, 400);
        let spent: f64 = trace.steps().iter().map(|s| s.seconds_spent).sum();
        assert!((spent + left - DAY as f64).abs() < 1e-6);
    }

    #[test]
    fn test_simulate_stops_when_time_runs_out() {
        let s = sim(DAY);
        let mut l = levels(&[(1, 1)]);
        let mut r = ResourceState::default();
        let mut trace = SimulationTrace::default();
        let path = [UpgradeType::Complete, up(2), up(2)];
        let left = s.simulate_path(&path, &mut l, &mut r, Some(&mut trace));
        assert_eq!(left, 0.0);
        assert_eq!(trace.len(), 1);
        assert_eq!(l.level(up(2)), 0);
    }
}
