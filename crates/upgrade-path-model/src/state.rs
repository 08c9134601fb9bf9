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

use crate::upgrade::{
    NUM_LEVEL_SLOTS, NUM_RESOURCES, ResourceIndex, SPEED_LEVEL_CAP, UpgradeType,
};

/// Level counters indexed by upgrade code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelState {
    levels: [u32; NUM_LEVEL_SLOTS],
}

impl Default for LevelState {
    fn default() -> Self {
        Self {
            levels: [0; NUM_LEVEL_SLOTS],
        }
    }
}

impl LevelState {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a level state from raw counters, clamping speed tracks to the cap.
    pub fn from_levels(levels: [u32; NUM_LEVEL_SLOTS]) -> Self {
        let mut state = Self { levels };
        for r in ResourceIndex::all() {
            let slot = NUM_RESOURCES + r.get();
            state.levels[slot] = state.levels[slot].min(SPEED_LEVEL_CAP);
        }
        state
    }

    #[inline]
    pub fn level(&self, upgrade: UpgradeType) -> u32 {
        self.levels[upgrade.code()]
    }

    #[inline]
    pub fn production_level(&self, r: ResourceIndex) -> u32 {
        self.levels[r.get()]
    }

    #[inline]
    pub fn speed_level(&self, r: ResourceIndex) -> u32 {
        self.levels[NUM_RESOURCES + r.get()]
    }

    /// True when `upgrade` is a speed upgrade whose track is already capped.
    #[inline]
    pub fn is_capped(&self, upgrade: UpgradeType) -> bool {
        upgrade.is_speed() && self.level(upgrade) >= SPEED_LEVEL_CAP
    }

    /// Advances the track of `upgrade` by one. The sentinel has no track.
    #[inline]
    pub fn increment(&mut self, upgrade: UpgradeType) {
        if !upgrade.is_complete() {
            self.levels[upgrade.code()] += 1;
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.levels
    }
}

impl std::fmt::Display for LevelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_joined(f, self.levels.iter())
    }
}

/// Resource quantities indexed by [`ResourceIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResourceState {
    amounts: [f64; NUM_RESOURCES],
}

impl ResourceState {
    #[inline]
    pub fn new(amounts: [f64; NUM_RESOURCES]) -> Self {
        Self { amounts }
    }

    #[inline]
    pub fn get(&self, r: ResourceIndex) -> f64 {
        self.amounts[r.get()]
    }

    #[inline]
    pub fn get_mut(&mut self, r: ResourceIndex) -> &mut f64 {
        &mut self.amounts[r.get()]
    }

    #[inline]
    pub fn event_currency(&self) -> f64 {
        self.get(ResourceIndex::EVENT_CURRENCY)
    }

    /// Clamps the event currency to `cap`.
    #[inline]
    pub fn clamp_event_currency(&mut self, cap: f64) {
        let v = self.get_mut(ResourceIndex::EVENT_CURRENCY);
        if *v > cap {
            *v = cap;
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.amounts
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.amounts.iter().copied()
    }
}

impl std::fmt::Display for ResourceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_joined(f, self.amounts.iter())
    }
}

fn write_joined<T: std::fmt::Display>(
    f: &mut std::fmt::Formatter<'_>,
    items: impl Iterator<Item = T>,
) -> std::fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline]
    fn r(i: usize) -> ResourceIndex {
        ResourceIndex::new(i).unwrap()
    }

    #[test]
    fn test_from_levels_clamps_speed_tracks() {
        let mut raw = [0u32; NUM_LEVEL_SLOTS];
        raw[2] = 40;
        raw[NUM_RESOURCES + 2] = 15;
        let s = LevelState::from_levels(raw);
        assert_eq!(s.production_level(r(2)), 40);
        assert_eq!(s.speed_level(r(2)), SPEED_LEVEL_CAP);
    }

    #[test]
    fn test_increment_and_cap_detection() {
        let mut s = LevelState::new();
        let speed = UpgradeType::Speed(r(4));
        for _ in 0..SPEED_LEVEL_CAP {
            assert!(!s.is_capped(speed));
            s.increment(speed);
        }
        assert!(s.is_capped(speed));
        assert!(!s.is_capped(UpgradeType::Production(r(4))));

        s.increment(UpgradeType::Complete);
        assert_eq!(s.level(UpgradeType::Complete), 0);
    }

    #[test]
    fn test_event_currency_clamp() {
        let mut rs = ResourceState::default();
        *rs.get_mut(ResourceIndex::EVENT_CURRENCY) = 12_500.0;
        rs.clamp_event_currency(10_000.0);
        assert_eq!(rs.event_currency(), 10_000.0);
        rs.clamp_event_currency(20_000.0);
        assert_eq!(rs.event_currency(), 10_000.0);
    }

    #[test]
    fn test_display_is_comma_separated() {
        let rs = ResourceState::new([1.0, 2.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 3.0]);
        assert_eq!(rs.to_string(), "1,2.5,0,0,0,0,0,0,0,3");
        let ls = LevelState::new();
        assert_eq!(ls.to_string().split(',').count(), NUM_LEVEL_SLOTS);
    }
}
