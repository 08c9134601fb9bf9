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

use crate::{
    state::LevelState,
    upgrade::{NUM_LEVEL_SLOTS, NUM_RESOURCES, ResourceIndex, UpgradeCodeError, UpgradeType},
};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An ordered sequence of upgrades. Order is what the optimizer changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpgradePath {
    steps: Vec<UpgradeType>,
}

impl UpgradePath {
    #[inline]
    pub fn new(steps: Vec<UpgradeType>) -> Self {
        Self { steps }
    }

    /// Decodes integer codes, failing on the first code outside `0..=20`.
    pub fn from_codes(codes: &[i64]) -> Result<Self, UpgradeCodeError> {
        codes
            .iter()
            .map(|&c| UpgradeType::from_code(c))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// A random path of `length` upgrades terminated by the sentinel.
    ///
    /// Each step targets a uniformly drawn resource and is a speed upgrade
    /// with probability one half when `allow_speed` is set.
    pub fn random<R: Rng>(length: usize, allow_speed: bool, rng: &mut R) -> Self {
        let mut steps = Vec::with_capacity(length + 1);
        for _ in 0..length {
            let r = ResourceIndex::new(rng.random_range(0..NUM_RESOURCES))
                .unwrap_or(ResourceIndex::EVENT_CURRENCY);
            if allow_speed && rng.random_bool(0.5) {
                steps.push(UpgradeType::Speed(r));
            } else {
                steps.push(UpgradeType::Production(r));
            }
        }
        steps.push(UpgradeType::Complete);
        Self { steps }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn ends_with_complete(&self) -> bool {
        self.steps.last().is_some_and(|u| u.is_complete())
    }

    /// Number of leading steps that moves may edit: everything except a
    /// trailing sentinel.
    #[inline]
    pub fn body_len(&self) -> usize {
        if self.ends_with_complete() {
            self.steps.len() - 1
        } else {
            self.steps.len()
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[UpgradeType] {
        &self.steps
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [UpgradeType] {
        &mut self.steps
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = UpgradeType> + '_ {
        self.steps.iter().copied()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<UpgradeType> {
        self.steps.get(index).copied()
    }

    #[inline]
    pub fn insert(&mut self, index: usize, upgrade: UpgradeType) {
        self.steps.insert(index, upgrade);
    }

    #[inline]
    pub fn remove(&mut self, index: usize) -> UpgradeType {
        self.steps.remove(index)
    }

    #[inline]
    pub fn set(&mut self, index: usize, upgrade: UpgradeType) {
        self.steps[index] = upgrade;
    }

    #[inline]
    pub fn swap(&mut self, a: usize, b: usize) {
        self.steps.swap(a, b);
    }

    /// Rotates `[start, end]` (inclusive) so that `pivot` becomes its first element.
    #[inline]
    pub fn rotate(&mut self, start: usize, end: usize, pivot: usize) {
        debug_assert!(start <= pivot && pivot <= end);
        self.steps[start..=end].rotate_left(pivot - start);
    }

    /// Removes the upgrades that `current` levels already account for.
    ///
    /// Used when the configured path is a full plan from event start. Every
    /// level above the event-start baseline pays for one matching path entry,
    /// scanning from the front. The Bat production track starts at level 1,
    /// so one of its levels is not backed by a path entry.
    pub fn strip_completed(&self, current: &LevelState) -> Self {
        let mut budget = [0u32; NUM_LEVEL_SLOTS];
        budget.copy_from_slice(current.as_slice());
        if let Some(bat) = budget.get_mut(1) {
            *bat = bat.saturating_sub(1);
        }

        let steps = self
            .steps
            .iter()
            .copied()
            .filter(|u| {
                let slot = &mut budget[u.code()];
                if *slot > 0 {
                    *slot -= 1;
                    false
                } else {
                    true
                }
            })
            .collect();
        Self { steps }
    }
}

impl From<Vec<UpgradeType>> for UpgradePath {
    fn from(steps: Vec<UpgradeType>) -> Self {
        Self::new(steps)
    }
}

impl std::fmt::Display for UpgradePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (i, u) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", u)?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn path(codes: &[i64]) -> UpgradePath {
        UpgradePath::from_codes(codes).unwrap()
    }

    #[test]
    fn test_from_codes_rejects_invalid() {
        assert!(UpgradePath::from_codes(&[0, 1, 21]).is_err());
        assert_eq!(path(&[0, 10, 20]).len(), 3);
    }

    #[test]
    fn test_body_len_excludes_trailing_sentinel_only() {
        assert_eq!(path(&[1, 2, 20]).body_len(), 2);
        assert_eq!(path(&[1, 2]).body_len(), 2);
        assert_eq!(path(&[20, 1]).body_len(), 2);
        assert_eq!(UpgradePath::default().body_len(), 0);
    }

    #[test]
    fn test_rotate_inclusive_window() {
        let mut p = path(&[0, 1, 2, 3, 4, 20]);
        p.rotate(1, 4, 3);
        assert_eq!(p, path(&[0, 3, 4, 1, 2, 20]));
    }

    #[test]
    fn test_display_matches_brace_list() {
        assert_eq!(path(&[3, 13, 20]).to_string(), "{3,13,20}");
        assert_eq!(UpgradePath::default().to_string(), "{}");
    }

    #[test]
    fn test_random_path_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let p = UpgradePath::random(336, false, &mut rng);
        assert_eq!(p.len(), 337);
        assert!(p.ends_with_complete());
        assert!(p.as_slice()[..336].iter().all(|u| !u.is_speed() && !u.is_complete()));

        let q = UpgradePath::random(200, true, &mut rng);
        assert!(q.iter().any(|u| u.is_speed()));
    }

    #[test]
    fn test_strip_completed_drops_matched_prefix_entries() {
        let mut raw = [0u32; NUM_LEVEL_SLOTS];
        raw[1] = 2; // baseline 1 + one purchase
        raw[3] = 1;
        let current = LevelState::from_levels(raw);
        let p = path(&[1, 3, 1, 3, 5, 20]);
        assert_eq!(p.strip_completed(&current), path(&[1, 3, 5, 20]));
    }
}
