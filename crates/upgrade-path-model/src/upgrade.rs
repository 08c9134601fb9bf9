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

use serde::{Deserialize, Serialize};

/// Number of produced resources.
pub const NUM_RESOURCES: usize = 10;

/// Number of level counters: 10 production tracks, 10 speed tracks and one
/// placeholder slot that keeps the sentinel's code aligned with its slot.
pub const NUM_LEVEL_SLOTS: usize = 2 * NUM_RESOURCES + 1;

/// Highest level a speed track can reach.
pub const SPEED_LEVEL_CAP: u32 = 10;

/// Integer code of the terminal sentinel.
pub const COMPLETE_CODE: u8 = (2 * NUM_RESOURCES) as u8;

/// Index of a produced resource, always in `0..NUM_RESOURCES`.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceIndex(u8);

impl ResourceIndex {
    pub const PET_STONES: ResourceIndex = ResourceIndex(6);
    pub const FREE_EXP: ResourceIndex = ResourceIndex(7);
    pub const GROWTH: ResourceIndex = ResourceIndex(8);
    /// The capped event currency.
    pub const EVENT_CURRENCY: ResourceIndex = ResourceIndex(9);

    #[inline]
    pub const fn new(index: usize) -> Option<Self> {
        if index < NUM_RESOURCES {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    #[inline]
    pub const fn get(self) -> usize {
        self.0 as usize
    }

    /// All resource indices in ascending order.
    #[inline]
    pub fn all() -> impl Iterator<Item = ResourceIndex> + Clone {
        (0..NUM_RESOURCES as u8).map(ResourceIndex)
    }
}

impl std::fmt::Display for ResourceIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Resource({})", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UpgradeCodeError {
    code: i64,
}

impl UpgradeCodeError {
    pub fn new(code: i64) -> Self {
        Self { code }
    }

    pub fn code(&self) -> i64 {
        self.code
    }
}

impl std::fmt::Display for UpgradeCodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Upgrade code {} is outside the valid range 0..={}",
            self.code, COMPLETE_CODE
        )
    }
}

impl std::error::Error for UpgradeCodeError {}

/// A single purchasable action.
///
/// Codes `0..10` are production upgrades, `10..20` are speed upgrades and
/// `20` is the [`UpgradeType::Complete`] sentinel which spends all the time
/// that is left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum UpgradeType {
    Production(ResourceIndex),
    Speed(ResourceIndex),
    Complete,
}

impl UpgradeType {
    /// Production upgrades in code order.
    #[inline]
    pub fn productions() -> impl Iterator<Item = UpgradeType> + Clone {
        ResourceIndex::all().map(UpgradeType::Production)
    }

    /// Speed upgrades in code order.
    #[inline]
    pub fn speeds() -> impl Iterator<Item = UpgradeType> + Clone {
        ResourceIndex::all().map(UpgradeType::Speed)
    }

    /// The candidate set used when growing a path: every production
    /// upgrade, followed by every speed upgrade when those are allowed.
    pub fn candidates(allow_speed: bool) -> Vec<UpgradeType> {
        let mut out: Vec<UpgradeType> = Self::productions().collect();
        if allow_speed {
            out.extend(Self::speeds());
        }
        out
    }

    #[inline]
    pub fn from_code(code: i64) -> Result<Self, UpgradeCodeError> {
        let n = NUM_RESOURCES as i64;
        match code {
            c if (0..n).contains(&c) => Ok(UpgradeType::Production(ResourceIndex(c as u8))),
            c if (n..2 * n).contains(&c) => Ok(UpgradeType::Speed(ResourceIndex((c - n) as u8))),
            c if c == 2 * n => Ok(UpgradeType::Complete),
            c => Err(UpgradeCodeError::new(c)),
        }
    }

    /// The integer code, which is also the level slot this upgrade advances.
    #[inline]
    pub const fn code(self) -> usize {
        match self {
            UpgradeType::Production(r) => r.get(),
            UpgradeType::Speed(r) => NUM_RESOURCES + r.get(),
            UpgradeType::Complete => COMPLETE_CODE as usize,
        }
    }

    /// The resource this upgrade targets, `None` for the sentinel.
    #[inline]
    pub const fn resource(self) -> Option<ResourceIndex> {
        match self {
            UpgradeType::Production(r) | UpgradeType::Speed(r) => Some(r),
            UpgradeType::Complete => None,
        }
    }

    #[inline]
    pub const fn is_speed(self) -> bool {
        matches!(self, UpgradeType::Speed(_))
    }

    #[inline]
    pub const fn is_complete(self) -> bool {
        matches!(self, UpgradeType::Complete)
    }
}

impl TryFrom<i64> for UpgradeType {
    type Error = UpgradeCodeError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        UpgradeType::from_code(code)
    }
}

impl From<UpgradeType> for i64 {
    fn from(u: UpgradeType) -> Self {
        u.code() as i64
    }
}

impl std::fmt::Display for UpgradeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
