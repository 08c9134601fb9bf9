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

use crate::upgrade::{NUM_RESOURCES, ResourceIndex, UpgradeType};

const DEFAULT_NAMES: [&str; NUM_RESOURCES] = [
    "Tomb",
    "Bat",
    "Ghost",
    "Witch_Book",
    "Witch_Soup",
    "Eye",
    "PET_STONES",
    "FREE_EXP",
    "GROWTH",
    "Black_Cat",
];

/// Display names for resources and the upgrades that target them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceNames {
    names: [String; NUM_RESOURCES],
}

impl Default for ResourceNames {
    fn default() -> Self {
        Self {
            names: DEFAULT_NAMES.map(String::from),
        }
    }
}

impl ResourceNames {
    #[inline]
    pub fn new(names: [String; NUM_RESOURCES]) -> Self {
        Self { names }
    }

    #[inline]
    pub fn resource(&self, r: ResourceIndex) -> &str {
        &self.names[r.get()]
    }

    #[inline]
    pub fn set(&mut self, r: ResourceIndex, name: String) {
        self.names[r.get()] = name;
    }

    /// `<name>_Level`, `<name>_Speed` or `Complete`.
    pub fn upgrade(&self, upgrade: UpgradeType) -> String {
        match upgrade {
            UpgradeType::Production(r) => format!("{}_Level", self.resource(r)),
            UpgradeType::Speed(r) => format!("{}_Speed", self.resource(r)),
            UpgradeType::Complete => "Complete".to_string(),
        }
    }

    /// The `0=Tomb, 1=Bat, ...` mapping line.
    pub fn mapping(&self) -> String {
        self.names
            .iter()
            .enumerate()
            .map(|(i, n)| format!("{}={}", i, n))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
