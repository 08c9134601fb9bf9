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
    path::UpgradePath,
    settings::{
        BusyHours, Settings,
        err::{InvalidFieldError, SettingsError},
    },
    state::{LevelState, ResourceState},
    upgrade::{
        NUM_LEVEL_SLOTS, NUM_RESOURCES, ResourceIndex, SPEED_LEVEL_CAP, UpgradeType,
    },
};
use serde_json::{Map, Value};
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

/// Reads [`Settings`] from a JSON object.
///
/// Every key is optional. In the default lenient mode a key with a value of
/// the wrong shape is reported with a warning and its default is kept, so a
/// single typo does not discard the rest of the file. Strict mode turns those
/// warnings into [`SettingsError::InvalidField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SettingsLoader {
    strict: bool,
}

impl SettingsLoader {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn strict(mut self, yes: bool) -> Self {
        self.strict = yes;
        self
    }

    pub fn from_value(&self, value: &Value) -> Result<Settings, SettingsError> {
        let map = value.as_object().ok_or(SettingsError::NotAnObject)?;
        let fields = Fields {
            map,
            strict: self.strict,
        };
        let mut cfg = Settings::default();

        for (camel, upper, slot) in [
            ("eventDurationDays", "EVENT_DURATION_DAYS", &mut cfg.event_duration.days),
            ("eventDurationHours", "EVENT_DURATION_HOURS", &mut cfg.event_duration.hours),
            ("eventDurationMinutes", "EVENT_DURATION_MINUTES", &mut cfg.event_duration.minutes),
            ("eventDurationSeconds", "EVENT_DURATION_SECONDS", &mut cfg.event_duration.seconds),
        ] {
            fields.assign(camel, &mut *slot, Fields::int)?;
            fields.assign(upper, slot, Fields::int)?;
        }

        fields.assign("UNLOCKED_PETS", &mut cfg.unlocked_pets, Fields::int)?;
        fields.assign("DLs", &mut cfg.dls, Fields::int)?;
        fields.assign("outputInterval", &mut cfg.output_interval_ms, Fields::int)?;
        fields.assign("EVENT_CURRENCY_WEIGHT", &mut cfg.weights.event_currency, Fields::float)?;
        fields.assign("FREE_EXP_WEIGHT", &mut cfg.weights.free_exp, Fields::float)?;
        fields.assign("PET_STONES_WEIGHT", &mut cfg.weights.pet_stones, Fields::float)?;
        fields.assign("GROWTH_WEIGHT", &mut cfg.weights.growth, Fields::float)?;
        fields.assign("eventCurrencyCap", &mut cfg.event_currency_cap, Fields::float)?;
        fields.assign("isFullPath", &mut cfg.is_full_path, Fields::boolean)?;
        fields.assign("allowSpeedUpgrades", &mut cfg.allow_speed_upgrades, Fields::boolean)?;
        fields.assign("runOptimization", &mut cfg.run_optimization, Fields::boolean)?;
        fields.assign("logToConsole", &mut cfg.log_to_console, Fields::boolean)?;
        fields.assign("logToFile", &mut cfg.log_to_file, Fields::boolean)?;
        fields.assign("appendLogFile", &mut cfg.append_log_file, Fields::boolean)?;
        fields.assign("pauseOnExit", &mut cfg.pause_on_exit, Fields::boolean)?;

        if let Some(p) = fields.get("logFilePath", "string", |v| v.as_str().map(String::from))? {
            cfg.log_file_path = p.into();
        }
        cfg.seed = fields.get("seed", "non-negative integer", Value::as_u64)?;

        if let Some(n) = fields.get("maxOptimizationIterations", "integer", Value::as_i64)? {
            if n < 0 {
                tracing::warn!(
                    "Invalid value for 'maxOptimizationIterations': expected non-negative integer. Clamping to 0."
                );
            }
            cfg.max_optimization_iterations = n.max(0) as usize;
        }

        if cfg.event_currency_cap.is_nan() || cfg.event_currency_cap < 0.0 {
            fields.reject("eventCurrencyCap", "non-negative number")?;
            cfg.event_currency_cap = super::DEFAULT_EVENT_CURRENCY_CAP;
        }

        if let Some(levels) = fields.int_list("currentLevels")? {
            cfg.current_levels = sanitize_levels(&levels);
        }
        if let Some(counts) = fields.float_list("resourceCounts")? {
            cfg.resource_counts = sanitize_resources(&counts, cfg.event_currency_cap);
        }

        let mut codes = fields.int_list("upgradePath")?.unwrap_or_default();
        if codes.is_empty() {
            codes = fields.int_list("previousUpgradePath")?.unwrap_or_default();
        }
        cfg.upgrade_path = decode_path(&codes);

        let starts = fields.float_list("busyTimesStart")?.unwrap_or_default();
        let ends = fields.float_list("busyTimesEnd")?.unwrap_or_default();
        if starts.len() != ends.len() {
            tracing::warn!(
                "busyTimesStart has {} entries but busyTimesEnd has {}; ignoring unmatched entries.",
                starts.len(),
                ends.len()
            );
        }
        cfg.busy_times = starts
            .iter()
            .zip(&ends)
            .map(|(&start, &end)| BusyHours { start, end })
            .collect();

        if let Some(names) = fields.get("resourceNames", "array", |v| v.as_array().cloned())? {
            for (r, entry) in ResourceIndex::all().zip(names.iter()) {
                match entry.as_str() {
                    Some(name) => cfg.resource_names.set(r, name.to_string()),
                    None => fields.reject(
                        &format!("resourceNames[{}]", r.get()),
                        "string",
                    )?,
                }
            }
        }

        Ok(cfg)
    }

    #[inline]
    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<Settings, SettingsError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| SettingsError::Io(path.to_path_buf(), e))?;
        self.from_reader(BufReader::new(file))
    }

    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Settings, SettingsError> {
        let value: Value = serde_json::from_reader(r)?;
        self.from_value(&value)
    }

    #[inline]
    pub fn from_str(&self, s: &str) -> Result<Settings, SettingsError> {
        let value: Value = serde_json::from_str(s)?;
        self.from_value(&value)
    }
}

struct Fields<'a> {
    map: &'a Map<String, Value>,
    strict: bool,
}

impl<'a> Fields<'a> {
    fn reject(&self, key: &str, expected: &'static str) -> Result<(), SettingsError> {
        if self.strict {
            return Err(InvalidFieldError::new(key, expected).into());
        }
        tracing::warn!("Invalid value for '{}': expected {}.", key, expected);
        Ok(())
    }

    /// Looks up `key`; missing and `null` values are `None`, malformed values
    /// are rejected.
    fn get<T>(
        &self,
        key: &str,
        expected: &'static str,
        parse: impl FnOnce(&Value) -> Option<T>,
    ) -> Result<Option<T>, SettingsError> {
        match self.map.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => match parse(v) {
                Some(t) => Ok(Some(t)),
                None => {
                    self.reject(key, expected)?;
                    Ok(None)
                }
            },
        }
    }

    fn assign<T>(
        &self,
        key: &str,
        slot: &mut T,
        read: fn(&Self, &str) -> Result<Option<T>, SettingsError>,
    ) -> Result<(), SettingsError> {
        if let Some(v) = read(self, key)? {
            *slot = v;
        }
        Ok(())
    }

    fn int(&self, key: &str) -> Result<Option<i64>, SettingsError> {
        self.get(key, "integer", Value::as_i64)
    }

    fn float(&self, key: &str) -> Result<Option<f64>, SettingsError> {
        self.get(key, "number", Value::as_f64)
    }

    fn boolean(&self, key: &str) -> Result<Option<bool>, SettingsError> {
        self.get(key, "boolean", Value::as_bool)
    }

    fn int_list(&self, key: &str) -> Result<Option<Vec<i64>>, SettingsError> {
        self.get(key, "integer array or CSV integer list", |v| match v {
            Value::Array(items) => items.iter().map(parse_int_entry).collect(),
            Value::String(s) => parse_int_list(s),
            _ => None,
        })
    }

    fn float_list(&self, key: &str) -> Result<Option<Vec<f64>>, SettingsError> {
        self.get(key, "array of numbers or HH:MM strings", |v| {
            v.as_array()?
                .iter()
                .map(|e| match e {
                    Value::Number(n) => n.as_f64(),
                    Value::String(s) => parse_clock_hours(s),
                    _ => None,
                })
                .collect()
        })
    }
}

fn parse_int_entry(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parses `"{1,2,3}"`, `"[1, 2]"` or `"1 2 3"`.
fn parse_int_list(text: &str) -> Option<Vec<i64>> {
    text.split(|c: char| c.is_whitespace() || matches!(c, ',' | '[' | ']' | '{' | '}'))
        .filter(|tok| !tok.is_empty())
        .map(|tok| tok.parse().ok())
        .collect()
}

/// Parses an `HH:MM` clock string into fractional hours.
///
/// A negative hour moves the minutes in the same direction, so `-1:30` is `-1.5`.
pub fn parse_clock_hours(text: &str) -> Option<f64> {
    let (hours, mins) = text.trim().split_once(':')?;
    let hours: i64 = hours.trim().parse().ok()?;
    let mins: i64 = mins.trim().parse().ok()?;
    if !(0..60).contains(&mins) {
        return None;
    }
    let frac = mins as f64 / 60.0;
    let base = hours as f64;
    Some(if hours >= 0 { base + frac } else { base - frac })
}

fn sanitize_levels(raw: &[i64]) -> LevelState {
    let mut levels = [0u32; NUM_LEVEL_SLOTS];
    for (slot, &v) in levels.iter_mut().zip(raw) {
        *slot = v.clamp(0, u32::MAX as i64) as u32;
    }
    for r in ResourceIndex::all() {
        if levels[NUM_RESOURCES + r.get()] > SPEED_LEVEL_CAP {
            tracing::warn!(
                "Speed level at index {} exceeds cap of {}. Clamping.",
                r.get(),
                SPEED_LEVEL_CAP
            );
        }
    }
    LevelState::from_levels(levels)
}

fn sanitize_resources(raw: &[f64], event_currency_cap: f64) -> ResourceState {
    let mut amounts = [0.0; NUM_RESOURCES];
    for (i, (slot, &v)) in amounts.iter_mut().zip(raw).enumerate() {
        if v < 0.0 {
            tracing::warn!("Resource count at index {} is negative. Clamping to 0.", i);
        }
        *slot = v.max(0.0);
    }
    let mut state = ResourceState::new(amounts);
    if state.event_currency() > event_currency_cap {
        tracing::warn!(
            "Event currency exceeds cap of {}. Clamping.",
            event_currency_cap
        );
        state.clamp_event_currency(event_currency_cap);
    }
    state
}

fn decode_path(codes: &[i64]) -> UpgradePath {
    let steps = codes
        .iter()
        .enumerate()
        .filter_map(|(i, &c)| match UpgradeType::from_code(c) {
            Ok(u) => Some(u),
            Err(e) => {
                tracing::warn!("Dropping upgrade path entry {}: {}", i, e);
                None
            }
        })
        .collect();
    UpgradePath::new(steps)
}
