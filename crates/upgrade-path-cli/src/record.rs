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

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use upgrade_path_model::path::UpgradePath;
use upgrade_path_solver::search::optimizer::SearchOutcome;

#[derive(Debug)]
pub enum RecordError {
    Io(PathBuf, std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordError::Io(p, e) => write!(f, "cannot write {}: {}", p.display(), e),
            RecordError::Json(e) => write!(f, "cannot encode run record: {}", e),
        }
    }
}

impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecordError::Io(_, e) => Some(e),
            RecordError::Json(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for RecordError {
    fn from(e: serde_json::Error) -> Self {
        RecordError::Json(e)
    }
}

/// Summary of one optimisation run, written as JSON.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub runtime_ms: i64,
    pub seed: Option<u64>,
    pub initial_score: f64,
    pub final_score: f64,
    pub path: UpgradePath,
    pub iterations: u64,
    pub improvements: u64,
    pub evaluations: u64,
    /// `None` when optimisation was skipped.
    pub termination: Option<String>,
}

impl RunRecord {
    pub fn new(
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        seed: Option<u64>,
        initial_score: f64,
        final_score: f64,
        path: UpgradePath,
        outcome: Option<&SearchOutcome>,
    ) -> Self {
        Self {
            started_at,
            finished_at,
            runtime_ms: (finished_at - started_at).num_milliseconds(),
            seed,
            initial_score,
            final_score,
            path,
            iterations: outcome.map_or(0, |o| o.iterations),
            improvements: outcome.map_or(0, |o| o.improvements),
            evaluations: outcome.map_or(0, |o| o.evaluations),
            termination: outcome.map(|o| o.reason.to_string()),
        }
    }

    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write(&self, path: &Path) -> Result<(), RecordError> {
        let json = self.to_json()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| RecordError::Io(parent.into(), e))?;
        }
        std::fs::write(path, json).map_err(|e| RecordError::Io(path.into(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use upgrade_path_solver::search::optimizer::TerminationReason;

    #[test]
    fn test_record_json_shape() {
        let t0 = Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap();
        let t1 = t0 + chrono::Duration::milliseconds(1_250);
        let outcome = SearchOutcome {
            iterations: 40,
            improvements: 3,
            evaluations: 900,
            reason: TerminationReason::StallLimit,
            initial_score: 1.0,
            final_score: 2.5,
        };
        let rec = RunRecord::new(
            t0,
            t1,
            Some(7),
            1.0,
            2.5,
            UpgradePath::from_codes(&[1, 0, 20]).unwrap(),
            Some(&outcome),
        );
        let v: serde_json::Value = serde_json::from_str(&rec.to_json().unwrap()).unwrap();

        assert_eq!(v["runtimeMs"], 1_250);
        assert_eq!(v["seed"], 7);
        assert_eq!(v["path"], serde_json::json!([1, 0, 20]));
        assert_eq!(v["termination"], "StallLimit");
        assert_eq!(v["iterations"], 40);
        assert_eq!(v["finalScore"], 2.5);
    }

    #[test]
    fn test_skipped_optimisation_has_no_termination() {
        let t0 = Utc::now();
        let rec = RunRecord::new(t0, t0, None, 0.5, 0.5, UpgradePath::default(), None);
        let v: serde_json::Value = serde_json::from_str(&rec.to_json().unwrap()).unwrap();
        assert!(v["termination"].is_null());
        assert_eq!(v["iterations"], 0);
    }
}
