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

use crate::search::{moves::traits::Improvement, optimizer::SearchOutcome};
use std::fmt;
use upgrade_path_model::path::UpgradePath;

/// Observer for high-level search lifecycle events.
/// All methods have default no-op implementations.
pub trait SearchObserver: Send {
    /// A short identifier for logging and diagnostics.
    fn name(&self) -> &str {
        "SearchObserver"
    }

    fn on_search_start(&mut self, _initial_score: f64, _path: &UpgradePath) {}
    fn on_search_end(&mut self, _outcome: &SearchOutcome) {}

    /// Called after every accepted move; `path` is the path after the move.
    fn on_improvement(&mut self, _iteration: u64, _improvement: &Improvement, _path: &UpgradePath) {
    }
}

/// A no-op observer useful as default.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl SearchObserver for NullObserver {
    fn name(&self) -> &str {
        "NullObserver"
    }
}

/// Logs every improvement through `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SearchObserver for TracingObserver {
    fn name(&self) -> &str {
        "TracingObserver"
    }

    fn on_search_start(&mut self, initial_score: f64, path: &UpgradePath) {
        tracing::debug!(score = initial_score, len = path.len(), "search started");
    }

    fn on_improvement(&mut self, _iteration: u64, improvement: &Improvement, path: &UpgradePath) {
        tracing::info!(
            "Improved path ({}): {} Score: {}",
            improvement.edit.kind(),
            path,
            improvement.score
        );
    }

    fn on_search_end(&mut self, outcome: &SearchOutcome) {
        tracing::info!(
            iterations = outcome.iterations,
            improvements = outcome.improvements,
            reason = %outcome.reason,
            "search finished with score {}",
            outcome.final_score
        );
    }
}

/// An observer that forwards events to a list of boxed observers.
/// Useful to combine independent observers.
#[derive(Default)]
pub struct CompositeSearchObserver {
    observers: Vec<Box<dyn SearchObserver + Send>>,
}

impl CompositeSearchObserver {
    #[inline]
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    /// Chain-builder: add an observer and return self.
    #[inline]
    pub fn with<O: SearchObserver + Send + 'static>(mut self, o: O) -> Self {
        self.observers.push(Box::new(o));
        self
    }

    #[inline]
    pub fn push<O: SearchObserver + Send + 'static>(&mut self, o: O) {
        self.observers.push(Box::new(o));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl SearchObserver for CompositeSearchObserver {
    fn name(&self) -> &str {
        "CompositeSearchObserver"
    }

    fn on_search_start(&mut self, initial_score: f64, path: &UpgradePath) {
        for o in &mut self.observers {
            o.on_search_start(initial_score, path);
        }
    }
    fn on_search_end(&mut self, outcome: &SearchOutcome) {
        for o in &mut self.observers {
            o.on_search_end(outcome);
        }
    }
    fn on_improvement(&mut self, iteration: u64, improvement: &Improvement, path: &UpgradePath) {
        for o in &mut self.observers {
            o.on_improvement(iteration, improvement, path);
        }
    }
}

impl fmt::Debug for CompositeSearchObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeSearchObserver")
            .field("len", &self.observers.len())
            .finish()
    }
}

impl<'a> fmt::Debug for dyn SearchObserver + 'a {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SearchObserver({})", self.name())
    }
}

impl<'a> fmt::Display for dyn SearchObserver + 'a {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SearchObserver({})", self.name())
    }
}
