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

pub mod eval;
pub mod monitor;
pub mod search;
pub mod sim;

pub mod prelude {
    pub use crate::eval::path::{PathEvaluator, PathOutcome};
    pub use crate::eval::score::ScoringFunction;
    pub use crate::monitor::observer::{
        CompositeSearchObserver, NullObserver, SearchObserver, TracingObserver,
    };
    pub use crate::monitor::stop::StopToken;
    pub use crate::monitor::throttle::ThrottledObserver;
    pub use crate::search::dead::{DeadMove, DeadMoves};
    pub use crate::search::moves::traits::{Improvement, MoveContext, NeighborhoodMove, PathEdit};
    pub use crate::search::optimizer::{LocalSearchOptimizer, SearchOutcome, TerminationReason};
    pub use crate::search::state::{SearchState, seeded_rng};
    pub use crate::sim::busy::BusySchedule;
    pub use crate::sim::simulator::{ResourceSimulator, SimulationContext};
    pub use crate::sim::trace::{SimulationTrace, TraceStep};
}
