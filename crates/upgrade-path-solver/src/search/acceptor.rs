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

/// Decides whether a candidate score replaces the current one.
pub trait Acceptor {
    fn name(&self) -> &str;
    fn accept(&self, current: f64, candidate: f64) -> bool;
}

impl std::fmt::Display for dyn Acceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Accepts only strictly better candidates.
#[derive(Debug, Default, Clone, Copy)]
pub struct StrictImprovementAcceptor;
impl Acceptor for StrictImprovementAcceptor {
    fn name(&self) -> &str {
        "StrictImprovementAcceptor"
    }
    fn accept(&self, current: f64, candidate: f64) -> bool {
        candidate > current
    }
}

/// Accepts candidates that are at least as good, so plateau moves pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct NonWorseningAcceptor;
impl Acceptor for NonWorseningAcceptor {
    fn name(&self) -> &str {
        "NonWorseningAcceptor"
    }
    fn accept(&self, current: f64, candidate: f64) -> bool {
        candidate >= current
    }
}
