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

/// Moves that can be exhausted until the next accepted improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeadMove {
    Insert,
    Remove,
    Swap,
    RotateExhausted,
}

impl DeadMove {
    pub const ALL: [DeadMove; 4] = [
        DeadMove::Insert,
        DeadMove::Remove,
        DeadMove::Swap,
        DeadMove::RotateExhausted,
    ];

    #[inline]
    const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    pub const fn name(self) -> &'static str {
        match self {
            DeadMove::Insert => "Insert",
            DeadMove::Remove => "Remove",
            DeadMove::Swap => "Swap",
            DeadMove::RotateExhausted => "RotateExhausted",
        }
    }
}

impl std::fmt::Display for DeadMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Flag set over [`DeadMove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DeadMoves(u8);

impl DeadMoves {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn mark(&mut self, m: DeadMove) {
        self.0 |= m.bit();
    }

    #[inline]
    pub fn is_dead(&self, m: DeadMove) -> bool {
        self.0 & m.bit() != 0
    }

    #[inline]
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// True once Insert, Remove and Swap have all been exhausted.
    #[inline]
    pub fn local_moves_exhausted(&self) -> bool {
        self.is_dead(DeadMove::Insert) && self.is_dead(DeadMove::Remove) && self.is_dead(DeadMove::Swap)
    }

    pub fn iter(&self) -> impl Iterator<Item = DeadMove> + '_ {
        DeadMove::ALL.into_iter().filter(|m| self.is_dead(*m))
    }
}

impl std::fmt::Display for DeadMoves {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (i, m) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", m)?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_and_clear() {
        let mut d = DeadMoves::new();
        assert!(d.is_empty());
        d.mark(DeadMove::Swap);
        d.mark(DeadMove::Swap);
        assert!(d.is_dead(DeadMove::Swap));
        assert!(!d.is_dead(DeadMove::Insert));
        assert_eq!(d.iter().count(), 1);
        d.clear();
        assert!(d.is_empty());
    }

    #[test]
    fn test_local_moves_exhausted_ignores_rotation() {
        let mut d = DeadMoves::new();
        d.mark(DeadMove::Insert);
        d.mark(DeadMove::Remove);
        d.mark(DeadMove::RotateExhausted);
        assert!(!d.local_moves_exhausted());
        d.mark(DeadMove::Swap);
        assert!(d.local_moves_exhausted());
        assert_eq!(d.to_string(), "{Insert, Remove, Swap, RotateExhausted}");
    }
}
