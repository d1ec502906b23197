//! DE-9IM intersection matrix and wildcard patterns.

use std::fmt;
use std::str::FromStr;

use crate::error::TopoError;
use crate::geom::{Dimension, Location};

/// 3×3 table of intersection dimensions, rows for `a`, columns for `b`,
/// both ordered Interior, Boundary, Exterior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IntersectionMatrix {
    cells: [[Dimension; 3]; 3],
}

impl Default for IntersectionMatrix {
    fn default() -> Self {
        Self::empty()
    }
}

impl IntersectionMatrix {
    /// Every cell empty (`FFFFFFFFF`).
    pub const fn empty() -> Self {
        Self {
            cells: [[Dimension::Empty; 3]; 3],
        }
    }

    #[inline]
    pub fn get(&self, a: Location, b: Location) -> Dimension {
        self.cells[a.index()][b.index()]
    }

    #[inline]
    pub fn set(&mut self, a: Location, b: Location, d: Dimension) {
        self.cells[a.index()][b.index()] = d;
    }

    /// Raise a cell to `d` if it is currently lower.
    #[inline]
    pub fn set_at_least(&mut self, a: Location, b: Location, d: Dimension) {
        let cell = &mut self.cells[a.index()][b.index()];
        if d > *cell {
            *cell = d;
        }
    }

    /// Matrix of the swapped argument pair.
    pub fn transpose(&self) -> Self {
        let mut t = Self::empty();
        for (i, row) in self.cells.iter().enumerate() {
            for (j, d) in row.iter().enumerate() {
                t.cells[j][i] = *d;
            }
        }
        t
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Dimension> + '_ {
        self.cells.iter().flatten().copied()
    }

    #[inline]
    pub fn matches(&self, pattern: &Pattern) -> bool {
        self.cells().zip(pattern.cells.iter()).all(|(d, c)| c.admits(d))
    }
}

impl fmt::Display for IntersectionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in self.cells() {
            write!(f, "{}", d.symbol())?;
        }
        Ok(())
    }
}

fn invalid(s: &str, reason: impl Into<String>) -> TopoError {
    TopoError::InvalidPattern {
        pattern: s.to_owned(),
        reason: reason.into(),
    }
}

impl FromStr for IntersectionMatrix {
    type Err = TopoError;

    /// Parse the canonical nine-character form (`F`, `0`, `1`, `2`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pattern: Pattern = s.parse()?;
        let mut m = Self::empty();
        for (k, cell) in pattern.cells.iter().enumerate() {
            let d = match cell {
                PatternCell::Dim(d) => *d,
                other => return Err(invalid(s, format!("{other:?} is not a concrete dimension"))),
            };
            m.cells[k / 3][k % 3] = d;
        }
        Ok(m)
    }
}

/// One position of a pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatternCell {
    /// `*`: anything.
    Any,
    /// `T`: non-empty.
    NonEmpty,
    /// `F` or an explicit dimension.
    Dim(Dimension),
}

impl PatternCell {
    #[inline]
    pub fn admits(self, d: Dimension) -> bool {
        match self {
            PatternCell::Any => true,
            PatternCell::NonEmpty => d != Dimension::Empty,
            PatternCell::Dim(want) => want == d,
        }
    }

    const fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'*' => Some(PatternCell::Any),
            b'T' | b't' => Some(PatternCell::NonEmpty),
            b'F' | b'f' => Some(PatternCell::Dim(Dimension::Empty)),
            b'0' => Some(PatternCell::Dim(Dimension::Point)),
            b'1' => Some(PatternCell::Dim(Dimension::Curve)),
            b'2' => Some(PatternCell::Dim(Dimension::Surface)),
            _ => None,
        }
    }
}

/// Nine-cell DE-9IM pattern such as `T*F**FFF*`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pattern {
    cells: [PatternCell; 9],
}

impl Pattern {
    /// Build a pattern in a const context. An invalid symbol fails const
    /// evaluation.
    pub const fn from_bytes(bytes: &[u8; 9]) -> Self {
        let mut cells = [PatternCell::Any; 9];
        let mut k = 0;
        while k < 9 {
            cells[k] = match PatternCell::from_byte(bytes[k]) {
                Some(c) => c,
                None => panic!("invalid DE-9IM pattern symbol"),
            };
            k += 1;
        }
        Self { cells }
    }

    #[inline]
    pub fn cells(&self) -> &[PatternCell; 9] {
        &self.cells
    }
}

impl FromStr for Pattern {
    type Err = TopoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 9 {
            return Err(invalid(s, format!("expected 9 symbols, got {}", bytes.len())));
        }
        let mut cells = [PatternCell::Any; 9];
        for (k, b) in bytes.iter().enumerate() {
            cells[k] = PatternCell::from_byte(*b)
                .ok_or_else(|| invalid(s, format!("unexpected symbol at position {k}")))?;
        }
        Ok(Self { cells })
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.cells {
            let ch = match c {
                PatternCell::Any => '*',
                PatternCell::NonEmpty => 'T',
                PatternCell::Dim(d) => d.symbol(),
            };
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}
