//! Integer lattice coordinates of arbitrary dimension.

use std::fmt;

use crate::space::Cost;

/// An N-dimensional integer coordinate.
///
/// Immutable after construction; equality and hashing are by value,
/// so coordinates can serve as map keys and queue payloads. Most
/// robot maps are 2D (see [`GridCoord::xy`]) but the planners make no
/// assumption about dimensionality.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GridCoord {
    values: Box<[i32]>,
}

impl GridCoord {
    /// Create a coordinate from its per-dimension values.
    pub fn new(values: &[i32]) -> Self {
        Self {
            values: values.into(),
        }
    }

    /// Convenience constructor for the common 2D case.
    pub fn xy(x: i32, y: i32) -> Self {
        Self::new(&[x, y])
    }

    /// Number of dimensions.
    pub fn dims(&self) -> usize {
        self.values.len()
    }

    /// Value along dimension `dim`.
    pub fn get(&self, dim: usize) -> i32 {
        self.values[dim]
    }

    /// All per-dimension values.
    pub fn values(&self) -> &[i32] {
        &self.values
    }

    /// A copy of this coordinate shifted by `delta` along `dim`.
    pub fn offset(&self, dim: usize, delta: i32) -> Self {
        let mut values = self.values.clone();
        values[dim] += delta;
        Self { values }
    }

    /// Manhattan (L1) distance to another coordinate.
    ///
    /// Both coordinates must have the same dimensionality.
    pub fn manhattan(&self, other: &Self) -> Cost {
        debug_assert_eq!(self.dims(), other.dims());
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a - b).unsigned_abs())
            .sum::<u32>() as Cost
    }
}

impl fmt::Debug for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, ")")
    }
}

impl From<(i32, i32)> for GridCoord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::xy(x, y)
    }
}

impl<const N: usize> From<[i32; N]> for GridCoord {
    fn from(values: [i32; N]) -> Self {
        Self::new(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_and_hash() {
        use std::collections::HashSet;

        let a = GridCoord::xy(3, -4);
        let b = GridCoord::new(&[3, -4]);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_manhattan_distance() {
        let a = GridCoord::xy(0, 0);
        let b = GridCoord::xy(3, -4);
        assert_eq!(a.manhattan(&b), 7.0);
        assert_eq!(b.manhattan(&a), 7.0);
        assert_eq!(a.manhattan(&a), 0.0);
    }

    #[test]
    fn test_offset() {
        let a = GridCoord::new(&[1, 2, 3]);
        let up = a.offset(1, 1);
        assert_eq!(up, GridCoord::new(&[1, 3, 3]));
        // Original is unchanged
        assert_eq!(a.get(1), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(GridCoord::xy(2, 5).to_string(), "(2, 5)");
    }
}
