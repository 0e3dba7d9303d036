//! A fixed-size occupancy grid packed into an unsigned integer.
//!
//! Cells are addressed as `(x, y)` with `x` the column and `y` the row, and
//! stored row-major (`y * N + x`). The type is `Copy`, `no_std` friendly and
//! never allocates, so boards built on top of it can be passed around by
//! value.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};
use core::{fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

/// Errors returned by bitboard operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitBoardError {
    /// Column or row is outside `[0, N)`.
    IndexOutOfBounds { x: usize, y: usize },
}

impl fmt::Display for BitBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitBoardError::IndexOutOfBounds { x, y } => {
                write!(f, "IndexOutOfBounds: x={}, y={}", x, y)
            }
        }
    }
}

/// An N×N set of cells stored in the integer `T`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BitBoard<T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
}

impl<T, const N: usize> BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    const CELLS: usize = N * N;

    #[inline]
    fn mask() -> T {
        if Self::CELLS == mem::size_of::<T>() * 8 {
            !T::zero()
        } else {
            (T::one() << Self::CELLS) - T::one()
        }
    }

    #[inline]
    fn index(x: usize, y: usize) -> Result<usize, BitBoardError> {
        if x >= N || y >= N {
            Err(BitBoardError::IndexOutOfBounds { x, y })
        } else {
            Ok(y * N + x)
        }
    }

    /// Empty board.
    #[inline]
    pub fn new() -> Self {
        BitBoard { bits: T::zero() }
    }

    /// Number of occupied cells.
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    /// Whether `(x, y)` is set.
    pub fn get(&self, x: usize, y: usize) -> Result<bool, BitBoardError> {
        let idx = Self::index(x, y)?;
        Ok(((self.bits >> idx) & T::one()) != T::zero())
    }

    /// Like [`get`](Self::get) but treats out-of-range cells as unset.
    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.get(x, y).unwrap_or(false)
    }

    pub fn set(&mut self, x: usize, y: usize) -> Result<(), BitBoardError> {
        let idx = Self::index(x, y)?;
        self.bits = self.bits | (T::one() << idx);
        Ok(())
    }

    pub fn clear(&mut self, x: usize, y: usize) -> Result<(), BitBoardError> {
        let idx = Self::index(x, y)?;
        self.bits = self.bits & !(T::one() << idx);
        Ok(())
    }

    /// Builds a board from `(x, y)` cells.
    pub fn from_cells<I>(cells: I) -> Result<Self, BitBoardError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut board = Self::new();
        for (x, y) in cells {
            board.set(x, y)?;
        }
        Ok(board)
    }

    /// Iterates the occupied cells in row-major order.
    #[inline]
    pub fn iter(&self) -> Cells<T, N> {
        Cells {
            bits: self.bits,
            idx: 0,
        }
    }

    /// The occupied cells together with every cell touching one of them,
    /// edge or corner, clipped to the grid.
    pub fn halo(&self) -> Self {
        let mut out = *self;
        for (x, y) in self.iter() {
            for ny in y.saturating_sub(1)..=(y + 1).min(N - 1) {
                for nx in x.saturating_sub(1)..=(x + 1).min(N - 1) {
                    out.bits = out.bits | (T::one() << (ny * N + nx));
                }
            }
        }
        out
    }
}

impl<T, const N: usize> Default for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> fmt::Debug for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}x{}>:", N, N)?;
        for y in 0..N {
            for x in 0..N {
                let ch = if self.contains(x, y) { '■' } else { '□' };
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over the occupied cells of a bitboard, yielding `(x, y)`.
#[derive(Clone, Copy)]
pub struct Cells<T, const N: usize> {
    bits: T,
    idx: usize,
}

impl<T, const N: usize> Iterator for Cells<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while self.idx < N * N {
            let idx = self.idx;
            self.idx += 1;
            if ((self.bits >> idx) & T::one()) != T::zero() {
                return Some((idx % N, idx / N));
            }
        }
        None
    }
}

impl<T, const N: usize> BitAnd for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        BitBoard {
            bits: self.bits & rhs.bits,
        }
    }
}

impl<T, const N: usize> BitOr for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        BitBoard {
            bits: self.bits | rhs.bits,
        }
    }
}

/// Complement within the N×N grid.
impl<T, const N: usize> Not for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    #[inline]
    fn not(self) -> Self {
        BitBoard {
            bits: !self.bits & Self::mask(),
        }
    }
}

impl<T, const N: usize> BitAndAssign for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.bits = self.bits & rhs.bits;
    }
}

impl<T, const N: usize> BitOrAssign for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits = self.bits | rhs.bits;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type BB = BitBoard<u128, 10>;

    #[test]
    fn halo_clips_at_corner() {
        let board = BB::from_cells([(0, 0)]).unwrap();
        let halo = board.halo();
        assert_eq!(halo.count_ones(), 4);
        assert!(halo.contains(1, 1));
        assert!(!halo.contains(2, 0));
    }

    #[test]
    fn halo_of_run_in_middle() {
        let board = BB::from_cells([(4, 4), (5, 4), (6, 4)]).unwrap();
        assert_eq!(board.halo().count_ones(), 15);
    }

    #[test]
    fn iter_yields_column_then_row() {
        let board = BB::from_cells([(3, 1), (0, 2)]).unwrap();
        let cells: std::vec::Vec<_> = board.iter().collect();
        assert_eq!(cells, std::vec![(3, 1), (0, 2)]);
    }

    #[test]
    fn not_stays_inside_grid() {
        assert_eq!((!BB::new()).count_ones(), 100);
    }

    #[test]
    fn out_of_range_is_an_error() {
        let mut board = BB::new();
        assert_eq!(
            board.set(10, 0),
            Err(BitBoardError::IndexOutOfBounds { x: 10, y: 0 })
        );
        assert!(!board.contains(0, 10));
    }
}
