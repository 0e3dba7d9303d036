//! Vessel definitions, orientations and grid coordinates.

use core::fmt;

use crate::config::{BOARD_SIZE, FLEET, NUM_VESSELS};

/// Direction a vessel extends from its origin cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Extends towards +x.
    #[default]
    Horizontal,
    /// Extends towards +y.
    Vertical,
}

impl Orientation {
    pub fn toggle(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// Static description of one vessel of the fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VesselType {
    slug: &'static str,
    name: &'static str,
    length: usize,
    colour: &'static str,
}

impl VesselType {
    pub const fn new(
        slug: &'static str,
        name: &'static str,
        length: usize,
        colour: &'static str,
    ) -> Self {
        Self {
            slug,
            name,
            length,
            colour,
        }
    }

    /// Lower-case identifier, e.g. `"carrier"`.
    pub fn slug(&self) -> &'static str {
        self.slug
    }

    /// Display name, e.g. `"Carrier"`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Rendering hint only; no game logic reads it.
    pub fn colour(&self) -> &'static str {
        self.colour
    }
}

/// Identifier of a vessel: its index in [`FLEET`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct VesselId(u8);

impl VesselId {
    /// Returns `None` for indices past the end of the fleet.
    pub const fn new(index: usize) -> Option<Self> {
        if index < NUM_VESSELS {
            Some(VesselId(index as u8))
        } else {
            None
        }
    }

    /// Looks a vessel up by slug or display name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        FLEET
            .iter()
            .position(|v| v.slug().eq_ignore_ascii_case(name) || v.name().eq_ignore_ascii_case(name))
            .and_then(Self::new)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn kind(self) -> VesselType {
        FLEET[self.index()]
    }

    /// Every vessel of the fleet in placement order.
    pub fn all() -> impl Iterator<Item = VesselId> {
        (0..NUM_VESSELS as u8).map(VesselId)
    }
}

impl fmt::Display for VesselId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind().name())
    }
}

/// A cell on the grid. Only [`Coord::new`] builds one, so it is always in
/// bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    x: usize,
    y: usize,
}

impl Coord {
    /// Returns `None` when `x` or `y` falls outside the board.
    pub const fn new(x: usize, y: usize) -> Option<Self> {
        if x < BOARD_SIZE && y < BOARD_SIZE {
            Some(Coord { x, y })
        } else {
            None
        }
    }

    pub fn x(self) -> usize {
        self.x
    }

    pub fn y(self) -> usize {
        self.y
    }

    /// Neighbour at the given signed offset, if it stays on the board.
    pub fn offset(self, dx: isize, dy: isize) -> Option<Self> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Coord::new(x, y)
    }

    /// The up-to-four edge neighbours that lie on the board.
    pub fn orthogonal(self) -> impl Iterator<Item = Coord> {
        [(0, -1), (0, 1), (-1, 0), (1, 0)]
            .into_iter()
            .filter_map(move |(dx, dy)| self.offset(dx, dy))
    }
}

impl fmt::Display for Coord {
    /// Column letter then 1-based row, e.g. `(0, 4)` is `A5`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let column = u8::try_from(self.x)
            .ok()
            .and_then(|x| b'A'.checked_add(x))
            .map_or('?', char::from);
        write!(f, "{}{}", column, self.y + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_is_checked_and_displays_as_grid_label() {
        assert!(Coord::new(BOARD_SIZE, 0).is_none());
        assert!(Coord::new(0, usize::MAX).is_none());
        let at = Coord::new(9, 4).unwrap();
        assert_eq!((at.x(), at.y()), (9, 4));
        assert_eq!(alloc::format!("{}", at), "J5");
        assert_eq!(at.offset(1, 0), None);
        assert_eq!(at.orthogonal().count(), 3);
    }
}
