//! Tile-grid geometry: positions, the four cardinal directions, and the
//! 4-bit direction mask stored per tile.
//!
//! The grid uses `y = 0` for the bottom row and `Up` as `+y`.

use std::fmt;

// ── TilePos ───────────────────────────────────────────────────────────────────

/// Integer tile coordinates.  Signed so that neighbour arithmetic can step
/// off the map edge and be rejected by a bounds check instead of wrapping.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The adjacent tile in direction `dir`.
    #[inline]
    pub fn step(self, dir: Direction) -> TilePos {
        let (dx, dy) = dir.offset();
        TilePos::new(self.x + dx, self.y + dy)
    }

    /// The four neighbours in `Direction::ALL` order.
    pub fn neighbours(self) -> [(Direction, TilePos); 4] {
        Direction::ALL.map(|d| (d, self.step(d)))
    }

    /// Manhattan distance in tiles.
    #[inline]
    pub fn manhattan(self, other: TilePos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for TilePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for TilePos {
    fn from((x, y): (i32, i32)) -> Self {
        TilePos::new(x, y)
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// One of the four cardinal directions.
///
/// The discriminant order (Right, Up, Left, Down) is load-bearing: it is the
/// order in which searches expand, and `opposite` is `(d + 2) % 4`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Direction {
    Right = 0,
    Up    = 1,
    Left  = 2,
    Down  = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Up,
        Direction::Left,
        Direction::Down,
    ];

    /// `(dx, dy)` of one step in this direction.
    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Right => (1, 0),
            Direction::Up    => (0, 1),
            Direction::Left  => (-1, 0),
            Direction::Down  => (0, -1),
        }
    }

    #[inline]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Right => Direction::Left,
            Direction::Up    => Direction::Down,
            Direction::Left  => Direction::Right,
            Direction::Down  => Direction::Up,
        }
    }

    /// The direction leading from `from` to the adjacent tile `to`, or `None`
    /// when the tiles are not orthogonal neighbours.
    pub fn between(from: TilePos, to: TilePos) -> Option<Direction> {
        match (to.x - from.x, to.y - from.y) {
            (1, 0)  => Some(Direction::Right),
            (0, 1)  => Some(Direction::Up),
            (-1, 0) => Some(Direction::Left),
            (0, -1) => Some(Direction::Down),
            _ => None,
        }
    }

    /// The single-bit mask for this direction.
    #[inline]
    pub const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Right => "Right",
            Direction::Up    => "Up",
            Direction::Left  => "Left",
            Direction::Down  => "Down",
        };
        f.write_str(name)
    }
}

// ── DirectionMask ─────────────────────────────────────────────────────────────

/// Four direction bits packed into a byte: Right = 1, Up = 2, Left = 4,
/// Down = 8.  Used both as a graph node (outgoing edges) and as a per-tile
/// "visited from" marker during flood fills.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectionMask(pub u8);

impl DirectionMask {
    pub const NONE: DirectionMask = DirectionMask(0);
    pub const ALL: DirectionMask = DirectionMask(0b1111);

    #[inline]
    pub const fn single(dir: Direction) -> Self {
        DirectionMask(dir.bit())
    }

    #[inline]
    pub const fn has(self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    #[inline]
    #[must_use]
    pub const fn with(self, dir: Direction) -> Self {
        DirectionMask(self.0 | dir.bit())
    }

    #[inline]
    #[must_use]
    pub const fn without(self, dir: Direction) -> Self {
        DirectionMask(self.0 & !dir.bit())
    }

    /// Set or clear one bit.
    #[inline]
    #[must_use]
    pub const fn set(self, dir: Direction, value: bool) -> Self {
        if value { self.with(dir) } else { self.without(dir) }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of set directions.
    #[inline]
    pub const fn degree(self) -> u32 {
        self.0.count_ones()
    }

    /// Set directions in `Direction::ALL` order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.has(*d))
    }

    /// Box-drawing glyph for this mask (`.` when empty).
    pub fn glyph(self) -> char {
        let r = self.has(Direction::Right);
        let u = self.has(Direction::Up);
        let l = self.has(Direction::Left);
        let d = self.has(Direction::Down);
        match (r, u, l, d) {
            (true, true, true, true)     => '┼',
            (true, true, true, false)    => '┴',
            (false, true, true, true)    => '┤',
            (true, false, true, true)    => '┬',
            (true, true, false, true)    => '├',
            (true, true, false, false)   => '└',
            (false, true, true, false)   => '┘',
            (false, false, true, true)   => '┐',
            (true, false, false, true)   => '┌',
            (true, false, true, false)   => '─',
            (false, true, false, true)   => '│',
            (true, false, false, false)  => '╶',
            (false, true, false, false)  => '╵',
            (false, false, true, false)  => '╴',
            (false, false, false, true)  => '╷',
            (false, false, false, false) => '.',
        }
    }

    /// Inverse of [`glyph`](Self::glyph).
    pub fn from_glyph(c: char) -> Option<Self> {
        (0u8..16).map(DirectionMask).find(|m| m.glyph() == c)
    }
}

impl fmt::Display for DirectionMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

impl From<Direction> for DirectionMask {
    fn from(dir: Direction) -> Self {
        DirectionMask::single(dir)
    }
}

// ── MapSize ───────────────────────────────────────────────────────────────────

/// Dimensions of a rectangular tile map anchored at `(0, 0)`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapSize {
    pub width:  u32,
    pub height: u32,
}

impl MapSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn contains(self, pos: TilePos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Row-major index of `pos`, or `None` when out of bounds.
    #[inline]
    pub fn index(self, pos: TilePos) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn pos(self, index: usize) -> TilePos {
        let w = self.width as usize;
        TilePos::new((index % w) as i32, (index / w) as i32)
    }

    #[inline]
    pub fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Every position, row by row from the bottom.
    pub fn positions(self) -> impl Iterator<Item = TilePos> {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| TilePos::new(x, y)))
    }
}

impl fmt::Display for MapSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
