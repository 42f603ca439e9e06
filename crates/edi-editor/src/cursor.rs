//! Cursor — the on-screen cursor position.
//!
//! Both coordinates are **0-indexed** screen cells. Conversion to the
//! 1-indexed form the terminal expects happens when the frame is composed,
//! never here.
//!
//! Every movement is clamped against the window [`Size`] it is given, so
//! after any sequence of moves `col < size.cols` and `row < size.rows` hold
//! (for a non-empty window). Moving into an edge is a no-op, not a wrap.

use std::fmt;

use edi_term::geometry::Size;
use edi_term::input::Key;

/// One step of cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The direction an arrow key moves in, if `key` is an arrow.
    #[must_use]
    pub const fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::ArrowUp => Some(Self::Up),
            Key::ArrowDown => Some(Self::Down),
            Key::ArrowLeft => Some(Self::Left),
            Key::ArrowRight => Some(Self::Right),
            _ => None,
        }
    }
}

/// A cursor on the screen: (column, row), both 0-indexed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cursor {
    col: u16,
    row: u16,
}

impl Cursor {
    /// The top-left cell.
    pub const ORIGIN: Self = Self { col: 0, row: 0 };

    /// Create a cursor at the origin.
    #[must_use]
    pub const fn new() -> Self {
        Self::ORIGIN
    }

    // -- Accessors ----------------------------------------------------------

    /// Current column (0-indexed).
    #[inline]
    #[must_use]
    pub const fn col(self) -> u16 {
        self.col
    }

    /// Current row (0-indexed).
    #[inline]
    #[must_use]
    pub const fn row(self) -> u16 {
        self.row
    }

    /// True if the cursor sits inside a window of `size`.
    #[inline]
    #[must_use]
    pub const fn is_within(self, size: Size) -> bool {
        self.col < size.cols && self.row < size.rows
    }

    // -- Movement -----------------------------------------------------------

    /// Move one cell in `dir`, staying inside `bounds`.
    pub const fn step(&mut self, dir: Direction, bounds: Size) {
        match dir {
            Direction::Left => {
                if self.col > 0 {
                    self.col -= 1;
                }
            }
            Direction::Right => {
                if self.col.saturating_add(1) < bounds.cols {
                    self.col += 1;
                }
            }
            Direction::Up => {
                if self.row > 0 {
                    self.row -= 1;
                }
            }
            Direction::Down => {
                if self.row.saturating_add(1) < bounds.rows {
                    self.row += 1;
                }
            }
        }
    }
}

impl fmt::Debug for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cursor({}, {})", self.col, self.row)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SCREEN: Size = Size { rows: 24, cols: 80 };

    fn moved(start: Cursor, dirs: &[Direction], bounds: Size) -> Cursor {
        let mut c = start;
        for &d in dirs {
            c.step(d, bounds);
        }
        c
    }

    // -- Construction -------------------------------------------------------

    #[test]
    fn new_at_origin() {
        let c = Cursor::new();
        assert_eq!(c.col(), 0);
        assert_eq!(c.row(), 0);
    }

    #[test]
    fn default_is_new() {
        assert_eq!(Cursor::default(), Cursor::new());
    }

    #[test]
    fn debug_format() {
        let c = moved(Cursor::new(), &[Direction::Right, Direction::Down], SCREEN);
        assert_eq!(format!("{c:?}"), "Cursor(1, 1)");
    }

    // -- Direction ----------------------------------------------------------

    #[test]
    fn arrows_map_to_directions() {
        assert_eq!(Direction::from_key(Key::ArrowUp), Some(Direction::Up));
        assert_eq!(Direction::from_key(Key::ArrowDown), Some(Direction::Down));
        assert_eq!(Direction::from_key(Key::ArrowLeft), Some(Direction::Left));
        assert_eq!(Direction::from_key(Key::ArrowRight), Some(Direction::Right));
    }

    #[test]
    fn other_keys_have_no_direction() {
        assert_eq!(Direction::from_key(Key::Delete), None);
        assert_eq!(Direction::from_key(Key::Escape), None);
        assert_eq!(Direction::from_key(Key::Byte(b'h')), None);
    }

    // -- Movement -----------------------------------------------------------

    #[test]
    fn left_at_origin_stays() {
        let c = moved(Cursor::new(), &[Direction::Left], SCREEN);
        assert_eq!(c, Cursor::ORIGIN);
    }

    #[test]
    fn up_at_origin_stays() {
        let c = moved(Cursor::new(), &[Direction::Up], SCREEN);
        assert_eq!(c, Cursor::ORIGIN);
    }

    #[test]
    fn right_and_back() {
        let c = moved(
            Cursor::new(),
            &[Direction::Right, Direction::Right, Direction::Left],
            SCREEN,
        );
        assert_eq!((c.col(), c.row()), (1, 0));
    }

    #[test]
    fn right_stops_at_last_column() {
        let c = moved(Cursor::new(), &[Direction::Right; 200], SCREEN);
        assert_eq!(c.col(), 79);
    }

    #[test]
    fn down_stops_at_last_row() {
        let c = moved(Cursor::new(), &[Direction::Down; 100], SCREEN);
        assert_eq!(c.row(), 23);
    }

    #[test]
    fn single_cell_window_never_moves() {
        let one = Size { rows: 1, cols: 1 };
        let all = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
        assert_eq!(moved(Cursor::new(), &all, one), Cursor::ORIGIN);
    }

    #[test]
    fn empty_window_does_not_underflow() {
        let empty = Size { rows: 0, cols: 0 };
        let c = moved(Cursor::new(), &[Direction::Down, Direction::Right], empty);
        assert_eq!(c, Cursor::ORIGIN);
    }

    #[test]
    fn max_window_does_not_overflow() {
        let huge = Size { rows: u16::MAX, cols: u16::MAX };
        let c = moved(Cursor::new(), &[Direction::Right; 3], huge);
        assert_eq!(c.col(), 3);
    }

    // -- Properties ---------------------------------------------------------

    fn direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    proptest! {
        #[test]
        fn always_within_bounds(
            rows in 1u16..200,
            cols in 1u16..400,
            dirs in proptest::collection::vec(direction(), 0..500),
        ) {
            let bounds = Size { rows, cols };
            let mut c = Cursor::new();
            for d in dirs {
                c.step(d, bounds);
                prop_assert!(c.is_within(bounds), "{c:?} escaped {bounds:?}");
            }
        }
    }
}
