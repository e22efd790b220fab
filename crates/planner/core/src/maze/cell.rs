use std::fmt;

/// Closed set of cell kinds a maze snapshot can contain.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CellType {
    Wall,
    #[default]
    Path,
    Gold,
    HealthPotion,
    Trap,
    Locker,
    Shop,
    Boss,
    Start,
    End,
}

impl CellType {
    /// Decodes a single-character cell code.
    ///
    /// | code | cell |
    /// |------|------|
    /// | `#` | wall |
    /// | ` ` / `.` | path |
    /// | `S` / `E` | start / end |
    /// | `B` | boss |
    /// | `L` | locker |
    /// | `G` | gold |
    /// | `T` | trap |
    /// | `H` | health potion |
    /// | `$` | shop |
    pub const fn from_code(code: char) -> Option<Self> {
        Some(match code {
            '#' => Self::Wall,
            ' ' | '.' => Self::Path,
            'S' => Self::Start,
            'E' => Self::End,
            'B' => Self::Boss,
            'L' => Self::Locker,
            'G' => Self::Gold,
            'T' => Self::Trap,
            'H' => Self::HealthPotion,
            '$' => Self::Shop,
            _ => return None,
        })
    }

    /// Canonical code used when rendering a snapshot back to text.
    pub const fn code(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Path => '.',
            Self::Start => 'S',
            Self::End => 'E',
            Self::Boss => 'B',
            Self::Locker => 'L',
            Self::Gold => 'G',
            Self::Trap => 'T',
            Self::HealthPotion => 'H',
            Self::Shop => '$',
        }
    }

    pub const fn is_walkable(self) -> bool {
        !matches!(self, Self::Wall)
    }

    /// Cells that are consumed on first contact and tracked in the collected mask.
    pub const fn is_resource(self) -> bool {
        matches!(self, Self::Gold | Self::HealthPotion | Self::Trap)
    }
}

/// Discrete grid position expressed in cell coordinates (`x` column, `y` row).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Neighbour offsets in expansion order: down, right, up, left.
    pub const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn is_adjacent(self, other: Position) -> bool {
        self.manhattan(other) == 1
    }

    /// The four orthogonal neighbours, unchecked against any bounds.
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        Self::DIRECTIONS
            .into_iter()
            .map(move |(dx, dy)| Position::new(self.x + dx, self.y + dy))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn codes_round_trip() {
        for cell in CellType::iter() {
            assert_eq!(CellType::from_code(cell.code()), Some(cell));
        }
        assert_eq!(CellType::from_code(' '), Some(CellType::Path));
        assert_eq!(CellType::from_code('?'), None);
    }

    #[test]
    fn manhattan_distance() {
        assert_eq!(Position::new(1, 1).manhattan(Position::new(4, 3)), 5);
        assert!(Position::new(2, 2).is_adjacent(Position::new(2, 3)));
        assert!(!Position::new(2, 2).is_adjacent(Position::new(3, 3)));
    }

    #[test]
    fn display_uses_snake_case() {
        assert_eq!(CellType::HealthPotion.to_string(), "health_potion");
    }
}
