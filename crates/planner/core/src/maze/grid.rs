use super::{CellType, MazeError, Position};

/// Read-only snapshot of a maze grid.
///
/// Planners borrow a `Maze` and never mutate it. Hosts that want to reflect
/// an executed plan build a fresh snapshot with [`Maze::with_path_applied`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Maze {
    width: u32,
    height: u32,
    cells: Vec<CellType>,
    start: Position,
    end: Position,
}

impl Maze {
    /// Builds a snapshot from rows of single-character cell codes.
    ///
    /// Rows must be non-empty and of equal length, and the grid must contain
    /// exactly one START and one END cell.
    pub fn from_rows<R: AsRef<str>>(rows: &[R]) -> Result<Self, MazeError> {
        if rows.is_empty() {
            return Err(MazeError::Empty);
        }

        let width = rows[0].as_ref().chars().count();
        if width == 0 {
            return Err(MazeError::Empty);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        let mut start = None;
        let mut end = None;

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let len = row.chars().count();
            if len != width {
                return Err(MazeError::RaggedRow {
                    row: y,
                    expected: width,
                    found: len,
                });
            }
            for (x, code) in row.chars().enumerate() {
                let cell = CellType::from_code(code).ok_or(MazeError::UnknownCode {
                    code,
                    position: Position::new(x as i32, y as i32),
                })?;
                let position = Position::new(x as i32, y as i32);
                match cell {
                    CellType::Start if start.replace(position).is_some() => {
                        return Err(MazeError::DuplicateStart(position));
                    }
                    CellType::End if end.replace(position).is_some() => {
                        return Err(MazeError::DuplicateEnd(position));
                    }
                    _ => {}
                }
                cells.push(cell);
            }
        }

        Ok(Self {
            width: width as u32,
            height: rows.len() as u32,
            cells,
            start: start.ok_or(MazeError::MissingStart)?,
            end: end.ok_or(MazeError::MissingEnd)?,
        })
    }

    /// Parses newline-separated rows. Trailing carriage returns and blank
    /// trailing lines are ignored.
    pub fn parse(text: &str) -> Result<Self, MazeError> {
        let rows: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .collect();
        let last = rows
            .iter()
            .rposition(|row| !row.is_empty())
            .ok_or(MazeError::Empty)?;
        Self::from_rows(&rows[..=last])
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    pub const fn start(&self) -> Position {
        self.start
    }

    pub const fn end(&self) -> Position {
        self.end
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }

    /// Cell at `position`, or `None` outside the grid.
    pub fn cell(&self, position: Position) -> Option<CellType> {
        self.index(position).map(|index| self.cells[index])
    }

    /// In bounds and not a wall.
    pub fn is_walkable(&self, position: Position) -> bool {
        self.cell(position).is_some_and(CellType::is_walkable)
    }

    /// Walkable orthogonal neighbours in expansion order.
    pub fn walkable_neighbors(&self, position: Position) -> impl Iterator<Item = Position> + '_ {
        position
            .neighbors()
            .filter(move |next| self.is_walkable(*next))
    }

    /// The boss checkpoint: the first BOSS cell in row-major order.
    pub fn boss(&self) -> Option<Position> {
        self.positions_of(CellType::Boss).next()
    }

    /// Positions holding `kind`, in row-major order.
    pub fn positions_of(&self, kind: CellType) -> impl Iterator<Item = Position> + '_ {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, cell)| **cell == kind)
            .map(move |(index, _)| Position::new((index % width) as i32, (index / width) as i32))
    }

    /// All walkable positions, in row-major order.
    pub fn walkable_positions(&self) -> impl Iterator<Item = Position> + '_ {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_walkable())
            .map(move |(index, _)| Position::new((index % width) as i32, (index / width) as i32))
    }

    /// Renders the snapshot back to rows of canonical cell codes.
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width as usize)
            .map(|row| row.iter().map(|cell| cell.code()).collect())
            .collect()
    }

    /// Returns a new snapshot in which every resource and boss visited along
    /// `path` has been consumed (turned into PATH).
    pub fn with_path_applied(&self, path: &[Position]) -> Self {
        let mut next = self.clone();
        for position in path {
            if let Some(index) = next.index(*position) {
                let cell = &mut next.cells[index];
                if cell.is_resource() || *cell == CellType::Boss {
                    *cell = CellType::Path;
                }
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Maze {
        Maze::from_rows(&["#####", "#SGB#", "#.#E#", "#####"]).expect("valid maze")
    }

    #[test]
    fn parses_start_end_and_boss() {
        let maze = sample();
        assert_eq!(maze.width(), 5);
        assert_eq!(maze.height(), 4);
        assert_eq!(maze.start(), Position::new(1, 1));
        assert_eq!(maze.end(), Position::new(3, 2));
        assert_eq!(maze.boss(), Some(Position::new(3, 1)));
    }

    #[test]
    fn cells_outside_grid_are_none() {
        let maze = sample();
        assert_eq!(maze.cell(Position::new(-1, 0)), None);
        assert_eq!(maze.cell(Position::new(5, 0)), None);
        assert!(!maze.is_walkable(Position::new(0, 0)));
        assert!(maze.is_walkable(Position::new(1, 2)));
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = Maze::from_rows(&["###", "#S", "#E#"]).unwrap_err();
        assert_eq!(
            err,
            MazeError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn rejects_missing_and_duplicate_markers() {
        assert_eq!(Maze::from_rows(&["#S#"]).unwrap_err(), MazeError::MissingEnd);
        assert_eq!(
            Maze::from_rows(&["SSE"]).unwrap_err(),
            MazeError::DuplicateStart(Position::new(1, 0))
        );
        assert!(matches!(
            Maze::from_rows(&["S?E"]).unwrap_err(),
            MazeError::UnknownCode { code: '?', .. }
        ));
    }

    #[test]
    fn parse_ignores_trailing_blank_lines() {
        let maze = Maze::parse("#S.E#\r\n\n").expect("valid maze");
        assert_eq!(maze.to_rows(), vec!["#S.E#".to_string()]);
    }

    #[test]
    fn applying_a_path_consumes_resources_only() {
        let maze = sample();
        let applied = maze.with_path_applied(&[
            Position::new(1, 1),
            Position::new(2, 1),
            Position::new(3, 1),
        ]);
        assert_eq!(applied.cell(Position::new(2, 1)), Some(CellType::Path));
        assert_eq!(applied.cell(Position::new(3, 1)), Some(CellType::Path));
        assert_eq!(applied.cell(Position::new(1, 1)), Some(CellType::Start));
        assert_eq!(maze.cell(Position::new(2, 1)), Some(CellType::Gold));
    }
}
