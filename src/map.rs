use glam::Vec2;
use std::fs::read_to_string;
use std::path::Path;

/// tile edge length used by the built-in map
pub const TILE_SIZE: f32 = 32.;

const DEFAULT_MAP: &str = "\
111111111111111
100000000000101
100001000000101
111100000010101
100000000010101
100000001111101
100000000000001
100000000000001
111111000111101
100000000000001
111111111111111
";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cell {
    Open,
    Wall,
}

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("map has no cells")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("tile size must be a positive finite number, got {0}")]
    BadTileSize(f32),

    #[error("border cell at row {row}, column {col} is open")]
    OpenBorder { row: usize, col: usize },

    #[error("invalid tile `{tile}` at row {row}, column {col}")]
    InvalidTile { tile: char, row: usize, col: usize },

    #[error("could not read map: {0}")]
    Io(#[from] std::io::Error),
}

/// static grid of open and wall cells, fixed at construction.
/// any point outside `[0, width) x [0, height)` counts as a wall
#[derive(Clone, PartialEq, Debug)]
pub struct TileGrid {
    rows: usize,
    cols: usize,
    tile_size: f32,
    cells: Vec<Cell>,
}

impl TileGrid {
    /// build a grid from rows of cells, rejecting ragged rows and open borders
    pub fn new(rows: Vec<Vec<Cell>>, tile_size: f32) -> Result<Self, MapError> {
        if !tile_size.is_finite() || tile_size <= 0. {
            return Err(MapError::BadTileSize(tile_size));
        }

        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if cols == 0 {
            return Err(MapError::Empty);
        }

        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != cols)
        {
            return Err(MapError::Ragged {
                row,
                expected: cols,
                found,
            });
        }

        let height = rows.len();
        let this = Self {
            rows: height,
            cols,
            tile_size,
            cells: rows.into_iter().flatten().collect(),
        };

        if let Some((row, col, _)) = this
            .iter_cells()
            .find(|&(row, col, cell)| this.is_border(row, col) && cell == Cell::Open)
        {
            return Err(MapError::OpenBorder { row, col });
        }

        log::debug!(
            "validated {}x{} map with tile size {}",
            this.rows,
            this.cols,
            this.tile_size
        );

        Ok(this)
    }

    /// parse a text map, one line per row: `1`/`#` is a wall, `0`/`.`/space
    /// is open, blank lines and `;` comments are skipped
    pub fn parse(text: &str, tile_size: f32) -> Result<Self, MapError> {
        let rows = text
            .lines()
            .filter(|line| !line.trim().is_empty() && !line.starts_with(';'))
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, tile)| match tile {
                        '1' | '#' => Ok(Cell::Wall),
                        '0' | '.' | ' ' => Ok(Cell::Open),
                        other => Err(MapError::InvalidTile {
                            tile: other,
                            row,
                            col,
                        }),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(rows, tile_size)
    }

    pub fn load(path: impl AsRef<Path>, tile_size: f32) -> Result<Self, MapError> {
        let path = path.as_ref();
        log::info!("loading map at {}", path.display());
        Self::parse(&read_to_string(path)?, tile_size)
    }

    /// the 11x15 layout the engine ships with
    pub fn default_map(tile_size: f32) -> Result<Self, MapError> {
        Self::parse(DEFAULT_MAP, tile_size)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// world width in length units
    pub fn width(&self) -> f32 {
        self.cols as f32 * self.tile_size
    }

    /// world height in length units
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.cells[row * self.cols + col])
    }

    pub fn in_bounds(&self, x: f32, y: f32) -> bool {
        (0. ..self.width()).contains(&x) && (0. ..self.height()).contains(&y)
    }

    /// the single wall oracle shared by movement and ray casting
    pub fn has_wall_at(&self, x: f32, y: f32) -> bool {
        if !self.in_bounds(x, y) {
            return true;
        }

        let col = (x / self.tile_size).floor() as usize;
        let row = (y / self.tile_size).floor() as usize;
        // float division can round up to `cols`/`rows` right at the far edge
        self.cell(row, col).map_or(true, |cell| cell == Cell::Wall)
    }

    pub fn has_wall_at_vec(&self, pos: Vec2) -> bool {
        self.has_wall_at(pos.x, pos.y)
    }

    /// top-left world coordinate of a cell
    pub fn cell_origin(&self, row: usize, col: usize) -> Vec2 {
        Vec2::new(col as f32 * self.tile_size, row as f32 * self.tile_size)
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| (idx / self.cols, idx % self.cols, *cell))
    }

    fn is_border(&self, row: usize, col: usize) -> bool {
        row == 0 || col == 0 || row + 1 == self.rows || col + 1 == self.cols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bordered(rows: usize, cols: usize) -> Vec<Vec<Cell>> {
        (0..rows)
            .map(|r| {
                (0..cols)
                    .map(|c| {
                        if r == 0 || c == 0 || r + 1 == rows || c + 1 == cols {
                            Cell::Wall
                        } else {
                            Cell::Open
                        }
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn default_map_dimensions() {
        let grid = TileGrid::default_map(TILE_SIZE).unwrap();
        assert_eq!(grid.rows(), 11);
        assert_eq!(grid.cols(), 15);
        assert_eq!(grid.width(), 15. * 32.);
        assert_eq!(grid.height(), 11. * 32.);
        assert_eq!(grid.cell(2, 5), Some(Cell::Wall));
        assert_eq!(grid.cell(1, 1), Some(Cell::Open));
        assert_eq!(grid.cell(11, 0), None);
    }

    #[test]
    fn out_of_bounds_is_wall() {
        let grid = TileGrid::new(bordered(3, 3), 64.).unwrap();
        assert!(grid.has_wall_at(-0.5, 100.));
        assert!(grid.has_wall_at(100., -0.01));
        // the far edge itself is outside the world
        assert!(grid.has_wall_at(192., 100.));
        assert!(grid.has_wall_at(100., 192.));
        assert!(!grid.has_wall_at(100., 100.));
    }

    #[test]
    fn floor_division_picks_cell() {
        let grid = TileGrid::new(bordered(3, 3), 64.).unwrap();
        // the boundary x = 64 belongs to the open middle cell, x just below to the wall
        assert!(!grid.has_wall_at(64., 64.));
        assert!(grid.has_wall_at(63.999, 64.));
        assert!(!grid.has_wall_at(127.999, 127.999));
        assert!(grid.has_wall_at(128., 127.));
    }

    #[test]
    fn has_wall_at_is_pure() {
        let grid = TileGrid::default_map(TILE_SIZE).unwrap();
        for &(x, y) in &[(50., 50.), (170., 70.), (0., 0.), (479.9, 351.9)] {
            let first = grid.has_wall_at(x, y);
            for _ in 0..8 {
                assert_eq!(grid.has_wall_at(x, y), first);
            }
        }
    }

    #[test]
    fn rejects_ragged_rows() {
        let mut rows = bordered(4, 4);
        rows[2].pop();
        match TileGrid::new(rows, 32.) {
            Err(MapError::Ragged {
                row: 2,
                expected: 4,
                found: 3,
            }) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn rejects_open_border() {
        let mut rows = bordered(4, 5);
        rows[3][2] = Cell::Open;
        assert!(matches!(
            TileGrid::new(rows, 32.),
            Err(MapError::OpenBorder { row: 3, col: 2 })
        ));
    }

    #[test]
    fn rejects_bad_tile_size_and_empty() {
        assert!(matches!(
            TileGrid::new(bordered(3, 3), 0.),
            Err(MapError::BadTileSize(_))
        ));
        assert!(matches!(
            TileGrid::new(bordered(3, 3), f32::NAN),
            Err(MapError::BadTileSize(_))
        ));
        assert!(matches!(TileGrid::new(vec![], 32.), Err(MapError::Empty)));
    }

    #[test]
    fn parse_accepts_both_notations() {
        let grid = TileGrid::parse("; comment\n####\n#. #\n\n1001\n1111\n", 16.).unwrap();
        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.cell(1, 1), Some(Cell::Open));
        assert_eq!(grid.cell(1, 2), Some(Cell::Open));
        assert_eq!(grid.cell(2, 1), Some(Cell::Open));
    }

    #[test]
    fn parse_reports_invalid_tile() {
        assert!(matches!(
            TileGrid::parse("111\n1x1\n111", 16.),
            Err(MapError::InvalidTile {
                tile: 'x',
                row: 1,
                col: 1
            })
        ));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        assert!(matches!(
            TileGrid::load("definitely/not/a/map.txt", 32.),
            Err(MapError::Io(_))
        ));
    }
}
