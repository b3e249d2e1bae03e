//! Per-player grid maps: generation and the persisted text encoding.
//!
//! A [`Grid`] is a square, row-major array of [`Terrain`] cells. It is produced
//! once by [`generate`] and then stored as text via [`Grid::encode`]. The
//! encoding is deliberately dumb and inert:
//!
//! ```text
//! 🌳,🌊,🌋
//! 🌱,🌳,🏔️
//! 🌊,🌊,🏜️
//! ```
//!
//! Rows are separated by `\n`, cells by `,`. [`Grid::decode`] accepts only
//! alphabet symbols and a square shape; anything else is a [`GridError`].

use rand::Rng;
use thiserror::Error;

use super::terrain::Terrain;

const ROW_SEPARATOR: &str = "\n";
const CELL_SEPARATOR: &str = ",";

/// Errors from building or decoding a grid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("terrain alphabet is empty")]
    EmptyAlphabet,

    #[error("grid size must be at least 1 (got {0})")]
    InvalidSize(usize),

    /// Stored text did not parse as a grid.
    #[error("malformed grid at row {row}: {reason}")]
    Malformed { row: usize, reason: String },
}

/// Square map of terrain cells addressed by `(row, col)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Terrain>,
}

impl Grid {
    /// Build from explicit rows. Rows must form a non-empty square.
    pub fn from_rows(rows: Vec<Vec<Terrain>>) -> Result<Self, GridError> {
        let size = rows.len();
        if size == 0 {
            return Err(GridError::InvalidSize(0));
        }
        let mut cells = Vec::with_capacity(size * size);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(GridError::Malformed {
                    row: i,
                    reason: format!("expected {} cells, found {}", size, row.len()),
                });
            }
            cells.extend(row);
        }
        Ok(Self { size, cells })
    }

    /// Side length (the grid is `size × size`).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<Terrain> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells.get(row * self.size + col).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Terrain]> {
        self.cells.chunks(self.size)
    }

    /// Serialize to the row-major text form described in the module docs.
    pub fn encode(&self) -> String {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|t| t.symbol())
                    .collect::<Vec<_>>()
                    .join(CELL_SEPARATOR)
            })
            .collect::<Vec<_>>()
            .join(ROW_SEPARATOR)
    }

    /// Parse text produced by [`Grid::encode`].
    pub fn decode(text: &str) -> Result<Self, GridError> {
        let mut rows = Vec::new();
        for (i, line) in text.split(ROW_SEPARATOR).enumerate() {
            let mut row = Vec::new();
            for (j, symbol) in line.split(CELL_SEPARATOR).enumerate() {
                let terrain = Terrain::from_symbol(symbol).ok_or_else(|| GridError::Malformed {
                    row: i,
                    reason: format!("unknown terrain symbol in column {}", j),
                })?;
                row.push(terrain);
            }
            rows.push(row);
        }
        Self::from_rows(rows)
    }
}

/// Generate a `size × size` grid with every cell drawn uniformly and
/// independently from `alphabet`.
pub fn generate(size: usize, alphabet: &[Terrain]) -> Result<Grid, GridError> {
    generate_with(&mut rand::thread_rng(), size, alphabet)
}

/// Same as [`generate`] with a caller-supplied RNG.
pub fn generate_with<R: Rng + ?Sized>(
    rng: &mut R,
    size: usize,
    alphabet: &[Terrain],
) -> Result<Grid, GridError> {
    if alphabet.is_empty() {
        return Err(GridError::EmptyAlphabet);
    }
    if size == 0 {
        return Err(GridError::InvalidSize(size));
    }
    let cells = (0..size * size)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect();
    Ok(Grid { size, cells })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generated_grid_is_square_and_in_alphabet() {
        let grid = generate(10, &Terrain::ALL).expect("grid");
        assert_eq!(grid.size(), 10);
        assert_eq!(grid.rows().count(), 10);
        for row in grid.rows() {
            assert_eq!(row.len(), 10);
            assert!(row.iter().all(|t| Terrain::ALL.contains(t)));
        }
    }

    #[test]
    fn restricted_alphabet_is_honoured() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = generate_with(&mut rng, 6, &[Terrain::Ocean]).expect("grid");
        assert!(grid.rows().flatten().all(|t| *t == Terrain::Ocean));
    }

    #[test]
    fn generation_rejects_degenerate_inputs() {
        assert_eq!(generate(3, &[]), Err(GridError::EmptyAlphabet));
        assert_eq!(generate(0, &Terrain::ALL), Err(GridError::InvalidSize(0)));
    }

    #[test]
    fn encoding_survives_decode() {
        let mut rng = StdRng::seed_from_u64(42);
        let grid = generate_with(&mut rng, 10, &Terrain::ALL).expect("grid");
        let text = grid.encode();
        assert_eq!(text.lines().count(), 10);
        let back = Grid::decode(&text).expect("decode");
        assert_eq!(back, grid);
        for r in 0..10 {
            for c in 0..10 {
                assert_eq!(back.get(r, c), grid.get(r, c));
            }
        }
    }

    #[test]
    fn decode_known_layout() {
        let text = "🌳,🌊\n🏔\u{fe0f},🌱";
        let grid = Grid::decode(text).expect("decode");
        assert_eq!(grid.get(0, 0), Some(Terrain::Forest));
        assert_eq!(grid.get(0, 1), Some(Terrain::Ocean));
        assert_eq!(grid.get(1, 0), Some(Terrain::Mountain));
        assert_eq!(grid.get(1, 1), Some(Terrain::Sprout));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 2), None);
    }

    #[test]
    fn decode_rejects_foreign_text() {
        assert!(Grid::decode("").is_err());
        assert!(Grid::decode("[['🌳']]").is_err());
        assert!(Grid::decode("__import__('os')").is_err());
        // ragged
        assert!(Grid::decode("🌳,🌊\n🌱").is_err());
        // not square
        assert!(Grid::decode("🌳,🌊").is_err());
        // trailing separator yields an empty cell
        assert!(Grid::decode("🌳\n").is_err());
    }
}
