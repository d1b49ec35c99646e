//! The letter grid: tiles, seeded generation, and lookups.
//!
//! A board covers every coordinate within a fixed radius of the origin, one tile
//! per coordinate. Generation first walks a randomly chosen seed word outward
//! from the center so at least one long word is present, then fills the rest of
//! the region from the frequency-weighted letter pool.

use crate::config::{ConfigError, GameConfig, MAX_RADIUS};
use crate::hex::{are_neighbors, hexes_within, HexCoord, DIRECTIONS};
use crate::letters::{LetterPool, LetterScores, SeedWords};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// A single lettered hex on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Position on the hex grid
    pub coord: HexCoord,
    /// Uppercase letter shown on the tile
    pub letter: char,
    /// Points this tile adds to any word that uses it
    pub points: u32,
    /// Whether the tile is part of the player's in-progress path
    pub used: bool,
}

impl Tile {
    /// Create an unused tile
    pub fn new(coord: HexCoord, letter: char, points: u32) -> Self {
        Self {
            coord,
            letter: letter.to_ascii_uppercase(),
            points,
            used: false,
        }
    }
}

/// Where the seed word ended up during generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPlacement {
    /// The chosen seed word, uppercase
    pub word: String,
    /// Coordinates of the placed letters, in word order
    pub path: Vec<HexCoord>,
    /// False when the walk ran out of free neighbors before the last letter
    pub complete: bool,
}

impl SeedPlacement {
    /// The letters that actually made it onto the board
    pub fn placed_word(&self) -> String {
        self.word.chars().take(self.path.len()).collect()
    }
}

/// Produces seeded boards from the letter data
#[derive(Debug, Clone, Default)]
pub struct BoardGenerator {
    pub seeds: SeedWords,
    pub pool: LetterPool,
    pub scores: LetterScores,
}

impl BoardGenerator {
    /// Create a generator from explicit letter data
    pub fn new(seeds: SeedWords, pool: LetterPool, scores: LetterScores) -> Self {
        Self { seeds, pool, scores }
    }

    /// Generate a board using the thread RNG
    pub fn generate(&self, config: &GameConfig) -> Result<Board, ConfigError> {
        let mut rng = rand::thread_rng();
        self.generate_with_rng(config, &mut rng)
    }

    /// Generate a board with a provided RNG.
    /// This allows for deterministic board generation when needed
    pub fn generate_with_rng<R: Rng>(
        &self,
        config: &GameConfig,
        rng: &mut R,
    ) -> Result<Board, ConfigError> {
        config.validate()?;

        let seed_word = self.seeds.choose(rng).to_ascii_uppercase();
        let (mut letters, seed) = place_seed(&seed_word, config.radius);

        for coord in hexes_within(config.radius) {
            if !letters.contains_key(&coord) {
                letters.insert(coord, self.pool.draw(rng));
            }
        }

        let mut board = Board::from_letters(config.radius, &letters, &self.scores)?;
        debug!(
            seed = %seed.word,
            placed = seed.path.len(),
            complete = seed.complete,
            tiles = board.len(),
            "Generated board"
        );
        board.seed = Some(seed);
        Ok(board)
    }
}

/// Walk the seed word out from the origin.
///
/// Each letter goes to the first direction in [`DIRECTIONS`] whose coordinate is inside
/// the region and still free. When no direction qualifies the walk stops and the rest of
/// the word is dropped.
///
/// Steps never leave the region, so more of the word stays visible than with a walk that
/// always heads east: on a radius 4 board every shipped seed word lands in full.
fn place_seed(word: &str, radius: u32) -> (HashMap<HexCoord, char>, SeedPlacement) {
    let mut letters = HashMap::new();
    let mut path = Vec::new();
    let mut chars = word.chars();

    if let Some(first) = chars.next() {
        let mut current = HexCoord::ORIGIN;
        letters.insert(current, first);
        path.push(current);

        for letter in chars {
            let next = DIRECTIONS
                .iter()
                .map(|&dir| current.offset(dir))
                .find(|coord| coord.is_within(radius) && !letters.contains_key(coord));

            match next {
                Some(coord) => {
                    letters.insert(coord, letter);
                    path.push(coord);
                    current = coord;
                }
                None => {
                    debug!(word, placed = path.len(), "Seed walk boxed in, truncating");
                    break;
                }
            }
        }
    }

    let complete = path.len() == word.chars().count();
    let seed = SeedPlacement {
        word: word.to_string(),
        path,
        complete,
    };
    (letters, seed)
}

/// The complete letter grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "BoardJson", try_from = "BoardJson")]
pub struct Board {
    radius: u32,
    /// Tiles ordered by q then r
    tiles: Vec<Tile>,
    /// Coordinate to position in `tiles`
    index: HashMap<HexCoord, usize>,
    /// Adjacent tile positions for each tile
    adjacency: Vec<Vec<usize>>,
    /// Seed placement, for generated boards
    seed: Option<SeedPlacement>,
}

impl Board {
    /// Build a board from an explicit coordinate to letter map.
    ///
    /// Every coordinate in the region must have a letter; letters outside the region
    /// are ignored.
    pub fn from_letters(
        radius: u32,
        letters: &HashMap<HexCoord, char>,
        scores: &LetterScores,
    ) -> Result<Self, ConfigError> {
        let tiles = hexes_within(radius)
            .into_iter()
            .map(|coord| {
                let letter = letters
                    .get(&coord)
                    .copied()
                    .ok_or(ConfigError::IncompleteBoard(coord))?;
                Ok(Tile::new(coord, letter, scores.points(letter)))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Self::from_tiles(radius, tiles, None)
    }

    /// Build a board from prepared tiles, checking full coverage of the region
    pub fn from_tiles(
        radius: u32,
        mut tiles: Vec<Tile>,
        seed: Option<SeedPlacement>,
    ) -> Result<Self, ConfigError> {
        if radius > MAX_RADIUS {
            return Err(ConfigError::RadiusOutOfRange(radius));
        }

        tiles.sort_by_key(|t| t.coord);
        let mut index = HashMap::with_capacity(tiles.len());
        for (i, tile) in tiles.iter().enumerate() {
            if !tile.coord.is_within(radius) || index.insert(tile.coord, i).is_some() {
                return Err(ConfigError::UnexpectedTile(tile.coord));
            }
        }
        if let Some(missing) = hexes_within(radius).into_iter().find(|c| !index.contains_key(c)) {
            return Err(ConfigError::IncompleteBoard(missing));
        }

        let adjacency = tiles
            .iter()
            .map(|tile| {
                tiles
                    .iter()
                    .enumerate()
                    .filter(|(_, other)| are_neighbors(&tile.coord, &other.coord))
                    .map(|(i, _)| i)
                    .collect()
            })
            .collect();

        Ok(Self {
            radius,
            tiles,
            index,
            adjacency,
            seed,
        })
    }

    /// Parse a board from rows of letters, top row first.
    ///
    /// Row `i` holds the tiles with `r = i - radius`, ordered by increasing `q`.
    /// Whitespace inside a row is ignored, so rows may be indented to look hexagonal.
    /// There must be exactly `2 * radius + 1` rows, each with one letter per cell.
    pub fn from_rows(radius: u32, rows: &[&str], scores: &LetterScores) -> Result<Self, ConfigError> {
        let bound = radius as i32;
        let expected_rows = 2 * radius as usize + 1;
        if rows.len() != expected_rows {
            return Err(ConfigError::RowCount {
                expected: expected_rows,
                found: rows.len(),
            });
        }

        let mut letters = HashMap::new();
        for (row, text) in rows.iter().enumerate() {
            let r = row as i32 - bound;
            let coords: Vec<HexCoord> = (-bound..=bound)
                .map(|q| HexCoord::new(q, r))
                .filter(|c| c.is_within(radius))
                .collect();
            let row_letters: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
            if row_letters.len() != coords.len() {
                return Err(ConfigError::RowLength {
                    row,
                    expected: coords.len(),
                    found: row_letters.len(),
                });
            }
            letters.extend(coords.into_iter().zip(row_letters));
        }
        Self::from_letters(radius, &letters, scores)
    }

    /// Board radius
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the board has no tiles (never true for a constructed board)
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All tiles, ordered by q then r
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Get the tile at a coordinate
    pub fn tile(&self, coord: &HexCoord) -> Option<&Tile> {
        self.index.get(coord).map(|&i| &self.tiles[i])
    }

    /// Position of a coordinate in [`Board::tiles`]
    pub fn index_of(&self, coord: &HexCoord) -> Option<usize> {
        self.index.get(coord).copied()
    }

    /// Positions of the tiles adjacent to the tile at `index`
    pub(crate) fn neighbor_indices(&self, index: usize) -> &[usize] {
        &self.adjacency[index]
    }

    /// The seed placement, if this board was generated
    pub fn seed(&self) -> Option<&SeedPlacement> {
        self.seed.as_ref()
    }

    /// Coordinate to letter map
    pub fn letters(&self) -> HashMap<HexCoord, char> {
        self.tiles.iter().map(|t| (t.coord, t.letter)).collect()
    }

    /// Mark a tile as part of (or no longer part of) the current path.
    /// Returns false when the coordinate is not on the board.
    pub fn set_used(&mut self, coord: &HexCoord, used: bool) -> bool {
        match self.index.get(coord) {
            Some(&i) => {
                self.tiles[i].used = used;
                true
            }
            None => false,
        }
    }

    /// Reset every tile's `used` flag
    pub fn clear_used(&mut self) {
        for tile in &mut self.tiles {
            tile.used = false;
        }
    }

    /// Convert to a JSON-friendly representation with arrays instead of HashMaps
    pub fn to_json_friendly(&self) -> BoardJson {
        BoardJson {
            radius: self.radius,
            tiles: self.tiles.clone(),
            seed: self.seed.clone(),
        }
    }
}

/// JSON-friendly board representation with arrays instead of HashMaps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardJson {
    pub radius: u32,
    pub tiles: Vec<Tile>,
    pub seed: Option<SeedPlacement>,
}

impl From<Board> for BoardJson {
    fn from(board: Board) -> Self {
        BoardJson {
            radius: board.radius,
            tiles: board.tiles,
            seed: board.seed,
        }
    }
}

impl TryFrom<BoardJson> for Board {
    type Error = ConfigError;

    fn try_from(json: BoardJson) -> Result<Self, Self::Error> {
        Board::from_tiles(json.radius, json.tiles, json.seed)
    }
}
