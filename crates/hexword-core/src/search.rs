//! Board-wide word search.
//!
//! Every tile is tried as the start of a path. From there a depth-first search
//! extends the path through unvisited neighbors, recording each dictionary word of
//! acceptable length along the way. Branches stop at the length cap, or as soon as
//! no dictionary word starts with the letters gathered so far.
//!
//! The visited set is a bitmask handed to each recursive call by value, so a branch
//! never sees tiles marked by a sibling and nothing on the board is mutated.

use crate::board::Board;
use crate::config::GameConfig;
use crate::dictionary::Lexicon;
use crate::scoring::ScoredWord;
use std::collections::HashMap;
use tracing::debug;

/// Length limits for a board-wide search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordSearch {
    /// Shortest word recorded
    pub min_length: usize,
    /// Longest path explored
    pub max_length: usize,
}

impl Default for WordSearch {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl WordSearch {
    pub fn new(min_length: usize, max_length: usize) -> Self {
        Self {
            min_length,
            max_length,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.min_word_length, config.max_search_length)
    }

    /// Every word reachable on the board, one entry per distinct path.
    ///
    /// The same word spelled along two different paths is reported twice.
    pub fn find_all<L: Lexicon + ?Sized>(&self, board: &Board, lexicon: &L) -> Vec<ScoredWord> {
        let mut walker = Walker {
            board,
            lexicon,
            limits: *self,
            word: String::with_capacity(self.max_length),
            findings: Vec::new(),
            nodes: 0,
        };

        for (start, tile) in board.tiles().iter().enumerate() {
            walker.word.push(tile.letter.to_ascii_lowercase());
            if lexicon.has_prefix(&walker.word) {
                walker.extend(start, 1u128 << start, tile.points);
            }
            walker.word.pop();
        }

        debug!(
            tiles = board.len(),
            nodes = walker.nodes,
            findings = walker.findings.len(),
            "Board-wide search finished"
        );
        walker.findings
    }
}

/// Mutable state of one search run
struct Walker<'a, L: ?Sized> {
    board: &'a Board,
    lexicon: &'a L,
    limits: WordSearch,
    /// Letters of the current path
    word: String,
    findings: Vec<ScoredWord>,
    nodes: usize,
}

impl<L: Lexicon + ?Sized> Walker<'_, L> {
    /// Visit the tile at `current`, whose letter is already the last one in `self.word`
    fn extend(&mut self, current: usize, visited: u128, score: u32) {
        self.nodes += 1;
        let depth = self.word.chars().count();

        if depth >= self.limits.min_length && self.lexicon.contains(&self.word) {
            self.findings.push(ScoredWord::new(self.word.clone(), score));
        }
        if depth >= self.limits.max_length {
            return;
        }

        let board = self.board;
        for &next in board.neighbor_indices(current) {
            let bit = 1u128 << next;
            if visited & bit != 0 {
                continue;
            }
            let tile = &board.tiles()[next];
            self.word.push(tile.letter.to_ascii_lowercase());
            if self.lexicon.has_prefix(&self.word) {
                self.extend(next, visited | bit, score + tile.points);
            }
            self.word.pop();
        }
    }
}

/// Keep one entry per word (its best score), in order of first appearance
pub fn distinct(findings: &[ScoredWord]) -> Vec<ScoredWord> {
    let mut best: HashMap<&str, usize> = HashMap::new();
    let mut unique: Vec<ScoredWord> = Vec::new();

    for finding in findings {
        match best.get(finding.word.as_str()) {
            Some(&i) => {
                if finding.score > unique[i].score {
                    unique[i].score = finding.score;
                }
            }
            None => {
                best.insert(&finding.word, unique.len());
                unique.push(finding.clone());
            }
        }
    }
    unique
}
