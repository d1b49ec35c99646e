//! Scored words, the session leaderboard, and the end-of-game summary.

use serde::{Deserialize, Serialize};

/// A word together with the points its path earned
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoredWord {
    /// Lowercase word
    pub word: String,
    /// Sum of the point values of the tiles spelling it
    pub score: u32,
}

impl ScoredWord {
    pub fn new(word: impl Into<String>, score: u32) -> Self {
        Self {
            word: word.into(),
            score,
        }
    }

    /// Number of letters in the word
    pub fn letter_count(&self) -> usize {
        self.word.chars().count()
    }
}

/// Bounded list of the best scores, kept sorted from highest to lowest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    capacity: usize,
    entries: Vec<ScoredWord>,
}

impl Leaderboard {
    /// Create an empty leaderboard holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity + 1),
        }
    }

    /// Insert an entry, evicting the lowest score when full.
    ///
    /// Ties keep insertion order. Returns the entry's rank (0 is best), or `None`
    /// when it did not make the board.
    pub fn insert(&mut self, entry: ScoredWord) -> Option<usize> {
        let rank = self.entries.partition_point(|e| e.score >= entry.score);
        if rank >= self.capacity {
            return None;
        }
        self.entries.insert(rank, entry);
        self.entries.truncate(self.capacity);
        Some(rank)
    }

    /// Entries from best to worst
    pub fn entries(&self) -> &[ScoredWord] {
        &self.entries
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The highest score so far
    pub fn best(&self) -> Option<&ScoredWord> {
        self.entries.first()
    }
}

/// What the player sees once the game is over
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Sum of every accepted submission's score
    pub total_score: u32,
    /// Accepted submissions, longest words first
    pub words_by_length: Vec<ScoredWord>,
    /// Best words the board-wide search found, highest score first
    pub top_findings: Vec<ScoredWord>,
    /// How many findings the search produced in total
    pub findings_count: usize,
}

/// Sort by letter count, longest first; equal lengths keep their order
pub fn sort_by_length(words: &[ScoredWord]) -> Vec<ScoredWord> {
    let mut sorted = words.to_vec();
    sorted.sort_by(|a, b| b.letter_count().cmp(&a.letter_count()));
    sorted
}

/// Sort by score, highest first, and keep the first `n`; ties keep their order
pub fn top_n(words: &[ScoredWord], n: usize) -> Vec<ScoredWord> {
    let mut sorted = words.to_vec();
    sorted.sort_by(|a, b| b.score.cmp(&a.score));
    sorted.truncate(n);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_leaderboard_keeps_top_ten() {
        let mut board = Leaderboard::new(10);
        for score in [5, 12, 3, 8, 20, 1, 7, 15, 9, 11, 2, 18, 6, 14, 4] {
            board.insert(ScoredWord::new(format!("w{score}"), score));
        }

        let scores: Vec<u32> = board.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![20, 18, 15, 14, 12, 11, 9, 8, 7, 6]);
        assert_eq!(board.len(), 10);
        assert_eq!(board.best().unwrap().word, "w20");
    }

    #[test]
    fn test_leaderboard_insert_rank() {
        let mut board = Leaderboard::new(2);
        assert_eq!(board.insert(ScoredWord::new("rate", 4)), Some(0));
        assert_eq!(board.insert(ScoredWord::new("quiz", 22)), Some(0));
        assert_eq!(board.insert(ScoredWord::new("tear", 4)), None);
        assert_eq!(board.insert(ScoredWord::new("jazz", 29)), Some(0));

        let words: Vec<&str> = board.entries().iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["jazz", "quiz"]);
    }

    #[test]
    fn test_leaderboard_ties_keep_insertion_order() {
        let mut board = Leaderboard::new(3);
        board.insert(ScoredWord::new("rate", 4));
        board.insert(ScoredWord::new("tear", 4));
        board.insert(ScoredWord::new("tare", 4));
        let words: Vec<&str> = board.entries().iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["rate", "tear", "tare"]);
    }

    #[test]
    fn test_sort_by_length() {
        let words = vec![
            ScoredWord::new("rate", 4),
            ScoredWord::new("stone", 5),
            ScoredWord::new("tear", 4),
            ScoredWord::new("readers", 8),
        ];
        let sorted: Vec<String> = sort_by_length(&words).into_iter().map(|w| w.word).collect();
        assert_eq!(sorted, vec!["readers", "stone", "rate", "tear"]);
    }

    #[test]
    fn test_top_n() {
        let words = vec![
            ScoredWord::new("rate", 4),
            ScoredWord::new("quiz", 22),
            ScoredWord::new("stone", 5),
        ];
        assert_eq!(
            top_n(&words, 2),
            vec![ScoredWord::new("quiz", 22), ScoredWord::new("stone", 5)]
        );
        assert_eq!(top_n(&words, 10).len(), 3);
    }
}
