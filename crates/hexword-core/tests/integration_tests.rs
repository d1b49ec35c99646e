//! Integration tests for the Hexword game engine.
//!
//! These tests play complete games from board generation through to the summary.

use hexword_core::path::path_word;
use hexword_core::*;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

/// Fixed 37-tile board (radius 3), rows top to bottom
///
/// ```text
///     S T O N
///    E A R E D
///   N O T E S X
///  D I R A T E S
///   L A N E S K
///    T O N E R
///     Q U I Z
/// ```
fn fixture_board() -> Board {
    Board::from_rows(
        3,
        &[
            "   STON",
            "  EARED",
            " NOTESX",
            "DIRATES",
            "LANESK ",
            "TONER  ",
            "QUIZ   ",
        ],
        &LetterScores::default(),
    )
    .unwrap()
}

fn dictionary() -> Arc<Dictionary> {
    Arc::new(
        Dictionary::from_words([
            "stone", "notes", "tones", "rate", "tear", "earn", "near", "tone", "note", "toner",
            "lane", "lanes", "stare", "tare", "dirt", "quiz", "seat", "east",
        ])
        .unwrap(),
    )
}

/// Play a word by following a path of coordinates, returning the submit events
fn play(game: &mut GameSession, path: &[HexCoord]) -> Vec<GameEvent> {
    for &coord in path {
        game.apply_action(GameAction::SelectTile(coord)).unwrap();
    }
    game.apply_action(GameAction::SubmitWord).unwrap()
}

/// Find any path on the board spelling `word` via a fresh search
fn path_for(board: &Board, word: &str) -> Vec<HexCoord> {
    fn walk(board: &Board, word: &[char], path: &mut Vec<HexCoord>) -> bool {
        if path.len() == word.len() {
            return true;
        }
        let candidates: Vec<HexCoord> = match path.last() {
            None => board.tiles().iter().map(|t| t.coord).collect(),
            Some(last) => last.neighbors().to_vec(),
        };
        for coord in candidates {
            let Some(tile) = board.tile(&coord) else { continue };
            if path.contains(&coord) || tile.letter != word[path.len()] {
                continue;
            }
            path.push(coord);
            if walk(board, word, path) {
                return true;
            }
            path.pop();
        }
        false
    }

    let letters: Vec<char> = word.to_ascii_uppercase().chars().collect();
    let mut path = Vec::new();
    assert!(walk(board, &letters, &mut path), "{word} is not on the board");
    path
}

#[test]
fn test_fixture_board_is_complete() {
    let board = fixture_board();
    assert_eq!(board.len(), 37);
    for coord in hexes_within(3) {
        assert!(board.tile(&coord).is_some());
    }
}

#[test]
fn test_full_game_reaches_summary() {
    let config = GameConfig {
        radius: 3,
        submissions_per_game: 3,
        ..GameConfig::default()
    };
    let mut game = GameSession::with_board(config, fixture_board(), dictionary()).unwrap();
    let board = game.board().clone();

    for word in ["stone", "rate", "quiz"] {
        let path = path_for(&board, word);
        assert_eq!(path_word(&board, &path).as_deref(), Some(word));
        let events = play(&mut game, &path);
        assert!(
            matches!(events[0], GameEvent::WordAccepted { .. }),
            "{word}: {events:?}"
        );
    }

    assert!(game.is_finished());
    let summary = game.summary().unwrap();

    let stone = LetterScores::default().word_points("stone");
    let rate = LetterScores::default().word_points("rate");
    let quiz = LetterScores::default().word_points("quiz");
    assert_eq!(summary.total_score, stone + rate + quiz);

    let by_length: Vec<&str> = summary
        .words_by_length
        .iter()
        .map(|w| w.word.as_str())
        .collect();
    assert_eq!(by_length, vec!["stone", "rate", "quiz"]);

    assert!(summary.top_findings.len() <= 10);
    assert_eq!(summary.top_findings[0], ScoredWord::new("quiz", quiz));
    for pair in summary.top_findings.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    assert!(summary.top_findings.iter().all(|f| f.word.len() >= 4));
}

#[test]
fn test_dedupe_setting_changes_summary_only() {
    let base = GameConfig {
        radius: 3,
        submissions_per_game: 1,
        summary_size: 50,
        ..GameConfig::default()
    };
    let per_path = GameConfig {
        dedupe_findings: false,
        ..base.clone()
    };

    let mut deduped = GameSession::with_board(base, fixture_board(), dictionary()).unwrap();
    let mut every_path = GameSession::with_board(per_path, fixture_board(), dictionary()).unwrap();
    let path = path_for(deduped.board(), "quiz");
    play(&mut deduped, &path);
    play(&mut every_path, &path);

    assert_eq!(deduped.findings(), every_path.findings());

    let unique = deduped.summary().unwrap().top_findings;
    let all = every_path.summary().unwrap().top_findings;
    let mut words: Vec<&str> = unique.iter().map(|f| f.word.as_str()).collect();
    words.sort();
    words.dedup();
    assert_eq!(words.len(), unique.len(), "deduped summary repeats a word");
    assert!(all.len() >= unique.len());
}

#[test]
fn test_generated_game_plays_seed_word() {
    let generator = BoardGenerator::new(
        SeedWords::new(["grandchild"]).unwrap(),
        LetterPool::default(),
        LetterScores::default(),
    );
    let dictionary = Arc::new(Dictionary::from_words(["grandchild", "grand"]).unwrap());
    let config = GameConfig {
        submissions_per_game: 1,
        ..GameConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(2024);
    let mut game = GameSession::new_with_rng(config, &generator, dictionary, &mut rng).unwrap();

    let seed_path = game.board().seed().unwrap().path.clone();
    let events = play(&mut game, &seed_path);

    let expected = LetterScores::default().word_points("grandchild");
    assert_eq!(
        events[0],
        GameEvent::WordAccepted {
            word: "grandchild".into(),
            score: expected,
            submissions: 1,
            rank: Some(0),
        }
    );
    assert!(game.is_finished());
    assert!(game
        .findings()
        .iter()
        .any(|f| f.word == "grandchild" && f.score == expected));
}

#[test]
fn test_leaderboard_tracks_best_ten_of_fifteen() {
    let config = GameConfig {
        radius: 3,
        submissions_per_game: 15,
        ..GameConfig::default()
    };
    let mut game = GameSession::with_board(config, fixture_board(), dictionary()).unwrap();
    let board = game.board().clone();

    let words = [
        "stone", "notes", "tones", "rate", "tear", "dirt", "earn", "near", "tone", "note",
        "toner", "lane", "lanes", "stare", "quiz",
    ];
    let mut scores = Vec::new();
    for word in words {
        let path = path_for(&board, word);
        play(&mut game, &path);
        scores.push(LetterScores::default().word_points(word));
    }

    assert!(game.is_finished());
    assert_eq!(game.leaderboard().len(), 10);

    scores.sort_by(|a, b| b.cmp(a));
    let kept: Vec<u32> = game.leaderboard().entries().iter().map(|e| e.score).collect();
    assert_eq!(kept, scores[..10].to_vec());
}

#[test]
fn test_snapshot_round_trips_through_json() {
    let mut game = GameSession::new(
        GameConfig::default(),
        &BoardGenerator::default(),
        dictionary(),
    )
    .unwrap();
    let seed = game.board().seed().unwrap().path[0];
    game.apply_action(GameAction::SelectTile(seed)).unwrap();

    let json = serde_json::to_string(&game.snapshot()).unwrap();
    let restored: GameSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.board.len(), 61);
    assert_eq!(restored.current_path, vec![seed]);
    assert!(restored.board.tile(&seed).unwrap().used);
}
