//! Session scenarios - locking, chains, scoring, timing, pause and game over

use puyo_engine::core::{Board, GameConfig, GameSession};
use puyo_engine::types::{Cell, ChainPhase, Command, CoreEvent, Orientation, Position};

/// A config whose first pair has two different colors, plus those colors.
fn config_with_distinct_pair() -> (GameConfig, Cell, Cell) {
    for seed in 1..1000 {
        let config = GameConfig {
            seed,
            ..GameConfig::default()
        };
        let (a, b) = GameSession::new(config.clone()).next_colors();
        if a != b {
            return (config, a, b);
        }
    }
    panic!("no seed yields a two-colored first pair");
}

fn third_color(a: Cell, b: Cell) -> Cell {
    (1..=5).find(|&c| c != a && c != b).unwrap()
}

fn board_with(cells: &[(i8, i8, Cell)]) -> Board {
    let mut rows: Vec<Vec<Cell>> = vec![vec![0; 6]; 12];
    for &(x, y, c) in cells {
        rows[y as usize][x as usize] = c;
    }
    Board::from_rows(&rows, 5).unwrap()
}

/// Pair lands in column 2: satellite `b` at row 11 next to three more `b`.
fn single_clear_session() -> (GameSession, Cell, Cell) {
    let (config, a, b) = config_with_distinct_pair();
    let board = board_with(&[(1, 11, b), (3, 11, b), (4, 11, b)]);
    let mut session = GameSession::with_board(config, board).unwrap();
    assert!(session.spawn_if_needed());
    (session, a, b)
}

/// Clearing the `b` group drops two `a` cells in column 1 next to the `a`
/// column on the left, which clears as a second step of five.
fn two_chain_session() -> (GameSession, Cell, Cell) {
    let (config, a, b) = config_with_distinct_pair();
    let c = third_color(a, b);
    let board = board_with(&[
        (0, 11, a),
        (0, 10, a),
        (0, 9, a),
        (1, 11, b),
        (1, 10, b),
        (1, 9, c),
        (1, 8, a),
        (1, 7, a),
        (3, 11, b),
    ]);
    let mut session = GameSession::with_board(config, board).unwrap();
    assert!(session.spawn_if_needed());
    (session, a, c)
}

#[test]
fn quiet_lock_scores_nothing_and_spawns_next() {
    let mut session = GameSession::new(GameConfig::default());
    session.spawn_if_needed();
    let pair = session.active().unwrap();

    assert!(session.hard_drop());
    let outcome = session.finish_chain().unwrap();

    assert_eq!(outcome.chain, 0);
    assert_eq!(outcome.score_delta, 0);
    assert_eq!(session.score(), 0);
    assert_eq!(session.board().get(2, 10), Some(pair.axis.color));
    assert_eq!(session.board().get(2, 11), Some(pair.satellite.color));
    assert_eq!(session.active().unwrap().axis.pos, Position::new(2, 0));
    assert_eq!(session.piece_id(), 2);
}

#[test]
fn single_group_scores_forty() {
    let (mut session, a, _) = single_clear_session();

    session.hard_drop();
    let outcome = session.finish_chain().unwrap();

    assert_eq!(outcome.chain, 1);
    assert_eq!(outcome.total_cleared, 4);
    assert_eq!(session.score(), 40);
    assert_eq!(session.chain_count(), 1);
    assert_eq!(session.cleared_count(), 4);
    // Only the axis is left, fallen to the floor.
    assert_eq!(session.board().occupied_count(), 1);
    assert_eq!(session.board().get(2, 11), Some(a));
}

#[test]
fn two_step_chain_scores_one_eighty() {
    let (mut session, a, c) = two_chain_session();
    session.take_events();

    session.hard_drop();
    let outcome = session.finish_chain().unwrap();

    assert_eq!(outcome.chain, 2);
    assert_eq!(outcome.total_cleared, 9);
    assert_eq!(outcome.score_delta, 180);
    assert_eq!(session.score(), 180);

    assert_eq!(session.board().occupied_count(), 2);
    assert_eq!(session.board().get(1, 11), Some(c));
    assert_eq!(session.board().get(2, 11), Some(a));

    let events = session.take_events();
    let clears: Vec<(u32, u32)> = events
        .iter()
        .filter_map(|e| match e {
            CoreEvent::Cleared { chain, count, .. } => Some((*chain, *count)),
            _ => None,
        })
        .collect();
    assert_eq!(clears, vec![(1, 4), (2, 5)]);
    assert!(events.contains(&CoreEvent::ChainFinished {
        chain: 2,
        total_cleared: 9,
        score_delta: 180,
    }));
}

#[test]
fn chain_phases_follow_timers() {
    let (mut session, _, _) = single_clear_session();
    session.hard_drop();
    assert_eq!(session.phase(), ChainPhase::Resolving);

    // 200ms before the first resolve.
    assert!(!session.tick(199));
    assert_eq!(session.phase(), ChainPhase::Resolving);
    assert!(session.tick(1));
    assert_eq!(session.phase(), ChainPhase::SettlingPause);
    assert_eq!(session.clearing().len(), 4);
    // Cells stay on the board while they are shown vanishing.
    assert_eq!(session.board().occupied_count(), 5);

    // 400ms clear animation.
    assert!(!session.tick(399));
    assert!(session.tick(1));
    assert_eq!(session.phase(), ChainPhase::Resolving);
    assert!(session.clearing().is_empty());
    assert_eq!(session.board().occupied_count(), 1);

    // 300ms before the next search.
    assert!(!session.tick(299));
    assert!(session.dropping());
    assert!(session.tick(1));
    assert!(!session.dropping());
    assert_eq!(session.score(), 40);
    assert!(session.active().is_some());
}

#[test]
fn zero_delay_config_resolves_in_one_tick() {
    let (config, _, b) = config_with_distinct_pair();
    let board = board_with(&[(1, 11, b), (3, 11, b), (4, 11, b)]);
    let mut session = GameSession::with_board(config.without_delays(), board).unwrap();
    session.spawn_if_needed();

    session.hard_drop();
    assert!(session.tick(1));
    assert!(!session.dropping());
    assert_eq!(session.score(), 40);
}

#[test]
fn commands_ignored_while_dropping() {
    let (mut session, _, _) = single_clear_session();
    session.hard_drop();
    let board = session.board().clone();

    for command in [
        Command::MoveLeft,
        Command::MoveRight,
        Command::MoveDown,
        Command::Rotate,
        Command::HardDrop,
    ] {
        assert!(!session.apply_command(command), "{:?}", command);
    }
    assert_eq!(session.board(), &board);
    assert!(session.active().is_none());
}

#[test]
fn pause_does_not_stall_chain() {
    let (mut session, _, _) = single_clear_session();
    session.hard_drop();
    session.toggle_pause();

    assert!(session.tick(200));
    assert!(session.tick(400));
    assert!(session.tick(300));
    assert!(!session.dropping());
    assert_eq!(session.score(), 40);

    // The next pair spawns but gravity waits for unpause.
    let pair = session.active().unwrap();
    assert!(!session.tick(5_000));
    assert_eq!(session.active(), Some(pair));
    assert!(!session.apply_command(Command::MoveLeft));

    session.toggle_pause();
    assert!(session.tick(800));
    assert_eq!(session.active().unwrap().axis.pos.y, 1);
}

#[test]
fn gravity_walks_pair_to_floor_and_locks() {
    let mut session = GameSession::new(GameConfig::default());
    session.spawn_if_needed();

    for row in 1..=10 {
        assert!(session.tick(800));
        assert_eq!(session.active().unwrap().axis.pos.y, row);
    }
    assert!(session.tick(800));
    assert!(session.active().is_none());
    assert!(session.dropping());
}

#[test]
fn move_left_at_wall_is_rejected() {
    let mut session = GameSession::new(GameConfig::default());
    session.spawn_if_needed();
    assert!(session.move_horizontal(-1));
    assert!(session.move_horizontal(-1));
    let before = session.active();

    assert!(!session.move_horizontal(-1));
    assert_eq!(session.active(), before);
    assert_eq!(before.unwrap().axis.pos.x, 0);
}

#[test]
fn rotation_blocked_by_stack() {
    let mut session =
        GameSession::with_board(GameConfig::default(), board_with(&[(1, 0, 1)])).unwrap();
    session.spawn_if_needed();

    // Down -> Left would put the satellite on (1, 0).
    assert!(!session.rotate());
    assert_eq!(session.active().unwrap().orientation, Orientation::Down);

    // One row lower the left side is free.
    assert!(session.move_down());
    assert!(session.rotate());
    let pair = session.active().unwrap();
    assert_eq!(pair.orientation, Orientation::Left);
    assert_eq!(pair.satellite.pos, Position::new(1, 1));
}

#[test]
fn blocked_spawn_ends_game() {
    let mut session =
        GameSession::with_board(GameConfig::default(), board_with(&[(2, 1, 3)])).unwrap();

    assert!(!session.spawn_if_needed());
    assert!(session.game_over());
    assert!(session.active().is_none());
    assert_eq!(session.piece_id(), 0);
    assert_eq!(session.take_events(), vec![CoreEvent::GameOver { score: 0 }]);
}

#[test]
fn filling_spawn_column_ends_game_after_chain() {
    // Alternating colors never form a group.
    let cells: Vec<(i8, i8, Cell)> = (2..12).map(|y| (2, y, 1 + (y % 2) as Cell)).collect();
    let mut session = GameSession::with_board(GameConfig::default(), board_with(&cells)).unwrap();
    assert!(session.spawn_if_needed());

    assert!(session.hard_drop());
    session.finish_chain();

    assert!(session.game_over());
    assert!(!session.dropping());
    assert!(session.active().is_none());
    assert!(!session.tick(10_000));
    assert!(!session.apply_command(Command::Rotate));
    assert!(session
        .take_events()
        .iter()
        .any(|e| matches!(e, CoreEvent::GameOver { .. })));
}

#[test]
fn reset_after_game_over_starts_new_episode() {
    let mut session =
        GameSession::with_board(GameConfig::default(), board_with(&[(2, 0, 3)])).unwrap();
    session.spawn_if_needed();
    assert!(session.game_over());

    assert!(session.apply_command(Command::Reset));
    assert!(!session.game_over());
    assert_eq!(session.episode_id(), 1);
    assert_eq!(session.board().occupied_count(), 0);
    assert!(session.active().is_none());

    assert!(session.tick(16));
    assert!(session.active().is_some());
}

#[test]
fn ghost_matches_hard_drop_landing() {
    let mut session =
        GameSession::with_board(GameConfig::default(), board_with(&[(3, 11, 1)])).unwrap();
    session.spawn_if_needed();
    session.rotate(); // Left: satellite in column 1
    session.rotate(); // Up
    session.rotate(); // Right: satellite in column 3

    let ghost = session.ghost().unwrap();
    assert_eq!(ghost.axis.pos, Position::new(2, 10));
    assert_eq!(ghost.satellite.pos, Position::new(3, 10));

    session.hard_drop();
    // After the lock the axis half falls on to the floor.
    assert!(session.board().is_occupied(2, 11));
    assert!(session.board().is_occupied(3, 10));
}

#[test]
fn next_colors_predict_the_following_pair() {
    let mut session = GameSession::new(GameConfig::default());
    session.spawn_if_needed();
    let next = session.next_colors();

    session.hard_drop();
    session.finish_chain();
    let pair = session.active().unwrap();
    assert_eq!((pair.axis.color, pair.satellite.color), next);
}

#[test]
fn same_seed_same_game() {
    let script = [
        Command::Rotate,
        Command::MoveLeft,
        Command::HardDrop,
        Command::MoveRight,
        Command::MoveRight,
        Command::HardDrop,
        Command::Rotate,
        Command::Rotate,
        Command::HardDrop,
    ];
    let play = || {
        let mut session = GameSession::new(GameConfig {
            seed: 31337,
            ..GameConfig::default()
        });
        session.spawn_if_needed();
        for _ in 0..5 {
            for command in script {
                session.apply_command(command);
                session.finish_chain();
            }
        }
        session
    };

    let a = play();
    let b = play();
    assert_eq!(a.snapshot(), b.snapshot());
}
