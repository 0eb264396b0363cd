//! End-to-end games driven through the public `Engine` facade.

use std::time::Duration;

use elemental_connect::ai::{AiConfig, LookaheadAgent};
use elemental_connect::engine::{Engine, GameMode};
use elemental_connect::error::AgentError;
use elemental_connect::game::{
    ElementType, GamePhase, MoveError, MoveReport, NeighborBounds, OutcomeResult, Piece,
    PlacementError, Player, Rules, WinLine, COLS, ROWS,
};

use ElementType::{Air, Earth, Fire, Water};

fn pvp(rules: Rules) -> Engine {
    Engine::with_agent(
        GameMode::PlayerVsPlayer,
        rules,
        Box::new(LookaheadAgent::new(AiConfig {
            seed: Some(7),
            ..AiConfig::default()
        })),
        Duration::ZERO,
    )
}

/// Plays each `(column, element)` for whoever is to move and returns the
/// last report.
fn play(engine: &mut Engine, moves: &[(usize, ElementType)]) -> MoveReport {
    let mut last = None;
    for &(column, element) in moves {
        engine.select_element(element);
        let player = engine.turn_state().active_player;
        last = Some(
            engine
                .request_move(column, player)
                .unwrap_or_else(|e| panic!("{player} column {column}: {e}")),
        );
    }
    last.expect("at least one move")
}

fn assert_contiguous(engine: &Engine) {
    let board = engine.snapshot();
    for col in 0..COLS {
        let height = board.column_height(col);
        for row in 0..ROWS {
            assert_eq!(board.get(col, row).is_some(), row < height, "gap in column {col}");
        }
    }
}

#[test]
fn four_fire_in_a_row_wins_on_fourth_request() {
    let mut engine = pvp(Rules::default());
    let report = play(
        &mut engine,
        &[
            (0, Fire),
            (6, Earth),
            (1, Fire),
            (6, Earth),
            (2, Fire),
            (6, Earth),
            (3, Fire),
        ],
    );

    let line = WinLine {
        start_col: 0,
        start_row: 0,
        delta_col: 1,
        delta_row: 0,
    };
    assert_eq!(report.result, OutcomeResult::Win(line));
    assert_eq!(engine.phase(), GamePhase::Won(Player::One, line));
    assert!(engine.turn_state().is_game_over);

    let err = engine.request_move(4, Player::Two).unwrap_err();
    assert_eq!(err, MoveError::GameOver);
}

#[test]
fn seventh_piece_in_a_column_is_rejected() {
    let mut engine = pvp(Rules::default());
    play(&mut engine, &[(0, Air); ROWS]);
    let before = engine.snapshot();
    let turn = engine.turn_state();

    let err = engine.request_move(0, turn.active_player).unwrap_err();
    assert_eq!(err, MoveError::Rejected(PlacementError::ColumnFull));
    assert_eq!(engine.snapshot(), before);
    assert_eq!(engine.turn_state(), turn);
    assert!(!engine.is_column_open(0));
    assert!(engine.is_column_about_to_be_full(0));
}

#[test]
fn out_of_bounds_column_is_rejected() {
    let mut engine = pvp(Rules::default());
    let err = engine.request_move(COLS, Player::One).unwrap_err();
    assert_eq!(err, MoveError::Rejected(PlacementError::OutOfBounds));
    assert!(engine.snapshot().is_empty());
}

#[test]
fn flanked_fire_is_destroyed_and_column_falls() {
    let mut engine = pvp(Rules::default());
    let report = play(
        &mut engine,
        &[
            (1, Fire),
            (0, Water),
            (1, Earth),
            (2, Water),
            (5, Air),
            (6, Air),
        ],
    );

    let destruction = report.destruction.expect("sixth placement destroys");
    assert_eq!(
        destruction.removed,
        vec![(1, 0, Piece::new(Fire, Player::One))]
    );
    let board = engine.snapshot();
    assert_eq!(board.get(1, 0), Some(Piece::new(Earth, Player::One)));
    assert_eq!(board.get(1, 1), None);
    assert_eq!(engine.turn_state().turn_counter, 0);
    assert_contiguous(&engine);
}

#[test]
fn full_board_without_a_line_is_a_draw() {
    let mut engine = pvp(Rules::default());
    let pattern = [Fire, Fire, Earth, Earth, Fire, Fire, Earth];
    let moves: Vec<_> = (0..COLS)
        .flat_map(|col| std::iter::repeat((col, pattern[col])).take(ROWS))
        .collect();

    let (last, rest) = moves.split_last().unwrap();
    let report = play(&mut engine, rest);
    assert_eq!(report.result, OutcomeResult::Continue);

    let report = play(&mut engine, &[*last]);
    assert_eq!(report.result, OutcomeResult::Draw);
    assert_eq!(engine.phase(), GamePhase::Drawn);
    assert!(engine.snapshot().is_full());
}

#[test]
fn destruction_can_hand_the_win_to_the_other_player() {
    let mut engine = pvp(Rules {
        destruction_period: 13,
        neighbor_bounds: NeighborBounds::Literal,
    });
    let report = play(
        &mut engine,
        &[
            (0, Fire),
            (1, Fire),
            (2, Fire),
            (1, Fire),
            (0, Fire),
            (0, Air),
            (2, Fire),
            (2, Air),
            (1, Earth),
            (1, Fire),
            (5, Fire),
            (1, Fire),
            (6, Fire),
        ],
    );

    assert_eq!(report.player, Player::One);
    let line = WinLine {
        start_col: 1,
        start_row: 0,
        delta_col: 0,
        delta_row: 1,
    };
    assert_eq!(report.result, OutcomeResult::Win(line));
    assert_eq!(engine.phase(), GamePhase::Won(Player::Two, line));
}

#[test]
fn ai_move_waits_for_its_delay() {
    let mut engine = Engine::with_agent(
        GameMode::PlayerVsAi,
        Rules::default(),
        Box::new(LookaheadAgent::new(AiConfig {
            seed: Some(3),
            ..AiConfig::default()
        })),
        Duration::from_millis(2500),
    );

    assert_eq!(
        engine.trigger_ai_turn(Player::One),
        Err(AgentError::NotAiSeat(Player::One))
    );
    engine.request_move(3, Player::One).unwrap();
    assert!(engine.ai_should_move());

    let column = engine.trigger_ai_turn(Player::Two).unwrap();
    let pending = engine.pending_ai_move().expect("move scheduled");
    assert_eq!(pending.column, column);
    assert!(!engine.ai_should_move());

    assert_eq!(
        engine.trigger_ai_turn(Player::Two),
        Err(AgentError::Move(MoveError::MoveInFlight(Player::Two)))
    );
    assert_eq!(
        engine.request_move(column, Player::Two),
        Err(MoveError::AiSeat(Player::Two))
    );

    assert!(engine
        .poll_ai(pending.due - Duration::from_millis(1))
        .is_none());
    assert_eq!(engine.snapshot().column_height(column), usize::from(column == 3));

    let report = engine.poll_ai(pending.due).expect("due").unwrap();
    assert_eq!(report.player, Player::Two);
    assert_eq!(report.column, column);
    assert_eq!(engine.turn_state().active_player, Player::One);
    assert!(engine.pending_ai_move().is_none());
}

#[test]
fn restart_clears_everything() {
    let mut engine = pvp(Rules::default());
    play(&mut engine, &[(0, Water), (1, Fire), (2, Earth)]);

    engine.reset();

    assert!(engine.snapshot().is_empty());
    let turn = engine.turn_state();
    assert_eq!(turn.active_player, Player::One);
    assert_eq!(turn.turn_counter, 0);
    assert!(!turn.is_game_over);
    assert_eq!(engine.selected_element(), Air);
}
