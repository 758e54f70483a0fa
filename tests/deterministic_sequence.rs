use retro_snake::config::GridSize;
use retro_snake::food::{Food, ScriptedSource};
use retro_snake::game::{EndReason, GamePhase, GameState, TickOutcome};
use retro_snake::input::Direction;
use retro_snake::snake::{Position, Snake};

fn scripted_state(bounds: GridSize, positions: Vec<Position>) -> GameState {
    GameState::with_source(bounds, Box::new(ScriptedSource::new(positions)))
}

#[test]
fn eating_prepends_head_keeps_tail_and_resamples_off_the_body() {
    let mut state = scripted_state(
        GridSize::default(),
        vec![Position::new(10, 9), Position::new(3, 3)],
    );
    state.start();
    state.food = Food::new(Position::new(10, 9));

    assert_eq!(state.tick(), TickOutcome::Ate);

    let snapshot = state.snapshot();
    assert_eq!(
        snapshot.snake,
        vec![Position::new(10, 9), Position::new(10, 10)]
    );
    assert_eq!(snapshot.score, 10);
    assert_eq!(snapshot.high_score, 10);
    // (10, 9) is proposed again but now lies under the head.
    assert_eq!(snapshot.food, Position::new(3, 3));
    assert_eq!(snapshot.phase, GamePhase::Running);
}

#[test]
fn leaving_the_board_ends_the_game_without_moving() {
    let mut state = GameState::new_with_seed(GridSize::default(), 11);
    state.start();
    state.snake = Snake::new(Position::new(0, 5), Direction::Left);
    let food_before = state.food;

    assert_eq!(
        state.tick(),
        TickOutcome::Ended(EndReason::WallCollision)
    );

    assert_eq!(state.phase, GamePhase::Over);
    assert_eq!(
        state.snake.segments().copied().collect::<Vec<_>>(),
        vec![Position::new(0, 5)]
    );
    assert_eq!(state.food, food_before);
    assert_eq!(state.score, 0);
}

#[test]
fn reversal_request_is_rejected_and_snake_keeps_heading() {
    let mut state = scripted_state(GridSize::default(), vec![Position::new(15, 15)]);
    state.start();
    state.snake = Snake::from_segments(
        vec![
            Position::new(5, 5),
            Position::new(5, 6),
            Position::new(5, 7),
        ],
        Direction::Up,
    );

    assert!(!state.set_pending_direction(Direction::Down));
    assert_eq!(state.tick(), TickOutcome::Moved);

    assert_eq!(
        state.snake.segments().copied().collect::<Vec<_>>(),
        vec![
            Position::new(5, 4),
            Position::new(5, 5),
            Position::new(5, 6),
        ]
    );
}

#[test]
fn five_plain_ticks_keep_length_and_drop_tail() {
    let mut state = scripted_state(GridSize::default(), vec![Position::new(0, 0)]);
    state.start();

    for step in 1..=5 {
        assert_eq!(state.tick(), TickOutcome::Moved);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.head(), Position::new(10, 10 - step));
    }

    assert_eq!(state.tick_count, 5);
    assert_eq!(state.score, 0);
}

#[test]
fn stepwise_food_collection_turn_and_wall_collision() {
    let mut state = scripted_state(GridSize::square(6), vec![Position::new(5, 5)]);
    state.start();
    state.snake = Snake::new(Position::new(1, 1), Direction::Right);
    state.food = Food::new(Position::new(2, 1));

    assert_eq!(state.tick(), TickOutcome::Ate);
    assert_eq!(state.score, 10);
    assert_eq!(state.snake.len(), 2);
    assert_eq!(state.snake.head(), Position::new(2, 1));

    assert!(state.set_pending_direction(Direction::Up));
    assert_eq!(state.tick(), TickOutcome::Moved);
    assert_eq!(state.snake.head(), Position::new(2, 0));

    assert_eq!(
        state.tick(),
        TickOutcome::Ended(EndReason::WallCollision)
    );
    assert_eq!(state.phase, GamePhase::Over);

    state.start();
    assert_eq!(state.phase, GamePhase::Running);
    assert_eq!(state.score, 0);
    assert_eq!(state.high_score, 10);
    assert_eq!(state.snake.head(), Position::new(3, 3));
}
