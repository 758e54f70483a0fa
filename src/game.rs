use std::fmt;

use crate::config::{GridSize, POINTS_PER_FOOD};
use crate::food::{CoordinateSource, Food, RngSource};
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// Heading every new game starts with.
pub const INITIAL_DIRECTION: Direction = Direction::Up;

/// Lifecycle of one game instance.
///
/// `Idle -> Running` on start, `Running -> Over` on a collision or a full
/// board, `Over -> Running` on restart.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GamePhase {
    Idle,
    Running,
    Over,
}

/// Why the most recent game left `Running`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EndReason {
    WallCollision,
    SelfCollision,
    /// The snake covers every cell; counts as a win.
    BoardFilled,
}

/// What a single call to [`GameState::tick`] did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The game was not running; nothing changed.
    Ignored,
    Moved,
    Ate,
    Ended(EndReason),
}

/// Read-only copy of everything a render surface needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub grid: GridSize,
    /// Head first.
    pub snake: Vec<Position>,
    pub direction: Direction,
    pub food: Position,
    pub score: u32,
    pub high_score: u32,
    /// High score in effect when this game started.
    pub high_score_at_start: u32,
    pub end_reason: Option<EndReason>,
    pub tick_count: u64,
}

impl Snapshot {
    #[must_use]
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }

    /// True when the finished game beat every earlier game of the session.
    ///
    /// Tying the previous best does not count.
    #[must_use]
    pub fn is_new_high_score(&self) -> bool {
        self.phase == GamePhase::Over && self.score > self.high_score_at_start
    }
}

/// Complete mutable game state for one session.
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub score: u32,
    pub high_score: u32,
    pub high_score_at_start: u32,
    pub tick_count: u64,
    pub phase: GamePhase,
    pub end_reason: Option<EndReason>,
    bounds: GridSize,
    source: Box<dyn CoordinateSource>,
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("snake", &self.snake)
            .field("food", &self.food)
            .field("score", &self.score)
            .field("high_score", &self.high_score)
            .field("high_score_at_start", &self.high_score_at_start)
            .field("tick_count", &self.tick_count)
            .field("phase", &self.phase)
            .field("end_reason", &self.end_reason)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

impl GameState {
    /// Creates an idle game whose food comes from OS entropy.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self::with_source(bounds, Box::new(RngSource::from_entropy()))
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Self {
        Self::with_source(bounds, Box::new(RngSource::seeded(seed)))
    }

    /// Creates an idle game drawing food coordinates from `source`.
    ///
    /// # Panics
    ///
    /// Panics when either side of `bounds` is zero.
    #[must_use]
    pub fn with_source(bounds: GridSize, mut source: Box<dyn CoordinateSource>) -> Self {
        assert!(
            bounds.width > 0 && bounds.height > 0,
            "grid must have at least one cell"
        );

        let snake = Snake::new(start_position(bounds), INITIAL_DIRECTION);
        let food = Food::spawn(source.as_mut(), bounds, &snake)
            .unwrap_or_else(|| Food::new(snake.head()));

        Self {
            snake,
            food,
            score: 0,
            high_score: 0,
            high_score_at_start: 0,
            tick_count: 0,
            phase: GamePhase::Idle,
            end_reason: None,
            bounds,
            source,
        }
    }

    /// Resets the board and enters `Running`. The high score is kept.
    pub fn start(&mut self) {
        self.snake = Snake::new(start_position(self.bounds), INITIAL_DIRECTION);
        self.score = 0;
        self.high_score_at_start = self.high_score;
        self.tick_count = 0;
        self.end_reason = None;
        self.phase = GamePhase::Running;

        match Food::spawn(self.source.as_mut(), self.bounds, &self.snake) {
            Some(food) => self.food = food,
            // A 1x1 board is full from the start.
            None => self.finish(EndReason::BoardFilled),
        }

        log::info!(
            "game started on {}x{} board, food at ({}, {})",
            self.bounds.width,
            self.bounds.height,
            self.food.position.x,
            self.food.position.y
        );
    }

    /// Queues a heading for the next tick.
    ///
    /// Ignored outside `Running` and when `direction` reverses the committed
    /// heading. Returns whether the request was stored.
    pub fn set_pending_direction(&mut self, direction: Direction) -> bool {
        if self.phase != GamePhase::Running {
            log::debug!("direction {direction:?} ignored in phase {:?}", self.phase);
            return false;
        }

        let accepted = self.snake.buffer_direction(direction);
        if !accepted {
            log::debug!(
                "direction {direction:?} rejected: reverses {:?}",
                self.snake.direction()
            );
        }
        accepted
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != GamePhase::Running {
            log::debug!("tick ignored in phase {:?}", self.phase);
            return TickOutcome::Ignored;
        }

        self.snake.commit_direction();
        let next_head = self.snake.next_head_position();

        if !next_head.is_within_bounds(self.bounds) {
            self.finish(EndReason::WallCollision);
            return TickOutcome::Ended(EndReason::WallCollision);
        }

        if self.snake.occupies(next_head) {
            self.finish(EndReason::SelfCollision);
            return TickOutcome::Ended(EndReason::SelfCollision);
        }

        let ate = next_head == self.food.position;
        self.snake.advance(next_head, ate);
        self.tick_count += 1;
        log::trace!(
            "tick {}: head ({}, {}) len {}",
            self.tick_count,
            next_head.x,
            next_head.y,
            self.snake.len()
        );

        if !ate {
            return TickOutcome::Moved;
        }

        self.score += POINTS_PER_FOOD;
        self.high_score = self.high_score.max(self.score);

        match Food::spawn(self.source.as_mut(), self.bounds, &self.snake) {
            Some(food) => {
                self.food = food;
                TickOutcome::Ate
            }
            None => {
                self.finish(EndReason::BoardFilled);
                TickOutcome::Ended(EndReason::BoardFilled)
            }
        }
    }

    /// Returns a read-only copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            grid: self.bounds,
            snake: self.snake.segments().copied().collect(),
            direction: self.snake.direction(),
            food: self.food.position,
            score: self.score,
            high_score: self.high_score,
            high_score_at_start: self.high_score_at_start,
            end_reason: self.end_reason,
            tick_count: self.tick_count,
        }
    }

    fn finish(&mut self, reason: EndReason) {
        self.phase = GamePhase::Over;
        self.end_reason = Some(reason);
        log::info!(
            "game over ({reason:?}) after {} ticks, score {}, high score {}",
            self.tick_count,
            self.score,
            self.high_score
        );
    }
}

/// Center cell of the board (`(10, 10)` on the default grid).
#[must_use]
pub fn start_position(bounds: GridSize) -> Position {
    Position {
        x: i32::from(bounds.width / 2),
        y: i32::from(bounds.height / 2),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::food::{Food, ScriptedSource};
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    use super::{EndReason, GamePhase, GameState, TickOutcome};

    fn scripted(bounds: GridSize, positions: Vec<Position>) -> GameState {
        GameState::with_source(bounds, Box::new(ScriptedSource::new(positions)))
    }

    #[test]
    fn new_game_is_idle_and_ticks_are_ignored() {
        let mut state = GameState::new_with_seed(GridSize::default(), 1);
        let before = state.snapshot();

        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.tick(), TickOutcome::Ignored);
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn start_resets_board_and_keeps_high_score() {
        let mut state = scripted(GridSize::default(), vec![Position::new(3, 4)]);
        state.start();
        state.score = 40;
        state.high_score = 70;
        state.snake = Snake::new(Position::new(1, 1), Direction::Left);

        state.start();

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.head(), Position::new(10, 10));
        assert_eq!(state.snake.direction(), Direction::Up);
        assert_eq!(state.food.position, Position::new(3, 4));
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 70);
        assert_eq!(state.end_reason, None);
    }

    #[test]
    fn snake_grows_after_eating_food() {
        let mut state = scripted(GridSize::square(10), vec![Position::new(7, 7)]);
        state.start();
        state.snake = Snake::new(Position::new(1, 1), Direction::Right);
        state.food = Food::new(Position::new(2, 1));

        assert_eq!(state.tick(), TickOutcome::Ate);
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.score, 10);
        assert_eq!(state.high_score, 10);
        assert_eq!(state.food.position, Position::new(7, 7));

        assert_eq!(state.tick(), TickOutcome::Moved);
        assert_eq!(state.snake.len(), 2);
    }

    #[test]
    fn snake_collision_with_wall_sets_game_over() {
        let mut state = GameState::new_with_seed(GridSize::square(4), 2);
        state.start();
        state.snake = Snake::new(Position::new(3, 1), Direction::Right);

        assert_eq!(
            state.tick(),
            TickOutcome::Ended(EndReason::WallCollision)
        );
        assert_eq!(state.phase, GamePhase::Over);
        assert_eq!(state.snake.head(), Position::new(3, 1));
    }

    #[test]
    fn snake_collision_with_self_sets_game_over() {
        let mut state = GameState::new_with_seed(GridSize::square(6), 3);
        state.start();
        state.snake = Snake::from_segments(
            vec![
                Position::new(2, 2),
                Position::new(1, 2),
                Position::new(1, 3),
                Position::new(2, 3),
                Position::new(3, 3),
                Position::new(3, 2),
            ],
            Direction::Down,
        );
        state.food = Food::new(Position::new(5, 5));

        assert_eq!(
            state.tick(),
            TickOutcome::Ended(EndReason::SelfCollision)
        );
        assert_eq!(state.snake.len(), 6);
        assert_eq!(state.end_reason, Some(EndReason::SelfCollision));
    }

    #[test]
    fn moving_into_current_tail_is_a_collision() {
        let mut state = GameState::new_with_seed(GridSize::square(6), 4);
        state.start();
        state.snake = Snake::from_segments(
            vec![
                Position::new(2, 2),
                Position::new(3, 2),
                Position::new(3, 3),
                Position::new(2, 3),
            ],
            Direction::Down,
        );
        state.food = Food::new(Position::new(5, 5));

        assert_eq!(
            state.tick(),
            TickOutcome::Ended(EndReason::SelfCollision)
        );
    }

    #[test]
    fn terminal_state_is_idempotent() {
        let mut state = GameState::new_with_seed(GridSize::square(4), 5);
        state.start();
        state.snake = Snake::new(Position::new(0, 0), Direction::Up);
        state.tick();
        let frozen = state.snapshot();

        for _ in 0..5 {
            assert_eq!(state.tick(), TickOutcome::Ignored);
            assert!(!state.set_pending_direction(Direction::Right));
        }

        assert_eq!(state.snapshot(), frozen);
    }

    #[test]
    fn direction_requests_outside_running_are_ignored() {
        let mut state = GameState::new_with_seed(GridSize::default(), 6);

        assert!(!state.set_pending_direction(Direction::Left));
        assert_eq!(state.snake.pending_direction(), Direction::Up);
    }

    #[test]
    fn filling_the_board_ends_the_game_as_a_win() {
        let mut state = GameState::new_with_seed(GridSize::square(2), 7);
        state.start();
        state.snake = Snake::from_segments(
            vec![
                Position::new(0, 1),
                Position::new(0, 0),
                Position::new(1, 0),
            ],
            Direction::Right,
        );
        state.food = Food::new(Position::new(1, 1));

        assert_eq!(state.tick(), TickOutcome::Ended(EndReason::BoardFilled));
        assert_eq!(state.phase, GamePhase::Over);
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn snapshot_flags_new_high_score_only_when_over() {
        let mut state = scripted(GridSize::square(5), vec![Position::new(4, 4)]);
        state.start();
        state.snake = Snake::new(Position::new(2, 1), Direction::Up);
        state.food = Food::new(Position::new(2, 0));
        state.tick();
        assert!(!state.snapshot().is_new_high_score());

        state.tick();
        let snapshot = state.snapshot();
        assert_eq!(snapshot.phase, GamePhase::Over);
        assert!(snapshot.is_new_high_score());
    }

    fn play_one_food_game(state: &mut GameState) {
        state.start();
        state.snake = Snake::new(Position::new(2, 1), Direction::Up);
        state.food = Food::new(Position::new(2, 0));
        while state.phase == GamePhase::Running {
            state.tick();
        }
    }

    #[test]
    fn tying_the_previous_best_is_not_a_new_high_score() {
        let mut state = scripted(GridSize::square(5), vec![Position::new(4, 4)]);

        play_one_food_game(&mut state);
        assert!(state.snapshot().is_new_high_score());

        play_one_food_game(&mut state);
        let snapshot = state.snapshot();
        assert_eq!(snapshot.score, 10);
        assert_eq!(snapshot.high_score, 10);
        assert_eq!(snapshot.high_score_at_start, 10);
        assert!(!snapshot.is_new_high_score());
    }

    #[test]
    fn beating_the_previous_best_is_a_new_high_score() {
        let mut state = scripted(GridSize::square(5), vec![Position::new(4, 4)]);
        play_one_food_game(&mut state);

        state.start();
        state.snake = Snake::new(Position::new(2, 2), Direction::Up);
        state.food = Food::new(Position::new(2, 1));
        state.tick();
        state.food = Food::new(Position::new(2, 0));
        state.tick();
        state.tick();

        let snapshot = state.snapshot();
        assert_eq!(snapshot.phase, GamePhase::Over);
        assert_eq!(snapshot.score, 20);
        assert!(snapshot.is_new_high_score());
    }

    #[test]
    fn bounds_are_fixed_for_the_session() {
        let mut state = GameState::new_with_seed(GridSize::square(7), 8);
        state.start();
        state.tick();
        state.start();

        assert_eq!(state.snapshot().grid, GridSize::square(7));
    }
}
