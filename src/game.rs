//! Grid rules: snake movement, food placement and collision.
//!
//! Nothing here touches the macroquad context, so sessions can be driven
//! tick by tick from tests.

use std::collections::VecDeque;

use crate::settings::Settings;

const INPUT_QUEUE_CAPACITY: usize = 2;
const POINTS_PER_FOOD: u32 = 10;
const MIN_MOVES_PER_SECOND: f32 = 2.0;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self { x: self.x + dx, y: self.y + dy }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Playing field dimensions, fixed for one session.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct GridConfig {
    pub width: i32,
    pub height: i32,
    pub cell_size: f32,
}

impl GridConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            width: settings.grid_width,
            height: settings.grid_height,
            cell_size: settings.cell_size(),
        }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum GameOverReason {
    HitWall,
    HitSelf,
    BoardFilled,
}

impl GameOverReason {
    pub fn describe(self) -> &'static str {
        match self {
            GameOverReason::HitWall => "Hit the wall",
            GameOverReason::HitSelf => "Bit your own tail",
            GameOverReason::BoardFilled => "Board cleared!",
        }
    }
}

/// Result of advancing the snake by one cell.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MoveOutcome {
    Moved,
    Ate,
    Collided(GameOverReason),
}

#[derive(Clone, Debug)]
pub struct Snake {
    segments: VecDeque<Cell>,
    last_positions: Vec<Cell>,
    direction: Direction,
    input_queue: VecDeque<Direction>,
    pending_growth: u32,
}

impl Snake {
    /// Three cells with the head at the grid centre, heading up.
    pub fn spawn(grid: &GridConfig) -> Self {
        let head = Cell::new(grid.width / 2, grid.height / 2);
        let segments = (0..3).map(|i| Cell::new(head.x, head.y + i)).collect();
        Self::from_segments(segments, Direction::Up)
    }

    pub fn from_segments(segments: Vec<Cell>, direction: Direction) -> Self {
        Self {
            last_positions: segments.clone(),
            segments: segments.into(),
            direction,
            input_queue: VecDeque::new(),
            pending_growth: 0,
        }
    }

    pub fn head(&self) -> Cell {
        // A snake is never constructed empty; fall back to the origin anyway.
        self.segments.front().copied().unwrap_or(Cell::new(0, 0))
    }

    pub fn segments(&self) -> &VecDeque<Cell> {
        &self.segments
    }

    /// Segment positions before the most recent move, index-aligned with
    /// `segments()`. A freshly grown tail has no entry.
    pub fn last_positions(&self) -> &[Cell] {
        &self.last_positions
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_growth(&self) -> u32 {
        self.pending_growth
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.segments.contains(&cell)
    }

    pub fn grow(&mut self, amount: u32) {
        self.pending_growth += amount;
    }

    /// Queue a turn. Requests equal to or reversing the last effective
    /// direction are dropped.
    pub fn queue_direction(&mut self, next: Direction) {
        let last_effective = self.input_queue.back().copied().unwrap_or(self.direction);
        if next == last_effective || next == last_effective.opposite() {
            return;
        }
        if self.input_queue.len() >= INPUT_QUEUE_CAPACITY {
            return;
        }
        self.input_queue.push_back(next);
    }

    /// The cell the head will enter on the next move.
    pub fn next_head(&self) -> Cell {
        let direction = self.input_queue.front().copied().unwrap_or(self.direction);
        self.head().step(direction)
    }

    /// Advance one cell. `food` is the current food cell; eating it adds one
    /// segment this same tick. On collision the segments are left untouched.
    pub fn advance(&mut self, grid: &GridConfig, food: Option<Cell>) -> MoveOutcome {
        if let Some(next) = self.input_queue.pop_front() {
            if next != self.direction.opposite() {
                self.direction = next;
            }
        }
        let new_head = self.head().step(self.direction);

        if !grid.contains(new_head) {
            return MoveOutcome::Collided(GameOverReason::HitWall);
        }

        let ate = food == Some(new_head);
        let grows = ate || self.pending_growth > 0;

        // The tail moves out of the way unless the snake grows this tick.
        let body_len = if grows { self.segments.len() } else { self.segments.len().saturating_sub(1) };
        if self.segments.iter().take(body_len).any(|&c| c == new_head) {
            return MoveOutcome::Collided(GameOverReason::HitSelf);
        }

        self.last_positions = self.segments.iter().copied().collect();
        self.segments.push_front(new_head);
        if ate {
            self.pending_growth += 1;
        }
        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else {
            self.segments.pop_back();
        }

        if ate { MoveOutcome::Ate } else { MoveOutcome::Moved }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Food {
    position: Option<Cell>,
}

impl Food {
    pub fn at(cell: Cell) -> Self {
        Self { position: Some(cell) }
    }

    pub fn position(&self) -> Option<Cell> {
        self.position
    }

    /// Pick a free cell using `rand_index`, scanning columns then rows.
    /// Returns false and clears the food when the snake fills the board.
    pub fn reposition(&mut self, grid: &GridConfig, snake: &Snake, rand_index: usize) -> bool {
        let free: Vec<Cell> = (0..grid.width)
            .flat_map(|x| (0..grid.height).map(move |y| Cell::new(x, y)))
            .filter(|&c| !snake.occupies(c))
            .collect();
        self.position = free.get(rand_index % free.len().max(1)).copied();
        self.position.is_some()
    }
}

/// What a frame's worth of simulation produced.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct TickReport {
    pub moves: u32,
    pub foods_eaten: u32,
    pub game_over: Option<GameOverReason>,
}

/// One round of play, from start to collision.
#[derive(Clone, Debug)]
pub struct Session {
    grid: GridConfig,
    snake: Snake,
    food: Food,
    score: u32,
    move_interval: f32,
    move_timer: f32,
    move_progress: f32,
    game_over: Option<GameOverReason>,
}

impl Session {
    pub fn new(settings: &Settings, rand_index: usize) -> Self {
        let grid = GridConfig::from_settings(settings);
        let snake = Snake::spawn(&grid);
        Self::with_snake(grid, snake, settings.move_speed, rand_index)
    }

    pub fn with_snake(grid: GridConfig, snake: Snake, move_speed: f32, rand_index: usize) -> Self {
        let mut food = Food { position: None };
        food.reposition(&grid, &snake, rand_index);
        Self {
            grid,
            snake,
            food,
            score: 0,
            move_interval: 1.0 / move_speed.max(MIN_MOVES_PER_SECOND),
            move_timer: 0.0,
            move_progress: 0.0,
            game_over: None,
        }
    }

    pub fn place_food(&mut self, cell: Cell) {
        self.food = Food::at(cell);
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Cell> {
        self.food.position()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn move_interval(&self) -> f32 {
        self.move_interval
    }

    /// Fraction of the way from the previous cell to the current one.
    pub fn move_progress(&self) -> f32 {
        self.move_progress
    }

    pub fn game_over(&self) -> Option<GameOverReason> {
        self.game_over
    }

    pub fn steer(&mut self, direction: Direction) {
        self.snake.queue_direction(direction);
    }

    /// Run one movement tick.
    pub fn tick(&mut self, rand_index: usize) -> MoveOutcome {
        if let Some(reason) = self.game_over {
            return MoveOutcome::Collided(reason);
        }
        let outcome = self.snake.advance(&self.grid, self.food.position());
        match outcome {
            MoveOutcome::Collided(reason) => self.game_over = Some(reason),
            MoveOutcome::Ate => {
                self.score += POINTS_PER_FOOD;
                if !self.food.reposition(&self.grid, &self.snake, rand_index) {
                    self.game_over = Some(GameOverReason::BoardFilled);
                }
            }
            MoveOutcome::Moved => {}
        }
        outcome
    }

    /// Accumulate `dt` seconds and run as many ticks as are due.
    pub fn update(&mut self, dt: f32, mut rand_index: impl FnMut() -> usize) -> TickReport {
        let mut report = TickReport::default();
        if self.game_over.is_some() {
            return report;
        }
        self.move_timer += dt;
        while self.move_timer >= self.move_interval {
            self.move_timer -= self.move_interval;
            report.moves += 1;
            match self.tick(rand_index()) {
                MoveOutcome::Collided(reason) => {
                    report.game_over = Some(reason);
                    return report;
                }
                MoveOutcome::Ate => report.foods_eaten += 1,
                MoveOutcome::Moved => {}
            }
            if let Some(reason) = self.game_over {
                report.game_over = Some(reason);
                return report;
            }
        }
        self.move_progress = if report.moves > 0 {
            0.0
        } else {
            (self.move_timer / self.move_interval).min(1.0)
        };
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(width: i32, height: i32) -> GridConfig {
        GridConfig { width, height, cell_size: 20.0 }
    }

    #[test]
    fn eating_grows_by_one_in_the_same_tick() {
        let g = grid(10, 10);
        let mut snake = Snake::from_segments(vec![Cell::new(5, 5)], Direction::Right);
        let outcome = snake.advance(&g, Some(Cell::new(6, 5)));
        assert_eq!(outcome, MoveOutcome::Ate);
        assert_eq!(snake.segments().iter().copied().collect::<Vec<_>>(), vec![Cell::new(6, 5), Cell::new(5, 5)]);
        assert_eq!(snake.pending_growth(), 0);
    }

    #[test]
    fn leaving_the_grid_is_a_wall_hit() {
        let g = grid(10, 10);
        let mut snake = Snake::from_segments(vec![Cell::new(9, 3), Cell::new(8, 3)], Direction::Right);
        assert_eq!(snake.advance(&g, None), MoveOutcome::Collided(GameOverReason::HitWall));
        assert_eq!(snake.head(), Cell::new(9, 3));

        let mut snake = Snake::from_segments(vec![Cell::new(0, 0)], Direction::Up);
        assert_eq!(snake.advance(&g, None), MoveOutcome::Collided(GameOverReason::HitWall));
    }

    #[test]
    fn following_the_tail_is_not_a_collision() {
        let g = grid(10, 10);
        // 2x2 loop: head moves into the cell the tail is vacating.
        let mut snake = Snake::from_segments(
            vec![Cell::new(1, 1), Cell::new(2, 1), Cell::new(2, 2), Cell::new(1, 2)],
            Direction::Down,
        );
        assert_eq!(snake.advance(&g, None), MoveOutcome::Moved);
        assert_eq!(snake.head(), Cell::new(1, 2));
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn tail_counts_when_growing() {
        let g = grid(10, 10);
        let mut snake = Snake::from_segments(
            vec![Cell::new(1, 1), Cell::new(2, 1), Cell::new(2, 2), Cell::new(1, 2)],
            Direction::Down,
        );
        snake.grow(1);
        assert_eq!(snake.advance(&g, None), MoveOutcome::Collided(GameOverReason::HitSelf));
    }

    #[test]
    fn running_into_the_body_ends_the_game() {
        let g = grid(8, 8);
        let mut snake = Snake::from_segments(
            vec![
                Cell::new(3, 4),
                Cell::new(3, 5),
                Cell::new(4, 5),
                Cell::new(5, 5),
                Cell::new(5, 4),
                Cell::new(4, 4),
                Cell::new(4, 3),
            ],
            Direction::Up,
        );
        snake.queue_direction(Direction::Right);
        assert_eq!(snake.advance(&g, None), MoveOutcome::Collided(GameOverReason::HitSelf));
    }

    #[test]
    fn reversal_and_duplicate_turns_are_ignored() {
        let mut snake = Snake::from_segments(vec![Cell::new(5, 5), Cell::new(5, 6)], Direction::Up);
        snake.queue_direction(Direction::Down);
        snake.queue_direction(Direction::Up);
        assert_eq!(snake.next_head(), Cell::new(5, 4));

        snake.queue_direction(Direction::Left);
        snake.queue_direction(Direction::Down);
        snake.queue_direction(Direction::Right);
        let g = grid(10, 10);
        snake.advance(&g, None);
        assert_eq!(snake.head(), Cell::new(4, 5));
        snake.advance(&g, None);
        assert_eq!(snake.head(), Cell::new(4, 6));
        // Third request overflowed the queue.
        snake.advance(&g, None);
        assert_eq!(snake.head(), Cell::new(4, 7));
    }

    #[test]
    fn pending_growth_keeps_the_tail() {
        let g = grid(10, 10);
        let mut snake = Snake::from_segments(vec![Cell::new(5, 5)], Direction::Right);
        snake.grow(2);
        snake.advance(&g, None);
        snake.advance(&g, None);
        snake.advance(&g, None);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(8, 5));
    }

    #[test]
    fn food_never_lands_on_the_snake() {
        let g = grid(4, 3);
        let snake = Snake::from_segments(
            vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0), Cell::new(3, 0), Cell::new(3, 1)],
            Direction::Left,
        );
        let mut food = Food { position: None };
        for i in 0..50 {
            assert!(food.reposition(&g, &snake, i));
            let cell = food.position().unwrap();
            assert!(g.contains(cell));
            assert!(!snake.occupies(cell));
        }
    }

    #[test]
    fn full_board_leaves_no_food() {
        let g = grid(2, 1);
        let snake = Snake::from_segments(vec![Cell::new(0, 0), Cell::new(1, 0)], Direction::Left);
        let mut food = Food::at(Cell::new(0, 0));
        assert!(!food.reposition(&g, &snake, 3));
        assert_eq!(food.position(), None);
    }

    #[test]
    fn session_example_board() {
        let g = grid(10, 10);
        let snake = Snake::from_segments(vec![Cell::new(5, 5)], Direction::Right);
        let mut session = Session::with_snake(g, snake, 6.0, 0);
        session.place_food(Cell::new(6, 5));
        assert_eq!(session.tick(17), MoveOutcome::Ate);
        assert_eq!(
            session.snake().segments().iter().copied().collect::<Vec<_>>(),
            vec![Cell::new(6, 5), Cell::new(5, 5)]
        );
        assert_eq!(session.score(), 10);
        let food = session.food().unwrap();
        assert!(!session.snake().occupies(food));
    }

    #[test]
    fn board_filled_ends_the_session() {
        let g = grid(3, 1);
        let snake = Snake::from_segments(vec![Cell::new(1, 0), Cell::new(0, 0)], Direction::Right);
        let mut session = Session::with_snake(g, snake, 6.0, 0);
        assert_eq!(session.food(), Some(Cell::new(2, 0)));
        assert_eq!(session.tick(0), MoveOutcome::Ate);
        assert_eq!(session.game_over(), Some(GameOverReason::BoardFilled));
    }

    #[test]
    fn update_runs_due_ticks_and_tracks_progress() {
        let g = grid(20, 20);
        let snake = Snake::from_segments(vec![Cell::new(5, 10)], Direction::Right);
        let mut session = Session::with_snake(g, snake, 4.0, 0);
        session.place_food(Cell::new(0, 0));

        let report = session.update(0.125, || 0);
        assert_eq!(report.moves, 0);
        assert!((session.move_progress() - 0.5).abs() < 1e-4);

        let report = session.update(0.5, || 0);
        assert_eq!(report.moves, 2);
        assert_eq!(session.move_progress(), 0.0);
        assert_eq!(session.snake().head(), Cell::new(7, 10));
    }

    #[test]
    fn slow_speeds_are_floored() {
        let g = grid(10, 10);
        let session = Session::with_snake(g, Snake::spawn(&g), 0.5, 0);
        assert!((session.move_interval() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn update_stops_at_the_wall() {
        let g = grid(5, 5);
        let snake = Snake::from_segments(vec![Cell::new(3, 2)], Direction::Right);
        let mut session = Session::with_snake(g, snake, 10.0, 0);
        session.place_food(Cell::new(0, 0));
        let report = session.update(1.0, || 0);
        assert_eq!(report.moves, 2);
        assert_eq!(report.game_over, Some(GameOverReason::HitWall));
        assert_eq!(session.update(1.0, || 0), TickReport::default());
    }

    #[test]
    fn spawn_is_centred_and_heading_up() {
        let g = grid(22, 16);
        let snake = Snake::spawn(&g);
        assert_eq!(snake.head(), Cell::new(11, 8));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.direction(), Direction::Up);
        assert_eq!(snake.segments()[2], Cell::new(11, 10));
    }
}
