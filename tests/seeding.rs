//! Single test per binary: the food generator is process-global.

use aurora_snake::app::seed_random;
use aurora_snake::game::GridConfig;
use aurora_snake::{App, Cell, Direction, Session, Settings, Snake};
use macroquad::input::KeyCode;

fn first_food(seed: u64) -> Option<Cell> {
    seed_random(seed);
    let mut app = App::new(Settings::default());
    app.handle_key(KeyCode::Enter);
    app.session().and_then(Session::food)
}

#[test]
fn food_follows_the_seed_and_rules_follow_the_index() {
    assert_eq!(first_food(42), first_food(42));

    let foods: Vec<_> = (1..=8u64).map(|s| first_food(s * 7919)).collect();
    assert!(foods.iter().any(|f| *f != foods[0]), "every seed gave {:?}", foods[0]);

    let grid = GridConfig { width: 10, height: 10, cell_size: 20.0 };
    let place = |index| {
        let snake = Snake::from_segments(vec![Cell::new(5, 5)], Direction::Right);
        Session::with_snake(grid, snake, 6.0, index).food()
    };
    assert_eq!(place(37), place(37));
    assert_eq!(place(0), Some(Cell::new(0, 0)));
}
