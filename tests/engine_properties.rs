//! Randomised checks of the invariants every engine must keep no matter what
//! input arrives or how the clock is interleaved with it.

use std::collections::HashSet;

use proptest::prelude::*;

use miniarcade::config::{DurakConfig, SnakeConfig, StackConfig, TetrisConfig};
use miniarcade::games::durak::{can_beat, Durak};
use miniarcade::games::snake::Snake;
use miniarcade::games::stack::Stack;
use miniarcade::games::tetris::Tetris;
use miniarcade::games::tic_tac_toe::{choose_bot_move, completed_line, outcome_of, Board, Mark, Outcome, LINES};
use miniarcade::{Action, Game};

/// One step of driving an engine: either a clock tick or an input.
#[derive(Debug, Clone)]
enum Step {
    Tick,
    Input(Action),
}

fn arrow() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Up),
        Just(Action::Down),
        Just(Action::Left),
        Just(Action::Right),
    ]
}

fn tetris_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Left),
        Just(Action::Right),
        Just(Action::Rotate),
        Just(Action::Down),
        Just(Action::Drop),
    ]
}

fn steps(action: impl Strategy<Value = Action>) -> impl Strategy<Value = Vec<Step>> {
    prop::collection::vec(
        prop_oneof![
            2 => Just(Step::Tick),
            1 => action.prop_map(Step::Input),
        ],
        1..300,
    )
}

fn drive(game: &mut dyn Game, step: &Step) {
    match step {
        Step::Tick => game.tick(),
        Step::Input(action) => game.handle_action(*action),
    }
}

proptest! {
    #[test]
    fn snake_stays_on_the_board_and_never_overlaps(seed in any::<u64>(), script in steps(arrow())) {
        let config = SnakeConfig::default();
        let size = config.grid_size as i32;
        let mut snake = Snake::new(config, seed);
        snake.start();

        for step in &script {
            drive(&mut snake, step);

            let segments = snake.segments();
            let unique: HashSet<_> = segments.iter().copied().collect();
            prop_assert_eq!(unique.len(), segments.len());
            prop_assert!(segments.iter().all(|c| (0..size).contains(&c.x) && (0..size).contains(&c.y)));
            prop_assert_eq!(segments.len() as u32, 1 + snake.score());
            if let Some(food) = snake.food() {
                prop_assert!(!segments.contains(&food));
            }
        }
    }

    #[test]
    fn tetris_grid_only_changes_by_whole_pieces(seed in any::<u64>(), script in steps(tetris_action())) {
        let config = TetrisConfig::default();
        let (rows, cols, per_line) = (config.rows, config.cols, config.points_per_line);
        let mut tetris = Tetris::new(config, seed);
        tetris.start();

        for step in &script {
            let before = tetris.filled_cells() + tetris.lines_cleared() as usize * cols;
            drive(&mut tetris, step);
            let after = tetris.filled_cells() + tetris.lines_cleared() as usize * cols;

            prop_assert_eq!(tetris.grid().len(), rows);
            prop_assert!(tetris.grid().iter().all(|r| r.len() == cols));
            let delta = after - before;
            prop_assert!(delta == 0 || delta == 4, "grid grew by {}", delta);
            prop_assert_eq!(tetris.score(), tetris.lines_cleared() * per_line);

            if let Some(piece) = tetris.piece() {
                for (r, c) in piece.cells() {
                    prop_assert!(c >= 0 && (c as usize) < cols);
                    if r >= 0 {
                        prop_assert!(tetris.grid()[r as usize][c as usize].is_none());
                    }
                }
            }
        }
    }

    #[test]
    fn stack_blocks_never_widen(drop_after in prop::collection::vec(0u32..120, 1..40)) {
        let mut stack = Stack::new(StackConfig::default());
        stack.start();

        for ticks in drop_after {
            for _ in 0..ticks {
                stack.tick();
            }
            stack.handle_action(Action::Drop);

            let widths: Vec<f32> = stack.blocks().iter().map(|b| b.width).collect();
            prop_assert!(widths.windows(2).all(|w| w[1] <= w[0]));
            prop_assert!(widths.iter().all(|w| *w > 0.0));
            if stack.is_game_over() {
                break;
            }
        }
    }

    #[test]
    fn tic_tac_toe_has_at_most_one_result(cells in prop::collection::vec(0u8..3, 9)) {
        let mut board: Board = [None; 9];
        for (slot, v) in board.iter_mut().zip(cells) {
            *slot = match v {
                1 => Some(Mark::Player),
                2 => Some(Mark::Bot),
                _ => None,
            };
        }

        let outcome = outcome_of(&board);
        match completed_line(&board) {
            Some((Mark::Player, _)) => prop_assert_eq!(outcome, Some(Outcome::PlayerWins)),
            Some((Mark::Bot, _)) => prop_assert_eq!(outcome, Some(Outcome::BotWins)),
            None if board.iter().all(Option::is_some) => prop_assert_eq!(outcome, Some(Outcome::Draw)),
            None => prop_assert_eq!(outcome, None),
        }
    }

    #[test]
    fn bot_always_takes_an_open_win(line in 0usize..8, gap in 0usize..3, seed in any::<u64>()) {
        use rand::SeedableRng;

        let mut board: Board = [None; 9];
        let cells = LINES[line];
        for (i, &cell) in cells.iter().enumerate() {
            if i != gap {
                board[cell] = Some(Mark::Bot);
            }
        }

        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let choice = choose_bot_move(&board, &mut rng);
        prop_assert!(choice.is_some());
        let mut after = board;
        after[choice.unwrap()] = Some(Mark::Bot);
        prop_assert_eq!(outcome_of(&after), Some(Outcome::BotWins));
    }

    #[test]
    fn durak_conserves_the_deck_and_only_accepts_valid_defences(
        seed in any::<u64>(),
        script in prop::collection::vec(
            prop_oneof![
                3 => Just(Step::Tick),
                3 => (0usize..8).prop_map(|i| Step::Input(Action::PlayCard(i))),
                1 => Just(Step::Input(Action::Take)),
                1 => Just(Step::Input(Action::Enough)),
            ],
            1..400,
        ),
    ) {
        let mut durak = Durak::new(DurakConfig::default(), seed);
        let trump = durak.trump_suit();

        for step in &script {
            drive(&mut durak, step);

            prop_assert_eq!(durak.cards_in_play(), 36);
            for slot in durak.table() {
                if let Some(defense) = slot.defense {
                    prop_assert!(can_beat(slot.attack, defense, trump));
                }
            }
            let open = durak.table().iter().filter(|s| s.defense.is_none()).count();
            prop_assert!(open <= durak.hand(durak.defender()).len() || durak.is_game_over());
            prop_assert!(durak.table().len() <= 6);
            if durak.is_game_over() {
                break;
            }
        }
    }
}
