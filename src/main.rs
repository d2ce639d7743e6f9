use std::io::{self, BufRead, Write};
use std::thread;

use swarmate::board::{Board, Color, Move};
use swarmate::comm::{SerialGroup, ThreadGroup};
use swarmate::config::Config;
use swarmate::error::MoveParseError;
use swarmate::{io as board_io, movegen, search, terminal};

const ENGINE_COLOR: Color = Color::White;
const HUMAN_COLOR: Color = Color::Black;

fn main() {
    let config = match Config::parse(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let (mut board, mut turn) = match &config.board_file {
        Some(path) => match board_io::load_board(path) {
            Ok(loaded) => loaded,
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        },
        None => (Board::starting_position(), Color::White),
    };

    let stdin = io::stdin();

    loop {
        print!("{}", terminal::render(&board));

        if movegen::count_all(&board, turn) == 0 {
            if board.in_check(turn) {
                let winner = if turn == Color::White { "Black" } else { "White" };
                println!("Checkmate. {winner} wins.");
            } else {
                println!("Stalemate.");
            }
            return;
        }

        if turn == ENGINE_COLOR {
            let (score, mv) = run_search(&board, turn, config.workers, config.depth);
            let mv = mv.expect("a position with at least one legal move always has a best move");
            board.apply(mv);
            terminal::print_best_move(Some(mv), score);
        } else if !human_turn(&stdin, &mut board) {
            println!("Goodbye.");
            return;
        }

        turn = !turn;
    }
}

/// Distributes a fixed-depth search for `color` across `workers` cooperating
/// threads. `workers == 1` skips the thread pool entirely and searches on a
/// `SerialGroup`, since there is nothing to cooperate with.
fn run_search(board: &Board, color: Color, workers: usize, depth: u32) -> (f64, Option<Move>) {
    if workers <= 1 {
        let group = SerialGroup;
        return search::find_best(board, color, depth, &group);
    }

    let registry = ThreadGroup::new_registry();
    thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|rank| {
                let registry = registry.clone();
                scope.spawn(move || {
                    let group = ThreadGroup::world_member(rank, workers, registry);
                    search::find_best(board, color, depth, &group)
                })
            })
            .collect();

        // every worker computes an identical result by construction; any one will do
        let mut results: Vec<_> = handles.into_iter().map(|h| h.join().expect("worker thread panicked")).collect();
        results.remove(0)
    })
}

/// Prompts for and applies one human move, retrying on parse errors. Returns
/// `false` on a blank line (quit) or closed stdin.
fn human_turn(stdin: &io::Stdin, board: &mut Board) -> bool {
    loop {
        print!("Your move: ");
        io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            return false;
        }

        match terminal::parse_move(&line, board, HUMAN_COLOR, |candidates| prompt_disambiguation(stdin, candidates)) {
            Ok(mv) => {
                board.apply(mv);
                return true;
            }
            Err(MoveParseError::Empty) => return false,
            Err(e) => println!("error: {e}"),
        }
    }
}

fn prompt_disambiguation(stdin: &io::Stdin, candidates: &[Move]) -> Option<usize> {
    println!("Ambiguous move, choose one:");
    for (i, mv) in candidates.iter().enumerate() {
        println!("  {}) {}", i + 1, mv);
    }
    print!("> ");
    io::stdout().flush().ok();

    let mut choice = String::new();
    stdin.lock().read_line(&mut choice).ok()?;
    choice.trim().parse::<usize>().ok().and_then(|n| n.checked_sub(1))
}
