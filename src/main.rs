//! Klotski Solver
//!
//! Enumerates every reachable position of the 4x5 sliding-block puzzle from
//! its standard opening and prints a shortest way to slide the 2x2 block to
//! the exit.

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use klotski::grid::occupancy_of;
use klotski::pieces::{piece_type, BIG_SQUARE_PIECE, DEFAULT_GOAL, NUM_PIECES};
use klotski::{piece_anchored_at, solve, Board, HashGraph, Location, Solution, StateGraph};

/// Solves the Klotski sliding-block puzzle.
#[derive(Parser)]
#[command(name = "klotski")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Find a shortest solution from the standard opening.
    Solve(GoalArgs),
    /// Show the number of reachable positions and moves.
    Count,
    /// Render the standard opening and its legal moves.
    Show,
}

#[derive(clap::Args)]
struct GoalArgs {
    /// Piece that has to reach the target cell.
    #[arg(long, default_value_t = BIG_SQUARE_PIECE)]
    piece: usize,
    /// Target anchor column.
    #[arg(long, default_value_t = DEFAULT_GOAL.x)]
    x: i32,
    /// Target anchor row.
    #[arg(long, default_value_t = DEFAULT_GOAL.y)]
    y: i32,
    /// Print the board after every move.
    #[arg(long)]
    boards: bool,
}

impl Default for GoalArgs {
    fn default() -> Self {
        Self {
            piece: BIG_SQUARE_PIECE,
            x: DEFAULT_GOAL.x,
            y: DEFAULT_GOAL.y,
            boards: false,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Solve(goal)) => run_solver(&goal),
        Some(Command::Count) => run_count(),
        Some(Command::Show) => run_show(),
        // default: solve for the standard goal
        None => run_solver(&GoalArgs::default()),
    }
}

/// Builds the graph, solves for the requested goal and prints the moves.
fn run_solver(goal: &GoalArgs) -> ExitCode {
    let target = Location::new(goal.x, goal.y);
    if goal.piece >= NUM_PIECES {
        eprintln!("Piece {} does not exist (0..{NUM_PIECES})", goal.piece);
        return ExitCode::FAILURE;
    }
    if occupancy_of(piece_type(goal.piece), target).is_none() {
        eprintln!("Piece {} cannot be anchored at {target}", goal.piece);
        return ExitCode::FAILURE;
    }

    let graph = HashGraph::build(Board::default_start());
    match solve(&graph, piece_anchored_at(goal.piece, target)) {
        Ok(solution) => {
            print!("{}", format_solution(&solution, goal.boards));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("No solution: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints the size of the reachable state graph.
fn run_count() -> ExitCode {
    let graph = HashGraph::build(Board::default_start());
    println!("{} positions", graph.len());
    println!("{} moves", graph.arc_count());
    ExitCode::SUCCESS
}

/// Prints the opening layout.
fn run_show() -> ExitCode {
    let start = Board::default_start();
    print!("{start}");
    println!("{}", format_legal_moves(start));
    ExitCode::SUCCESS
}

/// Formats a solution as a numbered move list, optionally with boards.
fn format_solution(solution: &Solution, with_boards: bool) -> String {
    let mut output = format!("Solved in {} moves\n", solution.distance());
    if with_boards {
        output.push_str(&solution.start.to_string());
    }

    for (step, (mv, board)) in solution
        .moves
        .iter()
        .zip(solution.boards().into_iter().skip(1))
        .enumerate()
    {
        output.push_str(&format!("{:>3}: {mv}\n", step + 1));
        if with_boards {
            output.push_str(&board.to_string());
        }
    }

    output
}

/// Formats the legal moves of every piece on one line.
fn format_legal_moves(board: Board) -> String {
    board
        .legal_moves()
        .iter()
        .enumerate()
        .map(|(piece, moves)| format!("{piece}={moves}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_move_solution_snapshot() {
        let graph = HashGraph::build(Board::default_start());
        let solution = solve(&graph, piece_anchored_at(BIG_SQUARE_PIECE, Location::new(1, 0))).unwrap();

        insta::assert_snapshot!(format_solution(&solution, true), @r"
        Solved in 1 moves
        5..6
        5996
        7998
        7448
        0123
          1: 9=↑
        5996
        5996
        7..8
        7448
        0123
        ");
    }

    #[test]
    fn test_default_solution_length() {
        let graph = HashGraph::build(Board::default_start());
        let solution = solve(&graph, piece_anchored_at(BIG_SQUARE_PIECE, DEFAULT_GOAL)).unwrap();
        let output = format_solution(&solution, false);
        assert!(output.starts_with("Solved in 120 moves\n"));
        assert_eq!(output.lines().count(), 121);
    }

    #[test]
    fn test_opening_legal_moves() {
        assert_eq!(
            format_legal_moves(Board::default_start()),
            "0=Ø 1=Ø 2=Ø 3=Ø 4=Ø 5=Ø 6=Ø 7=Ø 8=Ø 9=↑"
        );
    }

    #[test]
    fn test_cli_parses_goal() {
        let cli = Cli::parse_from(["klotski", "solve", "--piece", "4", "--x", "0", "--y", "0"]);
        let Some(Command::Solve(goal)) = cli.command else {
            panic!("expected the solve subcommand");
        };
        assert_eq!((goal.piece, goal.x, goal.y, goal.boards), (4, 0, 0, false));
    }
}
