use anyhow::Context;
use peg_solitaire::engine::BoardState;
use peg_solitaire::heuristics::Heuristic;
use peg_solitaire::solver::{flail_wildly, solve_astar, solve_dfs, SearchOutcome};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::time::Duration;

const BOARD_SEEDS: [u128; 6] = [65023, 440, 434, 384, 510, 447];
const RANDOM_WALKS_PER_BOARD: u64 = 200;
const START_SEED: u64 = 0;

type StrategyFn = fn(&BoardState) -> SearchOutcome;

fn astar_actions(board: &BoardState) -> SearchOutcome {
    solve_astar(board, Heuristic::Actions)
}

fn astar_manhattan(board: &BoardState) -> SearchOutcome {
    solve_astar(board, Heuristic::Manhattan)
}

fn astar_weighted_pegs(board: &BoardState) -> SearchOutcome {
    solve_astar(board, Heuristic::WeightedPegs)
}

#[derive(Default)]
struct Totals {
    solved: usize,
    expanded_nodes: usize,
    elapsed: Duration,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let strategies: Vec<(&str, StrategyFn)> = vec![
        ("DFS", solve_dfs as StrategyFn),
        ("A*1", astar_actions as StrategyFn),
        ("A*2", astar_manhattan as StrategyFn),
        ("A*3", astar_weighted_pegs as StrategyFn),
    ];

    let mut totals: HashMap<&str, Totals> = HashMap::new();

    println!("Starting search evaluation for {} boards...", BOARD_SEEDS.len());

    for seed in BOARD_SEEDS {
        let board = BoardState::new(seed)
            .with_context(|| format!("Failed to build a board from state {}", seed))?;
        println!(
            "\nEvaluating board {} ({} pegs, anchor {:?}):\n{}",
            seed,
            board.peg_count(),
            board.initial_empty(),
            board
        );

        for (name, strategy) in &strategies {
            let outcome = strategy(&board);
            let moves = outcome.path().map(|path| path.len());
            println!(
                "  Strategy: {:<6} Solved: {:<5} Expanded: {:<8} Moves: {:<4} Time: {:.4}s",
                name,
                outcome.is_solved(),
                outcome.expanded_nodes(),
                moves.map_or_else(|| "-".to_string(), |m| m.to_string()),
                outcome.elapsed().as_secs_f64()
            );

            let entry = totals.entry(*name).or_default();
            entry.solved += usize::from(outcome.is_solved());
            entry.expanded_nodes += outcome.expanded_nodes();
            entry.elapsed += outcome.elapsed();
        }

        let mut rng = SmallRng::seed_from_u64(START_SEED + seed as u64);
        let walks_solved = (0..RANDOM_WALKS_PER_BOARD)
            .filter(|_| flail_wildly(&board, &mut rng).is_solved())
            .count();
        println!(
            "  Random walk solved {} of {} attempts (single peg anywhere)",
            walks_solved, RANDOM_WALKS_PER_BOARD
        );
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", BOARD_SEEDS.len());
    println!("\n--- Totals (fewest expanded nodes first) ---");

    let mut ranked: Vec<(&str, &Totals)> = totals.iter().map(|(name, t)| (*name, t)).collect();
    ranked.sort_by_key(|(_, t)| t.expanded_nodes);

    for (name, t) in ranked {
        println!(
            "Strategy {:<6}: Solved = {}/{}, Expanded = {}, Time = {:.4}s",
            name,
            t.solved,
            BOARD_SEEDS.len(),
            t.expanded_nodes,
            t.elapsed.as_secs_f64()
        );
    }

    Ok(())
}
