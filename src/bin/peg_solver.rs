use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;
use peg_solitaire::engine::BoardState;
use peg_solitaire::heuristics::{heuristic1, heuristic2, heuristic3, Heuristic};
use peg_solitaire::solver::{flail_wildly, solve_astar, solve_dfs, SearchOutcome};
use peg_solitaire::utils::parse_seed;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Searches and heuristics that can be run on a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Command {
    /// Random walk until one peg is left or no move applies
    #[value(name = "flailWildly")]
    FlailWildly,
    /// Depth-first search for a single peg on the starting hole
    #[value(name = "dfs")]
    Dfs,
    /// Print the number of applicable actions
    #[value(name = "heuristic1")]
    Heuristic1,
    /// Print the Manhattan distance of all pegs to the starting hole
    #[value(name = "heuristic2")]
    Heuristic2,
    /// Print the weighted peg count plus the Manhattan distance
    #[value(name = "heuristic3")]
    Heuristic3,
    /// A* search guided by heuristic1
    #[value(name = "astar1")]
    Astar1,
    /// A* search guided by heuristic2
    #[value(name = "astar2")]
    Astar2,
    /// A* search guided by heuristic3
    #[value(name = "astar3")]
    Astar3,
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Search to run or heuristic to evaluate
    #[clap(value_enum)]
    command: Command,

    /// Board state: an integer whose binary expansion lists the pegs row by row (e.g. 65023)
    #[clap(value_parser = parse_seed)]
    state: u128,

    /// Seed for the random walk (drawn from entropy when omitted)
    #[clap(long)]
    rng_seed: Option<u64>,
}

fn report(initial: &BoardState, outcome: &SearchOutcome) {
    match outcome {
        SearchOutcome::Solved {
            expanded_nodes,
            elapsed,
            path,
        } => {
            println!("Congratulations solved!");
            println!("Expanded Nodes: {}", expanded_nodes);
            let actions: Vec<String> = path.iter().map(|step| step.action.to_string()).collect();
            println!("Solution Path: {}", actions.join(" -> "));
            println!("Total Time Elapsed: {:.2} seconds", elapsed.as_secs_f64());
            println!("\n");

            println!("State:\n{}\n", initial);
            for step in path {
                println!("Action: {}", step.action);
                println!("State:\n{}\n", step.state);
            }
        }
        SearchOutcome::Failed {
            expanded_nodes,
            elapsed,
        } => {
            println!("Sorry better luck next time");
            println!("Expanded Nodes: {}", expanded_nodes);
            println!("Total Time Elapsed: {:.2} seconds", elapsed.as_secs_f64());
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let initial = BoardState::new(args.state)
        .with_context(|| format!("Failed to build a board from state {}", args.state))?;
    info!(
        "Loaded {}x{} board from state {} ({} pegs)",
        initial.side(),
        initial.side(),
        args.state,
        initial.peg_count()
    );

    match args.command {
        Command::FlailWildly => {
            let mut rng = match args.rng_seed {
                Some(seed) => SmallRng::seed_from_u64(seed),
                None => SmallRng::from_entropy(),
            };
            report(&initial, &flail_wildly(&initial, &mut rng));
        }
        Command::Dfs => report(&initial, &solve_dfs(&initial)),
        Command::Heuristic1 => println!("Heuristic1 Value: {}", heuristic1(&initial)),
        Command::Heuristic2 => println!("Heuristic2 Value: {}", heuristic2(&initial)),
        Command::Heuristic3 => println!("Heuristic3 Value: {}", heuristic3(&initial)),
        Command::Astar1 => report(&initial, &solve_astar(&initial, Heuristic::Actions)),
        Command::Astar2 => report(&initial, &solve_astar(&initial, Heuristic::Manhattan)),
        Command::Astar3 => report(&initial, &solve_astar(&initial, Heuristic::WeightedPegs)),
    }

    Ok(())
}
