//! antforge CLI: solve a round trip through the points of a CSV file.

use std::path::PathBuf;
use std::time::Duration;

use antforge::instance::load_points;
use antforge::{spawn_solver, ColonyConfig, ColonyEvent, Completion, IterationSnapshot, RunOutcome};
use clap::Parser;

#[derive(Parser)]
#[command(name = "antforge")]
#[command(about = "Ant colony optimization for round-trip tours")]
#[command(version)]
struct Cli {
    /// Point file: header line, then one `x,y` pair per line
    points: PathBuf,

    /// Colony configuration (TOML or YAML); defaults to ./colony.toml if present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ants per iteration
    #[arg(short, long)]
    ants: Option<usize>,

    /// Iteration budget
    #[arg(short, long)]
    iterations: Option<usize>,

    /// Known optimal tour length, for gap reporting
    #[arg(short, long)]
    reference: Option<f64>,

    /// Pause after printing each iteration
    #[arg(long, default_value = "0")]
    delay_ms: u64,

    /// Only print the final summary
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.quiet {
        antforge::console::init();
    }

    let config = build_config(&cli)?;
    let points = load_points(&cli.points)?;
    println!(
        "Loaded {} points from {}",
        points.len(),
        cli.points.display()
    );

    let mut colony = spawn_solver(points, config)?;
    let delay = Duration::from_millis(cli.delay_ms);

    while let Some(event) = colony.events.blocking_recv() {
        match event {
            ColonyEvent::Started { .. } => {}
            ColonyEvent::Iteration(snapshot) => {
                if !cli.quiet {
                    println!("{}", iteration_line(&snapshot));
                    if !delay.is_zero() {
                        std::thread::sleep(delay);
                    }
                }
            }
            ColonyEvent::Finished(outcome) => {
                print_summary(&outcome);
                break;
            }
        }
    }

    colony
        .join
        .join()
        .map_err(|_| "solver thread panicked")?;
    Ok(())
}

fn build_config(cli: &Cli) -> Result<ColonyConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => ColonyConfig::from_yaml_file(path)?,
            _ => ColonyConfig::load(path)?,
        },
        None => ColonyConfig::load(antforge::CONFIG_FILE).unwrap_or_default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_random_seed(seed);
    }
    if let Some(ants) = cli.ants {
        config = config.with_ant_count(ants);
    }
    if let Some(iterations) = cli.iterations {
        config = config.with_iteration_budget(iterations);
    }
    if let Some(reference) = cli.reference {
        config = config.with_reference_optimum(reference);
    }
    Ok(config)
}

fn iteration_line(snapshot: &IterationSnapshot) -> String {
    let mut line = format!(
        "Iteration {} - best distance: {:.1}",
        snapshot.iteration, snapshot.best_distance
    );
    if let Some(gap) = snapshot.gap_percent {
        line.push_str(&format!(" | GAP: {:.2}%", gap));
    }
    line.push_str(" | Route:");
    for label in snapshot.route_labels() {
        line.push_str(&format!(" {}", label));
    }
    line
}

fn print_summary(outcome: &RunOutcome) {
    match outcome.completion {
        Completion::EarlyStopped { threshold, streak } => println!(
            "\n>>> Early stop: improvement below {}% for {} consecutive iterations.",
            threshold * 100.0,
            streak
        ),
        Completion::Cancelled => println!("\n>>> Run cancelled."),
        Completion::BudgetExhausted => {}
    }

    println!();
    println!("Summary");
    println!("=======");
    println!("Iterations:   {}", outcome.iterations_run);
    match outcome.best_distance() {
        Some(distance) => println!("Best:         {:.4}", distance),
        None => println!("Best:         n/a"),
    }
    println!(
        "Tours:        {} ({} partial)",
        outcome.statistics.tours_constructed, outcome.statistics.partial_tours
    );
    println!("Improvements: {}", outcome.statistics.improvement_count());
    println!("Time:         {:.2?}", outcome.statistics.duration);
    if let Some(tour) = &outcome.best_tour {
        let route: Vec<String> = tour.cities().iter().map(|c| (c + 1).to_string()).collect();
        println!("Route:        {}", route.join(" "));
    }
}
