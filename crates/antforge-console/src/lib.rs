//! Colorful console output for colony runs.
//!
//! Provides a custom `tracing` layer that formats engine events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (solve start/end, new best tours, early stop)
//! - **WARN**: Anomalies such as truncated tours
//! - **DEBUG**: One line per iteration with best distance and gap

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filter used when `RUST_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "antforge_solver=info";

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner and installs the tracing subscriber.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(AntConsoleLayer)
            .try_init();
    });
}

fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
    _          _   _____
   / \   _ __ | |_|  ___|__  _ __ __ _  ___
  / _ \ | '_ \| __| |_ / _ \| '__/ _` |/ _ \
 / ___ \| | | | |_|  _| (_) | | | (_| |  __/
/_/   \_\_| |_|\__|_|  \___/|_|  \__, |\___|
                                 |___/
"#;

    let version_line = format!("              v{} - Ant Colony Tour Optimizer\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats colony events with colors.
pub struct AntConsoleLayer;

impl<S: Subscriber> Layer<S> for AntConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("antforge_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    city_count: Option<u64>,
    ant_count: Option<u64>,
    iteration_budget: Option<u64>,
    iteration: Option<u64>,
    iterations: Option<u64>,
    ant: Option<u64>,
    visited: Option<u64>,
    city: Option<u64>,
    chosen: Option<u64>,
    streak: Option<u64>,
    duration_ms: Option<u64>,
    distance: Option<f64>,
    best_distance: Option<f64>,
    gap_percent: Option<f64>,
    threshold: Option<f64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "event" {
            self.event = Some(format!("{:?}", value).trim_matches('"').to_string());
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "city_count" => self.city_count = Some(value),
            "ant_count" => self.ant_count = Some(value),
            "iteration_budget" => self.iteration_budget = Some(value),
            "iteration" => self.iteration = Some(value),
            "iterations" => self.iterations = Some(value),
            "ant" => self.ant = Some(value),
            "visited" => self.visited = Some(value),
            "city" => self.city = Some(value),
            "chosen" => self.chosen = Some(value),
            "streak" => self.streak = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "distance" => self.distance = Some(value),
            "best_distance" => self.best_distance = Some(value),
            "gap_percent" => self.gap_percent = Some(value),
            "threshold" => self.threshold = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "event" {
            self.event = Some(value.to_string());
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref().unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "new_best" => format_new_best(v),
        "iteration" => format_iteration(v),
        "early_stop" => format_early_stop(v),
        "cancelled" => format_cancelled(v),
        "partial_tour" if level <= Level::WARN => format_partial_tour(v),
        "selection_fallback" if level <= Level::WARN => format_selection_fallback(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();
    let cities = v.city_count.unwrap_or(0);
    let ants = v.ant_count.unwrap_or(0);
    let budget = v.iteration_budget.unwrap_or(0);

    format!(
        "{} {} Solving │ {} cities │ {} ants │ {} iterations │ {} tours",
        format_elapsed(),
        "▶".bright_green().bold(),
        cities.to_formatted_string(&Locale::en).bright_yellow(),
        ants.to_formatted_string(&Locale::en).bright_yellow(),
        budget.to_formatted_string(&Locale::en).bright_yellow(),
        tour_space(cities as usize).bright_magenta()
    )
}

fn format_new_best(v: &EventVisitor) -> String {
    let iteration = v.iteration.unwrap_or(0);
    let distance = v.distance.unwrap_or(f64::NAN);

    format!(
        "{} {} New best │ iteration {:>6} │ {}",
        format_elapsed(),
        "★".bright_yellow(),
        iteration.to_formatted_string(&Locale::en).white(),
        format_distance(distance).bright_green().bold()
    )
}

fn format_iteration(v: &EventVisitor) -> String {
    let iteration = v.iteration.unwrap_or(0);
    let best = v.best_distance.unwrap_or(f64::NAN);

    let mut output = format!(
        "{} {} Iteration {:>6} │ best {}",
        format_elapsed(),
        "·".bright_black(),
        iteration.to_formatted_string(&Locale::en).bright_black(),
        format_distance(best).white()
    );
    if let Some(gap) = v.gap_percent {
        output.push_str(&format!(" │ gap {}", format_gap(gap)));
    }
    output
}

fn format_early_stop(v: &EventVisitor) -> String {
    let threshold = v.threshold.unwrap_or(0.0);
    let streak = v.streak.unwrap_or(0);

    format!(
        "{} {} Converged │ improvement below {}% for {} iterations",
        format_elapsed(),
        "◆".bright_blue().bold(),
        format!("{:.2}", threshold * 100.0).bright_yellow(),
        streak.to_formatted_string(&Locale::en).bright_yellow()
    )
}

fn format_cancelled(v: &EventVisitor) -> String {
    let iterations = v.iterations.unwrap_or(0);

    format!(
        "{} {} Cancelled after {} iterations",
        format_elapsed(),
        "✗".bright_red().bold(),
        iterations.to_formatted_string(&Locale::en).white()
    )
}

fn format_partial_tour(v: &EventVisitor) -> String {
    format!(
        "{} {} Ant {} stopped after {} of {} cities",
        format_elapsed(),
        "!".bright_red().bold(),
        v.ant.unwrap_or(0),
        v.visited.unwrap_or(0),
        v.city_count.unwrap_or(0)
    )
}

fn format_selection_fallback(v: &EventVisitor) -> String {
    format!(
        "{} {} Non-finite weights at city {}, took city {}",
        format_elapsed(),
        "!".bright_red().bold(),
        v.city.unwrap_or(0) + 1,
        v.chosen.unwrap_or(0) + 1
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let iterations = v.iterations.unwrap_or(0);
    let duration = v.duration_ms.unwrap_or(0);
    let best = v
        .best_distance
        .map(format_distance)
        .unwrap_or_else(|| "N/A".to_string());

    let mut output = format!(
        "{} {} Solving complete │ {} iterations │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        iterations.to_formatted_string(&Locale::en).white(),
        format_duration_ms(duration).yellow()
    );

    output.push_str("\n\n");
    output.push_str(
        &"╔══════════════════════════════════════════════════════════╗"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');
    output.push_str(&format!(
        "{}  {:<18}{:>36}  {}",
        "║".bright_cyan(),
        "Best Distance:",
        best,
        "║".bright_cyan()
    ));
    output.push('\n');
    output.push_str(
        &"╚══════════════════════════════════════════════════════════╝"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');

    output
}

fn format_distance(distance: f64) -> String {
    format!("{:.4}", distance)
}

fn format_gap(gap: f64) -> String {
    let text = format!("{:+.2}%", gap);
    if gap <= 0.0 {
        text.bright_green().to_string()
    } else if gap < 5.0 {
        text.yellow().to_string()
    } else {
        text.bright_red().to_string()
    }
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

/// Number of distinct round trips, `(n - 1)! / 2`, in scientific notation.
fn tour_space(city_count: usize) -> String {
    if city_count < 3 {
        return "1".to_string();
    }

    let log_scale: f64 =
        (2..city_count).map(|k| (k as f64).log10()).sum::<f64>() - 2f64.log10();
    let exponent = log_scale.floor() as i32;
    let mantissa = 10f64.powf(log_scale - exponent as f64);

    format!("{:.3} x 10^{}", mantissa, exponent)
}
