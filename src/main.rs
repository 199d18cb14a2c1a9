use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use volchart::chart::{self, ChartKind};
use volchart::compute::{self, ComputeConfig};
use volchart::compute::black_scholes::Bisection;

mod cli;

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        cli::Command::DualAxis(args) => plot(ChartKind::DualAxis, args),
        cli::Command::Difference(args) => plot(ChartKind::Difference, args),
        cli::Command::Overlay(args) => plot(ChartKind::Overlay, args),
        cli::Command::Compute {
            quotes,
            output,
            strike,
            expiration,
            rate,
            tolerance,
            max_iterations,
        } => compute::run(&ComputeConfig {
            quotes_path: quotes,
            output,
            strike,
            expiration,
            rate,
            search: Bisection {
                tolerance,
                max_iterations,
                ..Bisection::default()
            },
        }),
    }
}

fn plot(kind: ChartKind, args: cli::PlotArgs) -> anyhow::Result<()> {
    let config = args.into_config(kind);
    debug!(chart = kind.name(), output = %config.output.display(), "plot command");
    chart::run(kind, &config)
}

/// Log to stderr; RUST_LOG wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "volchart=debug" } else { "volchart=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
