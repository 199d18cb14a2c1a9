use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use volchart::chart::{ChartKind, PlotConfig};

/// Implied vs underlying volatility charts for option quote exports.
#[derive(Parser)]
#[command(name = "volchart", version, about)]
pub struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Implied volatility (left axis) and underlying volatility (right axis)
    DualAxis(PlotArgs),

    /// Implied minus underlying volatility with a zero reference line
    Difference(PlotArgs),

    /// Both volatility series on one shared axis
    Overlay(PlotArgs),

    /// Compute implied and underlying volatility from a quote export
    Compute {
        /// Semicolon-delimited quote export
        #[arg(long, env = "VOLCHART_QUOTES", default_value = "Exp_Octubre.csv")]
        quotes: PathBuf,

        /// Output CSV file
        #[arg(long, short = 'o', env = "VOLCHART_OUTPUT", default_value = "output.csv")]
        output: PathBuf,

        /// Option strike price
        #[arg(long, env = "VOLCHART_STRIKE", default_value = "1033")]
        strike: f64,

        /// Expiration date (DD/MM/YYYY)
        #[arg(long, env = "VOLCHART_EXPIRATION", default_value = "20/10/2023")]
        expiration: String,

        /// Simple annual risk-free rate (1.0 = 100%)
        #[arg(long, env = "VOLCHART_RATE", default_value = "1.0")]
        rate: f64,

        /// Price tolerance for the implied volatility search
        #[arg(long, default_value = "0.00001")]
        tolerance: f64,

        /// Maximum bisection steps per quote
        #[arg(long, default_value = "500")]
        max_iterations: u32,
    },
}

#[derive(Args)]
pub struct PlotArgs {
    /// Volatility CSV with `Created At`, `Implied volatility` and `Under volatility` columns
    #[arg(long, short = 'i', env = "VOLCHART_INPUT", default_value = "output.csv")]
    pub input: PathBuf,

    /// Image file to write (.png or .svg); defaults to <chart>.png
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Open the image in the system viewer and wait for it to close
    #[arg(long)]
    pub open: bool,

    /// Image width in pixels
    #[arg(long, default_value = "1024")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "768")]
    pub height: u32,
}

impl PlotArgs {
    pub fn into_config(self, kind: ChartKind) -> PlotConfig {
        PlotConfig {
            input: self.input,
            output: self.output.unwrap_or_else(|| kind.default_output()),
            open: self.open,
            width: self.width,
            height: self.height,
        }
    }
}
