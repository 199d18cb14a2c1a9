//! Chart descriptions for the three volatility views and the `plot` commands.
//!
//! Each view is built as a plain [`Chart`] value first; [`render`] turns any
//! chart into an image. Keeping the two apart means point counts, ordering and
//! reference lines can be checked without drawing anything.

pub mod difference;
pub mod dual_axis;
pub mod overlay;
pub mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use plotters::style::RGBColor;
use tracing::info;

use crate::data::{self, VolatilityDataset};

pub const IMPLIED_LABEL: &str = "Implied volatility";
pub const UNDER_LABEL: &str = "Under volatility";
pub const CREATED_AT_LABEL: &str = "Created At";
pub const VOLATILITY_LABEL: &str = "Volatility";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesColor {
    Blue,
    Green,
    Black,
}

impl SeriesColor {
    pub fn rgb(self) -> RGBColor {
        match self {
            SeriesColor::Blue => RGBColor(0, 0, 255),
            SeriesColor::Green => RGBColor(0, 128, 0),
            SeriesColor::Black => RGBColor(0, 0, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesStyle {
    Line,
    LineWithMarkers,
}

/// One plotted series; `values[i]` sits at category `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub color: SeriesColor,
    pub style: SeriesStyle,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(label: &str, color: SeriesColor, style: SeriesStyle, values: Vec<f64>) -> Self {
        Self {
            label: label.to_string(),
            color,
            style,
            values,
        }
    }
}

/// A Y axis and the series scaled against it.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub description: String,
    /// Colour for the description and tick labels; `None` keeps the default.
    pub color: Option<SeriesColor>,
    pub series: Vec<Series>,
    /// Force the range to contain y = 0.
    pub include_zero: bool,
}

impl Axis {
    pub fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            color: None,
            series: Vec::new(),
            include_zero: false,
        }
    }

    pub fn colored(mut self, color: SeriesColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn including_zero(mut self) -> Self {
        self.include_zero = true;
        self
    }

    /// Padded `(min, max)` over every finite value on this axis.
    pub fn range(&self) -> (f64, f64) {
        let mut values: Vec<f64> = self
            .series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .filter(|v| v.is_finite())
            .collect();
        if self.include_zero {
            values.push(0.0);
        }
        if values.is_empty() {
            return (0.0, 1.0);
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = max - min;
        let padding = if span > 0.0 {
            span * 0.1
        } else {
            (max.abs() * 0.1).max(0.01)
        };
        (min - padding, max + padding)
    }
}

/// Horizontal line across the whole plot width.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub y: f64,
    pub color: SeriesColor,
    pub dashed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_description: String,
    /// X-axis categories, in dataset order.
    pub categories: Vec<String>,
    pub primary: Axis,
    pub secondary: Option<Axis>,
    pub reference_lines: Vec<ReferenceLine>,
    pub legend: bool,
    pub rotate_x_labels: bool,
}

impl Chart {
    /// Every series on the chart, primary axis first.
    pub fn series(&self) -> impl Iterator<Item = &Series> {
        self.primary
            .series
            .iter()
            .chain(self.secondary.iter().flat_map(|axis| axis.series.iter()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    DualAxis,
    Difference,
    Overlay,
}

impl ChartKind {
    pub fn build(self, dataset: &VolatilityDataset) -> Chart {
        match self {
            ChartKind::DualAxis => dual_axis::build(dataset),
            ChartKind::Difference => difference::build(dataset),
            ChartKind::Overlay => overlay::build(dataset),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ChartKind::DualAxis => "dual-axis",
            ChartKind::Difference => "difference",
            ChartKind::Overlay => "overlay",
        }
    }

    pub fn default_output(self) -> PathBuf {
        match self {
            ChartKind::DualAxis => PathBuf::from("dual_axis.png"),
            ChartKind::Difference => PathBuf::from("difference.png"),
            ChartKind::Overlay => PathBuf::from("overlay.png"),
        }
    }
}

/// Options shared by the chart commands.
pub struct PlotConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub open: bool,
    pub width: u32,
    pub height: u32,
}

/// Entry point for the `dual-axis`, `difference` and `overlay` commands.
pub fn run(kind: ChartKind, config: &PlotConfig) -> Result<()> {
    let dataset = data::load_dataset(&config.input)
        .with_context(|| format!("loading {}", config.input.display()))?;
    info!(
        chart = kind.name(),
        rows = dataset.len(),
        input = %config.input.display(),
        "building chart"
    );

    let chart = kind.build(&dataset);
    render::render_to_file(&chart, &config.output, (config.width, config.height))
        .with_context(|| format!("rendering {}", config.output.display()))?;
    info!(output = %config.output.display(), "chart written");

    if config.open {
        render::open_viewer(&config.output)?;
    }
    Ok(())
}
