use std::path::Path;
use std::process::Command;

use plotters::coord::Shift;
use plotters::coord::ranged1d::SegmentedCoord;
use plotters::coord::types::{RangedCoordf64, RangedCoordu32};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::FontTransform;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use crate::error::{Result, VolChartError};

use super::{Chart, Series, SeriesStyle};

const MARKER_SIZE: i32 = 3;
const LINE_WIDTH: u32 = 2;
/// Pixels between the X axis line and the category labels.
const X_LABEL_GAP: i32 = 8;

type CategoryChart<'a, DB> =
    ChartContext<'a, DB, Cartesian2d<SegmentedCoord<RangedCoordu32>, RangedCoordf64>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    /// Pick the image format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            _ => Err(VolChartError::UnsupportedFormat { extension }),
        }
    }
}

/// Render `chart` into an image file; the format follows the extension.
pub fn render_to_file(chart: &Chart, path: &Path, size: (u32, u32)) -> Result<()> {
    match OutputFormat::from_path(path)? {
        OutputFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw(chart, &root)?;
            root.present().map_err(VolChartError::render)?;
        }
        OutputFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw(chart, &root)?;
            root.present().map_err(VolChartError::render)?;
        }
    }
    Ok(())
}

/// Render `chart` as an SVG document in memory.
pub fn render_svg(chart: &Chart, size: (u32, u32)) -> Result<String> {
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, size).into_drawing_area();
        draw(chart, &root)?;
        root.present().map_err(VolChartError::render)?;
    }
    Ok(buf)
}

/// Hand the rendered file to the platform viewer and wait for it to return.
pub fn open_viewer(path: &Path) -> Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else {
        Command::new("xdg-open")
    };
    command.arg(path);

    let program = command.get_program().to_string_lossy().into_owned();
    debug!(%program, path = %path.display(), "opening viewer");
    let status = command.status().map_err(|e| VolChartError::Viewer {
        program: program.clone(),
        reason: e.to_string(),
    })?;
    if !status.success() {
        return Err(VolChartError::Viewer {
            program,
            reason: format!("exited with {status}"),
        });
    }
    Ok(())
}

/// Categorical X coordinate with exactly one segment per category.
///
/// Plotters integer ranges include their end, so `count` categories span
/// `0..count - 1`. An empty dataset still gets one blank segment.
fn category_coord(count: usize) -> SegmentedCoord<RangedCoordu32> {
    let last = (count as u32).max(1) - 1;
    (0..last).into_segmented()
}

fn series_points(series: &Series) -> Vec<(SegmentValue<u32>, f64)> {
    series
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| (SegmentValue::CenterOf(i as u32), *v))
        .collect()
}

fn draw<DB: DrawingBackend>(chart: &Chart, root: &DrawingArea<DB, Shift>) -> Result<()> {
    root.fill(&WHITE).map_err(VolChartError::render)?;

    let count = chart.categories.len();
    let (y_min, y_max) = chart.primary.range();

    let ctx = ChartBuilder::on(root)
        .caption(&chart.title, ("sans-serif", 28).into_font())
        .margin(15)
        .x_label_area_size(if chart.rotate_x_labels { 140 } else { 40 })
        .y_label_area_size(70)
        .right_y_label_area_size(if chart.secondary.is_some() { 70 } else { 0 })
        .build_cartesian_2d(category_coord(count), y_min..y_max)
        .map_err(VolChartError::render)?;

    let Some(secondary) = &chart.secondary else {
        let mut ctx = ctx;
        draw_primary(chart, root, &mut ctx)?;
        return draw_legend(chart, &mut ctx);
    };

    // The right label area only moves to the secondary axis here, so the
    // primary mesh must not be drawn before this point.
    let (y2_min, y2_max) = secondary.range();
    let mut dual = ctx.set_secondary_coord(category_coord(count), y2_min..y2_max);
    draw_primary(chart, root, &mut *dual)?;

    {
        let mut axes = dual.configure_secondary_axes();
        axes.y_desc(secondary.description.as_str());
        if let Some(color) = secondary.color {
            let rgb = color.rgb();
            axes.label_style(tick_font().color(&rgb))
                .axis_desc_style(desc_font().color(&rgb));
        }
        axes.draw().map_err(VolChartError::render)?;
    }

    for series in &secondary.series {
        let points = series_points(series);
        let color = series.color.rgb();
        dual.draw_secondary_series(LineSeries::new(points.clone(), color.stroke_width(LINE_WIDTH)))
            .map_err(VolChartError::render)?
            .label(series.label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH))
            });
        if series.style == SeriesStyle::LineWithMarkers {
            dual.draw_secondary_series(
                points
                    .into_iter()
                    .map(|p| Circle::new(p, MARKER_SIZE, color.filled())),
            )
            .map_err(VolChartError::render)?;
        }
    }

    draw_legend(chart, &mut *dual)
}

fn tick_font() -> FontDesc<'static> {
    ("sans-serif", 12).into_font()
}

fn desc_font() -> FontDesc<'static> {
    ("sans-serif", 14).into_font()
}

/// Primary mesh, category labels, reference lines and primary series.
fn draw_primary<'a, DB: DrawingBackend + 'a>(
    chart: &Chart,
    root: &DrawingArea<DB, Shift>,
    ctx: &mut CategoryChart<'a, DB>,
) -> Result<()> {
    let (y_min, _) = chart.primary.range();
    let desc_style = match chart.primary.color {
        Some(color) => desc_font().color(&color.rgb()),
        None => TextStyle::from(desc_font()),
    };

    // category names are drawn by `draw_category_labels`
    let blank = |_: &SegmentValue<u32>| String::new();
    {
        let mut mesh = ctx.configure_mesh();
        mesh.disable_x_mesh()
            .x_labels(chart.categories.len().max(1))
            .x_label_formatter(&blank)
            .x_desc(chart.x_description.as_str())
            .y_desc(chart.primary.description.as_str())
            .axis_desc_style(desc_style);
        if let Some(color) = chart.primary.color {
            mesh.y_label_style(tick_font().color(&color.rgb()));
        }
        mesh.draw().map_err(VolChartError::render)?;
    }

    draw_category_labels(chart, root, ctx, y_min)?;

    for line in &chart.reference_lines {
        let ends = vec![(SegmentValue::Exact(0), line.y), (SegmentValue::Last, line.y)];
        let style = line.color.rgb().stroke_width(1);
        if line.dashed {
            ctx.draw_series(DashedLineSeries::new(ends, 8, 6, style))
                .map_err(VolChartError::render)?;
        } else {
            ctx.draw_series(LineSeries::new(ends, style))
                .map_err(VolChartError::render)?;
        }
    }

    for series in &chart.primary.series {
        let points = series_points(series);
        let color = series.color.rgb();
        ctx.draw_series(LineSeries::new(points.clone(), color.stroke_width(LINE_WIDTH)))
            .map_err(VolChartError::render)?
            .label(series.label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH))
            });
        if series.style == SeriesStyle::LineWithMarkers {
            ctx.draw_series(
                points
                    .into_iter()
                    .map(|p| Circle::new(p, MARKER_SIZE, color.filled())),
            )
            .map_err(VolChartError::render)?;
        }
    }
    Ok(())
}

/// Category names under the X axis, one per segment centre.
///
/// Rotated labels are anchored at their start so they read downwards from
/// just below the axis line.
fn draw_category_labels<'a, DB: DrawingBackend + 'a>(
    chart: &Chart,
    root: &DrawingArea<DB, Shift>,
    ctx: &CategoryChart<'a, DB>,
    y_min: f64,
) -> Result<()> {
    let style = if chart.rotate_x_labels {
        TextStyle::from(tick_font().transform(FontTransform::Rotate90))
            .pos(Pos::new(HPos::Left, VPos::Center))
    } else {
        TextStyle::from(tick_font()).pos(Pos::new(HPos::Center, VPos::Top))
    };
    for (i, label) in chart.categories.iter().enumerate() {
        let (x, y) = ctx.backend_coord(&(SegmentValue::CenterOf(i as u32), y_min));
        root.draw(&Text::new(label.as_str(), (x, y + X_LABEL_GAP), style.clone()))
            .map_err(VolChartError::render)?;
    }
    Ok(())
}

fn draw_legend<'a, DB: DrawingBackend + 'a>(
    chart: &Chart,
    ctx: &mut CategoryChart<'a, DB>,
) -> Result<()> {
    if chart.legend {
        ctx.configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(VolChartError::render)?;
    }
    Ok(())
}
