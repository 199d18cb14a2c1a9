use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use volchart::VolChartError;
use volchart::chart::{self, ChartKind, PlotConfig, SeriesColor, SeriesStyle, difference};
use volchart::data;

// ── Helpers ──────────────────────────────────────────────────────────

const SCENARIO: &str = "\
Created At,Implied volatility,Under volatility
t1,0.20,0.18
t2,0.25,0.22
";

const ALL_KINDS: [ChartKind; 3] = [ChartKind::DualAxis, ChartKind::Difference, ChartKind::Overlay];

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn plot_config(input: &Path, output: PathBuf) -> PlotConfig {
    PlotConfig {
        input: input.to_path_buf(),
        output,
        open: false,
        width: 800,
        height: 600,
    }
}

// ── Loader ───────────────────────────────────────────────────────────

#[test]
fn test_load_keeps_rows_and_order() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "output.csv",
        "Description,Created At,Implied volatility,Under volatility,Years to expiration\n\
         GFGC1033OC,10/18/2023 15:00,0.9,0.4,0.004\n\
         GFGC1033OC,10/18/2023 11:00,0.8,0.5,0.005\n\
         GFGC1033OC,10/18/2023 13:00,-1,0.6,0.004\n",
    );
    let dataset = data::load_dataset(&path).unwrap();
    assert_eq!(dataset.len(), 3);
    assert_eq!(
        dataset.created_at(),
        &["10/18/2023 15:00", "10/18/2023 11:00", "10/18/2023 13:00"]
    );
    assert_eq!(dataset.implied(), &[0.9, 0.8, -1.0]);
    assert_eq!(dataset.under(), &[0.4, 0.5, 0.6]);
}

#[test]
fn test_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let err = data::load_dataset(&dir.path().join("output.csv")).unwrap_err();
    assert!(matches!(err, VolChartError::Open { .. }));
}

#[test]
fn test_unparsable_value_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "output.csv",
        "Created At,Implied volatility,Under volatility\nt1,abc,0.1\n",
    );
    assert!(matches!(
        data::load_dataset(&path),
        Err(VolChartError::Csv { .. })
    ));
}

// ── Scenario ─────────────────────────────────────────────────────────

#[test]
fn test_scenario_dual_axis() {
    let dir = TempDir::new().unwrap();
    let dataset = data::load_dataset(&write_file(&dir, "output.csv", SCENARIO)).unwrap();
    let chart = ChartKind::DualAxis.build(&dataset);

    assert_eq!(chart.categories, vec!["t1", "t2"]);
    assert_eq!(chart.primary.series.len(), 1);
    assert_eq!(chart.primary.series[0].values, vec![0.20, 0.25]);
    assert_eq!(chart.primary.color, Some(SeriesColor::Blue));

    let secondary = chart.secondary.as_ref().expect("dual-axis has a right axis");
    assert_eq!(secondary.series.len(), 1);
    assert_eq!(secondary.series[0].values, vec![0.18, 0.22]);
    assert_eq!(secondary.color, Some(SeriesColor::Green));
    assert_eq!(secondary.series[0].style, SeriesStyle::LineWithMarkers);

    assert_eq!(chart.title, "Implied vs Realized Volatility");
    assert!(chart.rotate_x_labels);
    assert!(!chart.legend);
}

#[test]
fn test_scenario_difference() {
    let dir = TempDir::new().unwrap();
    let dataset = data::load_dataset(&write_file(&dir, "output.csv", SCENARIO)).unwrap();
    let chart = ChartKind::Difference.build(&dataset);

    let series = &chart.primary.series;
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].values, vec![0.20 - 0.18, 0.25 - 0.22]);
    assert!((series[0].values[0] - 0.02).abs() < 1e-12);
    assert!((series[0].values[1] - 0.03).abs() < 1e-12);
    assert_eq!(series[0].label, difference::SERIES_LABEL);
    assert_eq!(series[0].color, SeriesColor::Blue);

    assert_eq!(chart.reference_lines.len(), 1);
    let zero = &chart.reference_lines[0];
    assert_eq!(zero.y, 0.0);
    assert!(zero.dashed);
    assert_eq!(zero.color, SeriesColor::Black);

    let (lo, hi) = chart.primary.range();
    assert!(lo <= 0.0 && hi >= 0.03);
    assert!(chart.secondary.is_none());
    assert!(chart.legend);
}

#[test]
fn test_scenario_overlay() {
    let dir = TempDir::new().unwrap();
    let dataset = data::load_dataset(&write_file(&dir, "output.csv", SCENARIO)).unwrap();
    let chart = ChartKind::Overlay.build(&dataset);

    assert!(chart.secondary.is_none());
    let labels: Vec<&str> = chart.series().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Implied volatility", "Under volatility"]);
    let colors: Vec<SeriesColor> = chart.series().map(|s| s.color).collect();
    assert_eq!(colors, vec![SeriesColor::Blue, SeriesColor::Green]);
    assert!(chart.series().all(|s| s.values.len() == 2));
    assert!(chart.legend);
}

// ── Properties ───────────────────────────────────────────────────────

#[test]
fn test_every_series_has_one_point_per_row() {
    let mut csv = String::from("Created At,Implied volatility,Under volatility\n");
    for i in 0..25 {
        csv.push_str(&format!("{i},{},{}\n", 0.1 + i as f64 * 0.01, 0.3 - i as f64 * 0.005));
    }
    let dir = TempDir::new().unwrap();
    let dataset = data::load_dataset(&write_file(&dir, "output.csv", &csv)).unwrap();

    for kind in ALL_KINDS {
        let chart = kind.build(&dataset);
        assert_eq!(chart.categories.len(), 25, "{}", kind.name());
        assert_eq!(chart.categories[0], "0");
        assert_eq!(chart.categories[24], "24");
        for series in chart.series() {
            assert_eq!(series.values.len(), 25, "{} / {}", kind.name(), series.label);
        }
    }
}

#[test]
fn test_zero_line_independent_of_data_range() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "output.csv",
        "Created At,Implied volatility,Under volatility\nt1,50,10\nt2,60,12\n",
    );
    let chart = ChartKind::Difference.build(&data::load_dataset(&path).unwrap());
    assert_eq!(chart.reference_lines[0].y, 0.0);
    let (lo, _) = chart.primary.range();
    assert!(lo <= 0.0);
}

#[test]
fn test_header_only_file_gives_empty_series() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "output.csv",
        "Created At,Implied volatility,Under volatility\n",
    );
    let dataset = data::load_dataset(&path).unwrap();
    assert!(dataset.is_empty());

    for kind in ALL_KINDS {
        let chart = kind.build(&dataset);
        assert!(chart.categories.is_empty());
        assert!(chart.series().all(|s| s.values.is_empty()));
    }
}

#[test]
fn test_missing_under_volatility_fails_before_rendering() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        &dir,
        "output.csv",
        "Created At,Implied volatility\nt1,0.2\n",
    );
    let header_only = write_file(&dir, "header.csv", "Created At,Implied volatility\n");

    for kind in ALL_KINDS {
        for path in [&input, &header_only] {
            let output = dir.path().join(format!("{}.png", kind.name()));
            let err = chart::run(kind, &plot_config(path, output.clone())).unwrap_err();
            let root = err.root_cause().to_string();
            assert!(root.contains("Under volatility"), "{root}");
            assert!(!output.exists());
        }
    }
}

// ── Rendering ────────────────────────────────────────────────────────

#[test]
fn test_run_renders_scenario_for_every_kind() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "output.csv", SCENARIO);

    for kind in ALL_KINDS {
        for extension in ["png", "svg"] {
            let output = dir.path().join(format!("{}.{extension}", kind.name()));
            chart::run(kind, &plot_config(&input, output.clone())).unwrap();
            assert!(fs::metadata(&output).unwrap().len() > 0, "{}", output.display());
        }
    }
}

#[test]
fn test_run_renders_header_only_file() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        &dir,
        "output.csv",
        "Created At,Implied volatility,Under volatility\n",
    );

    for kind in ALL_KINDS {
        for extension in ["png", "svg"] {
            let output = dir.path().join(format!("{}.{extension}", kind.name()));
            chart::run(kind, &plot_config(&input, output.clone())).unwrap();
            assert!(output.exists(), "{}", output.display());
        }
    }
}

#[test]
fn test_run_renders_single_row() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        &dir,
        "output.csv",
        "Created At,Implied volatility,Under volatility\nt1,0.2,0.2\n",
    );

    for kind in ALL_KINDS {
        let output = dir.path().join(format!("{}.png", kind.name()));
        chart::run(kind, &plot_config(&input, output.clone())).unwrap();
        assert!(output.exists());
    }
}

#[test]
fn test_dual_axis_svg_has_one_description_per_axis() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "output.csv", SCENARIO);
    let output = dir.path().join("dual_axis.svg");
    chart::run(ChartKind::DualAxis, &plot_config(&input, output.clone())).unwrap();

    let svg = fs::read_to_string(&output).unwrap();
    assert_eq!(svg.matches("Implied volatility").count(), 1);
    assert_eq!(svg.matches("Under volatility").count(), 1);
    assert!(svg.contains(">t1"));
    assert!(svg.contains(">t2"));
}

#[test]
fn test_unsupported_output_format_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "output.csv", SCENARIO);
    let err = chart::run(
        ChartKind::Overlay,
        &plot_config(&input, dir.path().join("overlay.jpg")),
    )
    .unwrap_err();
    assert!(err.to_string().contains("rendering"));
}
