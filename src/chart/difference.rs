//! Signed spread between implied and underlying volatility.

use crate::data::VolatilityDataset;

use super::{Axis, Chart, ReferenceLine, Series, SeriesColor, SeriesStyle, VOLATILITY_LABEL};

pub const TITLE: &str = "Implied volatility vs Under volatility";
pub const SERIES_LABEL: &str = "Implied volatility - Under volatility";
pub const X_DESCRIPTION: &str = "Implied volatility - Under volatility At";

pub fn build(dataset: &VolatilityDataset) -> Chart {
    let primary = Axis::new(VOLATILITY_LABEL)
        .with_series(Series::new(
            SERIES_LABEL,
            SeriesColor::Blue,
            SeriesStyle::Line,
            dataset.difference(),
        ))
        .including_zero();

    Chart {
        title: TITLE.to_string(),
        x_description: X_DESCRIPTION.to_string(),
        categories: dataset.created_at().to_vec(),
        primary,
        secondary: None,
        reference_lines: vec![ReferenceLine {
            y: 0.0,
            color: SeriesColor::Black,
            dashed: true,
        }],
        legend: true,
        rotate_x_labels: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::VolatilityCsvRow;

    #[test]
    fn test_zero_line_is_visible_for_all_positive_spreads() {
        let dataset = VolatilityDataset::from_rows(vec![VolatilityCsvRow {
            created_at: "t".into(),
            implied_volatility: 2.0,
            under_volatility: 1.0,
        }]);
        let chart = build(&dataset);
        let (lo, hi) = chart.primary.range();
        assert!(lo < 0.0 && hi > 1.0);
        assert_eq!(chart.reference_lines[0].y, 0.0);
    }
}
