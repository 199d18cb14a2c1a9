//! Implied volatility on the left axis, underlying volatility on the right.

use crate::data::VolatilityDataset;

use super::{
    Axis, CREATED_AT_LABEL, Chart, IMPLIED_LABEL, Series, SeriesColor, SeriesStyle, UNDER_LABEL,
};

pub const TITLE: &str = "Implied vs Realized Volatility";

pub fn build(dataset: &VolatilityDataset) -> Chart {
    let primary = Axis::new(IMPLIED_LABEL)
        .colored(SeriesColor::Blue)
        .with_series(Series::new(
            IMPLIED_LABEL,
            SeriesColor::Blue,
            SeriesStyle::LineWithMarkers,
            dataset.implied().to_vec(),
        ));
    let secondary = Axis::new(UNDER_LABEL)
        .colored(SeriesColor::Green)
        .with_series(Series::new(
            UNDER_LABEL,
            SeriesColor::Green,
            SeriesStyle::LineWithMarkers,
            dataset.under().to_vec(),
        ));

    Chart {
        title: TITLE.to_string(),
        x_description: CREATED_AT_LABEL.to_string(),
        categories: dataset.created_at().to_vec(),
        primary,
        secondary: Some(secondary),
        reference_lines: Vec::new(),
        legend: false,
        rotate_x_labels: true,
    }
}
