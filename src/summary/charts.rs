//! Chart generation for category breakdowns.
//!
//! The chart is built as an ECharts configuration, serialize it with
//! `to_string()` to get the JSON options for the frontend.

use charming::{
    Chart,
    component::{Legend, Title},
    element::{Color, Tooltip, Trigger},
    series::Pie,
};

use crate::summary::CategorySlice;

/// Creates a doughnut chart with one segment per category slice.
///
/// Segments use the fill colour of their slice's hue, in slice order.
pub fn category_chart(slices: &[CategorySlice]) -> Chart {
    let palette: Vec<Color> = slices
        .iter()
        .map(|slice| Color::from(slice.hue.background().as_str()))
        .collect();

    let data: Vec<(f64, &str)> = slices
        .iter()
        .map(|slice| (slice.total, slice.title.as_str()))
        .collect();

    Chart::new()
        .title(Title::new().text("Categories"))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().left("center").top("bottom"))
        .color(palette)
        .series(
            Pie::new()
                .name("Transactions")
                .radius(vec!["40%", "70%"])
                .data(data),
        )
}
