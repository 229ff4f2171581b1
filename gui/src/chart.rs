//! Price chart widget

use chrono::{DateTime, Utc};
use coinchart_core::{PriceSeries, Timespan};
use egui::Color32;
use egui_plot::{Line, Plot, PlotPoints};

/// Tick label for a unix-seconds x value, coarser for longer windows
pub fn format_time_axis(secs: f64, timespan: Timespan) -> String {
    let Some(dt) = DateTime::<Utc>::from_timestamp(secs as i64, 0) else {
        return String::new();
    };
    let pattern = if timespan.is_intraday() {
        "%H:%M"
    } else if matches!(timespan, Timespan::Year | Timespan::Max) {
        "%b %Y"
    } else {
        "%b %d"
    };
    dt.format(pattern).to_string()
}

/// Tick label for the price axis
pub fn price_axis_label(value: f64) -> String {
    let abs = value.abs();
    if abs >= 100.0 {
        format!("${:.0}", value)
    } else if abs >= 1.0 {
        format!("${:.2}", value)
    } else {
        format!("${:.4}", value)
    }
}

/// Hover text for a point on the line
fn hover_label(name: &str, secs: f64, price: f64) -> String {
    let when = DateTime::<Utc>::from_timestamp(secs as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    if name.is_empty() {
        format!("{}\n{}", when, price_axis_label(price))
    } else {
        format!("{}\n{}\n{}", name, when, price_axis_label(price))
    }
}

/// Draw `series` as a filled line. The fill reaches down to the lowest price.
pub fn show(ui: &mut egui::Ui, series: &PriceSeries, name: &str, color: Color32, height: f32) {
    let timespan = series.timespan;
    let floor = series.lowest().unwrap_or(0.0);
    let points = PlotPoints::from(series.plot_points());

    Plot::new("price_chart")
        .height(height)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _chars, _range| format_time_axis(mark.value, timespan))
        .y_axis_formatter(|mark, _chars, _range| price_axis_label(mark.value))
        .label_formatter(|name, point| hover_label(name, point.x, point.y))
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points)
                    .name(name)
                    .color(color)
                    .width(2.0)
                    .fill(floor as f32),
            );
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2021-06-01T12:30:00Z
    const TS: f64 = 1_622_550_600.0;

    #[test]
    fn test_time_axis_granularity() {
        assert_eq!(format_time_axis(TS, Timespan::Day), "12:30");
        assert_eq!(format_time_axis(TS, Timespan::Week), "Jun 01");
        assert_eq!(format_time_axis(TS, Timespan::Quarter), "Jun 01");
        assert_eq!(format_time_axis(TS, Timespan::Max), "Jun 2021");
    }

    #[test]
    fn test_price_axis_label() {
        assert_eq!(price_axis_label(41250.4), "$41250");
        assert_eq!(price_axis_label(2.5), "$2.50");
        assert_eq!(price_axis_label(0.000123), "$0.0001");
    }

    #[test]
    fn test_hover_label() {
        assert_eq!(hover_label("", TS, 40000.0), "2021-06-01 12:30\n$40000");
        assert_eq!(
            hover_label("Bitcoin", TS, 1.5),
            "Bitcoin\n2021-06-01 12:30\n$1.50"
        );
    }
}
