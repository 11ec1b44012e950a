//! Chart model builders.
//!
//! Pure functions that turn fetched history into plot-ready series. The model
//! is rebuilt from scratch every render; there is no incremental path.

use crate::api::types::{AccountValuePoint, ModelSeries};
use crate::consts::cli_consts::{CHART_EMPTY_MAX, CHART_Y_HEADROOM};
use crate::format::timestamp_epoch;
use chrono::{Local, TimeZone, Utc};

/// One plotted line.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    /// (epoch seconds, account value), chronological.
    pub points: Vec<(f64, f64)>,
}

/// Everything the chart widget needs, precomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    pub series: Vec<Series>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_labels: Vec<String>,
}

/// Y-axis bounds: always `[0, headroom x max]`, with a fixed fallback when
/// there is no data.
pub fn y_axis_bounds(data_max: Option<f64>) -> [f64; 2] {
    let max = match data_max {
        Some(max) if max > 0.0 => max,
        _ => CHART_EMPTY_MAX,
    };
    [0.0, max * CHART_Y_HEADROOM]
}

/// Builds the single-model chart: history arrives newest-first and is
/// reversed to chronological, then a synthesized "now" point carries the
/// line to the current total value.
pub fn single_series(
    history: &[AccountValuePoint],
    current_value: f64,
    name: &str,
) -> ChartModel {
    let mut points: Vec<(f64, f64)> = history
        .iter()
        .rev()
        .filter_map(|p| timestamp_epoch(&p.timestamp).map(|epoch| (epoch as f64, p.total_value)))
        .collect();
    points.push((Utc::now().timestamp() as f64, current_value));

    let data_max = points
        .iter()
        .map(|(_, v)| *v)
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))));

    finish(
        vec![Series {
            name: name.to_string(),
            points,
        }],
        data_max,
    )
}

/// Builds the aggregated comparison chart. The x axis unifies every model's
/// timestamps (sorted, deduplicated) so labels cover the full span, but each
/// model's points keep their own x positions; missing samples are bridged
/// visually by the line segments.
pub fn multi_series(chart_data: &[ModelSeries]) -> ChartModel {
    let mut axis: Vec<i64> = chart_data
        .iter()
        .flat_map(|series| series.data.iter())
        .filter_map(|p| timestamp_epoch(&p.timestamp))
        .collect();
    axis.sort_unstable();
    axis.dedup();

    let mut data_max: Option<f64> = None;
    let series: Vec<Series> = chart_data
        .iter()
        .map(|model| {
            let points: Vec<(f64, f64)> = model
                .data
                .iter()
                .filter_map(|p| {
                    let epoch = timestamp_epoch(&p.timestamp)?;
                    let value = p.value?;
                    Some((epoch as f64, value))
                })
                .collect();
            for (_, v) in &points {
                data_max = Some(data_max.map_or(*v, |m| m.max(*v)));
            }
            Series {
                name: model.model_name.clone(),
                points,
            }
        })
        .collect();

    finish(series, data_max)
}

fn finish(series: Vec<Series>, data_max: Option<f64>) -> ChartModel {
    let xs: Vec<f64> = series
        .iter()
        .flat_map(|s| s.points.iter().map(|(x, _)| *x))
        .collect();
    let x_min = xs.iter().copied().fold(f64::INFINITY, f64::min);
    let x_max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let x_bounds = if xs.is_empty() || x_min == x_max {
        // Degenerate axis still needs a nonzero span to render.
        let base = if xs.is_empty() { 0.0 } else { x_min };
        [base, base + 1.0]
    } else {
        [x_min, x_max]
    };

    let x_labels = [x_bounds[0], (x_bounds[0] + x_bounds[1]) / 2.0, x_bounds[1]]
        .iter()
        .map(|x| epoch_label(*x as i64))
        .collect();

    ChartModel {
        series,
        x_bounds,
        y_bounds: y_axis_bounds(data_max),
        x_labels,
    }
}

/// Local `HH:MM` label for an x-axis epoch.
fn epoch_label(epoch: i64) -> String {
    match Utc.timestamp_opt(epoch, 0).single() {
        Some(utc) => utc.with_timezone(&Local).format("%H:%M").to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::ChartPoint;

    fn point(timestamp: &str, value: f64) -> AccountValuePoint {
        AccountValuePoint {
            timestamp: timestamp.to_string(),
            total_value: value,
        }
    }

    #[test]
    fn test_y_bounds_rule() {
        assert_eq!(y_axis_bounds(Some(100_000.0)), [0.0, 130_000.0]);
        assert_eq!(y_axis_bounds(Some(10.0)), [0.0, 13.0]);
        // Empty or non-positive data falls back to the fixed maximum.
        assert_eq!(y_axis_bounds(None), [0.0, 130_000.0]);
        assert_eq!(y_axis_bounds(Some(0.0)), [0.0, 130_000.0]);
    }

    #[test]
    fn test_single_series_is_chronological_with_now_point() {
        // Server history is newest-first.
        let history = vec![
            point("2025-03-01 12:00:00", 105_000.0),
            point("2025-03-01 11:00:00", 103_000.0),
            point("2025-03-01 10:00:00", 101_000.0),
        ];
        let model = single_series(&history, 106_000.0, "Scalper");
        let points = &model.series[0].points;

        assert_eq!(points.len(), 4);
        assert!(points.windows(2).all(|w| w[0].0 <= w[1].0));
        assert_eq!(points[0].1, 101_000.0);
        // The synthesized last point carries the current total value.
        assert_eq!(points[3].1, 106_000.0);
        assert_eq!(model.y_bounds, [0.0, 106_000.0 * 1.3]);
    }

    #[test]
    fn test_multi_series_merges_axis_and_skips_null_values() {
        let chart_data = vec![
            ModelSeries {
                model_name: "alpha".to_string(),
                data: vec![
                    ChartPoint {
                        timestamp: "2025-03-01 10:00:00".to_string(),
                        value: Some(100.0),
                    },
                    ChartPoint {
                        timestamp: "2025-03-01 12:00:00".to_string(),
                        value: None,
                    },
                ],
            },
            ModelSeries {
                model_name: "beta".to_string(),
                data: vec![ChartPoint {
                    timestamp: "2025-03-01 11:00:00".to_string(),
                    value: Some(250.0),
                }],
            },
        ];

        let model = multi_series(&chart_data);
        assert_eq!(model.series.len(), 2);
        // Null sample dropped from alpha's line.
        assert_eq!(model.series[0].points.len(), 1);
        assert_eq!(model.series[1].points.len(), 1);
        // The axis spans every model's timestamps, including the null one.
        let span_start = crate::format::timestamp_epoch("2025-03-01 10:00:00").unwrap() as f64;
        let span_end = crate::format::timestamp_epoch("2025-03-01 12:00:00").unwrap() as f64;
        assert_eq!(model.x_bounds, [span_start, span_end]);
        assert_eq!(model.y_bounds, [0.0, 250.0 * 1.3]);
    }

    #[test]
    fn test_empty_chart_data_renders_empty_state() {
        let model = multi_series(&[]);
        assert!(model.series.is_empty());
        assert_eq!(model.y_bounds, [0.0, 130_000.0]);
        assert_eq!(model.x_labels.len(), 3);
    }
}
