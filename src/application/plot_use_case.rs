// ============================================================
// Layer 2 — PlotUseCase
// ============================================================
// Renders the loaded dataset as one scatterplot per column:
//
//   x = feature column value, y = label value
//
// Only the first `limit` records are plotted (500 by default),
// after the optional shuffle on load. Records without a value
// for the plotted column are skipped.
//
// Default charts:
//   "Temp vs Apparent Temp"      Temperature (C) / Apparent Temperature (C)
//   "Humidity vs Apparent Temp"  Humidity (%)    / Apparent Temperature (C)

use anyhow::{Context, Result};

use crate::application::pipeline::LoadedRun;
use crate::domain::chart::{AxisLabels, ChartTarget, Point};
use crate::domain::record::Record;
use crate::domain::traits::{RecordSource, VisualizationSink};

pub const DEFAULT_SCATTER_LIMIT: usize = 500;

pub struct PlotUseCase {
    label:   String,
    columns: Vec<String>,
    limit:   usize,
    shuffle: bool,
    seed:    Option<u64>,
}

impl PlotUseCase {
    pub fn new(label: impl Into<String>, columns: Vec<String>, limit: usize) -> Self {
        Self { label: label.into(), columns, limit, shuffle: false, seed: None }
    }

    /// Shuffle the records after loading them in `execute`.
    pub fn shuffled(mut self, seed: Option<u64>) -> Self {
        self.shuffle = true;
        self.seed    = seed;
        self
    }

    /// Load the records and render them.
    pub fn execute(&self, source: &dyn RecordSource, sink: &dyn VisualizationSink) -> Result<usize> {
        let mut loaded = LoadedRun::load(source, &self.label).context("Cannot load records to plot")?;
        if self.shuffle {
            loaded = loaded.shuffled(self.seed);
        }
        self.render(loaded.records(), sink)
    }

    /// Render one scatterplot per configured column.
    /// Returns the number of charts rendered.
    pub fn render(&self, records: &[Record], sink: &dyn VisualizationSink) -> Result<usize> {
        let head = &records[..records.len().min(self.limit)];

        for column in &self.columns {
            let points = scatter_points(head, column);
            if points.len() < head.len() {
                tracing::debug!(
                    "'{}': skipped {} records without a value",
                    column,
                    head.len() - points.len()
                );
            }

            let target = ChartTarget::new(
                format!("{} vs {}", short_name(column), short_name(&self.label)),
                "Charts",
            );
            let axes = AxisLabels::new(axis_label(column), axis_label(&self.label));
            sink.render_scatter(&target, &points, &axes)?;
        }

        Ok(self.columns.len())
    }
}

/// {x: record[column], y: label} for every record that has `column`
pub fn scatter_points(records: &[Record], column: &str) -> Vec<Point> {
    records
        .iter()
        .filter_map(|r| r.feature(column).map(|x| Point { x, y: r.label() }))
        .collect()
}

/// "Apparent_Temperature" → "Apparent Temp"
fn short_name(column: &str) -> String {
    column.replace('_', " ").replace("Temperature", "Temp")
}

fn axis_label(column: &str) -> String {
    match column {
        "Temperature"          => "Temperature (C)".to_string(),
        "Apparent_Temperature" => "Apparent Temperature (C)".to_string(),
        "Humidity"             => "Humidity (%)".to_string(),
        other                  => other.replace('_', " "),
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::EpochMetrics;
    use crate::domain::error::LoadError;
    use std::cell::RefCell;

    #[derive(Default)]
    struct CapturingSink {
        charts: RefCell<Vec<(ChartTarget, usize, AxisLabels)>>,
        points: RefCell<Vec<Vec<f32>>>,
    }

    impl VisualizationSink for CapturingSink {
        fn render_scatter(&self, t: &ChartTarget, p: &[Point], a: &AxisLabels) -> Result<()> {
            self.charts.borrow_mut().push((t.clone(), p.len(), a.clone()));
            self.points.borrow_mut().push(p.iter().map(|p| p.x).collect());
            Ok(())
        }

        fn on_epoch_end(&self, _: &ChartTarget, _: &EpochMetrics) -> Result<()> {
            Ok(())
        }
    }

    fn records(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| {
                Record::new(
                    vec![("Temperature".into(), i as f32), ("Humidity".into(), 0.5)],
                    i as f32 - 2.0,
                )
            })
            .collect()
    }

    #[test]
    fn test_default_charts_and_limit() {
        let sink = CapturingSink::default();
        let plot = PlotUseCase::new(
            "Apparent_Temperature",
            vec!["Temperature".into(), "Humidity".into()],
            DEFAULT_SCATTER_LIMIT,
        );
        assert_eq!(plot.render(&records(800), &sink).unwrap(), 2);

        let charts = sink.charts.borrow();
        assert_eq!(charts[0].0.name, "Temp vs Apparent Temp");
        assert_eq!(charts[0].1, 500);
        assert_eq!(charts[0].2.x_label, "Temperature (C)");
        assert_eq!(charts[0].2.y_label, "Apparent Temperature (C)");
        assert_eq!(charts[1].0.name, "Humidity vs Apparent Temp");
        assert_eq!(charts[1].2.x_label, "Humidity (%)");
    }

    struct Sorted(usize);

    impl RecordSource for Sorted {
        fn load_all(&self) -> std::result::Result<Vec<Record>, LoadError> {
            Ok(records(self.0))
        }
    }

    #[test]
    fn test_execute_shuffles_before_taking_the_head() {
        let columns = vec!["Temperature".to_string()];

        let sink = CapturingSink::default();
        PlotUseCase::new("Apparent_Temperature", columns.clone(), 10)
            .execute(&Sorted(1_000), &sink)
            .unwrap();
        assert_eq!(sink.points.borrow()[0], (0..10).map(|i| i as f32).collect::<Vec<_>>());

        let sink = CapturingSink::default();
        PlotUseCase::new("Apparent_Temperature", columns, 10)
            .shuffled(Some(7))
            .execute(&Sorted(1_000), &sink)
            .unwrap();
        assert!(sink.points.borrow()[0].iter().any(|x| *x >= 10.0));
    }

    #[test]
    fn test_scatter_points_skip_missing_values() {
        let mut rs = records(3);
        rs.push(Record::new(vec![("Humidity".into(), 0.7)], 1.0));

        let points = scatter_points(&rs, "Temperature");
        assert_eq!(points.len(), 3);
        assert_eq!(points[2], Point { x: 2.0, y: 0.0 });
    }
}
