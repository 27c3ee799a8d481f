//! CSV batch estimation for intake exports.

mod parser;

use crate::workflows::timeline::{
    DurationEstimate, IntakeIssue, PlotCategory, PlotUnit, TimelineEstimator,
};
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum TimelineImportError {
    #[error("failed to read intake export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid intake CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Outcome for a single CSV row; `row` is 1-based and excludes the header.
#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    pub row: usize,
    pub project: Option<String>,
    pub plot_category: Option<PlotCategory>,
    pub estimate: Option<DurationEstimate>,
    pub duration_label: Option<String>,
    pub issues: Vec<IntakeIssue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
    pub estimated: usize,
    pub insufficient: usize,
}

impl BatchReport {
    fn from_entries(entries: Vec<BatchEntry>) -> Self {
        let estimated = entries
            .iter()
            .filter(|entry| entry.estimate.is_some())
            .count();
        let insufficient = entries.len() - estimated;
        Self {
            entries,
            estimated,
            insufficient,
        }
    }
}

pub struct TimelineBatchImporter {
    estimator: TimelineEstimator,
    default_unit: PlotUnit,
}

impl TimelineBatchImporter {
    pub fn new(estimator: TimelineEstimator, default_unit: PlotUnit) -> Self {
        Self {
            estimator,
            default_unit,
        }
    }

    pub fn import_path<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<BatchReport, TimelineImportError> {
        let file = std::fs::File::open(path)?;
        self.import_reader(file)
    }

    pub fn import_reader<R: Read>(&self, reader: R) -> Result<BatchReport, TimelineImportError> {
        let entries = parser::parse_records(reader)?
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let parsed = record.form.parse(self.default_unit);
                let estimate = self.estimator.estimate(&parsed.intake);
                BatchEntry {
                    row: index + 1,
                    project: record.project,
                    plot_category: PlotCategory::classify(parsed.intake.plot_size),
                    duration_label: estimate.as_ref().map(DurationEstimate::duration_label),
                    estimate,
                    issues: parsed.issues,
                }
            })
            .collect();

        let report = BatchReport::from_entries(entries);
        info!(
            rows = report.entries.len(),
            estimated = report.estimated,
            insufficient = report.insufficient,
            "intake batch estimated"
        );
        Ok(report)
    }
}

impl Default for TimelineBatchImporter {
    fn default() -> Self {
        Self::new(TimelineEstimator::standard(), PlotUnit::SquareFeet)
    }
}
