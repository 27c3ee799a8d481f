use crate::routes::{EstimateResponse, EstimateStatus};
use buildhub_timeline::config::AppConfig;
use buildhub_timeline::error::AppError;
use buildhub_timeline::telemetry;
use buildhub_timeline::workflows::batch::{BatchEntry, BatchReport, TimelineBatchImporter};
use buildhub_timeline::workflows::timeline::{
    DurationLabel, FormValue, IntakeForm, IntakeIssue, TimelineEstimator,
};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct EstimateArgs {
    /// Plot size, in the unit given by --plot-unit
    #[arg(long)]
    pub(crate) plot_size: Option<String>,
    /// Plot size unit: sqft, cents or acres
    #[arg(long)]
    pub(crate) plot_unit: Option<String>,
    /// Built-up area in square feet
    #[arg(long)]
    pub(crate) building_size: Option<String>,
    /// Number of floors
    #[arg(long = "floors")]
    pub(crate) num_floors: Option<String>,
    /// Budget in rupees
    #[arg(long)]
    pub(crate) budget: Option<String>,
    /// Wizard budget band, e.g. "50-75 Lakhs" or "Custom"
    #[arg(long)]
    pub(crate) budget_range: Option<String>,
    /// Amount used with --budget-range Custom
    #[arg(long)]
    pub(crate) custom_budget: Option<String>,
    #[arg(long)]
    pub(crate) topography: Option<String>,
    #[arg(long)]
    pub(crate) development_laws: Option<String>,
    #[arg(long)]
    pub(crate) plot_shape: Option<String>,
    /// Print the full response as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl EstimateArgs {
    fn form(&self) -> IntakeForm {
        let text = |value: &Option<String>| value.as_deref().map(FormValue::from);
        IntakeForm {
            plot_size: text(&self.plot_size),
            plot_unit: self.plot_unit.clone(),
            building_size: text(&self.building_size),
            num_floors: text(&self.num_floors),
            budget: text(&self.budget),
            budget_range: self.budget_range.clone(),
            custom_budget: text(&self.custom_budget),
            topography: self.topography.clone(),
            development_laws: self.development_laws.clone(),
            plot_shape: self.plot_shape.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// Intake CSV export with a header row
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print the full report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let config = load_config()?;
    let estimator = TimelineEstimator::standard();
    let response = EstimateResponse::build(
        &estimator,
        &args.form(),
        config.estimator.default_plot_unit,
    );

    if args.json {
        let body = serde_json::to_string_pretty(&response).map_err(std::io::Error::from)?;
        println!("{body}");
    } else {
        for line in estimate_lines(&response) {
            println!("{line}");
        }
    }
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = load_config()?;
    let importer = TimelineBatchImporter::new(
        TimelineEstimator::standard(),
        config.estimator.default_plot_unit,
    );
    let report = importer.import_path(&args.csv)?;

    if args.json {
        let body = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
        println!("{body}");
    } else {
        for line in batch_lines(&report) {
            println!("{line}");
        }
    }
    Ok(())
}

/// Loads configuration and routes log events to stderr for one-shot commands.
fn load_config() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(config)
}

fn estimate_lines(response: &EstimateResponse) -> Vec<String> {
    let estimate = match (&response.status, &response.estimate) {
        (EstimateStatus::Estimated, Some(estimate)) => estimate,
        _ => {
            let mut lines = vec![
                "Insufficient data: provide a plot size, building size or budget".to_string(),
            ];
            lines.extend(issue_lines(&response.issues));
            return lines;
        }
    };

    let mut lines = vec![format!(
        "Estimated duration: {} ({}% confidence)",
        DurationLabel(estimate.months),
        estimate.confidence_percent
    )];
    if let Some(category) = response.plot_category {
        lines.push(format!("Plot category: {}", category.label()));
    }

    lines.push("Phases:".to_string());
    lines.extend(estimate.phases.iter().map(|phase| {
        format!(
            "  {:<22} {}",
            phase.name,
            DurationLabel(phase.duration_months)
        )
    }));
    if estimate.phase_overrun_months() > 0 {
        lines.push(format!(
            "  (phases are rounded up and total {} months)",
            estimate.phase_total_months()
        ));
    }

    if !estimate.factors.is_empty() {
        lines.push("Factors:".to_string());
        lines.extend(
            estimate
                .factors
                .iter()
                .map(|factor| format!("  [{}] {}", factor.kind.label(), factor.text)),
        );
    }

    lines.extend(issue_lines(&response.issues));
    lines
}

fn batch_lines(report: &BatchReport) -> Vec<String> {
    let mut lines: Vec<String> = report.entries.iter().map(batch_line).collect();
    lines.push(format!(
        "{} estimated, {} with insufficient data",
        report.estimated, report.insufficient
    ));
    lines
}

fn batch_line(entry: &BatchEntry) -> String {
    let project = entry.project.as_deref().unwrap_or("(unnamed)");
    let outcome = match (&entry.estimate, &entry.duration_label) {
        (Some(estimate), Some(label)) => {
            format!("{label}, {}% confidence", estimate.confidence_percent)
        }
        _ => "insufficient data".to_string(),
    };

    let line = format!("row {:>3}  {project}: {outcome}", entry.row);
    if entry.issues.is_empty() {
        line
    } else {
        format!("{line} ({} issue(s))", entry.issues.len())
    }
}

fn issue_lines(issues: &[IntakeIssue]) -> Vec<String> {
    if issues.is_empty() {
        return Vec::new();
    }
    let mut lines = vec!["Ignored input:".to_string()];
    lines.extend(
        issues
            .iter()
            .map(|issue| format!("  {}: {}", issue.field.label(), issue.message)),
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildhub_timeline::workflows::batch::TimelineImportError;
    use buildhub_timeline::workflows::timeline::PlotUnit;

    fn respond(args: &EstimateArgs) -> EstimateResponse {
        EstimateResponse::build(
            &TimelineEstimator::standard(),
            &args.form(),
            PlotUnit::SquareFeet,
        )
    }

    #[test]
    fn renders_estimate_with_phases_and_factors() {
        let args = EstimateArgs {
            plot_size: Some("4500".to_string()),
            ..EstimateArgs::default()
        };

        let lines = estimate_lines(&respond(&args));

        assert_eq!(lines[0], "Estimated duration: 8 months (60% confidence)");
        assert!(lines.contains(&"Plot category: Extra Large".to_string()));
        assert!(lines.iter().any(|line| line.contains("Construction")));
        assert!(lines
            .contains(&"  [positive] Large plot enables efficient construction".to_string()));
        assert!(!lines.iter().any(|line| line == "Ignored input:"));
    }

    #[test]
    fn notes_rounded_phase_totals() {
        let args = EstimateArgs {
            budget: Some("100".to_string()),
            ..EstimateArgs::default()
        };

        let lines = estimate_lines(&respond(&args));

        assert!(lines[0].starts_with("Estimated duration: 6 months"));
        assert!(lines.iter().any(|line| line.contains("total 8 months")));
    }

    #[test]
    fn budget_range_flag_feeds_the_estimate() {
        let args = EstimateArgs {
            budget_range: Some("Custom".to_string()),
            custom_budget: Some("25,00,000".to_string()),
            ..EstimateArgs::default()
        };

        let response = respond(&args);

        assert!(response.issues.is_empty());
        assert_eq!(response.estimate.map(|estimate| estimate.months), Some(7));
    }

    #[test]
    fn renders_insufficient_data_with_issues() {
        let args = EstimateArgs {
            plot_size: Some("unknown".to_string()),
            topography: Some("sloped".to_string()),
            ..EstimateArgs::default()
        };

        let lines = estimate_lines(&respond(&args));

        assert!(lines[0].starts_with("Insufficient data"));
        assert_eq!(lines[1], "Ignored input:");
        assert!(lines[2].starts_with("  plot_size:"));
    }

    #[test]
    fn renders_batch_totals() {
        let csv = "project,plot_size\nRiverside,4500\n,\n";
        let report = TimelineBatchImporter::default()
            .import_reader(csv.as_bytes())
            .expect("import succeeds");

        let lines = batch_lines(&report);

        assert!(lines[0].contains("Riverside: 8 months, 60% confidence"));
        assert!(lines[1].contains("(unnamed): insufficient data"));
        assert_eq!(
            lines.last().map(String::as_str),
            Some("1 estimated, 1 with insufficient data")
        );
    }

    #[test]
    fn batch_command_installs_logging_before_importing() {
        let args = BatchArgs {
            csv: "./missing-intakes.csv".into(),
            json: false,
        };

        let error = run_batch(args).expect_err("missing file");
        assert!(matches!(error, AppError::Import(TimelineImportError::Io(_))));

        let config = AppConfig::load().expect("config loads");
        assert!(matches!(
            telemetry::init(&config.telemetry),
            Err(telemetry::TelemetryError::Subscriber(_))
        ));
    }
}
