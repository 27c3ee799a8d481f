//! Construction-duration estimation for homeowner project intakes.
//!
//! The estimator is a pure function of a [`ProjectIntake`]: an input gate
//! decides whether there is enough signal, then the duration calculator, phase
//! decomposer and confidence/factor explainer each read the same snapshot.

mod calculator;
pub mod domain;
mod explain;
pub mod intake;
mod phases;
mod rubric;

#[cfg(test)]
mod tests;

pub use calculator::has_meaningful_data;
pub use domain::{
    DevelopmentLaws, DurationEstimate, DurationLabel, Factor, FactorKind, FactorSource, Phase,
    PhaseKind, PlotCategory, PlotShape, ProjectIntake, Topography,
};
pub use explain::score_confidence;
pub use intake::{
    budget_range_midpoint, FormValue, IntakeField, IntakeForm, IntakeIssue, ParsedIntake, PlotUnit,
};
pub use phases::decompose;
pub use rubric::{Ladder, TimelineRubric};

use tracing::debug;

/// Stateless estimator applying a rubric to project intakes.
#[derive(Debug, Clone, Default)]
pub struct TimelineEstimator {
    rubric: TimelineRubric,
}

impl TimelineEstimator {
    pub fn new(rubric: TimelineRubric) -> Self {
        Self { rubric }
    }

    pub fn standard() -> Self {
        Self::new(TimelineRubric::standard())
    }

    pub fn rubric(&self) -> &TimelineRubric {
        &self.rubric
    }

    /// Returns `None` when the intake has no positive plot size, building size or budget.
    pub fn estimate(&self, intake: &ProjectIntake) -> Option<DurationEstimate> {
        if !has_meaningful_data(intake) {
            debug!("intake lacks size or budget; skipping estimate");
            return None;
        }

        let months = calculator::compute_months(intake, &self.rubric);
        let estimate = DurationEstimate {
            months,
            phases: phases::decompose(months),
            confidence_percent: explain::score_confidence(intake),
            factors: explain::explain_factors(intake, &self.rubric),
        };

        debug!(
            months = estimate.months,
            confidence = estimate.confidence_percent,
            factors = estimate.factors.len(),
            "timeline estimated"
        );

        Some(estimate)
    }

    pub fn compute_months(&self, intake: &ProjectIntake) -> u8 {
        calculator::compute_months(intake, &self.rubric)
    }

    pub fn explain_factors(&self, intake: &ProjectIntake) -> Vec<Factor> {
        explain::explain_factors(intake, &self.rubric)
    }
}

/// Estimates with the standard rubric.
pub fn estimate(intake: &ProjectIntake) -> Option<DurationEstimate> {
    TimelineEstimator::standard().estimate(intake)
}

pub fn compute_months(intake: &ProjectIntake) -> u8 {
    calculator::compute_months(intake, &TimelineRubric::standard())
}

pub fn explain_factors(intake: &ProjectIntake) -> Vec<Factor> {
    explain::explain_factors(intake, &TimelineRubric::standard())
}
