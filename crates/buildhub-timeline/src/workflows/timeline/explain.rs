use super::domain::{Factor, FactorKind, FactorSource, ProjectIntake};
use super::rubric::TimelineRubric;

const BASE_CONFIDENCE: u8 = 50;
const PER_FILLED_FIELD: u8 = 10;
const SIZES_PAIRED_BONUS: u8 = 10;
const BUDGET_BONUS: u8 = 10;
const MAX_CONFIDENCE: u8 = 95;

/// Heuristic completeness score for an intake, in percent.
pub fn score_confidence(intake: &ProjectIntake) -> u8 {
    let filled = u8::try_from(intake.filled_key_fields()).unwrap_or(u8::MAX);
    let mut confidence = BASE_CONFIDENCE.saturating_add(filled.saturating_mul(PER_FILLED_FIELD));

    if intake.plot_size() > 0.0 && intake.building_size() > 0.0 {
        confidence = confidence.saturating_add(SIZES_PAIRED_BONUS);
    }
    if intake.budget() > 0.0 {
        confidence = confidence.saturating_add(BUDGET_BONUS);
    }

    confidence.min(MAX_CONFIDENCE)
}

pub(crate) fn explain_factors(intake: &ProjectIntake, rubric: &TimelineRubric) -> Vec<Factor> {
    let mut factors = Vec::new();

    if intake.plot_size() >= rubric.plot_size.major_threshold {
        factors.push(Factor {
            kind: FactorKind::Positive,
            source: FactorSource::PlotSize,
            text: "Large plot enables efficient construction",
        });
    }

    if f64::from(intake.floors()) >= rubric.num_floors.major_threshold {
        factors.push(Factor {
            kind: FactorKind::Warning,
            source: FactorSource::NumFloors,
            text: "Multi-story construction requires more time",
        });
    }

    if intake.is_sloped() {
        factors.push(Factor {
            kind: FactorKind::Warning,
            source: FactorSource::Topography,
            text: "Sloped terrain may require additional foundation work",
        });
    }

    if intake.has_strict_laws() {
        factors.push(Factor {
            kind: FactorKind::Warning,
            source: FactorSource::DevelopmentLaws,
            text: "Strict regulations may extend approval time",
        });
    }

    if intake.budget() >= rubric.budget.major_threshold {
        factors.push(Factor {
            kind: FactorKind::Positive,
            source: FactorSource::Budget,
            text: "Higher budget allows faster construction",
        });
    }

    factors
}
