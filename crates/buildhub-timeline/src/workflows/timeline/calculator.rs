use super::domain::ProjectIntake;
use super::rubric::TimelineRubric;

/// True when the intake carries enough signal to estimate at all.
pub fn has_meaningful_data(intake: &ProjectIntake) -> bool {
    intake.plot_size() > 0.0 || intake.building_size() > 0.0 || intake.budget() > 0.0
}

pub(crate) fn compute_months(intake: &ProjectIntake, rubric: &TimelineRubric) -> u8 {
    let contributions = [
        rubric.plot_size.months_for(intake.plot_size()),
        rubric.building_size.months_for(intake.building_size()),
        rubric.num_floors.months_for(f64::from(intake.floors())),
        rubric.budget.months_for(intake.budget()),
        qualifier(intake.is_sloped(), rubric.sloped_terrain_months),
        qualifier(intake.has_strict_laws(), rubric.strict_laws_months),
        qualifier(intake.is_irregular(), rubric.irregular_shape_months),
    ];

    let months = contributions
        .into_iter()
        .fold(rubric.base_months, u8::saturating_add);

    months.min(rubric.max_months.max(rubric.base_months))
}

fn qualifier(applies: bool, months: u8) -> u8 {
    if applies {
        months
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::timeline::domain::{DevelopmentLaws, PlotShape, Topography};

    fn months(intake: &ProjectIntake) -> u8 {
        compute_months(intake, &TimelineRubric::standard())
    }

    #[test]
    fn gate_requires_a_positive_size_or_budget() {
        assert!(!has_meaningful_data(&ProjectIntake::default()));
        assert!(!has_meaningful_data(&ProjectIntake {
            plot_size: Some(0.0),
            building_size: Some(0.0),
            budget: Some(0.0),
            num_floors: Some(4),
            topography: Some(Topography::Sloped),
            ..ProjectIntake::default()
        }));
        assert!(has_meaningful_data(&ProjectIntake {
            budget: Some(1.0),
            ..ProjectIntake::default()
        }));
        assert!(has_meaningful_data(&ProjectIntake {
            building_size: Some(0.5),
            ..ProjectIntake::default()
        }));
    }

    #[test]
    fn ladders_contribute_once_at_their_thresholds() {
        let at_major = ProjectIntake {
            plot_size: Some(4000.0),
            ..ProjectIntake::default()
        };
        assert_eq!(months(&at_major), 8);

        let at_minor = ProjectIntake {
            plot_size: Some(2000.0),
            ..ProjectIntake::default()
        };
        assert_eq!(months(&at_minor), 7);

        let below = ProjectIntake {
            plot_size: Some(1999.9),
            ..ProjectIntake::default()
        };
        assert_eq!(months(&below), 6);

        let building = ProjectIntake {
            building_size: Some(1500.0),
            ..ProjectIntake::default()
        };
        assert_eq!(months(&building), 7);

        let floors = ProjectIntake {
            budget: Some(2_000_000.0),
            num_floors: Some(2),
            ..ProjectIntake::default()
        };
        assert_eq!(months(&floors), 8);
    }

    #[test]
    fn qualifiers_are_cumulative() {
        let intake = ProjectIntake {
            budget: Some(100_000.0),
            topography: Some(Topography::Sloped),
            development_laws: Some(DevelopmentLaws::Strict),
            plot_shape: Some(PlotShape::Irregular),
            ..ProjectIntake::default()
        };
        assert_eq!(months(&intake), 9);

        let unrecognized = ProjectIntake {
            budget: Some(100_000.0),
            topography: Some(Topography::Hilly),
            development_laws: Some(DevelopmentLaws::Unrecognized("strict ".to_string())),
            plot_shape: Some(PlotShape::Corner),
            ..ProjectIntake::default()
        };
        assert_eq!(months(&unrecognized), 6);
    }

    #[test]
    fn custom_rubric_is_clamped_to_its_cap() {
        let mut rubric = TimelineRubric::standard();
        rubric.sloped_terrain_months = 200;
        rubric.strict_laws_months = 200;
        let intake = ProjectIntake {
            plot_size: Some(10_000.0),
            topography: Some(Topography::Sloped),
            development_laws: Some(DevelopmentLaws::Strict),
            ..ProjectIntake::default()
        };
        assert_eq!(compute_months(&intake, &rubric), 18);
    }
}
