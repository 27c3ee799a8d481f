use crate::workflows::timeline::{DevelopmentLaws, PlotShape, ProjectIntake, Topography};

pub(super) fn plot_only(plot_size: f64) -> ProjectIntake {
    ProjectIntake {
        plot_size: Some(plot_size),
        ..ProjectIntake::default()
    }
}

pub(super) fn villa_intake() -> ProjectIntake {
    ProjectIntake {
        plot_size: Some(4500.0),
        building_size: Some(3500.0),
        num_floors: Some(3),
        budget: Some(6_000_000.0),
        topography: Some(Topography::Sloped),
        development_laws: Some(DevelopmentLaws::Strict),
        plot_shape: Some(PlotShape::Irregular),
    }
}

pub(super) fn modest_intake() -> ProjectIntake {
    ProjectIntake {
        plot_size: Some(1000.0),
        building_size: Some(1000.0),
        num_floors: Some(1),
        budget: Some(6_000_000.0),
        ..ProjectIntake::default()
    }
}
