use serde::{Deserialize, Serialize};

/// Two-step threshold ladder: the larger step wins, never both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ladder {
    pub major_threshold: f64,
    pub major_months: u8,
    pub minor_threshold: f64,
    pub minor_months: u8,
}

impl Ladder {
    pub const fn new(major_threshold: f64, minor_threshold: f64) -> Self {
        Self {
            major_threshold,
            major_months: 2,
            minor_threshold,
            minor_months: 1,
        }
    }

    pub fn months_for(&self, value: f64) -> u8 {
        if value >= self.major_threshold {
            self.major_months
        } else if value >= self.minor_threshold {
            self.minor_months
        } else {
            0
        }
    }
}

/// Weights used by the duration calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineRubric {
    pub base_months: u8,
    pub max_months: u8,
    pub plot_size: Ladder,
    pub building_size: Ladder,
    pub num_floors: Ladder,
    pub budget: Ladder,
    pub sloped_terrain_months: u8,
    pub strict_laws_months: u8,
    pub irregular_shape_months: u8,
}

impl TimelineRubric {
    pub fn standard() -> Self {
        Self {
            base_months: 6,
            max_months: 18,
            plot_size: Ladder::new(4000.0, 2000.0),
            building_size: Ladder::new(3000.0, 1500.0),
            num_floors: Ladder::new(3.0, 2.0),
            budget: Ladder::new(5_000_000.0, 2_000_000.0),
            sloped_terrain_months: 1,
            strict_laws_months: 1,
            irregular_shape_months: 1,
        }
    }
}

impl Default for TimelineRubric {
    fn default() -> Self {
        Self::standard()
    }
}
