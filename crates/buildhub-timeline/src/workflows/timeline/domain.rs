use serde::{Deserialize, Serialize};
use std::fmt;

/// Terrain qualifier captured on the site details step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Topography {
    Flat,
    Sloped,
    Hilly,
    Waterfront,
    Unrecognized(String),
}

impl Topography {
    pub fn as_tag(&self) -> &str {
        match self {
            Self::Flat => "flat",
            Self::Sloped => "sloped",
            Self::Hilly => "hilly",
            Self::Waterfront => "waterfront",
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for Topography {
    fn from(value: String) -> Self {
        match value.as_str() {
            "flat" => Self::Flat,
            "sloped" => Self::Sloped,
            "hilly" => Self::Hilly,
            "waterfront" => Self::Waterfront,
            _ => Self::Unrecognized(value),
        }
    }
}

impl From<Topography> for String {
    fn from(value: Topography) -> Self {
        match value {
            Topography::Unrecognized(raw) => raw,
            known => known.as_tag().to_string(),
        }
    }
}

/// Local development regime governing the plot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DevelopmentLaws {
    Standard,
    Strict,
    Restricted,
    Heritage,
    Coastal,
    HillStation,
    Unrecognized(String),
}

impl DevelopmentLaws {
    pub fn as_tag(&self) -> &str {
        match self {
            Self::Standard => "standard",
            Self::Strict => "strict",
            Self::Restricted => "restricted",
            Self::Heritage => "heritage",
            Self::Coastal => "coastal",
            Self::HillStation => "hill_station",
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for DevelopmentLaws {
    fn from(value: String) -> Self {
        match value.as_str() {
            "standard" => Self::Standard,
            "strict" => Self::Strict,
            "restricted" => Self::Restricted,
            "heritage" => Self::Heritage,
            "coastal" => Self::Coastal,
            "hill_station" => Self::HillStation,
            _ => Self::Unrecognized(value),
        }
    }
}

impl From<DevelopmentLaws> for String {
    fn from(value: DevelopmentLaws) -> Self {
        match value {
            DevelopmentLaws::Unrecognized(raw) => raw,
            known => known.as_tag().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlotShape {
    Rectangular,
    Square,
    LShaped,
    Irregular,
    Corner,
    Unrecognized(String),
}

impl PlotShape {
    pub fn as_tag(&self) -> &str {
        match self {
            Self::Rectangular => "rectangular",
            Self::Square => "square",
            Self::LShaped => "l_shaped",
            Self::Irregular => "irregular",
            Self::Corner => "corner",
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for PlotShape {
    fn from(value: String) -> Self {
        match value.as_str() {
            "rectangular" => Self::Rectangular,
            "square" => Self::Square,
            "l_shaped" => Self::LShaped,
            "irregular" => Self::Irregular,
            "corner" => Self::Corner,
            _ => Self::Unrecognized(value),
        }
    }
}

impl From<PlotShape> for String {
    fn from(value: PlotShape) -> Self {
        match value {
            PlotShape::Unrecognized(raw) => raw,
            known => known.as_tag().to_string(),
        }
    }
}

/// Snapshot of the project attributes a homeowner has entered so far.
///
/// Absent numeric fields behave as zero; an absent or non-positive floor count
/// behaves as a single storey.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectIntake {
    #[serde(default)]
    pub plot_size: Option<f64>,
    #[serde(default)]
    pub building_size: Option<f64>,
    #[serde(default)]
    pub num_floors: Option<u32>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub topography: Option<Topography>,
    #[serde(default)]
    pub development_laws: Option<DevelopmentLaws>,
    #[serde(default)]
    pub plot_shape: Option<PlotShape>,
}

impl ProjectIntake {
    pub fn plot_size(&self) -> f64 {
        non_negative(self.plot_size)
    }

    pub fn building_size(&self) -> f64 {
        non_negative(self.building_size)
    }

    pub fn budget(&self) -> f64 {
        non_negative(self.budget)
    }

    pub fn floors(&self) -> u32 {
        self.num_floors.filter(|floors| *floors > 0).unwrap_or(1)
    }

    pub fn is_sloped(&self) -> bool {
        matches!(self.topography, Some(Topography::Sloped))
    }

    pub fn has_strict_laws(&self) -> bool {
        matches!(self.development_laws, Some(DevelopmentLaws::Strict))
    }

    pub fn is_irregular(&self) -> bool {
        matches!(self.plot_shape, Some(PlotShape::Irregular))
    }

    /// Number of key fields (plot, building, floors, budget) the homeowner supplied.
    ///
    /// Zero counts as supplied; negative and non-finite values do not.
    pub fn filled_key_fields(&self) -> usize {
        [
            usable(self.plot_size),
            usable(self.building_size),
            self.num_floors.is_some(),
            usable(self.budget),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }
}

fn usable(value: Option<f64>) -> bool {
    value.is_some_and(|value| value.is_finite() && value >= 0.0)
}

fn non_negative(value: Option<f64>) -> f64 {
    match value {
        Some(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    PlanningAndDesign,
    PermitsAndApprovals,
    Construction,
    FinishingAndHandover,
}

impl PhaseKind {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::PlanningAndDesign,
            Self::PermitsAndApprovals,
            Self::Construction,
            Self::FinishingAndHandover,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PlanningAndDesign => "Planning & Design",
            Self::PermitsAndApprovals => "Permits & Approvals",
            Self::Construction => "Construction",
            Self::FinishingAndHandover => "Finishing & Handover",
        }
    }

    /// Share of the total estimate, in percent.
    pub const fn share_percent(self) -> u32 {
        match self {
            Self::PlanningAndDesign => 30,
            Self::PermitsAndApprovals => 20,
            Self::Construction => 40,
            Self::FinishingAndHandover => 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Phase {
    pub kind: PhaseKind,
    pub name: &'static str,
    pub duration_months: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorKind {
    Positive,
    Warning,
}

impl FactorKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Warning => "warning",
        }
    }
}

/// Intake attribute a factor was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorSource {
    PlotSize,
    NumFloors,
    Topography,
    DevelopmentLaws,
    Budget,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Factor {
    pub kind: FactorKind,
    pub source: FactorSource,
    pub text: &'static str,
}

/// Estimated project duration with its phase breakdown and explanation trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DurationEstimate {
    pub months: u8,
    pub phases: [Phase; 4],
    pub confidence_percent: u8,
    pub factors: Vec<Factor>,
}

impl DurationEstimate {
    pub fn duration_label(&self) -> String {
        DurationLabel(self.months).to_string()
    }

    pub fn phase_total_months(&self) -> u32 {
        self.phases
            .iter()
            .map(|phase| u32::from(phase.duration_months))
            .sum()
    }

    /// Months the rounded-up phases allocate beyond the headline estimate.
    pub fn phase_overrun_months(&self) -> u32 {
        self.phase_total_months()
            .saturating_sub(u32::from(self.months))
    }
}

/// Renders a month count as "8 months" or "1 year 6 months".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationLabel(pub u8);

impl fmt::Display for DurationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let months = self.0;
        if months < 12 {
            return write!(f, "{months} month{}", plural(months));
        }

        let years = months / 12;
        let remainder = months % 12;
        write!(f, "{years} year{}", plural(years))?;
        if remainder > 0 {
            write!(f, " {remainder} month{}", plural(remainder))?;
        }
        Ok(())
    }
}

fn plural(count: u8) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Coarse plot size band shown next to estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotCategory {
    Small,
    Medium,
    Large,
    #[serde(rename = "xlarge")]
    ExtraLarge,
    Estate,
}

impl PlotCategory {
    pub fn classify(plot_size: Option<f64>) -> Option<Self> {
        let size = non_negative(plot_size);
        if size == 0.0 {
            return None;
        }

        Some(if size < 1200.0 {
            Self::Small
        } else if size < 2400.0 {
            Self::Medium
        } else if size < 4000.0 {
            Self::Large
        } else if size < 6000.0 {
            Self::ExtraLarge
        } else {
            Self::Estate
        })
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
            Self::ExtraLarge => "Extra Large",
            Self::Estate => "Estate",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_label_handles_years_and_plurals() {
        assert_eq!(DurationLabel(1).to_string(), "1 month");
        assert_eq!(DurationLabel(8).to_string(), "8 months");
        assert_eq!(DurationLabel(12).to_string(), "1 year");
        assert_eq!(DurationLabel(13).to_string(), "1 year 1 month");
        assert_eq!(DurationLabel(18).to_string(), "1 year 6 months");
        assert_eq!(DurationLabel(24).to_string(), "2 years");
    }

    #[test]
    fn tags_match_exactly_and_keep_unknown_values() {
        assert_eq!(Topography::from("sloped".to_string()), Topography::Sloped);
        assert_eq!(
            Topography::from("Sloping".to_string()),
            Topography::Unrecognized("Sloping".to_string())
        );
        assert_eq!(
            DevelopmentLaws::from("STRICT".to_string()),
            DevelopmentLaws::Unrecognized("STRICT".to_string())
        );
        assert_eq!(PlotShape::from("irregular".to_string()), PlotShape::Irregular);
        assert_eq!(String::from(PlotShape::LShaped), "l_shaped");
    }

    #[test]
    fn intake_defaults_absent_and_invalid_values() {
        let intake = ProjectIntake {
            plot_size: Some(-40.0),
            budget: Some(f64::NAN),
            num_floors: Some(0),
            ..ProjectIntake::default()
        };
        assert_eq!(intake.plot_size(), 0.0);
        assert_eq!(intake.building_size(), 0.0);
        assert_eq!(intake.budget(), 0.0);
        assert_eq!(intake.floors(), 1);
        assert_eq!(intake.filled_key_fields(), 1);
    }

    #[test]
    fn only_usable_measurements_count_as_filled() {
        let intake = ProjectIntake {
            plot_size: Some(0.0),
            building_size: Some(f64::INFINITY),
            budget: Some(-1.0),
            ..ProjectIntake::default()
        };
        assert_eq!(intake.filled_key_fields(), 1);

        let intake = ProjectIntake {
            building_size: Some(f64::NAN),
            budget: Some(2_000_000.0),
            ..ProjectIntake::default()
        };
        assert_eq!(intake.filled_key_fields(), 1);
    }

    #[test]
    fn plot_category_bands() {
        assert_eq!(PlotCategory::classify(None), None);
        assert_eq!(PlotCategory::classify(Some(0.0)), None);
        assert_eq!(PlotCategory::classify(Some(1199.0)), Some(PlotCategory::Small));
        assert_eq!(PlotCategory::classify(Some(1200.0)), Some(PlotCategory::Medium));
        assert_eq!(PlotCategory::classify(Some(2400.0)), Some(PlotCategory::Large));
        assert_eq!(
            PlotCategory::classify(Some(4000.0)),
            Some(PlotCategory::ExtraLarge)
        );
        assert_eq!(PlotCategory::classify(Some(6000.0)), Some(PlotCategory::Estate));
    }

    #[test]
    fn intake_deserializes_from_typed_json() {
        let intake: ProjectIntake = serde_json::from_str(
            r#"{"plot_size": 4500, "num_floors": 2, "topography": "sloped", "plot_shape": "oval"}"#,
        )
        .expect("intake parses");
        assert_eq!(intake.plot_size, Some(4500.0));
        assert_eq!(intake.num_floors, Some(2));
        assert!(intake.is_sloped());
        assert_eq!(
            intake.plot_shape,
            Some(PlotShape::Unrecognized("oval".to_string()))
        );
        assert!(intake.development_laws.is_none());
    }
}
