use super::domain::{DevelopmentLaws, PlotShape, ProjectIntake, Topography};
use serde::{Deserialize, Serialize};

const SQFT_PER_CENT: f64 = 435.6;
const SQFT_PER_ACRE: f64 = 43_560.0;

/// Unit a homeowner entered the plot size in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotUnit {
    #[serde(rename = "sqft")]
    SquareFeet,
    Cents,
    Acres,
}

impl PlotUnit {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sqft" | "sq ft" | "square_feet" | "square feet" => Some(Self::SquareFeet),
            "cent" | "cents" => Some(Self::Cents),
            "acre" | "acres" => Some(Self::Acres),
            _ => None,
        }
    }

    pub fn square_feet(self, value: f64) -> f64 {
        match self {
            Self::SquareFeet => value,
            Self::Cents => value * SQFT_PER_CENT,
            Self::Acres => value * SQFT_PER_ACRE,
        }
    }
}

/// Raw numeric form input: either a JSON number or whatever the text box held.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Number(f64),
    Text(String),
}

impl From<f64> for FormValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl FormValue {
    /// `None` for blank text.
    fn number(&self) -> Option<Result<Reading, NotANumber>> {
        match self {
            FormValue::Number(value) => Some(Ok(Reading {
                value: *value,
                discarded: None,
            })),
            FormValue::Text(raw) if raw.trim().is_empty() => None,
            FormValue::Text(raw) => Some(read_number(raw)),
        }
    }

    fn describe(&self) -> String {
        match self {
            FormValue::Number(value) => value.to_string(),
            FormValue::Text(raw) => format!("'{raw}'"),
        }
    }
}

#[derive(Debug, PartialEq)]
struct Reading {
    value: f64,
    /// Text left over after the number, if any.
    discarded: Option<String>,
}

#[derive(Debug, PartialEq)]
struct NotANumber;

/// Intake as submitted by the request wizard, before any validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntakeForm {
    #[serde(default)]
    pub plot_size: Option<FormValue>,
    #[serde(default)]
    pub plot_unit: Option<String>,
    #[serde(default)]
    pub building_size: Option<FormValue>,
    #[serde(default)]
    pub num_floors: Option<FormValue>,
    #[serde(default)]
    pub budget: Option<FormValue>,
    /// Wizard budget band such as "50-75 Lakhs"; used when `budget` is absent.
    #[serde(default)]
    pub budget_range: Option<String>,
    /// Amount for the "Custom" budget band.
    #[serde(default)]
    pub custom_budget: Option<FormValue>,
    #[serde(default)]
    pub topography: Option<String>,
    #[serde(default)]
    pub development_laws: Option<String>,
    #[serde(default)]
    pub plot_shape: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeField {
    PlotSize,
    PlotUnit,
    BuildingSize,
    NumFloors,
    Budget,
    BudgetRange,
    CustomBudget,
}

impl IntakeField {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PlotSize => "plot_size",
            Self::PlotUnit => "plot_unit",
            Self::BuildingSize => "building_size",
            Self::NumFloors => "num_floors",
            Self::Budget => "budget",
            Self::BudgetRange => "budget_range",
            Self::CustomBudget => "custom_budget",
        }
    }
}

/// A form field that was dropped or adjusted while building the intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntakeIssue {
    pub field: IntakeField,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedIntake {
    pub intake: ProjectIntake,
    pub issues: Vec<IntakeIssue>,
}

impl IntakeForm {
    pub fn parse(&self, default_unit: PlotUnit) -> ParsedIntake {
        let mut issues = Vec::new();

        let unit = match self.plot_unit.as_deref().map(str::trim) {
            None | Some("") => default_unit,
            Some(raw) => PlotUnit::parse(raw).unwrap_or_else(|| {
                issues.push(IntakeIssue {
                    field: IntakeField::PlotUnit,
                    message: format!("unknown plot unit '{raw}', assuming square feet"),
                });
                PlotUnit::SquareFeet
            }),
        };

        let plot_size = measure(self.plot_size.as_ref(), IntakeField::PlotSize, &mut issues)
            .map(|value| unit.square_feet(value));
        let building_size = measure(
            self.building_size.as_ref(),
            IntakeField::BuildingSize,
            &mut issues,
        );
        let budget = measure(self.budget.as_ref(), IntakeField::Budget, &mut issues)
            .or_else(|| self.range_budget(&mut issues));
        let num_floors = floors(self.num_floors.as_ref(), &mut issues);

        let intake = ProjectIntake {
            plot_size,
            building_size,
            num_floors,
            budget,
            topography: tag(self.topography.as_deref()).map(Topography::from),
            development_laws: tag(self.development_laws.as_deref()).map(DevelopmentLaws::from),
            plot_shape: tag(self.plot_shape.as_deref()).map(PlotShape::from),
        };

        ParsedIntake { intake, issues }
    }

    fn range_budget(&self, issues: &mut Vec<IntakeIssue>) -> Option<f64> {
        let label = tag(self.budget_range.as_deref())?;
        if label == CUSTOM_BUDGET_RANGE {
            return measure(
                self.custom_budget.as_ref(),
                IntakeField::CustomBudget,
                issues,
            );
        }

        let midpoint = budget_range_midpoint(&label);
        if midpoint.is_none() {
            issues.push(IntakeIssue {
                field: IntakeField::BudgetRange,
                message: format!("unknown budget range '{label}'"),
            });
        }
        midpoint
    }
}

const CUSTOM_BUDGET_RANGE: &str = "Custom";

/// Wizard budget bands and the rupee amount each one stands for.
const BUDGET_RANGES: [(&str, f64); 9] = [
    ("5-10 Lakhs", 750_000.0),
    ("10-20 Lakhs", 1_500_000.0),
    ("20-30 Lakhs", 2_500_000.0),
    ("30-50 Lakhs", 4_000_000.0),
    ("50-75 Lakhs", 6_250_000.0),
    ("75 Lakhs - 1 Crore", 8_750_000.0),
    ("1-2 Crores", 15_000_000.0),
    ("2-5 Crores", 35_000_000.0),
    ("5+ Crores", 75_000_000.0),
];

/// Rupee amount for a wizard budget band, matched exactly after trimming.
pub fn budget_range_midpoint(label: &str) -> Option<f64> {
    let label = label.trim();
    BUDGET_RANGES
        .iter()
        .find(|(range, _)| *range == label)
        .map(|(_, amount)| *amount)
}

fn measure(
    value: Option<&FormValue>,
    field: IntakeField,
    issues: &mut Vec<IntakeIssue>,
) -> Option<f64> {
    let value = value?;
    match value.number()? {
        Ok(reading) if reading.value.is_finite() && reading.value >= 0.0 => {
            if let Some(discarded) = reading.discarded {
                issues.push(IntakeIssue {
                    field,
                    message: format!(
                        "read {} as {}, ignoring '{discarded}'",
                        value.describe(),
                        reading.value
                    ),
                });
            }
            Some(reading.value)
        }
        Ok(_) => {
            issues.push(IntakeIssue {
                field,
                message: format!("{} must be a non-negative number", value.describe()),
            });
            None
        }
        Err(NotANumber) => {
            issues.push(IntakeIssue {
                field,
                message: format!("{} is not a number", value.describe()),
            });
            None
        }
    }
}

fn floors(value: Option<&FormValue>, issues: &mut Vec<IntakeIssue>) -> Option<u32> {
    let number = measure(value, IntakeField::NumFloors, issues)?.trunc();
    if number > f64::from(u32::MAX) {
        issues.push(IntakeIssue {
            field: IntakeField::NumFloors,
            message: format!("{number} floors is out of range"),
        });
        return None;
    }
    Some(number as u32)
}

fn tag(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}

/// Reads a number written with optional digit grouping ("25,00,000", "1_500").
fn read_number(raw: &str) -> Result<Reading, NotANumber> {
    let ungrouped: String = raw
        .chars()
        .filter(|ch| !matches!(*ch, ',' | '_'))
        .collect();
    let (value, rest) = leading_number(&ungrouped).ok_or(NotANumber)?;
    let rest = rest.trim();

    Ok(Reading {
        value,
        discarded: (!rest.is_empty()).then(|| rest.to_string()),
    })
}

/// Splits off the longest numeric prefix, so "6+" reads as 6 and "2400 sqft" as 2400.
fn leading_number(raw: &str) -> Option<(f64, &str)> {
    let trimmed = raw.trim_start();
    let candidate_len = trimmed
        .char_indices()
        .find(|(_, ch)| !matches!(ch, '0'..='9' | '.' | '+' | '-' | 'e' | 'E'))
        .map(|(index, _)| index)
        .unwrap_or(trimmed.len());

    (1..=candidate_len).rev().find_map(|end| {
        trimmed[..end]
            .parse::<f64>()
            .ok()
            .map(|value| (value, &trimmed[end..]))
    })
}
