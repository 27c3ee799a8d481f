use crate::workflows::timeline::{FormValue, IntakeForm};
use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug)]
pub(crate) struct BatchRecord {
    pub(crate) project: Option<String>,
    pub(crate) form: IntakeForm,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<BatchRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<IntakeRow>() {
        let row = record?;
        records.push(row.into_record());
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct IntakeRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    project: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    plot_size: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    plot_unit: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    building_size: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    num_floors: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    budget: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    budget_range: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    custom_budget: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    topography: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    development_laws: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    plot_shape: Option<String>,
}

impl IntakeRow {
    fn into_record(self) -> BatchRecord {
        BatchRecord {
            project: self.project,
            form: IntakeForm {
                plot_size: self.plot_size.map(FormValue::Text),
                plot_unit: self.plot_unit,
                building_size: self.building_size.map(FormValue::Text),
                num_floors: self.num_floors.map(FormValue::Text),
                budget: self.budget.map(FormValue::Text),
                budget_range: self.budget_range,
                custom_budget: self.custom_budget.map(FormValue::Text),
                topography: self.topography,
                development_laws: self.development_laws,
                plot_shape: self.plot_shape,
            },
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
