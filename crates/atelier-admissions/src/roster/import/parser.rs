use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug, Deserialize)]
pub(crate) struct RosterRow {
    #[serde(rename = "Student ID")]
    pub(crate) student_id: String,
    #[serde(rename = "Name")]
    pub(crate) name: String,
    #[serde(rename = "Cohort", default)]
    pub(crate) cohort: String,
    #[serde(rename = "Target ID")]
    pub(crate) target_id: String,
    #[serde(rename = "Korean", default, deserialize_with = "empty_as_none")]
    pub(crate) korean: Option<f64>,
    #[serde(rename = "Math", default, deserialize_with = "empty_as_none")]
    pub(crate) math: Option<f64>,
    #[serde(rename = "English Grade", default, deserialize_with = "empty_as_none")]
    pub(crate) english_grade: Option<u8>,
    #[serde(rename = "Elective 1", default, deserialize_with = "empty_as_none")]
    pub(crate) elective_1: Option<f64>,
    #[serde(rename = "Elective 2", default, deserialize_with = "empty_as_none")]
    pub(crate) elective_2: Option<f64>,
    #[serde(rename = "Practical Level", default)]
    pub(crate) practical_level: String,
    #[serde(rename = "Practical Score", default, deserialize_with = "empty_as_none")]
    pub(crate) practical_score: Option<f64>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<RosterRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader.deserialize::<RosterRow>().collect()
}

fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
