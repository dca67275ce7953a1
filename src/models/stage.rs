use serde::{Deserialize, Serialize};

/// Stage outcome for one applicant
///
/// The backend sends a nullable boolean:
/// - null: not evaluated yet
/// - true: passed this stage
/// - false: failed this stage (terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pending,
    Passed,
    Failed,
}

impl Outcome {
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            None => Outcome::Pending,
            Some(true) => Outcome::Passed,
            Some(false) => Outcome::Failed,
        }
    }

    pub fn is_evaluated(&self) -> bool {
        !matches!(self, Outcome::Pending)
    }
}

/// One step of a recruitment pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub id: String,
    pub name: String,
    pub description: String,
    pub sort_order: i64,
    pub outcome: Outcome,
    pub announcement_title: Option<String>,
    pub announcement_body: Option<String>,
}

/// Stage row as returned by the stages endpoint:
/// `[id, name, description, sort_order, outcome, announcement_title, announcement_body]`
#[derive(Debug, Clone, Deserialize)]
pub struct RawStageRow(
    #[serde(deserialize_with = "super::de::id")] String,
    String,
    Option<String>,
    i64,
    Option<bool>,
    Option<String>,
    Option<String>,
);

impl From<RawStageRow> for Stage {
    fn from(row: RawStageRow) -> Self {
        let RawStageRow(id, name, description, sort_order, outcome, title, body) = row;
        Stage {
            id,
            name,
            description: description.unwrap_or_default(),
            sort_order,
            outcome: Outcome::from_flag(outcome),
            announcement_title: title,
            announcement_body: body,
        }
    }
}

/// Map a raw JSON stage payload into stages, preserving backend order
pub fn stages_from_rows(rows: Vec<RawStageRow>) -> Vec<Stage> {
    rows.into_iter().map(Stage::from).collect()
}

/// Parse a raw stage payload (array of tuples)
pub fn parse_stage_rows(json: &str) -> serde_json::Result<Vec<Stage>> {
    let rows: Vec<RawStageRow> = serde_json::from_str(json)?;
    Ok(stages_from_rows(rows))
}
