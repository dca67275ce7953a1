use serde::{Deserialize, Serialize};

/// Application record as returned by `GET /aplikasi/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRecord {
    #[serde(deserialize_with = "super::de::id")]
    pub participant_number: String,
    #[serde(deserialize_with = "super::de::id")]
    pub job_id: String,
    pub position: String,
    #[serde(default)]
    pub id_number: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Applicant data joined onto a pipeline, read-only for the status view and the card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicantContext {
    pub participant_number: String,
    pub job_id: String,
    pub display_name: String,
    pub position: String,
    pub id_number: String,
}

impl ApplicantContext {
    /// Join the session identity with an application record.
    /// The session's display name wins; the record's name is the fallback.
    pub fn join(session_name: Option<&str>, record: ApplicationRecord) -> Self {
        let display_name = session_name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .or(record.name)
            .unwrap_or_default();

        ApplicantContext {
            participant_number: record.participant_number,
            job_id: record.job_id,
            display_name,
            position: record.position,
            id_number: record.id_number,
        }
    }

    /// Plain-text payload encoded in the participant card QR code
    pub fn qr_payload(&self) -> String {
        format!(
            "{}\n{}\n{}\n{}",
            self.display_name, self.participant_number, self.id_number, self.position
        )
    }
}
