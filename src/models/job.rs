use serde::{Deserialize, Serialize};

/// Job posting (lowongan)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(deserialize_with = "super::de::id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// ISO date (YYYY-MM-DD) after which applications close
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub quota: Option<u32>,
    #[serde(default)]
    pub description: String,
}

/// One entry of the applicant's application history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationSummary {
    #[serde(deserialize_with = "super::de::id")]
    pub id: String,
    #[serde(deserialize_with = "super::de::id")]
    pub job_id: String,
    pub job_title: String,
    #[serde(default)]
    pub submitted_at: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Result of submitting an application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedApplication {
    #[serde(deserialize_with = "super::de::id")]
    pub id: String,
    #[serde(default)]
    pub message: Option<String>,
}
