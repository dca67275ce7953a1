// Domain models for the recruitment portal
// These structs mirror the records the portal API returns

pub mod stage;
pub mod applicant;
pub mod job;
pub mod profile;

pub use stage::*;
pub use applicant::*;
pub use job::*;
pub use profile::*;

pub(crate) mod de {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Number(i64),
        Text(String),
    }

    /// Identifiers arrive as either JSON numbers or strings
    pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Id::deserialize(deserializer)? {
            Id::Number(n) => n.to_string(),
            Id::Text(s) => s,
        })
    }
}
