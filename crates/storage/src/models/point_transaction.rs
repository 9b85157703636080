use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// What caused a point award. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PointSource {
    Vote,
    Click,
    Admin,
}

impl PointSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vote => "vote",
            Self::Click => "click",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for PointSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown point source '{0}'")]
pub struct UnknownPointSource(pub String);

impl FromStr for PointSource {
    type Err = UnknownPointSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vote" => Ok(Self::Vote),
            "click" => Ok(Self::Click),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownPointSource(other.to_string())),
        }
    }
}

impl TryFrom<String> for PointSource {
    type Error = UnknownPointSource;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Append-only ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PointTransaction {
    pub id: Uuid,
    pub member_id: Uuid,
    pub points: i32,
    pub reason: String,
    #[sqlx(try_from = "String")]
    pub source: PointSource,
    pub project_id: Option<Uuid>,
    pub awarded_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
