use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vote {
    pub id: Uuid,
    pub project_id: Uuid,
    pub voter_ip: String,
    pub voted_at: DateTime<Utc>,
    pub voted_month: NaiveDate,
}
