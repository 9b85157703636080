use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AwardPointsRequest {
    pub member_id: Option<Uuid>,
    /// Any non-zero amount; negative values deduct.
    #[validate(range(min = -10000, max = 10000))]
    pub points: Option<i32>,
    #[validate(length(max = 200))]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Missing required fields")]
pub struct MissingAwardFields;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwardPointsInput {
    pub member_id: Uuid,
    pub points: i32,
    pub reason: String,
}

impl AwardPointsRequest {
    pub fn check(&self) -> Result<AwardPointsInput, MissingAwardFields> {
        let member_id = self.member_id.ok_or(MissingAwardFields)?;
        let points = self.points.filter(|p| *p != 0).ok_or(MissingAwardFields)?;
        let reason = self
            .reason
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or(MissingAwardFields)?;

        Ok(AwardPointsInput {
            member_id,
            points,
            reason: reason.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_points_count_as_missing() {
        let req = AwardPointsRequest {
            member_id: Some(Uuid::new_v4()),
            points: Some(0),
            reason: Some("Talk".into()),
        };
        assert_eq!(req.check(), Err(MissingAwardFields));
    }

    #[test]
    fn blank_reason_counts_as_missing() {
        let req = AwardPointsRequest {
            member_id: Some(Uuid::new_v4()),
            points: Some(10),
            reason: Some("  ".into()),
        };
        assert_eq!(req.check(), Err(MissingAwardFields));
    }

    #[test]
    fn deductions_are_allowed() {
        let id = Uuid::new_v4();
        let req = AwardPointsRequest {
            member_id: Some(id),
            points: Some(-5),
            reason: Some("Spam".into()),
        };
        assert_eq!(
            req.check(),
            Ok(AwardPointsInput {
                member_id: id,
                points: -5,
                reason: "Spam".into()
            })
        );
    }
}
