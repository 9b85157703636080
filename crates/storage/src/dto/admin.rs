use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::member::MemberResponse;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MemberFilter {
    #[default]
    All,
    Pending,
    Approved,
}

impl MemberFilter {
    /// Approval state to filter on; `None` keeps every member.
    pub fn approval(&self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Pending => Some(false),
            Self::Approved => Some(true),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MemberListQuery {
    #[serde(default)]
    pub filter: MemberFilter,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminMemberList {
    pub members: Vec<MemberResponse>,
    pub pending_count: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ModerationResponse {
    pub success: bool,
    pub member: MemberResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_maps_to_approval_state() {
        assert_eq!(MemberFilter::All.approval(), None);
        assert_eq!(MemberFilter::Pending.approval(), Some(false));
        assert_eq!(MemberFilter::Approved.approval(), Some(true));
    }

    #[test]
    fn filter_parses_lowercase() {
        let filter: MemberFilter = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(filter, MemberFilter::Pending);
    }
}
