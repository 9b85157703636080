use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PointTier {
    Bronze,
    Silver,
    Gold,
}

impl PointTier {
    pub const SILVER_THRESHOLD: i32 = 50;
    pub const GOLD_THRESHOLD: i32 = 200;

    pub fn for_points(points: i32) -> Self {
        if points >= Self::GOLD_THRESHOLD {
            Self::Gold
        } else if points >= Self::SILVER_THRESHOLD {
            Self::Silver
        } else {
            Self::Bronze
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries() {
        assert_eq!(PointTier::for_points(-3), PointTier::Bronze);
        assert_eq!(PointTier::for_points(49), PointTier::Bronze);
        assert_eq!(PointTier::for_points(50), PointTier::Silver);
        assert_eq!(PointTier::for_points(199), PointTier::Silver);
        assert_eq!(PointTier::for_points(200), PointTier::Gold);
    }
}
