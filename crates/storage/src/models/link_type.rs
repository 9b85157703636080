use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Where a project link points, used to pick a label for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProjectLinkType {
    Testflight,
    Appstore,
    Playstore,
    Web,
}

impl ProjectLinkType {
    pub fn detect(url: &str) -> Self {
        let normalized = url.to_lowercase();
        if normalized.contains("testflight.apple.com/join") {
            Self::Testflight
        } else if normalized.contains("apps.apple.com") {
            Self::Appstore
        } else if normalized.contains("play.google.com/store/apps") {
            Self::Playstore
        } else {
            Self::Web
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Testflight => "TestFlight",
            Self::Appstore => "App Store",
            Self::Playstore => "Google Play",
            Self::Web => "Website",
        }
    }
}
