use serde::{Deserialize, Serialize};

/// Screens of the ad studio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Companies,
    Create,
    Generate,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Companies => "Companies",
            View::Create => "Add Company",
            View::Generate => "Generate Ads",
        }
    }

    /// Generation needs a company to work on.
    pub fn needs_selection(&self) -> bool {
        matches!(self, View::Generate)
    }
}
