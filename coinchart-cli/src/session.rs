//! Selections made in the menu, alive for one program run.

use coinchart_core::domain::{AssetId, LookbackDays};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub asset: Option<AssetId>,
    pub period: Option<LookbackDays>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Both selections, once the chart can be rendered.
    pub fn ready(&self) -> Option<(&AssetId, LookbackDays)> {
        Some((self.asset.as_ref()?, self.period?))
    }
}
