// ── Appliance model ──

use std::fmt;

use serde::{Deserialize, Serialize};

/// Appliance identifier -- the hub addresses smart plugs by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplianceId(String);

impl ApplianceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplianceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ApplianceId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// One smart-plug appliance.
#[derive(Debug, Clone, PartialEq)]
pub struct Appliance {
    pub id: ApplianceId,
    pub is_on: bool,
    pub power_consumption: Option<f64>,
}
