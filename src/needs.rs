use serde::{Deserialize, Serialize};

use crate::catalog::MapProfile;

/// Map preferences as stored: any flag may be left out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparseNeeds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefer_double_controller: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefer_recon: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefer_flash: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefer_trap_sentinel: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefer_wall_controller: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefer_explosive_entry: Option<bool>,
}

/// Map preferences with every flag decided, valid for a single roll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Needs {
    pub prefer_double_controller: bool,
    pub prefer_recon: bool,
    pub prefer_flash: bool,
    pub prefer_trap_sentinel: bool,
    pub prefer_wall_controller: bool,
    pub prefer_explosive_entry: bool,
}

impl Needs {
    /// Names of the flags that are set, in declaration order
    pub fn active(&self) -> Vec<&'static str> {
        [
            (self.prefer_double_controller, "double controller"),
            (self.prefer_recon, "recon"),
            (self.prefer_flash, "flash"),
            (self.prefer_trap_sentinel, "trap sentinel"),
            (self.prefer_wall_controller, "wall controller"),
            (self.prefer_explosive_entry, "explosive entry"),
        ]
        .into_iter()
        .filter_map(|(set, name)| set.then_some(name))
        .collect()
    }
}

impl From<SparseNeeds> for Needs {
    fn from(sparse: SparseNeeds) -> Self {
        Needs {
            prefer_double_controller: sparse.prefer_double_controller.unwrap_or(false),
            prefer_recon: sparse.prefer_recon.unwrap_or(false),
            prefer_flash: sparse.prefer_flash.unwrap_or(false),
            prefer_trap_sentinel: sparse.prefer_trap_sentinel.unwrap_or(false),
            prefer_wall_controller: sparse.prefer_wall_controller.unwrap_or(false),
            prefer_explosive_entry: sparse.prefer_explosive_entry.unwrap_or(false),
        }
    }
}

pub fn resolve_needs(profile: &MapProfile) -> Needs {
    Needs::from(profile.needs)
}
