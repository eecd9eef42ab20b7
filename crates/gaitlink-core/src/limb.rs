//! The fixed quadruped limb set.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One of the four legs of a quadruped.
///
/// Serializes as the wire branch identifier (`"LF_LEG"` etc.) so that
/// snapshot JSON and feedback messages speak the same names.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum Limb {
    #[serde(rename = "LF_LEG")]
    LeftFore,
    #[serde(rename = "RF_LEG")]
    RightFore,
    #[serde(rename = "LH_LEG")]
    LeftHind,
    #[serde(rename = "RH_LEG")]
    RightHind,
}

impl Limb {
    /// All limbs in display order: LF, RF, LH, RH.
    pub const ALL: [Limb; 4] = [
        Limb::LeftFore,
        Limb::RightFore,
        Limb::LeftHind,
        Limb::RightHind,
    ];

    /// The identifier this limb goes by on the wire.
    pub fn branch_id(self) -> &'static str {
        match self {
            Limb::LeftFore => "LF_LEG",
            Limb::RightFore => "RF_LEG",
            Limb::LeftHind => "LH_LEG",
            Limb::RightHind => "RH_LEG",
        }
    }

    /// Resolve a wire branch identifier back to a limb.
    pub fn from_branch_id(id: &str) -> Option<Limb> {
        Limb::ALL.into_iter().find(|limb| limb.branch_id() == id)
    }

    /// Short display label (`"LF"`, `"RF"`, `"LH"`, `"RH"`).
    pub fn label(self) -> &'static str {
        match self {
            Limb::LeftFore => "LF",
            Limb::RightFore => "RF",
            Limb::LeftHind => "LH",
            Limb::RightHind => "RH",
        }
    }
}
