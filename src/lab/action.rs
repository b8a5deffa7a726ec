//! Serializable lab actions for the single-reducer entry point

use std::fmt;

use serde::{Deserialize, Serialize};

use super::equipment::TestTool;
use super::experiment_kind::ExperimentKind;

/// Categories of holdable equipment. At most one item per category is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemCategory {
    /// pH test strips
    TestStrip,
    /// Gas identification tools
    TestTool,
    /// Flame-test salts (requires the wire loop)
    MetalSalt,
    /// Gas sample tubes
    GasSample,
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TestStrip => "test strip",
            Self::TestTool => "test tool",
            Self::MetalSalt => "metal salt",
            Self::GasSample => "gas sample",
        })
    }
}

/// A specific item to pick up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HeldItem {
    /// A test strip by id
    TestStrip(String),
    /// A gas identification tool
    TestTool(TestTool),
    /// A metal salt by id
    MetalSalt(String),
    /// A gas sample by id
    GasSample(String),
}

impl HeldItem {
    /// Category the item belongs to.
    #[must_use]
    pub const fn category(&self) -> ItemCategory {
        match self {
            Self::TestStrip(_) => ItemCategory::TestStrip,
            Self::TestTool(_) => ItemCategory::TestTool,
            Self::MetalSalt(_) => ItemCategory::MetalSalt,
            Self::GasSample(_) => ItemCategory::GasSample,
        }
    }
}

impl fmt::Display for HeldItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TestStrip(id) | Self::MetalSalt(id) | Self::GasSample(id) => f.write_str(id),
            Self::TestTool(tool) => write!(f, "{tool}"),
        }
    }
}

/// Every mutation the store accepts, as data.
///
/// Serialized with an `"action"` tag, e.g.
/// `{"action":"performGasTest","gasId":"gas-1","tool":"lit-splint"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum LabAction {
    /// Reload catalogs and clear all selections, results and progress
    Initialize,
    /// Pick up an item if nothing of its category is held
    Grab {
        /// Item to pick up
        item: HeldItem,
    },
    /// Put down whatever is held in a category
    Release {
        /// Category to clear
        category: ItemCategory,
    },
    /// Dip a strip into a beaker
    TestStripInLiquid {
        /// Strip to dip
        strip_id: String,
        /// Beaker to dip into
        beaker_id: String,
    },
    /// Hold a salt in the flame
    PerformFlameTest {
        /// Salt under test
        salt_id: String,
    },
    /// Apply a tool to a gas sample
    PerformGasTest {
        /// Gas under test
        gas_id: String,
        /// Tool applied
        tool: TestTool,
    },
    /// Turn the Bunsen burner on or off
    ToggleBunsenBurner,
    /// Pick up the wire loop
    SelectWireLoop,
    /// Put down the wire loop (also drops any salt on it)
    ReleaseWireLoop,
    /// Change experiment, clearing transient state
    SwitchExperiment {
        /// Experiment to activate
        experiment: ExperimentKind,
    },
    /// Full reset, same as `Initialize`
    ResetLab,
}
