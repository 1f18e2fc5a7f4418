use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::scene::DetailLevel;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Detail", inline)]
#[serde(default)]
/// Advisory detail-level selection applied when a molecule loads.
pub struct DetailOptions {
    /// Pick the detail level from the atom count on every load.
    #[schemars(title = "Automatic Detail")]
    pub auto_select: bool,
    /// Molecules with fewer atoms use compact detail.
    #[schemars(title = "Compact Below", range(min = 1, max = 100000))]
    pub compact_below: usize,
    /// Molecules with more atoms use wire detail.
    #[schemars(title = "Wire Above", range(min = 1, max = 1000000))]
    pub wire_above: usize,
}

impl Default for DetailOptions {
    fn default() -> Self {
        Self {
            auto_select: true,
            compact_below: 100,
            wire_above: 1000,
        }
    }
}

impl DetailOptions {
    /// Detail level recommended for a molecule of `atom_count` atoms.
    #[must_use]
    pub fn advised(&self, atom_count: usize) -> DetailLevel {
        if atom_count < self.compact_below {
            DetailLevel::Compact
        } else if atom_count > self.wire_above {
            DetailLevel::Wire
        } else {
            DetailLevel::Standard
        }
    }
}
