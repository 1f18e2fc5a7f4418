use serde::{Deserialize, Serialize};

/// Color palette for non-element geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorOptions {
    /// RGB color of bond cylinders.
    pub bond: [f32; 3],
    /// RGB color of bond lines in standard and wire detail.
    pub bond_line: [f32; 3],
    /// RGB color for symbols without an element table entry.
    pub unknown_element: [f32; 3],
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            bond: [0.75, 0.75, 0.75],
            bond_line: [1.0, 1.0, 1.0],
            unknown_element: [0.85, 0.85, 0.85],
        }
    }
}
