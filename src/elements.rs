//! Element visual metadata: sphere radius and per-eye display colors.
//!
//! The table is built once (usually [`ElementTable::standard`], optionally
//! overridden from TOML) and handed read-only to the scene builder. Symbols
//! missing from the table are not an error; the builder falls back to
//! drawing the symbol as text.

use std::collections::BTreeMap;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::StereomolError;

/// Ball radius relative to the van der Waals radius.
const VDW_BALL_FRACTION: f64 = 0.3;

/// Visual parameters for one chemical element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Sphere radius in angstroms, before the view's atom-size scale.
    pub radius: f64,
    /// RGB color used for mono rendering.
    pub color: [f32; 3],
    /// RGB color used in anaglyph mode. Falls back to `color`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<[f32; 3]>,
}

impl Element {
    /// Element with a single display color.
    #[must_use]
    pub fn new(radius: f64, color: [f32; 3]) -> Self {
        Self {
            radius,
            color,
            secondary: None,
        }
    }

    /// Set the color used when rendering for red/cyan glasses.
    #[must_use]
    pub fn with_secondary(mut self, secondary: [f32; 3]) -> Self {
        self.secondary = Some(secondary);
        self
    }

    /// Display color for mono (`false`) or anaglyph (`true`) rendering.
    #[must_use]
    pub fn color(&self, stereo: bool) -> [f32; 3] {
        if stereo {
            self.secondary.unwrap_or(self.color)
        } else {
            self.color
        }
    }
}

/// Lookup table from element symbol to [`Element`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementTable {
    elements: FxHashMap<String, Element>,
}

impl ElementTable {
    /// Empty table; every symbol takes the text fallback.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with CPK colors for common organic and biological elements.
    ///
    /// Elements whose primary color is nearly invisible through one of the
    /// red/cyan filters get a desaturated secondary color.
    #[must_use]
    pub fn standard() -> Self {
        let mut table = Self::new();
        let entries: [(&str, f64, [f32; 3], Option<[f32; 3]>); 20] = [
            ("H", 1.20, [1.0, 1.0, 1.0], None),
            ("B", 1.92, [1.0, 0.71, 0.71], None),
            ("C", 1.70, [0.56, 0.56, 0.56], None),
            ("N", 1.55, [0.19, 0.31, 0.97], Some([0.55, 0.6, 0.95])),
            ("O", 1.52, [1.0, 0.05, 0.05], Some([0.95, 0.55, 0.55])),
            ("F", 1.47, [0.56, 0.88, 0.31], None),
            ("Na", 2.27, [0.67, 0.36, 0.95], None),
            ("Mg", 1.73, [0.54, 1.0, 0.0], Some([0.7, 0.9, 0.5])),
            ("Si", 2.10, [0.94, 0.78, 0.63], None),
            ("P", 1.80, [1.0, 0.5, 0.0], Some([0.95, 0.7, 0.5])),
            ("S", 1.80, [1.0, 1.0, 0.19], None),
            ("Cl", 1.75, [0.12, 0.94, 0.12], Some([0.6, 0.9, 0.6])),
            ("K", 2.75, [0.56, 0.25, 0.83], None),
            ("Ca", 2.31, [0.24, 1.0, 0.0], Some([0.6, 0.9, 0.5])),
            ("Fe", 2.00, [0.88, 0.4, 0.2], Some([0.85, 0.6, 0.5])),
            ("Co", 2.00, [0.94, 0.56, 0.63], None),
            ("Cu", 1.40, [0.78, 0.5, 0.2], Some([0.8, 0.65, 0.5])),
            ("Zn", 1.39, [0.49, 0.5, 0.69], None),
            ("Br", 1.85, [0.65, 0.16, 0.16], Some([0.75, 0.5, 0.5])),
            ("I", 1.98, [0.58, 0.0, 0.58], Some([0.7, 0.5, 0.7])),
        ];
        for (symbol, vdw, color, secondary) in entries {
            let mut element = Element::new(vdw * VDW_BALL_FRACTION, color);
            element.secondary = secondary;
            let _ = table.elements.insert(symbol.to_owned(), element);
        }
        table
    }

    /// Add or replace an entry.
    ///
    /// # Errors
    ///
    /// Returns [`StereomolError::OptionsParse`] if the radius is not a
    /// positive finite number; the table is left unchanged.
    pub fn insert(
        &mut self,
        symbol: &str,
        element: Element,
    ) -> Result<(), StereomolError> {
        check_radius(symbol, element.radius)?;
        let _ = self.elements.insert(symbol.trim().to_owned(), element);
        Ok(())
    }

    /// Look up a symbol. Surrounding whitespace is ignored and `"CL"` or
    /// `"cl"` match an entry stored as `"Cl"`.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&Element> {
        let symbol = symbol.trim();
        self.elements
            .get(symbol)
            .or_else(|| self.elements.get(&canonical_symbol(symbol)))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Parse a table from TOML (`[elements.C] radius = 0.5, color = [...]`).
    ///
    /// # Errors
    ///
    /// Returns [`StereomolError::OptionsParse`] for malformed TOML or a
    /// non-positive radius.
    pub fn from_toml_str(content: &str) -> Result<Self, StereomolError> {
        let table: Self = toml::from_str(content)
            .map_err(|e| StereomolError::OptionsParse(e.to_string()))?;
        table.validate()?;
        Ok(table)
    }

    /// Load a table from a TOML file.
    ///
    /// # Errors
    ///
    /// See [`ElementTable::from_toml_str`]; unreadable files give
    /// [`StereomolError::Io`].
    pub fn load(path: &Path) -> Result<Self, StereomolError> {
        let content = std::fs::read_to_string(path).map_err(StereomolError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Save the table as TOML, entries sorted by symbol.
    ///
    /// # Errors
    ///
    /// Returns [`StereomolError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), StereomolError> {
        #[derive(Serialize)]
        struct Sorted<'a> {
            elements: BTreeMap<&'a str, &'a Element>,
        }
        let sorted = Sorted {
            elements: self
                .elements
                .iter()
                .map(|(k, v)| (k.as_str(), v))
                .collect(),
        };
        let content = toml::to_string_pretty(&sorted)
            .map_err(|e| StereomolError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(StereomolError::Io)?;
        }
        std::fs::write(path, content).map_err(StereomolError::Io)
    }

    /// Overlay another table's entries onto this one.
    pub fn merge(&mut self, other: &Self) {
        for (symbol, element) in &other.elements {
            let _ = self.elements.insert(symbol.clone(), *element);
        }
    }

    fn validate(&self) -> Result<(), StereomolError> {
        for (symbol, element) in &self.elements {
            check_radius(symbol, element.radius)?;
        }
        Ok(())
    }
}

fn check_radius(symbol: &str, radius: f64) -> Result<(), StereomolError> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(StereomolError::OptionsParse(format!(
            "element '{symbol}' has invalid radius {radius}"
        )))
    }
}

/// `"CL"` → `"Cl"`.
fn canonical_symbol(symbol: &str) -> String {
    let mut chars = symbol.chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_has_common_elements() {
        let table = ElementTable::standard();
        for symbol in ["H", "C", "N", "O", "S", "P", "Cl", "Co"] {
            assert!(table.get(symbol).is_some(), "missing {symbol}");
        }
        assert!(table.get("Xx").is_none());
        let carbon = table.get("C").unwrap();
        assert!((carbon.radius - 0.51).abs() < 1e-12);
    }

    #[test]
    fn lookup_normalizes_symbol() {
        let table = ElementTable::standard();
        assert_eq!(table.get(" CL "), table.get("Cl"));
        assert_eq!(table.get("cl"), table.get("Cl"));
        assert_eq!(canonical_symbol("FE"), "Fe");
        assert_eq!(canonical_symbol(""), "");
    }

    #[test]
    fn secondary_color_defaults_to_primary() {
        let plain = Element::new(0.5, [0.1, 0.2, 0.3]);
        assert_eq!(plain.color(true), [0.1, 0.2, 0.3]);
        let tinted = plain.with_secondary([0.9, 0.9, 0.9]);
        assert_eq!(tinted.color(false), [0.1, 0.2, 0.3]);
        assert_eq!(tinted.color(true), [0.9, 0.9, 0.9]);
    }

    #[test]
    fn toml_overrides_merge() {
        let overrides = ElementTable::from_toml_str(
            r"
[elements.C]
radius = 0.8
color = [0.2, 0.2, 0.2]

[elements.Xe]
radius = 0.6
color = [0.4, 0.8, 0.9]
secondary = [0.7, 0.8, 0.9]
",
        )
        .unwrap();
        assert_eq!(overrides.len(), 2);

        let mut table = ElementTable::standard();
        let before = table.len();
        table.merge(&overrides);
        assert_eq!(table.len(), before + 1);
        assert_eq!(table.get("C").unwrap().radius, 0.8);
        assert_eq!(table.get("Xe").unwrap().color(true), [0.7, 0.8, 0.9]);
    }

    #[test]
    fn non_positive_radius_is_rejected() {
        let result = ElementTable::from_toml_str(
            "[elements.C]\nradius = 0.0\ncolor = [0.5, 0.5, 0.5]\n",
        );
        assert!(matches!(result, Err(StereomolError::OptionsParse(_))));
    }

    #[test]
    fn insert_validates_radius() {
        let mut table = ElementTable::default();
        for radius in [0.0, -0.3, f64::NAN] {
            let result = table.insert("Xe", Element::new(radius, [0.5; 3]));
            assert!(matches!(result, Err(StereomolError::OptionsParse(_))));
        }
        assert!(table.is_empty());
        table.insert(" Xe ", Element::new(0.6, [0.5; 3])).unwrap();
        assert_eq!(table.get("Xe").unwrap().radius, 0.6);
    }

    #[test]
    fn saved_table_loads_back() {
        let dir = std::env::temp_dir().join("stereomol-elements-test");
        let path = dir.join("elements.toml");
        let table = ElementTable::standard();
        table.save(&path).unwrap();
        let loaded = ElementTable::load(&path).unwrap();
        assert_eq!(loaded, table);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
