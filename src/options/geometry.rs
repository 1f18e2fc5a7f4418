use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Geometry", inline)]
#[serde(default)]
/// Geometry detail options for atom and bond primitives.
pub struct GeometryOptions {
    /// Single-bond cylinder radius in angstroms.
    #[schemars(title = "Bond Radius", range(min = 0.02, max = 0.5), extend("step" = 0.01))]
    pub bond_radius: f64,
    /// Radius of each strand of a double or triple bond, relative to
    /// `bond_radius`.
    #[schemars(skip)]
    pub multi_bond_radius_scale: f64,
    /// Lateral distance between the strands of a multiple bond.
    #[schemars(title = "Bond Spacing", range(min = 0.05, max = 1.0), extend("step" = 0.01))]
    pub bond_spacing: f64,
    /// Cylinder subdivisions around the bond axis.
    #[schemars(skip)]
    pub cylinder_slices: u32,
    /// Sphere subdivisions in compact detail.
    #[schemars(skip)]
    pub sphere_slices: u32,
    /// Sphere stacks in compact detail.
    #[schemars(skip)]
    pub sphere_stacks: u32,
    /// Sphere subdivisions in standard detail.
    #[schemars(skip)]
    pub standard_sphere_slices: u32,
    /// Sphere stacks in standard detail.
    #[schemars(skip)]
    pub standard_sphere_stacks: u32,
    /// Atom radius in standard detail, relative to the compact radius.
    #[schemars(title = "Standard Atom Size", range(min = 0.05, max = 1.0), extend("step" = 0.05))]
    pub standard_atom_fraction: f64,
    /// Height of the stroked symbol drawn for unknown elements.
    #[schemars(skip)]
    pub glyph_height: f64,
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self {
            bond_radius: 0.15,
            multi_bond_radius_scale: 0.6,
            bond_spacing: 0.3,
            cylinder_slices: 12,
            sphere_slices: 24,
            sphere_stacks: 16,
            standard_sphere_slices: 10,
            standard_sphere_stacks: 8,
            standard_atom_fraction: 0.3,
            glyph_height: 0.6,
        }
    }
}
