//! Command-list generation for one molecule at one detail level.
//!
//! Bonds are emitted first under a single bond color, then atoms in parse
//! order. Atoms whose symbol has no element table entry are drawn as their
//! symbol text instead of a sphere.

use glam::{DMat4, DVec3};

use super::{DetailLevel, SceneParams};
use crate::elements::ElementTable;
use crate::molecule::{Atom, Bond, Molecule};
use crate::options::{ColorOptions, GeometryOptions, Options};
use crate::renderer::geometry::bond::{primitive_layout, BondTransform};
use crate::renderer::{DrawCommand, Rgb};

/// Output buffer with helpers for transformed primitives.
#[derive(Default)]
struct CommandCollector {
    commands: Vec<DrawCommand>,
    current_color: Option<Rgb>,
}

impl CommandCollector {
    /// Emit a color change unless the color is already current.
    fn color(&mut self, color: Rgb) {
        if self.current_color != Some(color) {
            self.commands.push(DrawCommand::SetColor(color));
            self.current_color = Some(color);
        }
    }

    /// Emit `primitive` under `transform`, restoring the stack afterwards.
    fn transformed(&mut self, transform: DMat4, primitive: DrawCommand) {
        self.commands.extend([
            DrawCommand::PushMatrix,
            DrawCommand::MultMatrix(transform),
            primitive,
            DrawCommand::PopMatrix,
        ]);
    }
}

/// Builds draw commands from a molecule, an element table and options.
pub struct SceneBuilder<'a> {
    molecule: &'a Molecule,
    elements: &'a ElementTable,
    geometry: &'a GeometryOptions,
    colors: &'a ColorOptions,
}

impl<'a> SceneBuilder<'a> {
    /// Borrow the inputs of a build.
    #[must_use]
    pub fn new(
        molecule: &'a Molecule,
        elements: &'a ElementTable,
        options: &'a Options,
    ) -> Self {
        Self {
            molecule,
            elements,
            geometry: &options.geometry,
            colors: &options.colors,
        }
    }

    /// Build the command list for `params`.
    #[must_use]
    pub fn build(&self, params: SceneParams) -> Vec<DrawCommand> {
        let mut out = CommandCollector::default();
        match params.detail {
            DetailLevel::Compact => {
                self.bond_cylinders(&mut out);
                self.compact_atoms(params, &mut out);
            }
            DetailLevel::Standard => {
                self.bond_lines(&mut out);
                self.standard_atoms(params, &mut out);
            }
            DetailLevel::Wire => self.bond_lines(&mut out),
        }
        out.commands
    }

    /// Transforms of every bond whose atoms do not coincide, with its order.
    fn bond_transforms(
        &self,
    ) -> impl Iterator<Item = (BondTransform, &Bond)> + '_ {
        self.molecule.bonds().iter().filter_map(|bond| {
            let (a, b) = self.molecule.bond_endpoints(bond)?;
            let transform = BondTransform::between(a, b);
            if transform.is_degenerate() {
                log::trace!(
                    "skipping degenerate bond {} - {}",
                    bond.a(),
                    bond.b()
                );
                None
            } else {
                Some((transform, bond))
            }
        })
    }

    fn bond_cylinders(&self, out: &mut CommandCollector) {
        for (transform, bond) in self.bond_transforms() {
            out.color(self.colors.bond);
            for strand in primitive_layout(bond.order(), self.geometry) {
                out.transformed(
                    transform.strand_matrix(strand.offset),
                    DrawCommand::Cylinder {
                        base_radius: strand.radius,
                        top_radius: strand.radius,
                        length: 1.0,
                        slices: self.geometry.cylinder_slices,
                    },
                );
            }
        }
    }

    fn bond_lines(&self, out: &mut CommandCollector) {
        let segments: Vec<[DVec3; 2]> = self
            .bond_transforms()
            .flat_map(|(transform, bond)| {
                primitive_layout(bond.order(), self.geometry)
                    .into_iter()
                    .map(move |strand| transform.strand_endpoints(strand.offset))
            })
            .collect();
        if segments.is_empty() {
            return;
        }
        out.color(self.colors.bond_line);
        out.commands.push(DrawCommand::Lines(segments));
    }

    fn compact_atoms(&self, params: SceneParams, out: &mut CommandCollector) {
        for atom in self.molecule.atoms() {
            let at = DMat4::from_translation(atom.position);
            match self.elements.get(&atom.element) {
                Some(element) => {
                    out.color(element.color(params.stereo));
                    out.transformed(
                        at,
                        DrawCommand::Sphere {
                            radius: element.radius * params.atom_scale,
                            slices: self.geometry.sphere_slices,
                            stacks: self.geometry.sphere_stacks,
                        },
                    );
                }
                None => {
                    out.color(self.colors.unknown_element);
                    out.transformed(
                        at,
                        DrawCommand::StrokeText {
                            text: symbol_text(atom),
                            height: self.geometry.glyph_height
                                * params.atom_scale,
                        },
                    );
                }
            }
        }
    }

    fn standard_atoms(&self, params: SceneParams, out: &mut CommandCollector) {
        let fraction = self.geometry.standard_atom_fraction;
        for atom in self.molecule.atoms() {
            match self.elements.get(&atom.element) {
                Some(element) => {
                    out.color(element.color(params.stereo));
                    out.transformed(
                        DMat4::from_translation(atom.position),
                        DrawCommand::Sphere {
                            radius: element.radius * params.atom_scale * fraction,
                            slices: self.geometry.standard_sphere_slices,
                            stacks: self.geometry.standard_sphere_stacks,
                        },
                    );
                }
                None => {
                    out.color(self.colors.unknown_element);
                    out.commands.push(DrawCommand::Label {
                        text: symbol_text(atom),
                        position: atom.position,
                    });
                }
            }
        }
    }
}

fn symbol_text(atom: &Atom) -> String {
    atom.element.trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::Element;
    use crate::molecule::BondOrder;
    use crate::scene::{resolve, Primitive, SceneStats};

    fn water_like() -> Molecule {
        let mut b = Molecule::builder("test", "");
        let o = b.add_atom(Atom::new(DVec3::ZERO, "O"));
        let h1 = b.add_atom(Atom::new(DVec3::new(1.0, 0.0, 0.0), "H"));
        let x = b.add_atom(Atom::new(DVec3::new(0.0, 1.0, 0.0), "Xx"));
        let _ = b.add_bond(o, h1, BondOrder::Single).unwrap();
        let _ = b.add_bond(o, x, BondOrder::Double).unwrap();
        b.build()
    }

    fn params(detail: DetailLevel) -> SceneParams {
        SceneParams {
            detail,
            ..SceneParams::default()
        }
    }

    #[test]
    fn compact_draws_cylinders_spheres_and_glyphs() {
        let molecule = water_like();
        let elements = ElementTable::standard();
        let options = Options::default();
        let commands = SceneBuilder::new(&molecule, &elements, &options)
            .build(params(DetailLevel::Compact));
        let stats = SceneStats::of(&commands);
        // single + double
        assert_eq!(stats.cylinders, 3);
        assert_eq!(stats.spheres, 2);
        assert_eq!(stats.texts, 1);
        assert_eq!(stats.line_segments, 0);
        assert!(commands.contains(&DrawCommand::SetColor(options.colors.bond)));
    }

    #[test]
    fn compact_geometry_lands_on_atoms() {
        let molecule = water_like();
        let elements = ElementTable::standard();
        let options = Options::default();
        let commands = SceneBuilder::new(&molecule, &elements, &options)
            .build(params(DetailLevel::Compact));
        let primitives = resolve(&commands);

        let single = primitives
            .iter()
            .find_map(|p| match p {
                Primitive::Cylinder { start, end, .. }
                    if end.abs_diff_eq(DVec3::X, 1e-9) =>
                {
                    Some(*start)
                }
                _ => None,
            })
            .unwrap();
        assert!(single.abs_diff_eq(DVec3::ZERO, 1e-9));

        let oxygen = elements.get("O").unwrap();
        assert!(primitives.iter().any(|p| matches!(
            p,
            Primitive::Sphere { center, radius, color }
                if center.abs_diff_eq(DVec3::ZERO, 1e-9)
                    && (*radius - oxygen.radius).abs() < 1e-12
                    && *color == oxygen.color
        )));
        assert!(primitives.iter().any(|p| matches!(
            p,
            Primitive::Text { text, anchor, .. }
                if text == "Xx" && anchor.abs_diff_eq(DVec3::Y, 1e-9)
        )));
    }

    #[test]
    fn standard_uses_lines_small_spheres_and_labels() {
        let molecule = water_like();
        let elements = ElementTable::standard();
        let options = Options::default();
        let commands = SceneBuilder::new(&molecule, &elements, &options)
            .build(SceneParams {
                detail: DetailLevel::Standard,
                atom_scale: 2.0,
                stereo: false,
            });
        let stats = SceneStats::of(&commands);
        assert_eq!(stats.cylinders, 0);
        assert_eq!(stats.line_segments, 3);
        assert_eq!(stats.spheres, 2);
        assert_eq!(stats.texts, 1);

        let hydrogen = elements.get("H").unwrap();
        let expected =
            hydrogen.radius * 2.0 * options.geometry.standard_atom_fraction;
        assert!(commands.iter().any(|c| matches!(
            c,
            DrawCommand::Sphere { radius, slices, .. }
                if (*radius - expected).abs() < 1e-12
                    && *slices == options.geometry.standard_sphere_slices
        )));
        assert!(commands.iter().any(|c| matches!(
            c,
            DrawCommand::Label { text, .. } if text == "Xx"
        )));
    }

    #[test]
    fn wire_is_lines_only() {
        let molecule = water_like();
        let elements = ElementTable::standard();
        let options = Options::default();
        let commands = SceneBuilder::new(&molecule, &elements, &options)
            .build(params(DetailLevel::Wire));
        let stats = SceneStats::of(&commands);
        assert_eq!(stats.line_segments, 3);
        assert_eq!(stats.spheres + stats.cylinders + stats.texts, 0);
    }

    #[test]
    fn stereo_selects_secondary_colors() {
        let mut b = Molecule::builder("", "");
        let _ = b.add_atom(Atom::new(DVec3::ZERO, "Q"));
        let molecule = b.build();
        let mut elements = ElementTable::new();
        elements.insert(
            "Q",
            Element::new(0.5, [1.0, 0.0, 0.0]).with_secondary([0.5, 0.5, 0.5]),
        )
        .unwrap();
        let options = Options::default();
        let builder = SceneBuilder::new(&molecule, &elements, &options);

        let mono = builder.build(SceneParams::default());
        let stereo = builder.build(SceneParams {
            stereo: true,
            ..SceneParams::default()
        });
        assert_eq!(mono[0], DrawCommand::SetColor([1.0, 0.0, 0.0]));
        assert_eq!(stereo[0], DrawCommand::SetColor([0.5, 0.5, 0.5]));
    }

    #[test]
    fn degenerate_bonds_produce_nothing() {
        let mut b = Molecule::builder("", "");
        let a0 = b.add_atom(Atom::new(DVec3::ONE, "C"));
        let a1 = b.add_atom(Atom::new(DVec3::ONE, "C"));
        let _ = b.add_bond(a0, a1, BondOrder::Triple).unwrap();
        let molecule = b.build();
        let elements = ElementTable::standard();
        let options = Options::default();
        let builder = SceneBuilder::new(&molecule, &elements, &options);

        let compact = SceneStats::of(&builder.build(params(DetailLevel::Compact)));
        assert_eq!(compact.cylinders, 0);
        assert_eq!(compact.spheres, 2);
        assert!(builder.build(params(DetailLevel::Wire)).is_empty());
    }

    #[test]
    fn empty_molecule_builds_empty_list() {
        let molecule = Molecule::default();
        let elements = ElementTable::standard();
        let options = Options::default();
        let builder = SceneBuilder::new(&molecule, &elements, &options);
        for detail in [DetailLevel::Compact, DetailLevel::Standard, DetailLevel::Wire] {
            assert!(builder.build(params(detail)).is_empty());
        }
    }

    #[test]
    fn rebuild_is_identical() {
        let molecule = water_like();
        let elements = ElementTable::standard();
        let options = Options::default();
        let builder = SceneBuilder::new(&molecule, &elements, &options);
        let p = params(DetailLevel::Compact);
        assert_eq!(builder.build(p), builder.build(p));
    }
}
