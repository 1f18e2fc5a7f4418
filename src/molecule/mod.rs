//! Molecule data model: atoms, bonds and the derived centroid.
//!
//! Bonds reference atoms by stable index into the append-only atom list and
//! are resolved to positions only when geometry is built. A [`Molecule`] is
//! produced once per load through [`MoleculeBuilder`] and is immutable
//! afterwards.

mod parser;

use std::fmt;

use glam::DVec3;
pub use parser::{load, parse, parse_reader, ParseError, Section};

// ---------------------------------------------------------------------------
// Atoms and bonds
// ---------------------------------------------------------------------------

/// A single atom: position in angstroms plus element symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Cartesian position.
    pub position: DVec3,
    /// Element symbol as written in the source file (e.g. `"C"`, `"Cl"`).
    pub element: String,
}

impl Atom {
    /// Create an atom at `position` with the given element symbol.
    pub fn new(position: DVec3, element: impl Into<String>) -> Self {
        Self {
            position,
            element: element.into(),
        }
    }
}

/// Chemical bond multiplicity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondOrder {
    /// Unspecified or unrecognised order.
    #[default]
    None,
    /// Single bond.
    Single,
    /// Double bond.
    Double,
    /// Triple bond.
    Triple,
    /// Aromatic bond.
    Aromatic,
}

impl BondOrder {
    /// Decode the numeric bond-order code of a bond record.
    ///
    /// Codes 6 and 7 are the "single or aromatic" / "double or aromatic"
    /// query types and collapse to their plain order.
    #[must_use]
    pub fn from_code(code: i64) -> Self {
        match code {
            1 | 6 => Self::Single,
            2 | 7 => Self::Double,
            3 => Self::Triple,
            4 => Self::Aromatic,
            _ => Self::None,
        }
    }
}

/// A bond between two atoms, stored as 0-based atom indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bond {
    a: usize,
    b: usize,
    order: BondOrder,
}

impl Bond {
    /// Index of the first atom.
    #[must_use]
    pub fn a(&self) -> usize {
        self.a
    }

    /// Index of the second atom.
    #[must_use]
    pub fn b(&self) -> usize {
        self.b
    }

    /// Bond order.
    #[must_use]
    pub fn order(&self) -> BondOrder {
        self.order
    }
}

/// Reasons a bond cannot be added to a molecule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondError {
    /// An endpoint index is not below the atom count.
    OutOfRange {
        /// Offending 0-based index.
        index: usize,
        /// Number of atoms in the molecule at the time.
        atom_count: usize,
    },
    /// Both endpoints are the same atom.
    SelfBond {
        /// The repeated 0-based index.
        index: usize,
    },
}

impl fmt::Display for BondError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, atom_count } => write!(
                f,
                "atom {} does not exist (molecule has {atom_count} atoms)",
                index + 1
            ),
            Self::SelfBond { index } => {
                write!(f, "atom {} is bonded to itself", index + 1)
            }
        }
    }
}

impl std::error::Error for BondError {}

// ---------------------------------------------------------------------------
// Molecule
// ---------------------------------------------------------------------------

/// A parsed molecule with its derived centroid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Molecule {
    name: String,
    comment: String,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    centroid: DVec3,
}

impl Molecule {
    /// Start building a molecule with the given name and comment.
    pub fn builder(
        name: impl Into<String>,
        comment: impl Into<String>,
    ) -> MoleculeBuilder {
        MoleculeBuilder {
            name: name.into(),
            comment: comment.into(),
            atoms: Vec::new(),
            bonds: Vec::new(),
        }
    }

    /// Molecule name (first header line).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-text comment (second header line).
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Atoms in file order.
    #[must_use]
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Bonds in file order.
    #[must_use]
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Number of atoms.
    #[must_use]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Number of bonds.
    #[must_use]
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// Whether the molecule has no atoms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Mean atom position, or the origin for an empty molecule.
    #[must_use]
    pub fn centroid(&self) -> DVec3 {
        self.centroid
    }

    /// Resolve a bond's endpoints to positions.
    ///
    /// Always `Some` for a bond obtained from this molecule's
    /// [`Molecule::bonds`]; `None` when an index is out of range, as for a
    /// bond taken from a larger molecule.
    #[must_use]
    pub fn bond_endpoints(&self, bond: &Bond) -> Option<(DVec3, DVec3)> {
        let a = self.atoms.get(bond.a)?;
        let b = self.atoms.get(bond.b)?;
        Some((a.position, b.position))
    }
}

/// Append-only builder for [`Molecule`].
#[derive(Debug, Clone)]
pub struct MoleculeBuilder {
    name: String,
    comment: String,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
}

impl MoleculeBuilder {
    /// Append an atom and return its 0-based index.
    pub fn add_atom(&mut self, atom: Atom) -> usize {
        self.atoms.push(atom);
        self.atoms.len() - 1
    }

    /// Append a bond between two existing atoms (0-based indices) and
    /// return its index.
    ///
    /// # Errors
    ///
    /// Returns [`BondError`] if either index is not an existing atom or
    /// both name the same atom. Nothing is stored in that case.
    pub fn add_bond(
        &mut self,
        a: usize,
        b: usize,
        order: BondOrder,
    ) -> Result<usize, BondError> {
        let atom_count = self.atoms.len();
        for index in [a, b] {
            if index >= atom_count {
                return Err(BondError::OutOfRange { index, atom_count });
            }
        }
        if a == b {
            return Err(BondError::SelfBond { index: a });
        }
        self.bonds.push(Bond { a, b, order });
        Ok(self.bonds.len() - 1)
    }

    /// Number of atoms added so far.
    #[must_use]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Finish the molecule, computing its centroid.
    #[must_use]
    pub fn build(self) -> Molecule {
        let centroid = centroid_of(&self.atoms);
        Molecule {
            name: self.name,
            comment: self.comment,
            atoms: self.atoms,
            bonds: self.bonds,
            centroid,
        }
    }
}

/// Componentwise mean; the origin when there are no atoms.
fn centroid_of(atoms: &[Atom]) -> DVec3 {
    if atoms.is_empty() {
        return DVec3::ZERO;
    }
    let sum: DVec3 = atoms.iter().map(|a| a.position).sum();
    sum / atoms.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water() -> Molecule {
        let mut b = Molecule::builder("water", "");
        let o = b.add_atom(Atom::new(DVec3::new(0.0, 0.0, 0.0), "O"));
        let h1 = b.add_atom(Atom::new(DVec3::new(0.96, 0.0, 0.0), "H"));
        let h2 = b.add_atom(Atom::new(DVec3::new(-0.24, 0.93, 0.0), "H"));
        let _ = b.add_bond(o, h1, BondOrder::Single).unwrap();
        let _ = b.add_bond(o, h2, BondOrder::Single).unwrap();
        b.build()
    }

    #[test]
    fn centroid_is_mean_position() {
        let mol = water();
        let expected = DVec3::new(0.72 / 3.0, 0.93 / 3.0, 0.0);
        assert!(mol.centroid().abs_diff_eq(expected, 1e-12));
    }

    #[test]
    fn empty_molecule_centroid_is_origin() {
        let mol = Molecule::builder("empty", "").build();
        assert_eq!(mol.centroid(), DVec3::ZERO);
        assert!(mol.is_empty());
        assert_eq!(Molecule::default().centroid(), DVec3::ZERO);
    }

    #[test]
    fn bond_indices_are_validated() {
        let mut b = Molecule::builder("pair", "");
        let _ = b.add_atom(Atom::new(DVec3::ZERO, "C"));
        let _ = b.add_atom(Atom::new(DVec3::X, "C"));
        assert_eq!(
            b.add_bond(0, 2, BondOrder::Single),
            Err(BondError::OutOfRange {
                index: 2,
                atom_count: 2
            })
        );
        assert_eq!(
            b.add_bond(1, 1, BondOrder::Single),
            Err(BondError::SelfBond { index: 1 })
        );
        assert_eq!(b.add_bond(0, 1, BondOrder::Double), Ok(0));
        assert_eq!(b.build().bond_count(), 1);
    }

    #[test]
    fn bond_endpoints_resolve_by_index() {
        let mol = water();
        let (a, b) = mol.bond_endpoints(&mol.bonds()[1]).unwrap();
        assert_eq!(a, DVec3::ZERO);
        assert_eq!(b, DVec3::new(-0.24, 0.93, 0.0));
    }

    #[test]
    fn foreign_bond_has_no_endpoints() {
        let water = water();
        let mut b = Molecule::builder("pair", "");
        let _ = b.add_atom(Atom::new(DVec3::ZERO, "H"));
        let _ = b.add_atom(Atom::new(DVec3::X, "H"));
        let pair = b.build();
        // water's second bond joins atoms 0 and 2
        assert_eq!(pair.bond_endpoints(&water.bonds()[1]), None);
    }

    #[test]
    fn bond_order_codes() {
        assert_eq!(BondOrder::from_code(1), BondOrder::Single);
        assert_eq!(BondOrder::from_code(2), BondOrder::Double);
        assert_eq!(BondOrder::from_code(3), BondOrder::Triple);
        assert_eq!(BondOrder::from_code(4), BondOrder::Aromatic);
        assert_eq!(BondOrder::from_code(6), BondOrder::Single);
        assert_eq!(BondOrder::from_code(7), BondOrder::Double);
        assert_eq!(BondOrder::from_code(5), BondOrder::None);
        assert_eq!(BondOrder::from_code(0), BondOrder::None);
    }
}
