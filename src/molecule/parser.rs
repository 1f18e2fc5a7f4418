//! Reader for the line-oriented molfile-style structure format.
//!
//! Layout: name, comment, an ignored metadata line, a counts line
//! (`atoms bonds`), then one `x y z symbol` line per atom and one
//! `a b order` line per bond with 1-based atom indices. Any trailing lines
//! (property blocks, `M  END`) are ignored.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use glam::DVec3;

use super::{Atom, BondError, BondOrder, Molecule, MoleculeBuilder};

/// Counts above this value are a legacy concatenated `atomsbonds` field.
const LEGACY_COUNTS_THRESHOLD: usize = 1000;

/// Divisor splitting a concatenated counts field: the quotient is the atom
/// count and the remainder the bond count.
const LEGACY_BOND_MODULUS: usize = 1000;

/// File region a parse error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// The counts line (fourth line).
    Counts,
    /// The atom block.
    Atoms,
    /// The bond block.
    Bonds,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Counts => "counts line",
            Self::Atoms => "atom block",
            Self::Bonds => "bond block",
        };
        f.write_str(name)
    }
}

/// Errors produced while reading a molecule file. Line numbers are 1-based.
#[derive(Debug)]
pub enum ParseError {
    /// The input could not be read (I/O failure or invalid UTF-8).
    Io(std::io::Error),
    /// The input ended inside the three header lines or before the counts
    /// line.
    MissingHeader {
        /// First missing line.
        line: usize,
    },
    /// A header count is not a non-negative integer.
    InvalidCount {
        /// Line of the counts record.
        line: usize,
        /// Offending token.
        value: String,
    },
    /// Fewer atom or bond lines than the counts line declared.
    UnexpectedEof {
        /// Block that was cut short.
        section: Section,
        /// Declared number of records.
        expected: usize,
        /// Records actually present.
        found: usize,
    },
    /// A record has too few whitespace-separated fields.
    MissingField {
        /// Offending line.
        line: usize,
        /// Block the record belongs to.
        section: Section,
        /// Minimum number of fields.
        expected: usize,
        /// Fields present.
        found: usize,
    },
    /// A coordinate or atom index is not a number.
    InvalidNumber {
        /// Offending line.
        line: usize,
        /// Name of the field.
        field: &'static str,
        /// Offending token.
        value: String,
    },
    /// A bond refers to an atom outside `1..=atom_count`.
    InvalidBondReference {
        /// Offending line.
        line: usize,
        /// 1-based index as written in the file.
        index: i64,
        /// Number of atoms declared.
        atom_count: usize,
    },
    /// A bond joins an atom to itself.
    SelfBond {
        /// Offending line.
        line: usize,
        /// 1-based index of the atom.
        index: usize,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "unreadable input: {e}"),
            Self::MissingHeader { line } => {
                write!(f, "header ended before line {line}")
            }
            Self::InvalidCount { line, value } => {
                write!(f, "line {line}: invalid count '{value}'")
            }
            Self::UnexpectedEof {
                section,
                expected,
                found,
            } => write!(
                f,
                "{section} declares {expected} records but only {found} \
                 are present"
            ),
            Self::MissingField {
                line,
                section,
                expected,
                found,
            } => write!(
                f,
                "line {line}: {section} record needs {expected} fields, \
                 found {found}"
            ),
            Self::InvalidNumber { line, field, value } => {
                write!(f, "line {line}: invalid {field} '{value}'")
            }
            Self::InvalidBondReference {
                line,
                index,
                atom_count,
            } => write!(
                f,
                "line {line}: bond references atom {index}, valid range is \
                 1..={atom_count}"
            ),
            Self::SelfBond { line, index } => {
                write!(f, "line {line}: atom {index} is bonded to itself")
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ParseError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl ParseError {
    fn from_bond(line: usize, e: BondError) -> Self {
        match e {
            BondError::OutOfRange { index, atom_count } => {
                Self::InvalidBondReference {
                    line,
                    index: index as i64 + 1,
                    atom_count,
                }
            }
            BondError::SelfBond { index } => Self::SelfBond {
                line,
                index: index + 1,
            },
        }
    }
}

/// Parse a molecule from raw file bytes.
///
/// # Errors
///
/// Returns [`ParseError`] for any malformed, truncated or inconsistent
/// input. No partial molecule is produced.
pub fn parse(bytes: &[u8]) -> Result<Molecule, ParseError> {
    parse_reader(bytes)
}

/// Read and parse a molecule file from disk.
///
/// # Errors
///
/// Returns [`ParseError::Io`] if the file cannot be read, otherwise as
/// [`parse`].
pub fn load(path: &Path) -> Result<Molecule, ParseError> {
    let file = File::open(path)?;
    parse_reader(BufReader::new(file))
}

/// Parse a molecule from any buffered reader.
///
/// # Errors
///
/// As [`parse`].
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Molecule, ParseError> {
    let mut lines = NumberedLines {
        inner: reader.lines(),
        line_no: 0,
    };

    let (_, name) = lines.next()?.ok_or(ParseError::MissingHeader { line: 1 })?;
    let (_, comment) =
        lines.next()?.ok_or(ParseError::MissingHeader { line: 2 })?;
    let _ = lines.next()?.ok_or(ParseError::MissingHeader { line: 3 })?;
    let (counts_line, counts) =
        lines.next()?.ok_or(ParseError::MissingHeader { line: 4 })?;
    let (atom_count, bond_count) = parse_counts(&counts, counts_line)?;

    log::debug!(
        "parsing '{}': {atom_count} atoms, {bond_count} bonds",
        name.trim_end()
    );

    let mut builder = Molecule::builder(name.trim_end(), comment.trim_end());
    for found in 0..atom_count {
        let (line_no, line) =
            lines.next()?.ok_or(ParseError::UnexpectedEof {
                section: Section::Atoms,
                expected: atom_count,
                found,
            })?;
        let _ = builder.add_atom(parse_atom(&line, line_no)?);
    }
    for found in 0..bond_count {
        let (line_no, line) =
            lines.next()?.ok_or(ParseError::UnexpectedEof {
                section: Section::Bonds,
                expected: bond_count,
                found,
            })?;
        add_bond_record(&mut builder, &line, line_no)?;
    }

    Ok(builder.build())
}

/// Line iterator that tracks 1-based line numbers and surfaces read errors.
struct NumberedLines<R> {
    inner: Lines<R>,
    line_no: usize,
}

impl<R: BufRead> NumberedLines<R> {
    fn next(&mut self) -> Result<Option<(usize, String)>, ParseError> {
        match self.inner.next() {
            Some(line) => {
                self.line_no += 1;
                Ok(Some((self.line_no, line?)))
            }
            None => Ok(None),
        }
    }
}

fn parse_counts(
    line: &str,
    line_no: usize,
) -> Result<(usize, usize), ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let first = tokens.first().ok_or(ParseError::MissingField {
        line: line_no,
        section: Section::Counts,
        expected: 2,
        found: 0,
    })?;
    let first = parse_count(first, line_no)?;

    // Older writers run the two 3-digit fields together.
    if first > LEGACY_COUNTS_THRESHOLD {
        return Ok((first / LEGACY_BOND_MODULUS, first % LEGACY_BOND_MODULUS));
    }

    let second = tokens.get(1).ok_or(ParseError::MissingField {
        line: line_no,
        section: Section::Counts,
        expected: 2,
        found: 1,
    })?;
    Ok((first, parse_count(second, line_no)?))
}

fn parse_count(token: &str, line_no: usize) -> Result<usize, ParseError> {
    token.parse().map_err(|_| ParseError::InvalidCount {
        line: line_no,
        value: token.to_owned(),
    })
}

fn parse_atom(line: &str, line_no: usize) -> Result<Atom, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 4 {
        return Err(ParseError::MissingField {
            line: line_no,
            section: Section::Atoms,
            expected: 4,
            found: tokens.len(),
        });
    }
    let x = parse_coordinate(tokens[0], "x coordinate", line_no)?;
    let y = parse_coordinate(tokens[1], "y coordinate", line_no)?;
    let z = parse_coordinate(tokens[2], "z coordinate", line_no)?;
    Ok(Atom::new(DVec3::new(x, y, z), tokens[3]))
}

fn parse_coordinate(
    token: &str,
    field: &'static str,
    line_no: usize,
) -> Result<f64, ParseError> {
    token
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ParseError::InvalidNumber {
            line: line_no,
            field,
            value: token.to_owned(),
        })
}

fn add_bond_record(
    builder: &mut MoleculeBuilder,
    line: &str,
    line_no: usize,
) -> Result<(), ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 3 {
        return Err(ParseError::MissingField {
            line: line_no,
            section: Section::Bonds,
            expected: 3,
            found: tokens.len(),
        });
    }
    let atom_count = builder.atom_count();
    let a = parse_atom_index(tokens[0], "first atom index", line_no, atom_count)?;
    let b =
        parse_atom_index(tokens[1], "second atom index", line_no, atom_count)?;
    let order = tokens[2].parse().map_or(BondOrder::None, BondOrder::from_code);

    let _ = builder
        .add_bond(a, b, order)
        .map_err(|e| ParseError::from_bond(line_no, e))?;
    Ok(())
}

/// Parse a 1-based atom index into a 0-based one.
fn parse_atom_index(
    token: &str,
    field: &'static str,
    line_no: usize,
    atom_count: usize,
) -> Result<usize, ParseError> {
    let index: i64 = token.parse().map_err(|_| ParseError::InvalidNumber {
        line: line_no,
        field,
        value: token.to_owned(),
    })?;
    if index < 1 || index as u64 > atom_count as u64 {
        return Err(ParseError::InvalidBondReference {
            line: line_no,
            index,
            atom_count,
        });
    }
    Ok(index as usize - 1)
}
