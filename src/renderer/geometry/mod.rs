//! Molecular geometry helpers.

/// Bond transforms and multiple-bond strand layout.
pub mod bond;
