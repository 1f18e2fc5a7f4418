// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Molecule viewer core: molfile parsing, level-of-detail scene
//! compilation and red/cyan anaglyph stereo cameras.
//!
//! A [`molecule::Molecule`] is parsed from a small MDL-style connection
//! table, turned into a flat list of [`renderer::DrawCommand`]s by the
//! [`scene::SceneBuilder`] and compiled once into a [`renderer::DrawBackend`]
//! list. Every frame replays that list once per eye under the view matrices
//! produced by [`camera::StereoCamera`].
//!
//! # Key entry points
//!
//! - [`engine::MoleculeViewer`] - host-facing viewer (load, resize, render,
//!   snapshot)
//! - [`engine::ViewState`] - rotation, zoom, pan, stereo and detail settings
//! - [`renderer::DrawBackend`] - the seam to a graphics API
//! - [`options::Options`] - runtime configuration with TOML presets
//! - [`elements::ElementTable`] - per-element radius and colors
//!
//! # Architecture
//!
//! Everything runs synchronously on the caller's thread. View changes record
//! an [`engine::Invalidation`]: camera-only changes cost a redraw, changes to
//! inputs baked into the compiled list (detail level, atom scale, stereo
//! colors) also cost a rebuild. The compiled list is keyed by
//! [`scene::SceneKey`] so rebuilding with unchanged inputs is skipped.

pub mod camera;
pub mod elements;
pub mod engine;
pub mod error;
pub mod molecule;
pub mod options;
pub mod renderer;
pub mod scene;
