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
// Function signature hygiene
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

//! Atom picking and distance-constraint queries over loaded molecules.
//!
//! Molpick keeps a small selection model (picked atoms and the distance
//! pairs between them) consistent with three views: the atom/pair tables,
//! a 3D scene mirror, and a shareable URL fragment. The selection can be
//! submitted to a backend that turns the geometric constraints into a
//! structural search query.
//!
//! # Key entry points
//!
//! - [`controller::MoleculeController`] - owns the selection and drives
//!   every view after each mutation
//! - [`selection::SelectionStore`] - picked atoms, distance pairs and the
//!   two-click pair picker
//! - [`scene::SceneSync`] - reconciles a [`scene::Stage`] with the
//!   selection
//! - [`persist`] - URL fragment codec
//! - [`backend::Backend`] - molecule lookup, identifier search and query
//!   generation
//! - [`options::Options`] - runtime configuration (backend, colors,
//!   geometry, camera, search)
//!
//! # Architecture
//!
//! Everything runs on the caller's thread. A mutation on the controller
//! completes its table re-render, scene re-sync and fragment re-encode, in
//! that order, before returning. Rendering, HTTP and the fragment itself sit
//! behind traits so the controller can be driven headless.

pub mod backend;
pub mod camera;
pub mod controller;
pub mod error;
pub mod model;
pub mod options;
pub mod persist;
pub mod scene;
pub mod search;
pub mod selection;
pub mod util;
pub mod view;

pub use controller::MoleculeController;
pub use error::MolpickError;
