//! Depfile output for documentation builds.
//!
//! After a build pass, [`DepfileExtension`] writes every file the build read
//! into a Makefile-style dependency file so an outer build system knows when
//! the documentation has to be rebuilt:
//!
//! ```text
//! build/html: \
//! docs/index.rst docs/shared.rst
//! docs/index.rst:
//! docs/shared.rst:
//! ```
//!
//! The empty rules keep `make` from failing when one of the inputs is later
//! moved or deleted. Output is only written when the `depfile` config value
//! is set.

mod depfile;
mod extension;
mod inputs;

pub use depfile::{Depfile, WriteOutcome, write_depfile};
pub use extension::{DEPFILE_CONFIG, DepfileExtension, VERSION, setup};
pub use inputs::input_files;
