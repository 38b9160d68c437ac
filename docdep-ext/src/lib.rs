//! Extension hooks for documentation builds.
//!
//! A [`Host`] owns the build configuration and the registered extensions.
//! Extensions declare the config values they read, the lifecycle
//! [`Event`]s they care about, and whether they are safe to use while the
//! host parallelizes its read and write phases.
//!
//! # Example
//!
//! ```ignore
//! use docdep_ext::Host;
//!
//! let host = Host::new(config).extension(MyExtension);
//! host.env_updated(&env)?;
//! ```

mod event;
mod extension;
mod host;

pub use event::Event;
pub use extension::{Extension, ExtensionMetadata};
pub use host::Host;
