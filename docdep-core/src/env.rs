//! Build environment summary.
//!
//! A documentation build publishes a [`BuildEnvironment`] once a build pass
//! has finished. Extensions read it to learn which documents were processed
//! and which extra files each one pulled in.

use std::{
    iter,
    path::{Path, PathBuf},
};

use docdep_config::Config;
use eyre::{Context, Result};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Suffix appended to a document name to find its source file.
pub const DEFAULT_SOURCE_SUFFIX: &str = ".rst";

/// Read-only view of a finished build.
///
/// Iteration order is whatever the build produced; callers must not assume
/// it is sorted or stable between builds.
pub trait BuildEnvironment {
    /// Directory relative dependency paths are resolved against.
    fn srcdir(&self) -> &Path;

    /// Directory the build wrote its output to.
    fn outdir(&self) -> &Path;

    /// Names of the documents processed by the build.
    fn found_docs(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    /// Source file of a document.
    fn doc2path(&self, docname: &str) -> PathBuf;

    /// Extra files a document depends on, relative to [`srcdir`](Self::srcdir).
    ///
    /// Unknown documents have no dependencies.
    fn dependencies(&self, docname: &str) -> Box<dyn Iterator<Item = &Path> + '_>;

    /// Host configuration the build ran with.
    fn config(&self) -> &Config;
}

/// An environment summary that can be loaded from JSON.
///
/// ```json
/// {
///   "srcdir": "/docs",
///   "outdir": "/build/html",
///   "found_docs": ["index"],
///   "dependencies": { "index": ["shared.rst"] }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    pub srcdir: PathBuf,
    pub outdir: PathBuf,
    #[serde(default = "default_source_suffix")]
    pub source_suffix: String,
    #[serde(default)]
    pub found_docs: IndexSet<String>,
    #[serde(default)]
    pub dependencies: IndexMap<String, IndexSet<PathBuf>>,
    /// Read by direct callers; a host dispatching events answers with its own
    /// config instead. Never part of the JSON.
    #[serde(skip)]
    pub config: Config,
}

fn default_source_suffix() -> String {
    DEFAULT_SOURCE_SUFFIX.to_string()
}

impl Environment {
    /// Create an empty environment.
    pub fn new(srcdir: impl Into<PathBuf>, outdir: impl Into<PathBuf>) -> Self {
        Self {
            srcdir: srcdir.into(),
            outdir: outdir.into(),
            source_suffix: default_source_suffix(),
            found_docs: IndexSet::new(),
            dependencies: IndexMap::new(),
            config: Config::default(),
        }
    }

    /// Load an environment from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read '{}'", path.display()))?;
        Self::from_json_str(&content)
            .wrap_err_with(|| format!("invalid environment in '{}'", path.display()))
    }

    /// Load an environment from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Record a processed document.
    pub fn document(mut self, docname: impl Into<String>) -> Self {
        self.found_docs.insert(docname.into());
        self
    }

    /// Record an extra file a document depends on.
    pub fn dependency(mut self, docname: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.dependencies
            .entry(docname.into())
            .or_default()
            .insert(path.into());
        self
    }

    /// Use a different source suffix.
    pub fn source_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.source_suffix = suffix.into();
        self
    }

    /// Attach the host configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }
}

impl BuildEnvironment for Environment {
    fn srcdir(&self) -> &Path {
        &self.srcdir
    }

    fn outdir(&self) -> &Path {
        &self.outdir
    }

    fn found_docs(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.found_docs.iter().map(String::as_str))
    }

    fn doc2path(&self, docname: &str) -> PathBuf {
        self.srcdir.join(format!("{}{}", docname, self.source_suffix))
    }

    fn dependencies(&self, docname: &str) -> Box<dyn Iterator<Item = &Path> + '_> {
        match self.dependencies.get(docname) {
            Some(deps) => Box::new(deps.iter().map(PathBuf::as_path)),
            None => Box::new(iter::empty()),
        }
    }

    fn config(&self) -> &Config {
        &self.config
    }
}
