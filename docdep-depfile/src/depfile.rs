//! Depfile rendering and output.

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use docdep_core::{BuildEnvironment, GeneratedFile};
use eyre::Result;
use tracing::debug;

use crate::{DEPFILE_CONFIG, input_files};

/// A Makefile dependency file for one build.
///
/// The build's output directory is the single target and every input file
/// is a prerequisite. Each input also gets an empty rule of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Depfile {
    path: PathBuf,
    target: PathBuf,
    inputs: Vec<PathBuf>,
}

/// What [`write_depfile`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// No depfile is configured; nothing was touched.
    Disabled,
    /// The depfile was written.
    Written {
        path: PathBuf,
        /// Number of prerequisites, duplicates included.
        inputs: usize,
    },
}

impl Depfile {
    pub fn new(
        path: impl Into<PathBuf>,
        target: impl Into<PathBuf>,
        inputs: Vec<PathBuf>,
    ) -> Self {
        Self {
            path: path.into(),
            target: target.into(),
            inputs,
        }
    }

    /// Collect the inputs of a finished build.
    pub fn from_env<E>(env: &E, path: impl Into<PathBuf>) -> Self
    where
        E: BuildEnvironment + ?Sized,
    {
        Self::new(path, env.outdir(), input_files(env).collect())
    }

    /// Like [`from_env`](Self::from_env), at the path from the `depfile`
    /// config value. `None` when that value is unset or empty.
    pub fn from_config<E>(env: &E) -> Option<Self>
    where
        E: BuildEnvironment + ?Sized,
    {
        let path = env.config().path(DEPFILE_CONFIG)?;
        Some(Self::from_env(env, path))
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn inputs(&self) -> &[PathBuf] {
        &self.inputs
    }

    /// Write the rendered depfile to any writer, e.g. stdout.
    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        out.write_all(self.render().as_bytes())?;
        out.flush()
    }
}

impl GeneratedFile for Depfile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn render(&self) -> String {
        let mut out = String::new();

        // Line continuation is kept even when there are no inputs.
        out.push_str(&self.target.display().to_string());
        out.push_str(": \\\n");

        let prerequisites: Vec<String> = self
            .inputs
            .iter()
            .map(|input| input.display().to_string())
            .collect();
        out.push_str(&prerequisites.join(" "));
        out.push('\n');

        for input in &prerequisites {
            out.push_str(input);
            out.push_str(":\n");
        }

        out
    }
}

/// Write the depfile for a finished build if one is configured.
///
/// # Errors
///
/// I/O errors from creating or writing the file are returned unchanged; a
/// partially written file is left behind.
pub fn write_depfile<E>(env: &E) -> Result<WriteOutcome>
where
    E: BuildEnvironment + ?Sized,
{
    let Some(depfile) = Depfile::from_config(env) else {
        debug!("'{}' is not set, skipping depfile", DEPFILE_CONFIG);
        return Ok(WriteOutcome::Disabled);
    };

    depfile.write()?;
    debug!(
        "wrote depfile {} with {} inputs",
        depfile.path.display(),
        depfile.inputs.len()
    );

    Ok(WriteOutcome::Written {
        path: depfile.path,
        inputs: depfile.inputs.len(),
    })
}
