//! Enumeration of the files a build consulted.

use std::{iter, path::PathBuf};

use docdep_core::BuildEnvironment;

/// Every file the build read, in build order.
///
/// For each processed document this yields its source file followed by its
/// dependencies resolved against the source directory. Nothing is sorted or
/// deduplicated; a file shared by two documents appears twice. Call again to
/// iterate again.
pub fn input_files<E>(env: &E) -> impl Iterator<Item = PathBuf> + '_
where
    E: BuildEnvironment + ?Sized,
{
    env.found_docs().flat_map(move |docname| {
        let deps = env
            .dependencies(docname)
            .map(move |dep| env.srcdir().join(dep));
        iter::once(env.doc2path(docname)).chain(deps)
    })
}
