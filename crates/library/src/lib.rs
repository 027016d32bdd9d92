//! Filesystem scanning for an audio-work library.
//!
//! Two independent facilities over a static directory layout: a lazy work
//! folder scanner and a per-work track lister. Nothing here caches results or
//! watches the filesystem; every call reflects the disk state at call time.

pub mod error;
pub mod scan;
mod sort;
pub mod tracks;

pub use crate::scan::is_work_folder;
pub use crate::tracks::Track;

use std::path::PathBuf;

/// Configured scan roots and traversal limits.
///
/// An explicit value constructed by the caller — the configuration *loader*
/// is an external collaborator, and nothing in this crate reads
/// process-global configuration.
#[derive(Debug, Clone)]
pub struct Library {
    /// Ordered list of root directories. Order is scan order; beyond
    /// determinism it carries no meaning.
    roots: Vec<PathBuf>,
    /// The scanner never recurses to a depth at or beyond this value.
    max_depth: usize,
}

impl Library {
    /// Create a library over the given roots.
    ///
    /// `max_depth` bounds the scanner's recursion: a subdirectory at depth
    /// `d` is entered only while `d + 1 < max_depth`, so a value of `1`
    /// examines the roots' immediate children and nothing deeper.
    pub fn new(roots: Vec<PathBuf>, max_depth: usize) -> Self {
        Self { roots, max_depth }
    }
}
