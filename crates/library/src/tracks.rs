//! Track listing.
//!
//! Flattens every playable file under a work directory, across all configured
//! roots, into one naturally-sorted list with positional identifiers.

use crate::Library;
use crate::error::{ErrorKind, Result};
use crate::sort::natural_cmp;
use exn::ResultExt;
use serde::Serialize;
use std::cmp::Ordering;
use std::ffi::OsStr;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tokio::fs;

/// A playable track within a work.
///
/// Ephemeral: recomputed from disk on every listing, never persisted. The
/// `hash` is positional, so it is dense and unique within one listing but not
/// stable across listings once files are added, removed or renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    /// File name of the track, extension included.
    pub title: String,
    /// Containing folder relative to the work directory; `None` for a file
    /// sitting directly in it.
    pub subtitle: Option<String>,
    /// Positional identifier, `"{workId}/{index}"` with a 0-based index.
    pub hash: String,
}

/// Extensions considered playable. The comparison is byte-exact, so `.MP3`
/// does not count.
const PLAYABLE_EXTENSIONS: [&str; 5] = ["mp3", "ogg", "opus", "wav", "flac"];

fn is_playable(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| PLAYABLE_EXTENSIONS.iter().any(|playable| ext == OsStr::new(playable)))
}

/// `(subtitle, title)` ordering: absent subtitles (files at the work root)
/// first, then natural order on subtitle, then natural order on title.
fn cmp_entries(a: &(Option<String>, String), b: &(Option<String>, String)) -> Ordering {
    let by_subtitle = match (&a.0, &b.0) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => natural_cmp(x, y),
    };
    by_subtitle.then_with(|| natural_cmp(&a.1, &b.1))
}

impl Library {
    /// Lists the playable tracks of a work.
    ///
    /// Every configured root is searched for `work_dir` and all playable
    /// files below it are flattened into a single list; a root without the
    /// directory simply contributes no files. The list is sorted by
    /// `(subtitle, title)` in natural order and each track receives its
    /// positional hash. The result reflects the disk state at call time and
    /// is never cached.
    ///
    /// # Errors
    ///
    /// Any enumeration error other than a missing work directory fails the
    /// whole call; no partial list is ever returned.
    pub async fn tracks(&self, work_id: impl Display, work_dir: &Path) -> Result<Vec<Track>> {
        let mut files = Vec::new();
        for root in &self.roots {
            collect_playable(&root.join(work_dir), &mut files)
                .await
                .or_raise(|| ErrorKind::TrackList)?;
        }
        tracing::debug!(work_dir = %work_dir.display(), count = files.len(), "track list assembled");

        files.sort_by(cmp_entries);
        Ok(files
            .into_iter()
            .enumerate()
            .map(|(index, (subtitle, title))| Track {
                hash: format!("{work_id}/{index}"),
                title,
                subtitle,
            })
            .collect())
    }
}

/// Walks `base` recursively, pushing a `(subtitle, title)` pair for every
/// playable file. A missing `base` contributes nothing; any other failure
/// propagates.
async fn collect_playable(base: &Path, out: &mut Vec<(Option<String>, String)>) -> Result<()> {
    let mut stack = vec![(base.to_path_buf(), PathBuf::new())];
    while let Some((current, relative)) = stack.pop() {
        let mut entries = match fs::read_dir(&current).await {
            Ok(entries) => entries,
            // This root doesn't hold the work.
            Err(e)
                if relative.as_os_str().is_empty() && e.kind() == std::io::ErrorKind::NotFound =>
            {
                return Ok(());
            },
            Err(e) => return Err(exn::Exn::from(ErrorKind::from_io(e, &current))),
        };
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ErrorKind::from_io(e, &current))?
        {
            let path = entry.path();
            let metadata = fs::metadata(&path).await.map_err(|e| ErrorKind::from_io(e, &path))?;
            if metadata.is_dir() {
                stack.push((path, relative.join(entry.file_name())));
            } else if metadata.is_file() && is_playable(&path) {
                let title = entry.file_name().to_string_lossy().into_owned();
                let subtitle = (!relative.as_os_str().is_empty())
                    .then(|| relative.to_string_lossy().into_owned());
                out.push((subtitle, title));
            }
        }
    }
    Ok(())
}
