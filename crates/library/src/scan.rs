//! Work folder scanner.
//!
//! Walks every configured root directory depth-first, lazily yielding the
//! root-relative paths of directories whose name carries a work code. A
//! matched directory is never descended into, and recursion stops
//! unconditionally at the configured depth limit.

use crate::Library;
use crate::error::{ErrorKind, Result};
use async_stream::stream;
use exn::ResultExt;
use futures::Stream;
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;
use tokio::fs::{self, ReadDir};

/// Work code pattern: `RJ` followed by exactly six digits, anywhere in the
/// directory name. Matching is containment, not anchoring, so
/// `xRJ123456y` counts.
static WORK_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"RJ\d{6}").expect("valid pattern"));

/// Returns `true` if a directory name carries a work code.
pub fn is_work_folder(name: &str) -> bool {
    WORK_CODE.is_match(name)
}

/// One directory being walked: its open handle plus the bookkeeping needed
/// to emit relative paths and enforce the depth limit.
struct Frame {
    entries: ReadDir,
    relative: PathBuf,
    depth: usize,
}

impl Library {
    /// Lazily yields the root-relative path of every work folder under the
    /// configured roots, one root at a time, depth-first in directory-listing
    /// order (no additional sort).
    ///
    /// A matched folder is yielded without being entered, so no yielded path
    /// is an ancestor of another. Folders sitting at the depth limit are
    /// neither entered nor searched, even when deeper work folders exist
    /// below them. Nothing is deduplicated: the same code under two roots
    /// yields two entries. Non-directory entries are ignored; symlinks are
    /// whatever [`tokio::fs::metadata`] reports them to be.
    ///
    /// # Errors
    ///
    /// Any read error — a missing root included — terminates the stream with
    /// a single `Err`. Items already yielded stay valid, but the scan does
    /// not resume.
    pub fn work_folders(&self) -> impl Stream<Item = Result<PathBuf>> + '_ {
        stream! {
            for await folder in self.work_folders_inner() {
                yield folder.or_raise(|| ErrorKind::Scan);
            }
        }
    }

    fn work_folders_inner(&self) -> impl Stream<Item = Result<PathBuf>> + '_ {
        // Parentheses so rustfmt still formats the macro body.
        stream!({
            for root in &self.roots {
                tracing::debug!(root = %root.display(), "scanning root for work folders");
                let entries = match fs::read_dir(root).await {
                    Ok(entries) => entries,
                    Err(e) => {
                        yield Err(exn::Exn::from(ErrorKind::from_io(e, root)));
                        return;
                    },
                };
                let mut stack = vec![Frame { entries, relative: PathBuf::new(), depth: 0 }];
                while let Some(frame) = stack.last_mut() {
                    let next = frame.entries.next_entry().await;
                    let relative = frame.relative.clone();
                    let depth = frame.depth;
                    let entry = match next {
                        Ok(Some(entry)) => entry,
                        Ok(None) => {
                            stack.pop();
                            continue;
                        },
                        Err(e) => {
                            yield Err(exn::Exn::from(ErrorKind::from_io(e, &root.join(relative))));
                            return;
                        },
                    };
                    let path = entry.path();
                    let metadata = match fs::metadata(&path).await {
                        Ok(metadata) => metadata,
                        Err(e) => {
                            yield Err(exn::Exn::from(ErrorKind::from_io(e, &path)));
                            return;
                        },
                    };
                    if !metadata.is_dir() {
                        continue;
                    }
                    let name = entry.file_name();
                    if is_work_folder(&name.to_string_lossy()) {
                        // Found a work folder; don't go any deeper.
                        yield Ok(relative.join(name));
                    } else if depth + 1 < self.max_depth {
                        let entries = match fs::read_dir(&path).await {
                            Ok(entries) => entries,
                            Err(e) => {
                                yield Err(exn::Exn::from(ErrorKind::from_io(e, &path)));
                                return;
                            },
                        };
                        stack.push(Frame { entries, relative: relative.join(name), depth: depth + 1 });
                    }
                }
            }
        })
    }
}
