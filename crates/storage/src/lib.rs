//! Cover image storage for audio works.
//!
//! One image file per work under a configured directory, named by the work's
//! code. Independent of the scanning crate; no shared state.

pub mod error;
mod images;

pub use crate::images::CoverStore;
