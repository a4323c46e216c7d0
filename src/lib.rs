//! Groupie: virtual file groups
//!
//! Named groups of files tracked in a single JSON document, with each file a
//! member of at most one group. Members that disappear from disk are flagged
//! on listing and can be cleaned out.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod store;
