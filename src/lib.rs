//! Moodle Tools: developer and administrator utilities for Moodle sites.
//!
//! Two tools share this crate. `moodledata-compare` reconciles the files
//! stored in a moodledata directory with the file records exported from the
//! database. `brstatus` lists the branches of a Moodle checkout together with
//! the tracker status of the issue each branch refers to.

pub mod branch;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod reconcile;
