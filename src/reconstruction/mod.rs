//! Reconstruction of a readable conversation from raw log records
//!
//! The pipeline runs in one direction only:
//!
//! 1. [`winning_path`] - Pick the branch of the record tree the user ended on
//! 2. [`turns`] - Group the surviving records into user and assistant turns
//! 3. Enrichment - Assistant turns gain tool annotations, Q&A blocks and file
//!    snapshots (see [`crate::enrichment`])
//!
//! Every stage is a pure function of its input, so each is tested on its own.

pub mod turns;
pub mod winning_path;

use std::path::Path;

pub use turns::{RecordGroup, build_turns, group_records};
pub use winning_path::{filter_to_path, find_winning_path};

use crate::enrichment::QuestionLedger;
use crate::models::{RawRecord, Turn};

/// Run the full pipeline over the records of one log
///
/// `home` is used to shorten paths in annotations.
pub fn reconstruct(records: &[RawRecord], home: Option<&Path>) -> Vec<Turn> {
    let winning = find_winning_path(records);
    let filtered = filter_to_path(records, winning.as_ref());
    let ledger = QuestionLedger::collect(filtered.iter().copied());
    let groups = group_records(&filtered);
    build_turns(&groups, &ledger, home)
}
