//! Branch resolution for session logs.
//!
//! Editing or retrying a message never rewrites the log; Claude Code appends a
//! new record with the same `parentUuid` as the one it replaces. The log is
//! therefore a tree, and only one root-to-leaf walk is the conversation the
//! user ended up with.
//!
//! The walk is found backwards: the most recent terminal (a record nobody
//! names as parent) already sits at the end of the accepted branch, so its
//! ancestry is the answer and no per-fork choice is needed.

use std::collections::{HashMap, HashSet};

use crate::models::RawRecord;

/// Ids on the winning branch, or `None` when the log has no tree structure
///
/// `None` is returned when no record carries an id, or when every id is some
/// other record's parent. Callers then treat the log as flat.
pub fn find_winning_path(records: &[RawRecord]) -> Option<HashSet<String>> {
    let by_id: HashMap<&str, &RawRecord> =
        records.iter().filter_map(|r| r.uuid().map(|id| (id, r))).collect();

    if by_id.is_empty() {
        return None;
    }

    let parent_ids: HashSet<&str> = records.iter().filter_map(RawRecord::parent_uuid).collect();

    // max_by keeps the last of equal elements, so later records win ties
    let latest_terminal = records
        .iter()
        .filter(|r| r.uuid().is_some_and(|id| !parent_ids.contains(id)))
        .max_by(|a, b| timestamp_key(a).cmp(timestamp_key(b)))?;

    let mut winning = HashSet::new();
    let mut current = latest_terminal.uuid();

    while let Some(id) = current {
        if !winning.insert(id.to_string()) {
            break;
        }
        match by_id.get(id) {
            Some(record) => current = record.parent_uuid(),
            None => break,
        }
    }

    Some(winning)
}

/// Records that take part in reconstruction, in log order
///
/// Keeps records with a message that are not meta, and, when a winning path
/// exists, drops records whose id is off that path. Records without an id are
/// always kept.
pub fn filter_to_path<'a>(records: &'a [RawRecord], winning: Option<&HashSet<String>>) -> Vec<&'a RawRecord> {
    records
        .iter()
        .filter(|r| r.message.is_some() && !r.is_meta())
        .filter(|r| match (winning, r.uuid()) {
            (Some(path), Some(id)) => path.contains(id),
            _ => true,
        })
        .collect()
}

fn timestamp_key(record: &RawRecord) -> &str {
    record.timestamp.as_deref().unwrap_or("")
}
