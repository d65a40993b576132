//! Display ordering for roster entries.
//!
//! The order is a stable sort on a fixed status rank. Input order reflects
//! arrival / slot order, and slot numbers are assigned after sorting, so
//! stability is part of the contract.

use super::roster::{RosterEntry, Status};

/// Fixed status-to-rank table. Lower ranks sort first.
pub struct StatusPriority;

impl StatusPriority {
    /// Rank for a status, or `None` for unrecognized statuses.
    pub fn rank(status: &Status) -> Option<u8> {
        match status {
            Status::Ready => Some(0),
            Status::Confirmed => Some(1),
            Status::Pending => Some(2),
            Status::Backup => Some(3),
            Status::Afk => Some(4),
            Status::Offline => Some(5),
            Status::Cancelled => Some(6),
            Status::Unknown(_) => None,
        }
    }

    /// Sort key placing unranked statuses after every ranked one.
    fn key(status: &Status) -> (bool, u8) {
        match Self::rank(status) {
            Some(rank) => (false, rank),
            None => (true, 0),
        }
    }
}

pub struct RosterSorter;

impl RosterSorter {
    /// Stable sort by status rank.
    pub fn sort(mut entries: Vec<RosterEntry>) -> Vec<RosterEntry> {
        entries.sort_by_key(|entry| StatusPriority::key(&entry.status));
        entries
    }

    /// Sort and assign 1-based slot numbers.
    pub fn numbered(entries: Vec<RosterEntry>) -> Vec<(usize, RosterEntry)> {
        Self::sort(entries)
            .into_iter()
            .enumerate()
            .map(|(i, entry)| (i + 1, entry))
            .collect()
    }
}
