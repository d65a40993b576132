//! Roster entries as read from the external source on each view load.
//!
//! Visibility is encoded in the data itself: a redacted display name and a
//! `None` monetary amount both mean "the caller may not see this". A true
//! zero is always `Some(Money(0))`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel the source uses in place of a withheld display name.
pub const REDACTED_NAME: &str = "***";

/// Booking status of a roster entry.
///
/// Unrecognized values (including the empty string) are preserved verbatim
/// so they can be echoed back, but carry no priority.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Ready,
    Confirmed,
    Pending,
    Backup,
    Afk,
    Offline,
    Cancelled,
    Unknown(String),
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ready => "ready",
            Self::Confirmed => "confirmed",
            Self::Pending => "pending",
            Self::Backup => "backup",
            Self::Afk => "afk",
            Self::Offline => "offline",
            Self::Cancelled => "cancelled",
            Self::Unknown(raw) => raw,
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl From<String> for Status {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "ready" => Self::Ready,
            "confirmed" => Self::Confirmed,
            "pending" => Self::Pending,
            "backup" => Self::Backup,
            "afk" => Self::Afk,
            "offline" => Self::Offline,
            "cancelled" => Self::Cancelled,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<&str> for Status {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_owned())
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.as_str().to_owned()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display name, or the marker that it was withheld.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DisplayName {
    Visible(String),
    Redacted,
}

impl DisplayName {
    pub fn is_redacted(&self) -> bool {
        matches!(self, Self::Redacted)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Visible(name) => name,
            Self::Redacted => REDACTED_NAME,
        }
    }
}

impl From<String> for DisplayName {
    fn from(raw: String) -> Self {
        if raw == REDACTED_NAME {
            Self::Redacted
        } else {
            Self::Visible(raw)
        }
    }
}

impl From<&str> for DisplayName {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_owned())
    }
}

impl From<DisplayName> for String {
    fn from(name: DisplayName) -> Self {
        name.as_str().to_owned()
    }
}

/// Currency amount in minor units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub i64);

impl Money {
    pub fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

/// Marker left on an entry whose paid flag was flipped locally before the
/// remote result was known. Cleared by the next roster refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReconciliation {
    pub previous_paid: bool,
    pub requested_paid: bool,
    pub requested_at: DateTime<Utc>,
}

/// One row of the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: String,
    pub name: DisplayName,
    #[serde(default)]
    pub status: Status,
    /// Agreed price. `None` means withheld, not zero.
    #[serde(default)]
    pub price: Option<Money>,
    /// Amount collected so far. `None` means withheld, not zero.
    #[serde(default)]
    pub collected: Option<Money>,
    /// The user who introduced the entry.
    pub owner_id: String,
    /// Business advertiser attributed to the entry, used for notification routing.
    #[serde(default)]
    pub advertiser_id: Option<String>,
    #[serde(default)]
    pub collector_id: Option<String>,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub field_blocked: bool,
    #[serde(skip)]
    pub pending: Option<PendingReconciliation>,
}

impl RosterEntry {
    pub fn new(id: impl Into<String>, name: impl Into<DisplayName>, owner_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: Status::default(),
            price: None,
            collected: None,
            owner_id: owner_id.into(),
            advertiser_id: None,
            collector_id: None,
            paid: false,
            field_blocked: false,
            pending: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<Status>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_advertiser(mut self, advertiser: impl Into<String>) -> Self {
        self.advertiser_id = Some(advertiser.into());
        self
    }

    pub fn with_amounts(mut self, price: Option<i64>, collected: Option<i64>) -> Self {
        self.price = price.map(Money);
        self.collected = collected.map(Money);
        self
    }

    pub fn with_paid(mut self, paid: bool) -> Self {
        self.paid = paid;
        self
    }

    /// The attributed advertiser, if any. Empty strings count as none.
    pub fn advertiser(&self) -> Option<&str> {
        self.advertiser_id.as_deref().filter(|a| !a.is_empty())
    }

    pub fn is_redacted(&self) -> bool {
        self.name.is_redacted()
    }

    /// Flip the paid flag locally and mark the entry as awaiting
    /// reconciliation. Returns the new value.
    ///
    /// A second flip before reconciliation keeps the original
    /// `previous_paid` so the marker still describes the server-side value.
    pub fn apply_optimistic_paid(&mut self) -> bool {
        let requested = !self.paid;
        let previous_paid = self
            .pending
            .as_ref()
            .map_or(self.paid, |p| p.previous_paid);
        self.paid = requested;
        self.pending = Some(PendingReconciliation {
            previous_paid,
            requested_paid: requested,
            requested_at: Utc::now(),
        });
        requested
    }

    pub fn is_pending_reconciliation(&self) -> bool {
        self.pending.is_some()
    }
}

/// Monetary totals over a roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RosterTotals {
    pub price: Money,
    pub collected: Money,
    /// Amounts that were withheld and therefore not summed.
    pub withheld: usize,
}

/// Sum the monetary fields, or `None` when the viewer may not see them.
///
/// Withheld amounts are counted separately, never folded in as zero.
pub fn roster_totals(entries: &[RosterEntry], financials_visible: bool) -> Option<RosterTotals> {
    if !financials_visible {
        return None;
    }
    let mut totals = RosterTotals::default();
    for entry in entries {
        match entry.price {
            Some(value) => totals.price = totals.price.saturating_add(value),
            None => totals.withheld += 1,
        }
        match entry.collected {
            Some(value) => totals.collected = totals.collected.saturating_add(value),
            None => totals.withheld += 1,
        }
    }
    Some(totals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        assert_eq!(Status::from("Ready"), Status::Ready);
        assert_eq!(Status::from(" cancelled "), Status::Cancelled);
        assert_eq!(Status::from("waitlist"), Status::Unknown("waitlist".into()));
        assert_eq!(Status::from(""), Status::default());
        assert_eq!(Status::Unknown("waitlist".into()).to_string(), "waitlist");
    }

    #[test]
    fn test_entry_deserializes_sentinels() {
        let json = r#"{
            "id": "e1",
            "name": "***",
            "status": "pending",
            "price": null,
            "collected": 0,
            "owner_id": "u1"
        }"#;
        let entry: RosterEntry = serde_json::from_str(json).unwrap();
        assert!(entry.is_redacted());
        assert_eq!(entry.status, Status::Pending);
        assert_eq!(entry.price, None);
        assert_eq!(entry.collected, Some(Money(0)));
        assert!(!entry.paid);
        assert!(entry.pending.is_none());
    }

    #[test]
    fn test_entry_serializes_back_to_source_shape() {
        let entry = RosterEntry::new("e1", "***", "u1").with_status("waitlist");
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["name"], "***");
        assert_eq!(value["status"], "waitlist");
        assert!(value.get("pending").is_none());
    }

    #[test]
    fn test_empty_advertiser_counts_as_none() {
        let entry = RosterEntry::new("e1", "Ann", "u1").with_advertiser("");
        assert_eq!(entry.advertiser(), None);
        let entry = entry.with_advertiser("adv-3");
        assert_eq!(entry.advertiser(), Some("adv-3"));
    }

    #[test]
    fn test_optimistic_paid_marks_pending() {
        let mut entry = RosterEntry::new("e1", "Ann", "u1");
        assert!(entry.apply_optimistic_paid());
        assert!(entry.paid);
        let pending = entry.pending.clone().unwrap();
        assert!(!pending.previous_paid);
        assert!(pending.requested_paid);

        // Flipping again keeps the server-side value in the marker.
        assert!(!entry.apply_optimistic_paid());
        let pending = entry.pending.clone().unwrap();
        assert!(!pending.previous_paid);
        assert!(!pending.requested_paid);
    }

    #[test]
    fn test_totals_hidden_without_financials() {
        let entries = vec![RosterEntry::new("e1", "Ann", "u1").with_amounts(Some(500), Some(0))];
        assert_eq!(roster_totals(&entries, false), None);
    }

    #[test]
    fn test_totals_skip_withheld_amounts() {
        let entries = vec![
            RosterEntry::new("e1", "Ann", "u1").with_amounts(Some(1500), Some(0)),
            RosterEntry::new("e2", "***", "u2").with_amounts(None, None),
            RosterEntry::new("e3", "Bo", "u3").with_amounts(Some(250), Some(250)),
        ];
        let totals = roster_totals(&entries, true).unwrap();
        assert_eq!(totals.price, Money(1750));
        assert_eq!(totals.collected, Money(250));
        assert_eq!(totals.withheld, 2);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money(1750).to_string(), "17.50");
        assert_eq!(Money(5).to_string(), "0.05");
        assert_eq!(Money(-120).to_string(), "-1.20");
    }
}
