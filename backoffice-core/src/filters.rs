//! Client-side list filtering and summary counts
//!
//! The admin views fetch a whole collection and narrow it locally:
//! a case-insensitive substring search over the kind's search fields,
//! plus a read/unread filter for messages.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;


use crate::kind::Kind;
use crate::models::contact_message::{STATUS_READ, STATUS_UNREAD};
use crate::models::salon_profile::CLOSED;
use crate::models::{Role, ValidationError};
use crate::record::Record;

/// Message status filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Read,
    Unread,
}

impl StatusFilter {
    fn accepts(&self, status: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Read => status == Some(STATUS_READ),
            Self::Unread => status == Some(STATUS_UNREAD),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "read" => Ok(Self::Read),
            "unread" => Ok(Self::Unread),
            other => Err(ValidationError::InvalidVariant {
                field: "status filter",
                value: other.to_string(),
            }),
        }
    }
}

/// Search plus status filter for one list view
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub search: Option<String>,
    pub status: StatusFilter,
}

impl ListFilter {
    pub fn new(search: Option<String>, status: StatusFilter) -> Self {
        Self {
            search: search.filter(|s| !s.is_empty()).map(|s| s.to_lowercase()),
            status,
        }
    }

    /// Whether a record of `kind` stays in the list.
    ///
    /// The status filter only applies to messages.
    pub fn matches(&self, kind: Kind, record: &Record) -> bool {
        if let Some(needle) = &self.search {
            let hit = kind.search_fields().iter().any(|field| {
                record
                    .get_str(field)
                    .is_some_and(|value| value.to_lowercase().contains(needle))
            });
            if !hit {
                return false;
            }
        }

        if kind == Kind::ContactMessage {
            return self.status.accepts(record.get_str("status"));
        }
        true
    }

    /// Keep matching records in their original order.
    pub fn apply(&self, kind: Kind, records: Vec<Record>) -> Vec<Record> {
        records
            .into_iter()
            .filter(|record| self.matches(kind, record))
            .collect()
    }
}

/// Headline counts shown above a list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub counts: Vec<(&'static str, usize)>,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "total: {}", self.total)?;
        for (label, count) in &self.counts {
            write!(f, "  {}: {}", label, count)?;
        }
        Ok(())
    }
}

/// Summarize an unfiltered list of `kind`.
pub fn summarize(kind: Kind, records: &[Record]) -> Summary {
    let count = |pred: &dyn Fn(&Record) -> bool| records.iter().filter(|r| pred(r)).count();

    let counts = match kind {
        Kind::ContactMessage => vec![
            ("unread", count(&|r| r.get_str("status") == Some(STATUS_UNREAD))),
            ("read", count(&|r| r.get_str("status") == Some(STATUS_READ))),
        ],
        Kind::User => vec![
            (
                "salon owners",
                count(&|r| r.get_str("role").and_then(Role::parse) == Some(Role::SalonOwner)),
            ),
            (
                "customers",
                count(&|r| r.get_str("role").and_then(Role::parse) == Some(Role::Customer)),
            ),
        ],
        Kind::SalonOwner => {
            let salons: BTreeSet<&str> = records.iter().filter_map(|r| r.get_str("salonName")).collect();
            vec![("salons", salons.len())]
        }
        Kind::SalonProfile => vec![(
            "open sunday",
            count(&|r| {
                r.get("workingHours")
                    .and_then(|hours| hours.get("sunday"))
                    .and_then(|day| day.get("open"))
                    .and_then(|open| open.as_str())
                    .is_some_and(|open| open != CLOSED)
            }),
        )],
    };

    Summary {
        total: records.len(),
        counts,
    }
}
