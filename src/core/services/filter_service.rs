//! Predicate selection over ledger records.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use tracing::debug;

use crate::ledger::{Record, TransactionType, UnknownTransactionType};

/// Type criterion; `All` matches every record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Only(TransactionType),
}

impl TypeFilter {
    pub fn matches(&self, kind: TransactionType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(expected) => *expected == kind,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = UnknownTransactionType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(TypeFilter::All);
        }
        value.parse().map(TypeFilter::Only)
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => f.write_str("All"),
            TypeFilter::Only(kind) => write!(f, "{kind}"),
        }
    }
}

/// Criteria combined with AND. Absent criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub text: Option<String>,
    pub kind: TypeFilter,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_kind(mut self, kind: TypeFilter) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_start(mut self, start: NaiveDate) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_end(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.needle().is_none()
            && self.kind == TypeFilter::All
            && self.start.is_none()
            && self.end.is_none()
    }

    fn needle(&self) -> Option<String> {
        self.text
            .as_deref()
            .filter(|text| !text.is_empty())
            .map(str::to_lowercase)
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.matches_text(record) && self.kind.matches(record.kind) && self.matches_dates(record)
    }

    fn matches_text(&self, record: &Record) -> bool {
        let Some(needle) = self.needle() else {
            return true;
        };
        [&record.from, &record.to, &record.description]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    // Undated records fail closed against any active bound.
    fn matches_dates(&self, record: &Record) -> bool {
        if self.start.is_none() && self.end.is_none() {
            return true;
        }
        let Some(date) = record.date else {
            return false;
        };
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

pub struct FilterService;

impl FilterService {
    /// Returns the matching records in their original order.
    pub fn filter<'a, I>(records: I, criteria: &FilterCriteria) -> Vec<&'a Record>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let selected: Vec<&Record> = records
            .into_iter()
            .filter(|record| criteria.matches(record))
            .collect();
        debug!(selected = selected.len(), ?criteria, "filtered records");
        selected
    }
}
