use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use anyhow::anyhow;
use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::store::entities::{Entry, EntryRecord};

/// Calendar month of a specific year. Ordering is chronological, which is what bucket ordering
/// relies on. The display form ("March 2024") is only produced when printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new_opt(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    fn month_name(&self) -> &'static str {
        u8::try_from(self.month)
            .ok()
            .and_then(|v| Month::try_from(v).ok())
            .map(|v| v.name())
            .unwrap_or("Unknown")
    }
}

impl Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

impl FromStr for MonthKey {
    type Err = anyhow::Error;

    /// Reads the display form back, e.g. "March 2024" or "march 2024".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (month, year) = s
            .trim()
            .rsplit_once(char::is_whitespace)
            .ok_or_else(|| anyhow!("Expected a month like \"March 2024\", got {s:?}"))?;
        let month = month.trim().parse::<Month>().map_err(|_| anyhow!("Unknown month {month:?}"))?;
        let year = year.parse::<i32>()?;
        Ok(Self {
            year,
            month: month.number_from_month(),
        })
    }
}

impl From<MonthKey> for String {
    fn from(value: MonthKey) -> Self {
        format!("{:04}-{:02}", value.year, value.month)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let (year, month) = value
            .split_once('-')
            .ok_or_else(|| anyhow!("Expected YYYY-MM, got {value:?}"))?;
        MonthKey::new_opt(year.parse()?, month.parse()?)
            .ok_or_else(|| anyhow!("Month out of range in {value:?}"))
    }
}

/// Entries of one calendar month, most recent first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthBucket {
    pub key: MonthKey,
    pub entries: Vec<Entry>,
}

impl MonthBucket {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Groups entries into month buckets. Buckets come out newest month first and entries inside a
/// bucket newest day first. Records with a missing or unreadable date are logged and left out,
/// they never affect the other buckets.
#[instrument(skip(records))]
pub fn group_by_month<'a>(records: impl IntoIterator<Item = &'a EntryRecord>) -> Vec<MonthBucket> {
    let mut map = BTreeMap::<MonthKey, Vec<Entry>>::new();

    for record in records {
        match record.parse() {
            Ok(entry) => map.entry(MonthKey::of(entry.date)).or_default().push(entry),
            Err(e) => warn!("Skipping entry while grouping: {e}"),
        }
    }

    map.into_iter()
        .rev()
        .map(|(key, mut entries)| {
            // sort_by is stable, equal dates keep their input order
            entries.sort_by(|a, b| b.date.cmp(&a.date));
            MonthBucket { key, entries }
        })
        .collect()
}
