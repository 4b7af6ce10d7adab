use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::{
    store::entities::{Entry, EntryRecord},
    utils::time::days_between,
};

/// Days without an entry after which the user gets a reminder.
pub const STREAK_GAP_DAYS: i64 = 2;

/// The last entry before today and how long ago it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakGap {
    pub last_entry: Entry,
    pub days: i64,
}

impl StreakGap {
    pub fn needs_reminder(&self) -> bool {
        self.days >= STREAK_GAP_DAYS
    }
}

/// Most recent entry whose date isn't `today`. Entries are put in a canonical order first (date
/// descending, then id) so the answer never depends on the order the service used. Records with
/// unreadable dates are ignored.
pub fn latest_prior_entry<'a>(
    records: impl IntoIterator<Item = &'a EntryRecord>,
    today: NaiveDate,
) -> Option<StreakGap> {
    let mut entries = records
        .into_iter()
        .filter_map(|record| {
            record
                .parse()
                .inspect_err(|e| warn!("Ignoring entry for streak check: {e}"))
                .ok()
        })
        .collect::<Vec<_>>();
    entries.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));

    let last_entry = entries.into_iter().find(|v| v.date != today)?;
    let days = days_between(last_entry.date, today);
    debug!("Last entry before {today} was {} ({days} days)", last_entry.date);
    Some(StreakGap { last_entry, days })
}

/// True when at least [STREAK_GAP_DAYS] calendar days passed since the last entry before today.
pub fn find_streak_gap_warning<'a>(
    records: impl IntoIterator<Item = &'a EntryRecord>,
    today: NaiveDate,
) -> bool {
    latest_prior_entry(records, today).is_some_and(|v| v.needs_reminder())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::store::entities::EntryRecord;

    use super::{find_streak_gap_warning, latest_prior_entry};

    const TODAY: NaiveDate = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

    fn record(id: &str, date: &str) -> EntryRecord {
        EntryRecord::new(id, date, "")
    }

    #[test]
    fn test_three_day_gap_warns() {
        let records = vec![record("a", "2024-03-07")];
        assert!(find_streak_gap_warning(&records, TODAY));
    }

    #[test]
    fn test_one_day_gap_does_not_warn() {
        let records = vec![record("a", "2024-03-09")];
        assert!(!find_streak_gap_warning(&records, TODAY));
    }

    #[test]
    fn test_exactly_two_days_warns() {
        let records = vec![record("a", "2024-03-08")];
        assert!(find_streak_gap_warning(&records, TODAY));
    }

    #[test]
    fn test_todays_entry_is_skipped() {
        let records = vec![
            record("today", "2024-03-10"),
            record("old", "2024-03-01"),
        ];
        let gap = latest_prior_entry(&records, TODAY).unwrap();
        assert_eq!(&*gap.last_entry.id, "old");
        assert_eq!(gap.days, 9);
        assert!(find_streak_gap_warning(&records, TODAY));
    }

    #[test]
    fn test_arrival_order_does_not_matter() {
        let records = vec![
            record("a", "2024-02-01"),
            record("b", "2024-03-09"),
            record("c", "2024-01-15"),
        ];
        let mut reversed = records.clone();
        reversed.reverse();

        assert!(!find_streak_gap_warning(&records, TODAY));
        assert_eq!(
            latest_prior_entry(&records, TODAY),
            latest_prior_entry(&reversed, TODAY)
        );
    }

    #[test]
    fn test_duplicates_resolve_by_id() {
        let records = vec![record("z", "2024-03-05"), record("m", "2024-03-05")];
        let gap = latest_prior_entry(&records, TODAY).unwrap();
        assert_eq!(&*gap.last_entry.id, "m");
    }

    #[test]
    fn test_nothing_to_compare() {
        assert!(!find_streak_gap_warning(&Vec::<EntryRecord>::new(), TODAY));
        assert!(!find_streak_gap_warning(&vec![record("t", "2024-03-10")], TODAY));
    }

    #[test]
    fn test_future_entry_never_warns() {
        let records = vec![record("f", "2024-03-20")];
        let gap = latest_prior_entry(&records, TODAY).unwrap();
        assert_eq!(gap.days, -10);
        assert!(!find_streak_gap_warning(&records, TODAY));
    }

    #[test]
    fn test_unreadable_dates_are_ignored() {
        let records = vec![record("bad", "soon"), record("ok", "2024-03-09")];
        assert!(!find_streak_gap_warning(&records, TODAY));
    }
}
