use super::util::{DAYS_IN_WEEK, WeekStart, add_months, first_of_month, last_of_month};
use std::iter::successors;
use std::num::NonZeroUsize;
use time::Date;

/// Width in columns of one month block, including the gap after it
pub(crate) const MONTH_WIDTH: u16 = 22;

/// Columns reserved at the screen edges when deciding how many months fit
/// side by side
const SCREEN_MARGIN: u16 = 4;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Week([Option<Date>; DAYS_IN_WEEK]);

impl Week {
    fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    pub(crate) fn slots(&self) -> &[Option<Date>; DAYS_IN_WEEK] {
        &self.0
    }
}

/// A single month partitioned into display weeks
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthGrid {
    first: Date,
    weeks: Vec<Week>,
}

impl MonthGrid {
    pub(crate) fn new(anchor: Date, week_start: WeekStart) -> MonthGrid {
        MonthGrid {
            first: first_of_month(anchor),
            weeks: month_weeks(anchor, week_start),
        }
    }

    pub(crate) fn first(&self) -> Date {
        self.first
    }

    pub(crate) fn week(&self, i: usize) -> Option<&Week> {
        self.weeks.get(i)
    }
}

/// Lays out the month containing `anchor` as a sequence of weeks.  The first
/// week is padded at the front and the last at the back so that every week
/// has exactly seven slots, with columns ordered per `week_start`.
pub(crate) fn month_weeks(anchor: Date, week_start: WeekStart) -> Vec<Week> {
    let first = first_of_month(anchor);
    let last = last_of_month(anchor);
    let mut weeks = Vec::with_capacity(6);
    let mut current = Week::default();
    let mut pos = week_start.column(first.weekday());
    for date in successors(Some(first), |&d| (d < last).then(|| d.next_day()).flatten()) {
        current.0[pos] = Some(date);
        pos += 1;
        if date.weekday() == week_start.last_day() {
            weeks.push(std::mem::take(&mut current));
            pos = 0;
        }
    }
    if !current.is_empty() {
        weeks.push(current);
    }
    weeks
}

/// Returns the first-of-month dates from `months_before` months before
/// `anchor` through `months_after` months after it, in order.  Negative
/// counts shift the corresponding end of the range across the anchor; if the
/// start ends up after the end, the range is empty.
pub(crate) fn month_range(anchor: Date, months_before: i64, months_after: i64) -> Vec<Date> {
    let anchor = first_of_month(anchor);
    // An end that runs off the calendar away from the anchor stops at the
    // first or last representable month; one that runs off past the anchor
    // leaves nothing to show.
    let start = match months_before.checked_neg().and_then(|n| add_months(anchor, n)) {
        Some(d) => d,
        None if months_before > 0 => first_of_month(Date::MIN),
        None => return Vec::new(),
    };
    let end = match add_months(anchor, months_after) {
        Some(d) => d,
        None if months_after > 0 => first_of_month(Date::MAX),
        None => return Vec::new(),
    };
    successors(Some(start), |&m| add_months(m, 1))
        .take_while(|&m| m <= end)
        .collect()
}

/// Number of month blocks that fit side by side in `width` columns, never
/// less than one
pub(crate) fn months_per_row(width: u16) -> NonZeroUsize {
    let fit = usize::from(width.saturating_sub(SCREEN_MARGIN) / MONTH_WIDTH);
    NonZeroUsize::new(fit).unwrap_or(NonZeroUsize::MIN)
}

pub(crate) fn layout_rows(months: &[Date], per_row: NonZeroUsize) -> Vec<Vec<Date>> {
    months.chunks(per_row.get()).map(<[Date]>::to_vec).collect()
}
