use time::{Date, Duration, Month, Weekday};

pub(crate) const DAYS_IN_WEEK: usize = 7;

pub(crate) trait WeekdayExt {
    /// 0 = Sunday .. 6 = Saturday
    fn index0(&self) -> u8;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u8 {
        self.number_days_from_sunday()
    }
}

/// Which day of the week is drawn in the leftmost column
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum WeekStart {
    Sunday,
    Monday,
}

impl WeekStart {
    pub(crate) fn from_monday_flag(monday: bool) -> WeekStart {
        if monday {
            WeekStart::Monday
        } else {
            WeekStart::Sunday
        }
    }

    /// Column (0..7) at which `wd` is drawn under this convention
    pub(crate) fn column(self, wd: Weekday) -> usize {
        let raw = usize::from(wd.index0());
        match self {
            WeekStart::Sunday => raw,
            WeekStart::Monday => (raw + DAYS_IN_WEEK - 1) % DAYS_IN_WEEK,
        }
    }

    pub(crate) fn first_day(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sunday,
            WeekStart::Monday => Weekday::Monday,
        }
    }

    pub(crate) fn last_day(self) -> Weekday {
        self.first_day().previous()
    }

    pub(crate) fn header(self) -> [&'static str; DAYS_IN_WEEK] {
        match self {
            WeekStart::Sunday => ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
            WeekStart::Monday => ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"],
        }
    }
}

pub(crate) fn is_weekend(wd: Weekday) -> bool {
    matches!(wd, Weekday::Saturday | Weekday::Sunday)
}

pub(crate) fn days_in_month(year: i32, month: Month) -> u8 {
    match month {
        Month::February if time::util::is_leap_year(year) => 29,
        Month::February => 28,
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}

// The functions below return `None` only when the result would fall outside
// the range of dates that `time` can represent.

pub(crate) fn add_days(date: Date, n: i64) -> Option<Date> {
    // `Duration::days()` panics on overflow, so build from seconds instead
    let secs = n.checked_mul(86_400)?;
    date.checked_add(Duration::seconds(secs))
}

/// Moves `n` months, clamping the day to the last day of the target month
pub(crate) fn add_months(date: Date, n: i64) -> Option<Date> {
    let month0 = i64::from(date.year()) * 12 + i64::from(u8::from(date.month())) - 1;
    let target = month0.checked_add(n)?;
    let year = i32::try_from(target.div_euclid(12)).ok()?;
    let month = Month::try_from(u8::try_from(target.rem_euclid(12) + 1).ok()?).ok()?;
    let day = date.day().min(days_in_month(year, month));
    Date::from_calendar_date(year, month, day).ok()
}

pub(crate) fn add_years(date: Date, n: i64) -> Option<Date> {
    add_months(date, n.checked_mul(12)?)
}

pub(crate) fn first_of_month(date: Date) -> Date {
    date.replace_day(1).unwrap_or(date)
}

pub(crate) fn last_of_month(date: Date) -> Date {
    date.replace_day(days_in_month(date.year(), date.month()))
        .unwrap_or(date)
}
