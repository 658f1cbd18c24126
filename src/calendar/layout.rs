//! Conversion of calendar and settings state into lines of role-tagged text.
//! Colors and screen positions are left to the painter.

use super::util::{DAYS_IN_WEEK, WeekStart, is_weekend};
use super::weeks::{MONTH_WIDTH, MonthGrid, layout_rows, month_range, months_per_row};
use time::Date;

/// Most weeks any month can span
const MAX_WEEKS: usize = 6;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Role {
    /// Padding and other uncolored text
    Normal,
    Year,
    Month,
    /// Name of the month containing the real-world current date
    CurrentMonth,
    WeekdayHeader,
    WeekendHeader,
    Day,
    Weekend,
    Today,
    Selected,
    Title,
    /// The settings item under the cursor
    Highlight,
    Hint,
    Status,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Token {
    pub(crate) text: String,
    pub(crate) role: Role,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct TokenLine(Vec<Token>);

impl TokenLine {
    pub(crate) fn new() -> TokenLine {
        TokenLine::default()
    }

    pub(crate) fn styled<S: Into<String>>(text: S, role: Role) -> TokenLine {
        let mut line = TokenLine::new();
        line.push(text, role);
        line
    }

    /// Appends text, merging it into the last token if the roles match
    pub(crate) fn push<S: Into<String>>(&mut self, text: S, role: Role) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        match self.0.last_mut() {
            Some(last) if last.role == role => last.text.push_str(&text),
            _ => self.0.push(Token { text, role }),
        }
    }

    pub(crate) fn tokens(&self) -> &[Token] {
        &self.0
    }

    #[cfg(test)]
    pub(crate) fn text(&self) -> String {
        self.0.iter().map(|t| t.text.as_str()).collect()
    }

    fn is_blank(&self) -> bool {
        self.0.iter().all(|t| t.text.trim().is_empty())
    }
}

/// Everything needed to lay out the multi-month calendar
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct CalendarView {
    pub(crate) anchor: Date,
    pub(crate) selected: Date,
    pub(crate) today: Date,
    pub(crate) months_before: i64,
    pub(crate) months_after: i64,
    pub(crate) week_start: WeekStart,
    pub(crate) highlight_weekends: bool,
}

impl CalendarView {
    /// Lays out every visible month in rows that fit within `width` columns.
    /// Each row of months is followed by a blank line.
    pub(crate) fn lines(&self, width: u16) -> Vec<TokenLine> {
        let months = month_range(self.anchor, self.months_before, self.months_after);
        let mut lines = Vec::new();
        for group in layout_rows(&months, months_per_row(width)) {
            lines.extend(self.month_row_lines(&group));
            lines.push(TokenLine::new());
        }
        lines
    }

    pub(crate) fn month_row_lines(&self, months: &[Date]) -> Vec<TokenLine> {
        let grids = months
            .iter()
            .map(|&m| MonthGrid::new(m, self.week_start))
            .collect::<Vec<_>>();
        let mut lines = vec![self.title_line(&grids), self.header_line(grids.len())];
        for i in 0..MAX_WEEKS {
            let mut line = TokenLine::new();
            for grid in &grids {
                match grid.week(i) {
                    Some(week) => {
                        for slot in week.slots() {
                            match slot {
                                Some(date) => {
                                    line.push(format!("{:2}", date.day()), self.day_role(*date));
                                    line.push(" ", Role::Normal);
                                }
                                None => line.push("   ", Role::Normal),
                            }
                        }
                    }
                    None => line.push("   ".repeat(DAYS_IN_WEEK), Role::Normal),
                }
                line.push(" ", Role::Normal);
            }
            if !line.is_blank() {
                lines.push(line);
            }
        }
        lines
    }

    fn title_line(&self, grids: &[MonthGrid]) -> TokenLine {
        let mut line = TokenLine::new();
        for grid in grids {
            let first = grid.first();
            let is_current =
                first.year() == self.today.year() && first.month() == self.today.month();
            let month = first.month().to_string();
            let year = first.year().to_string();
            let used = month.len() + 1 + year.len();
            line.push(
                month,
                if is_current {
                    Role::CurrentMonth
                } else {
                    Role::Month
                },
            );
            line.push(" ", Role::Normal);
            line.push(year, Role::Year);
            line.push(
                " ".repeat(usize::from(MONTH_WIDTH).saturating_sub(used)),
                Role::Normal,
            );
        }
        line
    }

    fn header_line(&self, qty: usize) -> TokenLine {
        let mut line = TokenLine::new();
        for _ in 0..qty {
            for (col, name) in self.week_start.header().into_iter().enumerate() {
                let weekend = match self.week_start {
                    WeekStart::Monday => col >= 5,
                    WeekStart::Sunday => col == 0 || col == 6,
                };
                line.push(
                    name,
                    if weekend {
                        Role::WeekendHeader
                    } else {
                        Role::WeekdayHeader
                    },
                );
                line.push(" ", Role::Normal);
            }
            line.push(" ", Role::Normal);
        }
        line
    }

    fn day_role(&self, date: Date) -> Role {
        if date == self.selected {
            Role::Selected
        } else if date == self.today {
            Role::Today
        } else if self.highlight_weekends && is_weekend(date.weekday()) {
            Role::Weekend
        } else {
            Role::Day
        }
    }
}

/// Lays out the settings screen: a title followed by one `label: value` line
/// per item, with the item at `cursor` highlighted
pub(crate) fn config_lines(items: &[(&str, String)], cursor: usize) -> Vec<TokenLine> {
    let mut lines = vec![
        TokenLine::new(),
        TokenLine::styled("Configuration", Role::Title),
        TokenLine::new(),
    ];
    for (i, (label, value)) in items.iter().enumerate() {
        let role = if i == cursor {
            Role::Highlight
        } else {
            Role::Normal
        };
        lines.push(TokenLine::styled(format!("  {label}: {value}"), role));
        lines.push(TokenLine::new());
    }
    lines
}
