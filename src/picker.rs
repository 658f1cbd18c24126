use crate::app::Key;
use crate::calendar::{WeekStart, add_days, add_months, add_years, first_of_month, last_of_month};
use thiserror::Error;
use time::Date;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Backward,
    Forward,
}

impl Direction {
    fn sign(self) -> i64 {
        match self {
            Direction::Backward => -1,
            Direction::Forward => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum NavCommand {
    MoveDay(Direction),
    MoveWeek(Direction),
    MoveMonth(Direction),
    MoveYear(Direction),
    StartOfWeek,
    EndOfWeek,
    StartOfMonth,
    EndOfMonth,
    Today,
    Digit(u8),
    ExecuteJump,
    EnterConfig,
    Confirm,
    Quit,
    ForceRedraw,
}

impl NavCommand {
    pub(crate) fn from_key(key: Key) -> Option<NavCommand> {
        use Direction::*;
        let cmd = match key {
            Key::Char('h') | Key::Left => NavCommand::MoveDay(Backward),
            Key::Char('l') | Key::Right => NavCommand::MoveDay(Forward),
            Key::Char('k' | 'K' | 'b' | 'B') | Key::Up => NavCommand::MoveWeek(Backward),
            Key::Char('j' | 'J' | 'w' | 'W') | Key::Down => NavCommand::MoveWeek(Forward),
            Key::Char('p') => NavCommand::MoveMonth(Backward),
            Key::Char('n') => NavCommand::MoveMonth(Forward),
            Key::Char('P') => NavCommand::MoveYear(Backward),
            Key::Char('N') => NavCommand::MoveYear(Forward),
            Key::Char('H' | '^') => NavCommand::StartOfWeek,
            Key::Char('L' | '$') => NavCommand::EndOfWeek,
            Key::Home => NavCommand::StartOfMonth,
            Key::End => NavCommand::EndOfMonth,
            Key::Char('t' | 'T') => NavCommand::Today,
            Key::Char(c @ '0'..='9') => {
                let d = c.to_digit(10).and_then(|d| u8::try_from(d).ok())?;
                NavCommand::Digit(d)
            }
            Key::Char('g') => NavCommand::ExecuteJump,
            Key::Char('c' | 'C') => NavCommand::EnterConfig,
            Key::Enter => NavCommand::Confirm,
            Key::Char('q' | 'Q') | Key::Interrupt => NavCommand::Quit,
            Key::Char('r' | 'R') => NavCommand::ForceRedraw,
            _ => return None,
        };
        Some(cmd)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum NavOutcome {
    Continue,
    Redraw,
    EnterConfig,
    Confirm(Date),
    Quit,
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;

/// Date-selection state while browsing the calendar
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Picker {
    today: Date,
    selected: Date,
    anchor: Date,
    prefix: String,
}

impl Picker {
    pub(crate) fn new(today: Date) -> Picker {
        Picker {
            today,
            selected: today,
            anchor: first_of_month(today),
            prefix: String::new(),
        }
    }

    pub(crate) fn start_date(mut self, date: Date) -> Picker {
        self.select(date);
        self
    }

    pub(crate) fn today(&self) -> Date {
        self.today
    }

    pub(crate) fn selected(&self) -> Date {
        self.selected
    }

    /// First day of the month at the center of the display
    pub(crate) fn anchor(&self) -> Date {
        self.anchor
    }

    pub(crate) fn prefix(&self) -> Option<&str> {
        (!self.prefix.is_empty()).then_some(self.prefix.as_str())
    }

    pub(crate) fn clear_prefix(&mut self) {
        self.prefix.clear();
    }

    fn select(&mut self, date: Date) {
        self.selected = date;
        self.anchor = first_of_month(date);
    }

    fn select_opt(&mut self, date: Option<Date>) -> Result<NavOutcome, OutOfTimeError> {
        let date = date.ok_or(OutOfTimeError)?;
        self.select(date);
        Ok(NavOutcome::Continue)
    }

    /// Applies a decoded key.  `None` stands for a key with no meaning while
    /// browsing; like every key other than a digit or the jump trigger, it
    /// discards any pending numeric prefix.
    pub(crate) fn interpret(
        &mut self,
        cmd: Option<NavCommand>,
        week_start: WeekStart,
    ) -> Result<NavOutcome, OutOfTimeError> {
        if !matches!(cmd, Some(NavCommand::Digit(_) | NavCommand::ExecuteJump)) {
            self.clear_prefix();
        }
        match cmd {
            Some(cmd) => self.handle(cmd, week_start),
            None => Ok(NavOutcome::Continue),
        }
    }

    pub(crate) fn handle(
        &mut self,
        cmd: NavCommand,
        week_start: WeekStart,
    ) -> Result<NavOutcome, OutOfTimeError> {
        let sel = self.selected;
        match cmd {
            NavCommand::MoveDay(dir) => self.select_opt(add_days(sel, dir.sign())),
            NavCommand::MoveWeek(dir) => self.select_opt(add_days(sel, 7 * dir.sign())),
            NavCommand::MoveMonth(dir) => self.select_opt(add_months(sel, dir.sign())),
            NavCommand::MoveYear(dir) => self.select_opt(add_years(sel, dir.sign())),
            NavCommand::StartOfWeek => {
                let back = week_start.column(sel.weekday());
                self.select_opt(add_days(sel, -i64::try_from(back).unwrap_or(0)))
            }
            NavCommand::EndOfWeek => {
                let ahead = 6 - week_start.column(sel.weekday());
                self.select_opt(add_days(sel, i64::try_from(ahead).unwrap_or(0)))
            }
            NavCommand::StartOfMonth => self.select_opt(Some(first_of_month(sel))),
            NavCommand::EndOfMonth => self.select_opt(Some(last_of_month(sel))),
            NavCommand::Today => {
                // The anchor is set from today directly rather than derived
                // from the selection.
                self.selected = self.today;
                self.anchor = first_of_month(self.today);
                Ok(NavOutcome::Continue)
            }
            NavCommand::Digit(d) => {
                self.prefix.push(char::from(b'0' + d % 10));
                Ok(NavOutcome::Continue)
            }
            NavCommand::ExecuteJump => {
                if self.prefix.is_empty() {
                    return Ok(NavOutcome::Continue);
                }
                let days = std::mem::take(&mut self.prefix).parse::<i64>().ok();
                tracing::debug!(?days, "numeric jump");
                self.select_opt(days.and_then(|n| add_days(sel, n)))
            }
            NavCommand::EnterConfig => Ok(NavOutcome::EnterConfig),
            NavCommand::Confirm => Ok(NavOutcome::Confirm(sel)),
            NavCommand::Quit => Ok(NavOutcome::Quit),
            NavCommand::ForceRedraw => Ok(NavOutcome::Redraw),
        }
    }
}
