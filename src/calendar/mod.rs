mod layout;
mod util;
mod weeks;
mod widget;
pub(crate) use self::layout::{CalendarView, Role, TokenLine, config_lines};
pub(crate) use self::util::{
    WeekStart, add_days, add_months, add_years, first_of_month, last_of_month,
};
pub(crate) use self::widget::TokenText;
