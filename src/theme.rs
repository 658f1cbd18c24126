use crate::calendar::Role;
use crate::config::ColorAssignments;
use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new();

const WEEKDAY_HEADER_STYLE: Style = Style::new()
    .fg(Color::Indexed(244))
    .add_modifier(Modifier::BOLD);

const WEEKEND_HEADER_STYLE: Style = Style::new()
    .fg(Color::Indexed(88))
    .add_modifier(Modifier::BOLD);

const SELECTED_BG: Color = Color::Indexed(236);

pub(crate) const HINT_STYLE: Style = Style::new().fg(Color::Indexed(245));

const HIGHLIGHT_STYLE: Style = Style::new().fg(Color::Indexed(0)).bg(Color::Indexed(15));

pub(crate) mod prompt {
    use super::*;

    pub(crate) const BOX_STYLE: Style = Style::new().fg(Color::Indexed(15)).bg(Color::Indexed(0));

    pub(crate) const CURSOR_STYLE: Style = BOX_STYLE.add_modifier(Modifier::REVERSED);
}

/// Maps layout roles to terminal styles using the configured palette
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Theme(ColorAssignments);

impl Theme {
    pub(crate) fn new(colors: ColorAssignments) -> Theme {
        Theme(colors)
    }

    pub(crate) fn style(&self, role: Role) -> Style {
        let colors = self.0;
        match role {
            Role::Normal => BASE_STYLE,
            Role::Year => Style::new().fg(Color::Indexed(colors.year)),
            Role::Month => Style::new().fg(Color::Indexed(colors.month)),
            Role::CurrentMonth => Style::new()
                .fg(Color::Indexed(colors.month))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            Role::WeekdayHeader => WEEKDAY_HEADER_STYLE,
            Role::WeekendHeader => WEEKEND_HEADER_STYLE,
            Role::Day => Style::new().fg(Color::Indexed(colors.day)),
            Role::Weekend => Style::new().fg(Color::Indexed(colors.weekend)),
            Role::Today => Style::new()
                .fg(Color::Indexed(colors.today))
                .add_modifier(Modifier::BOLD),
            Role::Selected => Style::new()
                .fg(Color::Indexed(colors.selected))
                .bg(SELECTED_BG)
                .add_modifier(Modifier::BOLD),
            Role::Title => Style::new()
                .fg(Color::Indexed(colors.year))
                .add_modifier(Modifier::BOLD),
            Role::Highlight => HIGHLIGHT_STYLE,
            Role::Hint => HINT_STYLE,
            Role::Status => Style::new().fg(Color::Indexed(colors.selected)),
        }
    }
}
