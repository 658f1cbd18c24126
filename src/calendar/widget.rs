use super::layout::TokenLine;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Paragraph, Widget},
};

/// Paints lines of role-tagged text top-down from the upper-left corner of
/// the area, truncating whatever does not fit
#[derive(Clone, Copy, Debug)]
pub(crate) struct TokenText<'a> {
    lines: &'a [TokenLine],
    theme: Theme,
}

impl<'a> TokenText<'a> {
    pub(crate) fn new(lines: &'a [TokenLine], theme: Theme) -> TokenText<'a> {
        TokenText { lines, theme }
    }

    fn to_text(self) -> Text<'a> {
        Text::from_iter(self.lines.iter().map(|line| {
            Line::from_iter(
                line.tokens()
                    .iter()
                    .map(|t| Span::styled(t.text.as_str(), self.theme.style(t.role))),
            )
        }))
    }
}

impl Widget for TokenText<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.to_text()).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::layout::{CalendarView, Role};
    use crate::calendar::WeekStart;
    use crate::config::ColorAssignments;
    use time::macros::date;

    #[test]
    fn test_render_month() {
        let view = CalendarView {
            anchor: date!(2025 - 01 - 01),
            selected: date!(2025 - 01 - 22),
            today: date!(2025 - 01 - 22),
            months_before: 0,
            months_after: 0,
            week_start: WeekStart::Sunday,
            highlight_weekends: false,
        };
        let lines = view.lines(24);
        let theme = Theme::new(ColorAssignments::default());
        let area = Rect::new(0, 0, 24, 10);
        let mut buffer = Buffer::empty(area);
        TokenText::new(&lines, theme).render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "January 2025            ",
            "Su Mo Tu We Th Fr Sa    ",
            "          1  2  3  4    ",
            " 5  6  7  8  9 10 11    ",
            "12 13 14 15 16 17 18    ",
            "19 20 21 22 23 24 25    ",
            "26 27 28 29 30 31       ",
            "                        ",
            "                        ",
            "                        ",
        ]);
        expected.set_style(Rect::new(0, 0, 7, 1), theme.style(Role::CurrentMonth));
        expected.set_style(Rect::new(8, 0, 4, 1), theme.style(Role::Year));
        expected.set_style(Rect::new(0, 1, 2, 1), theme.style(Role::WeekendHeader));
        for x in [3, 6, 9, 12, 15] {
            expected.set_style(Rect::new(x, 1, 2, 1), theme.style(Role::WeekdayHeader));
        }
        expected.set_style(Rect::new(18, 1, 2, 1), theme.style(Role::WeekendHeader));
        for y in 2..7 {
            for x in [0, 3, 6, 9, 12, 15, 18] {
                let cell = buffer[(x, y)].symbol().to_owned();
                if cell.trim().is_empty() && buffer[(x + 1, y)].symbol().trim().is_empty() {
                    continue;
                }
                expected.set_style(Rect::new(x, y, 2, 1), theme.style(Role::Day));
            }
        }
        expected.set_style(Rect::new(9, 5, 2, 1), theme.style(Role::Selected));
        assert_eq!(buffer, expected);
    }
}
