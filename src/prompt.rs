use crate::app::Key;
use crate::theme::prompt::{BOX_STYLE, CURSOR_STYLE};
use crate::theme::HINT_STYLE;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, HorizontalAlignment, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};

/// Narrowest the popup's text area may be
const MIN_TEXT_WIDTH: u16 = 30;

/// Popup asking for a line of text
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Prompt<'a> {
    /// Lines shown above the input line
    help: &'a [String],
}

impl<'a> Prompt<'a> {
    pub(crate) fn new(help: &'a [String]) -> Prompt<'a> {
        Prompt { help }
    }
}

impl StatefulWidget for Prompt<'_> {
    type State = PromptState;

    /*
     * ..............................
     * .┌──── Months before ───────┐.
     * .│ <help line>              │.
     * .│                          │.
     * .│ Months before: 1█        │.
     * .└──────────────────────────┘.
     * ..............................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let text = state.to_text(self.help);
        let text_width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .max(MIN_TEXT_WIDTH);
        let text_height = u16::try_from(text.height()).unwrap_or(u16::MAX);
        let [outer_area] = Layout::horizontal([text_width.saturating_add(6)])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([text_height.saturating_add(4)])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BOX_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(format!(" {} ", state.label))
            .title_alignment(HorizontalAlignment::Center)
            .style(BOX_STYLE)
            .render(block_area, buf);
        text.render(block_area.inner(Margin::new(2, 1)), buf);
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct PromptState {
    label: &'static str,
    input: String,
}

impl PromptState {
    /// Starts a prompt whose input is pre-filled with `initial`
    pub(crate) fn new<S: Into<String>>(label: &'static str, initial: S) -> PromptState {
        PromptState {
            label,
            input: initial.into(),
        }
    }

    #[cfg(test)]
    pub(crate) fn input(&self) -> &str {
        &self.input
    }

    fn to_text(&self, help: &[String]) -> Text<'static> {
        let mut lines = help
            .iter()
            .map(|s| Line::styled(s.clone(), HINT_STYLE))
            .collect::<Vec<_>>();
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.push(Line::from_iter([
            Span::styled(format!("{}: {}", self.label, self.input), BOX_STYLE),
            Span::styled(" ", CURSOR_STYLE),
        ]));
        Text::from(lines)
    }

    pub(crate) fn handle_input(&mut self, input: PromptInput) -> PromptOutput {
        match input {
            PromptInput::Char(c) if !c.is_control() => {
                self.input.push(c);
                PromptOutput::Ok
            }
            PromptInput::Char(_) => PromptOutput::Invalid,
            PromptInput::Backspace => {
                if self.input.pop().is_some() {
                    PromptOutput::Ok
                } else {
                    PromptOutput::Invalid
                }
            }
            PromptInput::Enter => PromptOutput::Submit(self.input.trim().to_owned()),
            PromptInput::Cancel => PromptOutput::Cancel,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PromptInput {
    Char(char),
    Backspace,
    Enter,
    Cancel,
}

impl PromptInput {
    pub(crate) fn from_key(key: Key) -> Option<PromptInput> {
        match key {
            Key::Char(c) => Some(PromptInput::Char(c)),
            Key::Backspace => Some(PromptInput::Backspace),
            Key::Enter => Some(PromptInput::Enter),
            Key::Esc => Some(PromptInput::Cancel),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum PromptOutput {
    Ok,
    Invalid,
    Submit(String),
    Cancel,
}
