use crate::calendar::{CalendarView, TokenText, config_lines};
use crate::config::{ConfigStore, DisplayConfig};
use crate::formats::display_date;
use crate::help::{HintMode, hint_line, status_line};
use crate::picker::{NavCommand, NavOutcome, Picker};
use crate::prompt::{Prompt, PromptInput};
use crate::settings::{ConfigMenu, MenuCommand, MenuOutcome};
use crate::theme::{BASE_STYLE, Theme};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, read};
use ratatui::{
    Terminal,
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::{StatefulWidget, Widget},
};
use std::io::{self, Write};

/// A key press, decoded from the terminal's raw events
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Key {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    /// Ctrl-C
    Interrupt,
}

impl Key {
    fn from_event(event: KeyEvent) -> Option<Key> {
        let KeyEvent {
            code, modifiers, ..
        } = event;
        if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
            return Some(Key::Interrupt);
        }
        if !(KeyModifiers::NONE | KeyModifiers::SHIFT).contains(modifiers) {
            return None;
        }
        let key = match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Esc,
            KeyCode::Backspace | KeyCode::Delete => Key::Backspace,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            _ => return None,
        };
        Some(key)
    }
}

/// How the program finished
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Outcome {
    /// The chosen date, already formatted
    Selected(String),
    Quit,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum AppState {
    Browsing,
    Configuring(ConfigMenu),
    Done(Outcome),
}

#[derive(Debug)]
pub(crate) struct App<S> {
    picker: Picker,
    config: DisplayConfig,
    store: S,
    state: AppState,
    /// One-shot message shown in place of the selection on the status line
    message: Option<String>,
    repaint: bool,
}

impl<S: ConfigStore> App<S> {
    pub(crate) fn new(picker: Picker, store: S) -> App<S> {
        let config = store.load();
        App {
            picker,
            config,
            store,
            state: AppState::Browsing,
            message: None,
            repaint: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> io::Result<Outcome>
    where
        io::Error: From<B::Error>,
    {
        loop {
            if let AppState::Done(outcome) = self.state {
                return Ok(outcome);
            }
            if std::mem::take(&mut self.repaint) {
                terminal.clear()?;
            }
            self.draw(terminal)?;
            self.handle_input()?;
        }
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if let Some(key) = read()?.as_key_press_event().and_then(Key::from_event) {
            if !self.handle_key(key) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the key could not be acted on
    fn handle_key(&mut self, key: Key) -> bool {
        self.message = None;
        match &mut self.state {
            AppState::Browsing => {
                let cmd = NavCommand::from_key(key);
                match self.picker.interpret(cmd, self.config.week_start()) {
                    Ok(NavOutcome::Continue) => (),
                    Ok(NavOutcome::Redraw) => self.repaint = true,
                    Ok(NavOutcome::EnterConfig) => {
                        tracing::debug!("entering configuration");
                        self.state = AppState::Configuring(ConfigMenu::new(self.picker.today()));
                    }
                    Ok(NavOutcome::Confirm(date)) => {
                        let s = display_date(date, &self.config.date_format);
                        tracing::info!(date = %date, formatted = %s, "date selected");
                        self.state = AppState::Done(Outcome::Selected(s));
                    }
                    Ok(NavOutcome::Quit) => self.state = AppState::Done(Outcome::Quit),
                    Err(e) => {
                        tracing::debug!(error = %e, ?cmd, "navigation refused");
                        return false;
                    }
                }
                true
            }
            AppState::Configuring(menu) => {
                if key == Key::Interrupt {
                    tracing::info!("interrupted; discarding unsaved settings");
                    self.state = AppState::Done(Outcome::Quit);
                    return true;
                }
                if menu.is_editing() {
                    return PromptInput::from_key(key)
                        .is_some_and(|input| menu.handle_prompt(input, &mut self.config));
                }
                let Some(cmd) = MenuCommand::from_key(key) else {
                    return true;
                };
                match menu.handle(cmd, &mut self.config) {
                    MenuOutcome::Stay => (),
                    MenuOutcome::Exit => self.state = AppState::Browsing,
                    MenuOutcome::SaveAndExit => {
                        self.save();
                        self.state = AppState::Browsing;
                    }
                }
                true
            }
            AppState::Done(_) => false,
        }
    }

    fn save(&mut self) {
        if let Err(e) = self.store.save(&self.config) {
            tracing::error!(error = %e, "failed to save configuration");
            self.message = Some(format!("Could not save configuration: {e}"));
        }
    }

    fn beep(&self) -> io::Result<()> {
        let mut stderr = io::stderr();
        stderr.write_all(b"\x07")?;
        stderr.flush()
    }

    fn calendar_view(&self) -> CalendarView {
        CalendarView {
            anchor: self.picker.anchor(),
            selected: self.picker.selected(),
            today: self.picker.today(),
            months_before: self.config.months_before,
            months_after: self.config.months_after,
            week_start: self.config.week_start(),
            highlight_weekends: self.config.highlight_weekends,
        }
    }
}

impl<S: ConfigStore> Widget for &mut App<S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let theme = Theme::new(self.config.colors);
        let [main_area, hint_area, _, status_area] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);
        let hints = match &mut self.state {
            AppState::Configuring(menu) => {
                let lines = config_lines(&menu.items(&self.config), menu.cursor());
                TokenText::new(&lines, theme).render(main_area, buf);
                if let Some((state, help)) = menu.prompt_mut() {
                    Prompt::new(help).render(main_area, buf, state);
                    HintMode::Prompt
                } else {
                    HintMode::Menu
                }
            }
            AppState::Browsing | AppState::Done(_) => {
                let lines = self.calendar_view().lines(main_area.width);
                TokenText::new(&lines, theme).render(main_area, buf);
                HintMode::Browsing {
                    prefix: self.picker.prefix(),
                }
            }
        };
        TokenText::new(&[hint_line(hints)], theme).render(hint_area, buf);
        let selected = display_date(self.picker.selected(), &self.config.date_format);
        TokenText::new(&[status_line(&selected, self.message.as_deref())], theme)
            .render(status_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::testing::MemoryStore;
    use crate::config::{ConfigError, FileStore};
    use time::macros::date;

    fn new_app() -> App<MemoryStore> {
        let picker = Picker::new(date!(2024 - 03 - 20)).start_date(date!(2024 - 03 - 15));
        App::new(picker, MemoryStore::default())
    }

    fn press<S: ConfigStore>(app: &mut App<S>, keys: &str) {
        for c in keys.chars() {
            app.handle_key(Key::Char(c));
        }
    }

    fn screen<S: ConfigStore>(app: &mut App<S>, width: u16, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol().to_owned())
                    .collect::<String>()
                    .trim_end()
                    .to_owned()
            })
            .collect()
    }

    #[test]
    fn test_confirm_emits_formatted_date() {
        let mut app = new_app();
        app.config.date_format = String::from("%d/%m/%Y");
        press(&mut app, "l");
        assert!(app.handle_key(Key::Enter));
        assert_eq!(
            app.state,
            AppState::Done(Outcome::Selected(String::from("16/03/2024")))
        );
    }

    #[test]
    fn test_quit_emits_nothing() {
        let mut app = new_app();
        press(&mut app, "jjQ");
        assert_eq!(app.state, AppState::Done(Outcome::Quit));
        let mut app = new_app();
        app.handle_key(Key::Interrupt);
        assert_eq!(app.state, AppState::Done(Outcome::Quit));
    }

    #[test]
    fn test_numeric_jump_through_app() {
        let mut app = new_app();
        press(&mut app, "10g");
        assert_eq!(app.picker.selected(), date!(2024 - 03 - 25));
        assert_eq!(app.picker.prefix(), None);
    }

    #[test]
    fn test_save_and_exit_persists() {
        let mut app = new_app();
        press(&mut app, "c");
        assert!(matches!(app.state, AppState::Configuring(_)));
        app.handle_key(Key::Up);
        app.handle_key(Key::Enter);
        assert_eq!(app.state, AppState::Browsing);
        assert_eq!(*app.store.saved.borrow(), [DisplayConfig::default()]);
    }

    #[test]
    fn test_exit_config_without_saving() {
        let mut app = new_app();
        press(&mut app, "c");
        app.handle_key(Key::Down);
        app.handle_key(Key::Down);
        app.handle_key(Key::Down);
        app.handle_key(Key::Enter);
        app.handle_key(Key::Esc);
        assert_eq!(app.state, AppState::Browsing);
        assert!(!app.config.week_starts_monday);
        assert!(app.store.saved.borrow().is_empty());
    }

    #[test]
    fn test_edit_months_after_in_prompt() {
        let mut app = new_app();
        press(&mut app, "cj");
        app.handle_key(Key::Down);
        app.handle_key(Key::Enter);
        // The prompt swallows menu keys such as `q`
        app.handle_key(Key::Backspace);
        press(&mut app, "q");
        app.handle_key(Key::Backspace);
        press(&mut app, "3");
        app.handle_key(Key::Enter);
        assert!(matches!(app.state, AppState::Configuring(_)));
        assert_eq!(app.config.months_after, 3);
        press(&mut app, "q");
        assert_eq!(app.state, AppState::Browsing);
    }

    #[test]
    fn test_interrupt_in_config_discards() {
        let mut app = new_app();
        press(&mut app, "c");
        app.handle_key(Key::Enter);
        app.handle_key(Key::Interrupt);
        assert_eq!(app.state, AppState::Done(Outcome::Quit));
        assert!(app.store.saved.borrow().is_empty());
    }

    #[test]
    fn test_redraw_request() {
        let mut app = new_app();
        press(&mut app, "r");
        assert!(app.repaint);
        assert_eq!(app.state, AppState::Browsing);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut app = new_app();
        let before = app.picker.clone();
        assert!(app.handle_key(Key::Char('z')));
        assert!(app.handle_key(Key::Backspace));
        assert_eq!(app.picker, before);
        assert_eq!(app.state, AppState::Browsing);
    }

    #[test]
    fn test_failed_save_shows_message() {
        struct BrokenStore;

        impl ConfigStore for BrokenStore {
            fn load(&self) -> DisplayConfig {
                DisplayConfig::default()
            }

            fn save(&self, _config: &DisplayConfig) -> Result<(), ConfigError> {
                Err(ConfigError::NoHome)
            }
        }

        let mut app = App::new(Picker::new(date!(2024 - 03 - 20)), BrokenStore);
        press(&mut app, "c");
        app.handle_key(Key::Up);
        app.handle_key(Key::Enter);
        assert_eq!(app.state, AppState::Browsing);
        let rows = screen(&mut app, 80, 24);
        assert_eq!(
            rows[23],
            "Could not save configuration: cannot determine home directory"
        );
        // The message goes away on the next key
        app.handle_key(Key::Right);
        let rows = screen(&mut app, 80, 24);
        assert_eq!(rows[23], "Selected: 2024-03-21");
    }

    #[test]
    fn test_render_calendar() {
        let mut app = new_app();
        let rows = screen(&mut app, 80, 24);
        assert_eq!(
            rows[..9],
            [
                "February 2024         March 2024            April 2024",
                "Mo Tu We Th Fr Sa Su  Mo Tu We Th Fr Sa Su  Mo Tu We Th Fr Sa Su",
                "          1  2  3  4               1  2  3   1  2  3  4  5  6  7",
                " 5  6  7  8  9 10 11   4  5  6  7  8  9 10   8  9 10 11 12 13 14",
                "12 13 14 15 16 17 18  11 12 13 14 15 16 17  15 16 17 18 19 20 21",
                "19 20 21 22 23 24 25  18 19 20 21 22 23 24  22 23 24 25 26 27 28",
                "26 27 28 29           25 26 27 28 29 30 31  29 30",
                "",
                "",
            ]
        );
        assert!(rows[21].starts_with("←↓↑→/hjkl | n/p:month"));
        assert_eq!(rows[22], "");
        assert_eq!(rows[23], "Selected: 2024-03-15");
    }

    #[test]
    fn test_render_prefix_hint() {
        let mut app = new_app();
        press(&mut app, "12");
        let rows = screen(&mut app, 80, 24);
        assert!(rows[21].starts_with("12g:jump 12 days | "));
    }

    #[test]
    fn test_render_config_screen() {
        let mut app = new_app();
        press(&mut app, "cj");
        let rows = screen(&mut app, 80, 24);
        assert_eq!(
            rows[..13],
            [
                "",
                "Configuration",
                "",
                "  Date format: %Y-%m-%d",
                "",
                "  Months before: 1",
                "",
                "  Months after: 1",
                "",
                "  Week starts Monday: Yes",
                "",
                "  Save and exit config: Press Enter",
                "",
            ]
        );
        assert_eq!(rows[21], "Navigate: ↑↓ | Edit: Enter | Cancel: Esc");
    }

    #[test]
    fn test_render_format_prompt() {
        let mut app = new_app();
        press(&mut app, "c");
        app.handle_key(Key::Enter);
        let rows = screen(&mut app, 80, 24);
        assert!(rows.iter().any(|r| r.contains("4: March 20, 2024")));
        assert!(rows.iter().any(|r| r.contains("Date format: %Y-%m-%d")));
        assert!(rows[21].starts_with("Type to edit"));
    }

    #[test]
    fn test_loads_from_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("datepick.json");
        std::fs::write(&path, r#"{"week_starts_monday": false, "months_before": 0}"#).unwrap();
        let mut app = App::new(
            Picker::new(date!(2024 - 03 - 20)),
            FileStore::new(path),
        );
        let rows = screen(&mut app, 80, 24);
        assert_eq!(
            rows[0],
            "March 2024            April 2024"
        );
        assert!(rows[1].starts_with("Su Mo Tu"));
    }
}
