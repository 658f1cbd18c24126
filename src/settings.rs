use crate::app::Key;
use crate::config::DisplayConfig;
use crate::formats::{CATALOG, catalog_pattern, display_date};
use crate::prompt::{PromptInput, PromptOutput, PromptState};
use time::Date;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ConfigField {
    DateFormat,
    MonthsBefore,
    MonthsAfter,
    WeekStartsMonday,
    SaveAndExit,
}

impl ConfigField {
    pub(crate) const ALL: [ConfigField; 5] = [
        ConfigField::DateFormat,
        ConfigField::MonthsBefore,
        ConfigField::MonthsAfter,
        ConfigField::WeekStartsMonday,
        ConfigField::SaveAndExit,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            ConfigField::DateFormat => "Date format",
            ConfigField::MonthsBefore => "Months before",
            ConfigField::MonthsAfter => "Months after",
            ConfigField::WeekStartsMonday => "Week starts Monday",
            ConfigField::SaveAndExit => "Save and exit config",
        }
    }

    pub(crate) fn value(self, config: &DisplayConfig) -> String {
        match self {
            ConfigField::DateFormat => config.date_format.clone(),
            ConfigField::MonthsBefore => config.months_before.to_string(),
            ConfigField::MonthsAfter => config.months_after.to_string(),
            ConfigField::WeekStartsMonday => {
                String::from(if config.week_starts_monday { "Yes" } else { "No" })
            }
            ConfigField::SaveAndExit => String::from("Press Enter"),
        }
    }

    /// Applies the text submitted from this field's prompt.  Returns whether
    /// the configuration changed.
    pub(crate) fn apply(self, text: &str, config: &mut DisplayConfig) -> bool {
        match self {
            ConfigField::DateFormat => {
                if let Some(pattern) = catalog_pattern(text) {
                    config.date_format = String::from(pattern);
                } else if !text.is_empty() {
                    config.date_format = String::from(text);
                } else {
                    return false;
                }
                true
            }
            ConfigField::MonthsBefore => {
                // Zero and negative counts are accepted here, unlike for
                // "Months after".
                if text.is_empty() || text == config.months_before.to_string() {
                    return false;
                }
                match text.parse::<i64>() {
                    Ok(n) => {
                        config.months_before = n;
                        true
                    }
                    Err(_) => false,
                }
            }
            ConfigField::MonthsAfter => match text.parse::<i64>() {
                Ok(n) if n > 0 => {
                    config.months_after = n;
                    true
                }
                _ => false,
            },
            ConfigField::WeekStartsMonday | ConfigField::SaveAndExit => false,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum MenuCommand {
    Up,
    Down,
    Activate,
    Exit,
}

impl MenuCommand {
    pub(crate) fn from_key(key: Key) -> Option<MenuCommand> {
        match key {
            Key::Up | Key::Char('k' | 'K') => Some(MenuCommand::Up),
            Key::Down | Key::Char('j' | 'J') => Some(MenuCommand::Down),
            Key::Enter => Some(MenuCommand::Activate),
            Key::Esc | Key::Char('q' | 'Q') => Some(MenuCommand::Exit),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum MenuOutcome {
    Stay,
    /// Leave the menu without persisting anything
    Exit,
    /// Persist the configuration, then leave the menu
    SaveAndExit,
}

/// Cursor over the editable settings plus the prompt, if any, currently
/// editing one of them
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ConfigMenu {
    cursor: usize,
    editing: Option<(ConfigField, PromptState)>,
    /// Example renderings of the quick formats, shown while editing the date
    /// format
    format_help: Vec<String>,
}

impl ConfigMenu {
    pub(crate) fn new(today: Date) -> ConfigMenu {
        ConfigMenu {
            cursor: 0,
            editing: None,
            format_help: CATALOG
                .iter()
                .map(|&(key, pattern)| format!("{key}: {}", display_date(today, pattern)))
                .collect(),
        }
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn field(&self) -> ConfigField {
        ConfigField::ALL[self.cursor % ConfigField::ALL.len()]
    }

    pub(crate) fn items(&self, config: &DisplayConfig) -> Vec<(&'static str, String)> {
        ConfigField::ALL
            .iter()
            .map(|f| (f.label(), f.value(config)))
            .collect()
    }

    pub(crate) fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// The open prompt's state and the help lines to show with it
    pub(crate) fn prompt_mut(&mut self) -> Option<(&mut PromptState, &[String])> {
        let (field, state) = self.editing.as_mut()?;
        let help = if *field == ConfigField::DateFormat {
            self.format_help.as_slice()
        } else {
            &[]
        };
        Some((state, help))
    }

    pub(crate) fn handle(&mut self, cmd: MenuCommand, config: &mut DisplayConfig) -> MenuOutcome {
        let qty = ConfigField::ALL.len();
        match cmd {
            MenuCommand::Up => {
                self.cursor = (self.cursor + qty - 1) % qty;
                MenuOutcome::Stay
            }
            MenuCommand::Down => {
                self.cursor = (self.cursor + 1) % qty;
                MenuOutcome::Stay
            }
            MenuCommand::Exit => MenuOutcome::Exit,
            MenuCommand::Activate => self.activate(config),
        }
    }

    fn activate(&mut self, config: &mut DisplayConfig) -> MenuOutcome {
        let field = self.field();
        match field {
            ConfigField::DateFormat | ConfigField::MonthsBefore | ConfigField::MonthsAfter => {
                let state = PromptState::new(field.label(), field.value(config));
                self.editing = Some((field, state));
                MenuOutcome::Stay
            }
            ConfigField::WeekStartsMonday => {
                config.week_starts_monday = !config.week_starts_monday;
                tracing::debug!(week_starts_monday = config.week_starts_monday, "toggled week start");
                MenuOutcome::Stay
            }
            ConfigField::SaveAndExit => MenuOutcome::SaveAndExit,
        }
    }

    /// Feeds a key to the open prompt.  Returns `false` if the input was
    /// rejected or no prompt is open.
    pub(crate) fn handle_prompt(&mut self, input: PromptInput, config: &mut DisplayConfig) -> bool {
        let Some((field, state)) = self.editing.as_mut() else {
            return false;
        };
        match state.handle_input(input) {
            PromptOutput::Ok => true,
            PromptOutput::Invalid => false,
            PromptOutput::Submit(text) => {
                let field = *field;
                self.editing = None;
                if field.apply(&text, config) {
                    tracing::debug!(field = field.label(), value = %field.value(config), "setting changed");
                }
                true
            }
            PromptOutput::Cancel => {
                self.editing = None;
                true
            }
        }
    }
}
