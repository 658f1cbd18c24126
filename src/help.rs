use crate::calendar::{Role, TokenLine};

static BROWSE_KEYS: &str = "←↓↑→/hjkl";

static BROWSE_HINTS: &str =
    "n/p:month | N/P:year | t:today | H/L:week | Home/End:month | Enter:select | c:config | q:quit";

static MENU_HINTS: &str = "Navigate: ↑↓ | Edit: Enter | Cancel: Esc";

static PROMPT_HINTS: &str = "Type to edit | Confirm: Enter | Cancel: Esc";

/// What the user is currently doing, as far as the key hints care
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum HintMode<'a> {
    Browsing { prefix: Option<&'a str> },
    Menu,
    Prompt,
}

pub(crate) fn hint_line(mode: HintMode<'_>) -> TokenLine {
    let text = match mode {
        HintMode::Browsing { prefix: None } => format!("{BROWSE_KEYS} | {BROWSE_HINTS}"),
        HintMode::Browsing {
            prefix: Some(prefix),
        } => format!("{prefix}g:jump {prefix} days | {BROWSE_HINTS}"),
        HintMode::Menu => String::from(MENU_HINTS),
        HintMode::Prompt => String::from(PROMPT_HINTS),
    };
    TokenLine::styled(text, Role::Hint)
}

/// The bottom line: a pending message if there is one, else the selection
pub(crate) fn status_line(selected: &str, message: Option<&str>) -> TokenLine {
    match message {
        Some(msg) => TokenLine::styled(msg, Role::Normal),
        None => TokenLine::styled(format!("Selected: {selected}"), Role::Status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browsing_hints() {
        let line = hint_line(HintMode::Browsing { prefix: None });
        assert!(line.text().starts_with("←↓↑→/hjkl | n/p:month"));
        let line = hint_line(HintMode::Browsing { prefix: Some("12") });
        assert!(line.text().starts_with("12g:jump 12 days | n/p:month"));
        assert_eq!(line.tokens()[0].role, Role::Hint);
    }

    #[test]
    fn test_status_line() {
        assert_eq!(
            status_line("2024-03-15", None).text(),
            "Selected: 2024-03-15"
        );
        let line = status_line("2024-03-15", Some("boom"));
        assert_eq!(line.text(), "boom");
        assert_eq!(line.tokens()[0].role, Role::Normal);
    }
}
