use crossterm::event::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    Quit,
    NextTier,
    PrevTier,
    ScrollUp,
    ScrollDown,
    ToggleTheme,
    Refresh,
}

pub fn parse_command(key_code: &KeyCode) -> Option<UiCommand> {
    match key_code {
        KeyCode::Esc => Some(UiCommand::Quit),
        KeyCode::Right | KeyCode::Tab => Some(UiCommand::NextTier),
        KeyCode::Left | KeyCode::BackTab => Some(UiCommand::PrevTier),
        KeyCode::Up => Some(UiCommand::ScrollUp),
        KeyCode::Down => Some(UiCommand::ScrollDown),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'q' => Some(UiCommand::Quit),
            'l' => Some(UiCommand::NextTier),
            'h' => Some(UiCommand::PrevTier),
            'k' => Some(UiCommand::ScrollUp),
            'j' => Some(UiCommand::ScrollDown),
            't' => Some(UiCommand::ToggleTheme),
            'r' => Some(UiCommand::Refresh),
            _ => None,
        },
        _ => None,
    }
}
