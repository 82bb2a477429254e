use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Abstract input events consumed by the mode handlers.
///
/// Raw key events are translated here, at the boundary, so that nothing past
/// this point speaks in terms of key codes.  The one exception is name entry,
/// which needs the raw character stream and handles [`KeyEvent`]s itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
    /// Shift+Up: raise the SFX volume while the settings panel is open
    SfxUp,
    /// Shift+Down: lower the SFX volume while the settings panel is open
    SfxDown,
    Space,
    Enter,
    Esc,
    H,
    M,
    S,
    Q,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
            (KeyModifiers::NONE, KeyCode::Up) => Some(Command::Up),
            (KeyModifiers::NONE, KeyCode::Down) => Some(Command::Down),
            (KeyModifiers::NONE, KeyCode::Left) => Some(Command::Left),
            (KeyModifiers::NONE, KeyCode::Right) => Some(Command::Right),
            (KeyModifiers::SHIFT, KeyCode::Up) => Some(Command::SfxUp),
            (KeyModifiers::SHIFT, KeyCode::Down) => Some(Command::SfxDown),
            (KeyModifiers::NONE, KeyCode::Char(' ')) => Some(Command::Space),
            (_, KeyCode::Enter) => Some(Command::Enter),
            (_, KeyCode::Esc) => Some(Command::Esc),
            (KeyModifiers::NONE, KeyCode::Char('h')) => Some(Command::H),
            (KeyModifiers::NONE, KeyCode::Char('m')) => Some(Command::M),
            (KeyModifiers::NONE, KeyCode::Char('s')) => Some(Command::S),
            (KeyModifiers::NONE, KeyCode::Char('q')) => Some(Command::Q),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(KeyCode::Up, KeyModifiers::NONE, Some(Command::Up))]
    #[case(KeyCode::Up, KeyModifiers::SHIFT, Some(Command::SfxUp))]
    #[case(KeyCode::Down, KeyModifiers::SHIFT, Some(Command::SfxDown))]
    #[case(KeyCode::Char('c'), KeyModifiers::CONTROL, Some(Command::Quit))]
    #[case(KeyCode::Char(' '), KeyModifiers::NONE, Some(Command::Space))]
    #[case(KeyCode::Char('h'), KeyModifiers::NONE, Some(Command::H))]
    #[case(KeyCode::Char('h'), KeyModifiers::CONTROL, None)]
    #[case(KeyCode::Char('x'), KeyModifiers::NONE, None)]
    fn test_from_key_event(
        #[case] code: KeyCode,
        #[case] modifiers: KeyModifiers,
        #[case] cmd: Option<Command>,
    ) {
        let ev = KeyEvent::new(code, modifiers);
        assert_eq!(Command::from_key_event(ev), cmd);
    }
}
