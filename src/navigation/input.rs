use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Normalized navigation input. Everything the state machine sees is one of
/// these four shapes; surface-specific key handling stays at the edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavInput {
    Key(char),
    Escape,
    Up,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavKeyPress {
    pub input: NavInput,
    /// Holding alt while selecting a branch triggers batch execution even
    /// when the item's `batch` flag is unset.
    pub alt: bool,
}

impl NavKeyPress {
    pub fn key(ch: char) -> Self {
        Self {
            input: NavInput::Key(ch),
            alt: false,
        }
    }

    pub fn alt_key(ch: char) -> Self {
        Self {
            input: NavInput::Key(ch),
            alt: true,
        }
    }

    pub fn escape() -> Self {
        Self {
            input: NavInput::Escape,
            alt: false,
        }
    }

    pub fn up() -> Self {
        Self {
            input: NavInput::Up,
            alt: false,
        }
    }

    pub fn help() -> Self {
        Self {
            input: NavInput::Help,
            alt: false,
        }
    }
}

pub fn nav_input_from_key(key: KeyEvent) -> Option<NavKeyPress> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let input = match key.code {
        KeyCode::Esc => NavInput::Escape,
        KeyCode::Backspace | KeyCode::Left => NavInput::Up,
        KeyCode::F(1) => NavInput::Help,
        KeyCode::Char(ch) => NavInput::Key(ch),
        _ => return None,
    };
    Some(NavKeyPress { input, alt })
}

/// Parse the comma-separated scripted form used by the CLI session driver,
/// e.g. `a,alt-b,up,esc`.
pub fn parse_scripted_keys(raw: &str) -> Result<Vec<NavKeyPress>, String> {
    let mut presses = Vec::new();
    for token in raw.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            continue;
        }
        // Named tokens are case-insensitive; literal keys stay case-sensitive.
        let press = match trimmed.to_ascii_lowercase().as_str() {
            "esc" | "escape" => NavKeyPress::escape(),
            "up" | "back" => NavKeyPress::up(),
            "help" => NavKeyPress::help(),
            _ => {
                if let Some(rest) = trimmed.strip_prefix("alt-") {
                    let ch = single_char(rest).ok_or_else(|| {
                        format!("invalid scripted key token `{trimmed}`; expected alt-<char>")
                    })?;
                    NavKeyPress::alt_key(ch)
                } else {
                    let ch = single_char(trimmed).ok_or_else(|| {
                        format!(
                            "invalid scripted key token `{trimmed}`; valid tokens: esc, up, help, <char>, alt-<char>"
                        )
                    })?;
                    NavKeyPress::key(ch)
                }
            }
        };
        presses.push(press);
    }
    Ok(presses)
}

fn single_char(raw: &str) -> Option<char> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}
