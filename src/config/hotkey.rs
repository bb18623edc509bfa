/// Global-shortcut descriptor: zero or more modifier names followed by
/// exactly one key token, joined by `+` (e.g. `cmd+shift+k`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotkey {
    pub modifiers: Vec<HotkeyModifier>,
    pub key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyModifier {
    Command,
    Control,
    Option,
    Shift,
}

impl HotkeyModifier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Command => "cmd",
            Self::Control => "ctrl",
            Self::Option => "alt",
            Self::Shift => "shift",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "cmd" | "command" => Some(Self::Command),
            "ctrl" | "control" => Some(Self::Control),
            "alt" | "opt" | "option" => Some(Self::Option),
            "shift" => Some(Self::Shift),
            _ => None,
        }
    }
}

const NAMED_KEYS: [&str; 22] = [
    "space", "tab", "enter", "escape", "up", "down", "left", "right", "home", "end", "f1", "f2",
    "f3", "f4", "f5", "f6", "f7", "f8", "f9", "f10", "f11", "f12",
];

impl Hotkey {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let segments: Vec<&str> = raw.split('+').map(str::trim).collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err("hotkey segments must be non-empty".to_string());
        }
        let (key, modifier_segments) = segments
            .split_last()
            .ok_or_else(|| "hotkey must name a key".to_string())?;

        let mut modifiers = Vec::with_capacity(modifier_segments.len());
        for segment in modifier_segments {
            let normalized = segment.to_ascii_lowercase();
            let modifier = HotkeyModifier::parse(&normalized).ok_or_else(|| {
                format!("unknown hotkey modifier `{segment}`; expected cmd, ctrl, alt or shift")
            })?;
            modifiers.push(modifier);
        }

        let normalized = key.to_ascii_lowercase();
        let is_single_char = normalized.chars().count() == 1;
        if !is_single_char && !NAMED_KEYS.contains(&normalized.as_str()) {
            return Err(format!(
                "hotkey key token `{key}` must be a single character or a named key"
            ));
        }

        Ok(Self {
            modifiers,
            key: normalized,
        })
    }
}
