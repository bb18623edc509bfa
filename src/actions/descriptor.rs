/// The action mini-language: `<scheme>://<payload>`, hand-authored by end
/// users, so parse failures must name what went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Launch,
    Open,
    Shortcut,
    Shell,
    Dynamic,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Launch => "launch",
            Self::Open => "open",
            Self::Shortcut => "shortcut",
            Self::Shell => "shell",
            Self::Dynamic => "dynamic",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw {
            "launch" => Ok(Self::Launch),
            "open" => Ok(Self::Open),
            "shortcut" => Ok(Self::Shortcut),
            "shell" => Ok(Self::Shell),
            "dynamic" => Ok(Self::Dynamic),
            _ => Err(format!(
                "unknown scheme `{raw}`; expected launch, open, shortcut, shell or dynamic"
            )),
        }
    }

    /// Default symbolic icon for items that carry no explicit `icon`.
    pub fn default_icon(self) -> &'static str {
        match self {
            Self::Launch => "app",
            Self::Open => "globe",
            Self::Shortcut => "bolt",
            Self::Shell => "terminal",
            Self::Dynamic => "refresh",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDescriptor {
    pub kind: ActionKind,
    pub payload: String,
}

impl ActionDescriptor {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let (scheme, payload) = raw
            .split_once("://")
            .ok_or_else(|| format!("action `{raw}` must use the form scheme://payload"))?;
        let kind = ActionKind::parse(scheme)?;
        if payload.is_empty() {
            return Err(format!("action `{raw}` has an empty payload"));
        }
        Ok(Self {
            kind,
            payload: payload.to_string(),
        })
    }
}
