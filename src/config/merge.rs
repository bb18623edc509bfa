use super::MenuItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    Append,
    Prepend,
    Replace,
    #[default]
    Smart,
}

impl MergeStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Append => "append",
            Self::Prepend => "prepend",
            Self::Replace => "replace",
            Self::Smart => "smart",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "append" => Ok(Self::Append),
            "prepend" => Ok(Self::Prepend),
            "replace" => Ok(Self::Replace),
            "smart" => Ok(Self::Smart),
            _ => Err("merge strategy must be one of: append, prepend, replace, smart".to_string()),
        }
    }
}

impl std::fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Combine an existing tree slice with incoming items. Collision matching is
/// top-level only; a replaced item's submenu is replaced wholesale with it.
pub fn merge_items(
    base: &[MenuItem],
    incoming: &[MenuItem],
    strategy: MergeStrategy,
) -> Vec<MenuItem> {
    match strategy {
        MergeStrategy::Append => {
            let mut result = base.to_vec();
            result.extend(incoming.iter().cloned());
            result
        }
        MergeStrategy::Prepend => {
            let mut result = incoming.to_vec();
            result.extend(base.iter().cloned());
            result
        }
        MergeStrategy::Replace => incoming.to_vec(),
        MergeStrategy::Smart => smart_merge(base, incoming),
    }
}

fn smart_merge(base: &[MenuItem], incoming: &[MenuItem]) -> Vec<MenuItem> {
    let mut result = base.to_vec();
    for item in incoming {
        let same_key_and_title = result
            .iter()
            .position(|existing| existing.key == item.key && existing.title == item.title);
        if let Some(index) = same_key_and_title {
            result[index] = item.clone();
            continue;
        }

        let mut item = item.clone();
        if result.iter().any(|existing| existing.key == item.key) {
            item.key = reassign_key(&item.key, &result);
        }
        result.push(item);
    }
    result
}

/// Pick a replacement key that collides with nothing at this level: walk the
/// character code upward through `z`, then fall back to numeric suffixes on
/// the original key.
fn reassign_key(original: &str, existing: &[MenuItem]) -> String {
    let taken = |candidate: &str| existing.iter().any(|item| item.key == candidate);

    if let Some(ch) = single_char(original) {
        let mut code = ch as u32 + 1;
        while code <= 'z' as u32 {
            if let Some(next) = char::from_u32(code) {
                let candidate = next.to_string();
                if !taken(&candidate) {
                    return candidate;
                }
            }
            code += 1;
        }
    }

    let mut counter = 2usize;
    loop {
        let candidate = format!("{original}{counter}");
        if !taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

fn single_char(raw: &str) -> Option<char> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}
