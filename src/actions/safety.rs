const MAX_COMMAND_LENGTH: usize = 1000;

const BLACKLIST: [&str; 7] = [
    "rm -rf /",
    "sudo ",
    "> /",
    ">> /",
    "mkfs",
    "dd if=",
    ":(){ :|:& };:",
];

/// Shell command safety validation. Applied at config-validation time and
/// again immediately before execution.
pub fn validate_shell_command(command: &str) -> Result<(), String> {
    let trimmed = command.trim();
    if trimmed.is_empty() {
        return Err("command is empty".to_string());
    }
    if command.len() > MAX_COMMAND_LENGTH {
        return Err(format!(
            "command exceeds {MAX_COMMAND_LENGTH} characters"
        ));
    }
    for pattern in BLACKLIST {
        if contains_at_token_boundary(trimmed, pattern) {
            return Err(format!("command contains forbidden pattern `{pattern}`"));
        }
    }
    let quote_count = command.chars().filter(|ch| *ch == '\'' || *ch == '"').count();
    if quote_count % 2 != 0 {
        return Err("command has unbalanced quoting".to_string());
    }
    Ok(())
}

/// True when `pattern` occurs at the start of `text` or immediately after
/// whitespace.
fn contains_at_token_boundary(text: &str, pattern: &str) -> bool {
    text.match_indices(pattern).any(|(index, _)| {
        index == 0
            || text[..index]
                .chars()
                .next_back()
                .is_some_and(char::is_whitespace)
    })
}
