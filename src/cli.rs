#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Validate,
    Format,
    Open,
    Snippets,
    Session,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "validate" => CliVerb::Validate,
        "format" => CliVerb::Format,
        "open" => CliVerb::Open,
        "snippets" => CliVerb::Snippets,
        "session" => CliVerb::Session,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  validate [path]                      Parse and validate a menu document".to_string(),
        "  format [path]                        Re-serialize a menu document in canonical form"
            .to_string(),
        "  open <uri>                           Route a swiftkey:// deep link".to_string(),
        "  snippets list [--base-url <url>]     List snippets from the index (cache/builtin fallback)"
            .to_string(),
        "  snippets sync [--base-url <url>]     Refresh the local snippet cache".to_string(),
        "  session --keys <tokens> [--panel]    Run a scripted navigation session".to_string(),
        "  help                                 Show this help".to_string(),
    ]
}
