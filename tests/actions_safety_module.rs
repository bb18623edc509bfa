use swiftkey::actions::{validate_shell_command, ActionDescriptor, ActionKind};
use swiftkey::config::{parse_document, ConfigError};

#[test]
fn actions_safety_module_accepts_and_rejects_the_documented_commands() {
    assert!(validate_shell_command("echo hello").is_ok());
    assert!(validate_shell_command("sudo rm").is_err());
    assert!(validate_shell_command("rm -rf /").is_err());
}

#[test]
fn actions_safety_module_rejections_flow_through_config_validation() {
    for action in ["shell://sudo rm", "shell://rm -rf /"] {
        let raw = format!("- key: a\n  title: Danger\n  action: {action}\n");
        let err = parse_document(&raw).expect_err("unsafe command in config");
        assert!(matches!(err, ConfigError::Semantic(_)), "{action}");
    }

    let ok = parse_document("- key: a\n  title: Fine\n  action: shell://echo hello\n");
    assert!(ok.is_ok());
}

#[test]
fn actions_safety_module_redirection_into_root_is_blocked() {
    assert!(validate_shell_command("echo x > /etc/passwd").is_err());
    assert!(validate_shell_command("echo x >> /etc/hosts").is_err());
    assert!(validate_shell_command("echo x > ./local.txt").is_ok());
}

#[test]
fn actions_safety_module_length_and_quote_rules() {
    let long = format!("echo {}", "a".repeat(996));
    assert!(long.len() > 1000);
    assert!(validate_shell_command(&long).is_err());
    assert!(validate_shell_command("echo 'odd").is_err());
}

#[test]
fn actions_safety_module_descriptors_name_their_scheme() {
    let descriptor = ActionDescriptor::parse("shortcut://Paste Clipboard").expect("parse");
    assert_eq!(descriptor.kind, ActionKind::Shortcut);
    assert_eq!(descriptor.kind.as_str(), "shortcut");
    assert!(ActionDescriptor::parse("telnet://x").is_err());
}
