use crate::actions::{DispatchBinaries, LogNotifier};
use crate::cli::{cli_help_lines, parse_cli_verb, CliVerb};
use crate::config::{
    default_menu_path, default_state_root, load_menu_document, load_menu_document_or_default,
    serialize_items, snippet_cache_path,
};
use crate::deeplink::DeepLink;
use crate::navigation::{parse_scripted_keys, NavContext, NavSignal};
use crate::session::{DeepLinkOutcome, Session};
use crate::snippets::{SnippetIndexClient, DEFAULT_INDEX_BASE_URL};
use chrono::DateTime;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

const EVENT_WAIT: Duration = Duration::from_secs(5);

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    let verb = args.first().map(String::as_str).unwrap_or("help");
    match parse_cli_verb(verb) {
        CliVerb::Validate => cmd_validate(&args[1..]),
        CliVerb::Format => cmd_format(&args[1..]),
        CliVerb::Open => cmd_open(&args[1..]),
        CliVerb::Snippets => cmd_snippets(&args[1..]),
        CliVerb::Session => cmd_session(&args[1..]),
        CliVerb::Help => Ok(cli_help_lines().join("\n")),
        CliVerb::Unknown => Err(format!(
            "unknown command `{verb}`\n{}",
            cli_help_lines().join("\n")
        )),
    }
}

fn menu_path_from_args(args: &[String]) -> Result<PathBuf, String> {
    match args.first() {
        Some(path) => Ok(PathBuf::from(path)),
        None => default_menu_path().map_err(|err| err.to_string()),
    }
}

fn cmd_validate(args: &[String]) -> Result<String, String> {
    let path = menu_path_from_args(args)?;
    let items = load_menu_document(&path).map_err(|err| err.to_string())?;
    Ok(format!(
        "OK: {} root item(s) in {}",
        items.len(),
        path.display()
    ))
}

fn cmd_format(args: &[String]) -> Result<String, String> {
    let path = menu_path_from_args(args)?;
    let items = load_menu_document(&path).map_err(|err| err.to_string())?;
    serialize_items(&items).map_err(|err| err.to_string())
}

fn build_session(panel: bool) -> Result<Session, String> {
    let state_root = default_state_root().map_err(|err| err.to_string())?;
    let menu_path = default_menu_path().map_err(|err| err.to_string())?;
    let (items, load_err) = load_menu_document_or_default(&menu_path);

    let mut session = Session::new(
        NavContext {
            panel_presentation: panel,
        },
        DispatchBinaries::default(),
        Arc::new(LogNotifier::new(state_root.clone())),
        state_root,
    );
    session.install_root(Arc::new(items));
    if let Some(err) = load_err {
        eprintln!("warning: using built-in menu: {err}");
    }
    Ok(session)
}

fn cmd_open(args: &[String]) -> Result<String, String> {
    let uri = args
        .first()
        .ok_or_else(|| "usage: open <swiftkey://...>".to_string())?;
    let link = DeepLink::parse(uri).map_err(|err| err.to_string())?;

    let mut session = build_session(false)?;
    let outcome = session.open_deep_link(&link).map_err(|err| err.to_string())?;
    match outcome {
        DeepLinkOutcome::ShowSnippets(snippet_id) => {
            Ok(format!("open snippet gallery at `{snippet_id}`"))
        }
        DeepLinkOutcome::Navigated(signal) => {
            if signal == NavSignal::ActionExecuted {
                session.wait_event(EVENT_WAIT);
            }
            Ok(describe_signal(&signal, &session))
        }
    }
}

fn cmd_snippets(args: &[String]) -> Result<String, String> {
    let sub = args
        .first()
        .map(String::as_str)
        .ok_or_else(|| "usage: snippets list|sync [--base-url <url>]".to_string())?;
    let base_url = flag_value(&args[1..], "--base-url")
        .unwrap_or_else(|| DEFAULT_INDEX_BASE_URL.to_string());
    let cache_path = snippet_cache_path().map_err(|err| err.to_string())?;
    let client = SnippetIndexClient::new(base_url, cache_path.clone());

    match sub {
        "list" => {
            let (snippets, source) = client.sync();
            let mut lines = vec![format!("{} snippet(s) from {}", snippets.len(), source.as_str())];
            for snippet in &snippets {
                let updated = DateTime::from_timestamp(snippet.updated_at, 0)
                    .map(|at| at.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                lines.push(format!(
                    "  {}  {} (updated {updated})",
                    snippet.id, snippet.name
                ));
            }
            Ok(lines.join("\n"))
        }
        "sync" => {
            let (snippets, source) = client.sync();
            Ok(format!(
                "synced {} snippet(s) from {} into {}",
                snippets.len(),
                source.as_str(),
                cache_path.display()
            ))
        }
        other => Err(format!("unknown snippets subcommand `{other}`")),
    }
}

fn cmd_session(args: &[String]) -> Result<String, String> {
    let keys = flag_value(args, "--keys")
        .ok_or_else(|| "usage: session --keys <tokens> [--panel]".to_string())?;
    let panel = args.iter().any(|arg| arg == "--panel");
    let presses = parse_scripted_keys(&keys)?;

    let mut session = build_session(panel)?;
    let mut lines = Vec::new();
    for press in presses {
        let signal = session.handle_key(press).map_err(|err| err.to_string())?;
        if signal == NavSignal::Loading {
            lines.push(describe_signal(&signal, &session));
            if let Some(resolved) = session.wait_event(EVENT_WAIT) {
                lines.push(describe_signal(&resolved, &session));
                if matches!(resolved, NavSignal::SubmenuPushed(_)) {
                    for item in session.visible_items().map_err(|err| err.to_string())? {
                        lines.push(format!(
                            "    [{}] {} ({})",
                            item.key,
                            item.title,
                            item.effective_icon()
                        ));
                    }
                }
            }
            continue;
        }
        if signal == NavSignal::Escape {
            session.reset();
        }
        lines.push(describe_signal(&signal, &session));
        if matches!(signal, NavSignal::SubmenuPushed(_)) {
            for item in session.visible_items().map_err(|err| err.to_string())? {
                lines.push(format!(
                    "    [{}] {} ({})",
                    item.key,
                    item.title,
                    item.effective_icon()
                ));
            }
        }
    }
    for signal in session.drain_events() {
        lines.push(describe_signal(&signal, &session));
    }
    Ok(lines.join("\n"))
}

fn describe_signal(signal: &NavSignal, session: &Session) -> String {
    let crumbs = session.breadcrumbs().join(" > ");
    let position = if crumbs.is_empty() {
        "root"
    } else {
        crumbs.as_str()
    };
    match signal {
        NavSignal::Escape => "escape (session reset)".to_string(),
        NavSignal::Up => format!("up -> {position}"),
        NavSignal::Help => "help".to_string(),
        NavSignal::Error(key) => format!("no item for key `{key}` at {position}"),
        NavSignal::SubmenuPushed(title) => format!("entered `{title}` ({position})"),
        NavSignal::ActionExecuted => format!("action dispatched at {position}"),
        NavSignal::Loading => "resolving dynamic submenu...".to_string(),
        NavSignal::NoOp => "no-op".to_string(),
    }
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|index| args.get(index + 1))
        .cloned()
}
