fn output_header() -> &'static str {
    "SwiftKey\nSwiftKey is a keyboard-driven hierarchical launcher: a declarative menu tree\nwalked with single keystrokes."
}

fn print_header() {
    println!("{}\n", output_header());
}

fn run() -> Result<(), String> {
    print_header();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let output = swiftkey::commands::run_cli(args)?;
    println!("{output}");
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
