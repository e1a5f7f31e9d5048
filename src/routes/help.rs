//! Help text printed with `--help`

use colored::Colorize;

const COMMANDS: [(&str, &str); 13] = [
    ("<empty>", "Print out the current organization and user information."),
    ("new", "Write a new secret message"),
    ("read [--key]", "Read a shared secret message"),
    ("list", "List unread messages you have written"),
    ("change org", "Switch which organization fidelius is associated with"),
    ("change user", "Switch the active user on the current organization"),
    ("add org", "Add an organization for selection"),
    ("add user", "Add a user to share with on the selected organization"),
    ("add friend", "Add a friend to share to"),
    ("remove org", "Remove an organization and all users and friends"),
    ("remove user", "Remove a user from the current organization configuration"),
    ("remove friend", "Remove a friend from the current organization configuration"),
    ("export user", "Print out the configuration for the current user."),
];

const OPTIONS: [(&str, &str); 6] = [
    ("--help, -h", "Prints this message"),
    ("--version, -v", "Prints the version of Fidelius"),
    ("--store <NAME>", "Use another storage strategy for this command"),
    ("--home <DIR>", "Directory holding config.toml and state.json"),
    ("--verbose", "Log debug output to stderr"),
    ("--no-color", "Output is printed without colors"),
];

fn table(rows: &[(&str, &str)], width: usize) -> String {
    rows.iter()
        .map(|(name, summary)| {
            format!("  {:<width$} {}\n", name, format!("# {summary}").dimmed())
        })
        .collect()
}

/// The general help listing every command
pub fn general() -> String {
    format!(
        "\n{}\n\nGeneral options:\n{}\n\nAvailable commands are:\n{}",
        "fidelius <command> [args] [options]".bold(),
        table(&OPTIONS, 15),
        table(&COMMANDS, 14),
    )
}

/// Help for one command followed by the general help
pub fn command(usage: &str, summary: &str) -> String {
    format!(
        "\n{}\n  {}\n{}",
        format!("fidelius {usage}").bold(),
        summary,
        general()
    )
}
