use commands::command_argument_builder;
use sitelens::handlers::{handle_audit, handle_ui, AuditArgs};
use sitelens_core::print_banner;

mod commands;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    // A JSON or Markdown report printed to stdout must stay parseable
    let clean_stdout = match chosen_command.subcommand() {
        Some(("audit", primary_command)) => AuditArgs::from_matches(primary_command)
            .map(|args| args.needs_clean_stdout())
            .unwrap_or(false),
        _ => false,
    };

    // Show banner unless --quiet flag is set
    if !quiet && !clean_stdout {
        print_banner();
    }

    match chosen_command.subcommand() {
        Some(("audit", primary_command)) => handle_audit(primary_command, quiet).await,
        Some(("ui", primary_command)) => handle_ui(primary_command).await,
        // No subcommand provided, just show the banner
        None => {}
        _ => unreachable!("clap should ensure we don't get here"),
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
