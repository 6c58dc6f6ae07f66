use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("sitelens")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("sitelens")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("audit")
                .about(
                    "Audit a website for performance, security, SEO and accessibility. Results \
                are simulated; the site is never contacted.",
                )
                .arg(
                    arg!(<URL>)
                        .required(true)
                        .help("The website to audit, e.g. example.com or https://example.com"),
                )
                .arg(
                    arg!(--"delay-ms" <MILLIS>)
                        .required(false)
                        .help("Simulated audit latency in milliseconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("3000"),
                )
                .arg(
                    arg!(--"seed" <SEED>)
                        .required(false)
                        .help("Seed for reproducible results (default: random)")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json, markdown")
                        .value_parser(["text", "json", "markdown"])
                        .default_value("text"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)"),
                )
                .arg(
                    arg!(--"no-progress")
                        .required(false)
                        .help("Hide the progress spinner")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            command!("ui")
                .about("Launch the interactive audit dashboard")
                .arg(
                    arg!(--"delay-ms" <MILLIS>)
                        .required(false)
                        .help("Simulated audit latency in milliseconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("3000"),
                )
                .arg(
                    arg!(--"seed" <SEED>)
                        .required(false)
                        .help("Seed for reproducible results (default: random)")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
}
