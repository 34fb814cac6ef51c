use crate::app::cli::{help_text, page_listing_lines, parse_cli_verb, CliVerb};
use crate::app::command_support::load_settings;
use crate::config::Settings;

pub mod pages;
pub mod servers;

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    if args.is_empty() {
        return Ok(help_text());
    }
    match parse_cli_verb(args[0].as_str()) {
        CliVerb::Help => Ok(help_text()),
        CliVerb::Pages => Ok(page_listing_lines().join("\n")),
        _ => {
            let settings = load_settings()?;
            run_cli_with_settings(args, &settings)
        }
    }
}

pub fn run_cli_with_settings(args: Vec<String>, settings: &Settings) -> Result<String, String> {
    if args.is_empty() {
        return Ok(help_text());
    }

    match parse_cli_verb(args[0].as_str()) {
        CliVerb::Help => Ok(help_text()),
        CliVerb::Pages => Ok(page_listing_lines().join("\n")),
        CliVerb::Servers => servers::cmd_servers(settings),
        CliVerb::Ping => servers::cmd_ping(&args[1..], settings),
        CliVerb::Version => servers::cmd_version(&args[1..], settings),
        CliVerb::Plan => pages::cmd_plan(&args[1..], settings),
        CliVerb::Load => pages::cmd_load(&args[1..], settings),
        CliVerb::Unknown => Err(format!("unknown command `{}`", args[0])),
    }
}
