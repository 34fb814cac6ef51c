use crate::pages::ALL_PAGES;
use crate::router::Endpoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Pages,
    Servers,
    Ping,
    Version,
    Plan,
    Load,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "pages" => CliVerb::Pages,
        "servers" => CliVerb::Servers,
        "ping" => CliVerb::Ping,
        "version" => CliVerb::Version,
        "plan" => CliVerb::Plan,
        "load" => CliVerb::Load,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  pages                                List page routes and their backend endpoints"
            .to_string(),
        "  servers                              Query the master server for compute servers"
            .to_string(),
        "  ping --server <ip:port>              Check that a compute server is alive".to_string(),
        "  version --server <ip:port>           Show a compute server's version".to_string(),
        "  plan <route> [options]               Print the request a page visit would send"
            .to_string(),
        "  load <route> [options]               Visit a page and print its data".to_string(),
        String::new(),
        "Page options:".to_string(),
        "  --server <ip:port>                   Selected compute server".to_string(),
        "  --layout <name>                      Active layout file name".to_string(),
        "  --file <path>                        File picked for the page's artifact".to_string(),
        "  --fresh                              Import the picked file instead of refreshing"
            .to_string(),
    ]
}

pub fn page_listing_lines() -> Vec<String> {
    ALL_PAGES
        .iter()
        .map(|page| {
            let endpoints = Endpoint::candidates_for(*page)
                .iter()
                .map(|endpoint| format!("POST {endpoint}"))
                .collect::<Vec<_>>();
            let endpoints = if endpoints.is_empty() {
                "GET <master server>".to_string()
            } else {
                endpoints.join(" | ")
            };
            format!("  {0:20} {1}", page.route(), endpoints)
        })
        .collect()
}

pub(crate) fn help_text() -> String {
    let mut lines = vec!["usage: layoutdeck <command> [args]".to_string(), String::new()];
    lines.extend(cli_help_lines());
    lines.push(String::new());
    lines.push("Pages:".to_string());
    lines.extend(page_listing_lines());
    lines.join("\n")
}
