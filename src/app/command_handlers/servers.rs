use crate::app::command_support::{map_page_err, parse_session_flags, SessionArgs};
use crate::config::Settings;
use crate::pages::Page;
use crate::router::WorkflowRouter;
use crate::session::{IntentTracker, SessionStore};

fn server_router(
    args: &[String],
    settings: &Settings,
    usage: &str,
) -> Result<WorkflowRouter, String> {
    let parsed: SessionArgs = parse_session_flags(args)?;
    let server = parsed.server.ok_or_else(|| format!("usage: {usage}"))?;
    let session = SessionStore::new();
    session.set_server(server);
    Ok(WorkflowRouter::from_settings(
        settings,
        session,
        IntentTracker::new(),
    ))
}

pub fn cmd_servers(settings: &Settings) -> Result<String, String> {
    let router = WorkflowRouter::from_settings(settings, SessionStore::new(), IntentTracker::new());
    let info = router.discover_servers().map_err(map_page_err)?;

    let mut lines = vec![format!(
        "version: {}",
        info.version.as_deref().unwrap_or("unknown")
    )];
    if info.servers.is_empty() {
        lines.push("servers: none listed".to_string());
    } else {
        lines.push("servers:".to_string());
        for server in &info.servers {
            lines.push(format!(
                "  {0:24} {1}:{2}",
                server.label(),
                server.ip_address,
                server.port
            ));
        }
    }
    lines.push(format!("next: layoutdeck load {} --server <ip:port>", Page::LoadSpd));
    Ok(lines.join("\n"))
}

pub fn cmd_ping(args: &[String], settings: &Settings) -> Result<String, String> {
    let router = server_router(args, settings, "ping --server <ip:port>")?;
    router.ping().map_err(map_page_err)?;
    Ok(format!("{} is alive", router.session().snapshot().server_label()))
}

pub fn cmd_version(args: &[String], settings: &Settings) -> Result<String, String> {
    let router = server_router(args, settings, "version --server <ip:port>")?;
    let version = router.server_version().map_err(map_page_err)?;
    Ok(format!("{}: {version}", router.session().snapshot().server_label()))
}
