use crate::config::{load_global_settings, ConfigError, Settings};
use crate::pages::Page;
use crate::router::{RoutedRequest, WorkflowRouter};
use crate::session::{ArtifactKind, IntentTracker, LoadFileType, ServerInfo, SessionStore};
use crate::shared::PageLoadError;
use serde::Serialize;

pub fn map_config_err(err: ConfigError) -> String {
    err.to_string()
}

pub fn map_page_err(err: PageLoadError) -> String {
    format!("{} ({})", err, err.kind())
}

pub fn load_settings() -> Result<Settings, String> {
    load_global_settings().map_err(map_config_err)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionArgs {
    pub server: Option<ServerInfo>,
    pub layout: Option<String>,
    pub file: Option<String>,
    pub fresh: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageArgs {
    pub page: Page,
    pub session: SessionArgs,
}

pub fn parse_session_flags(args: &[String]) -> Result<SessionArgs, String> {
    let mut parsed = SessionArgs::default();
    let mut index = 0usize;
    while index < args.len() {
        match args[index].as_str() {
            "--server" => {
                index += 1;
                let raw = args
                    .get(index)
                    .ok_or_else(|| "--server requires <ip:port>".to_string())?;
                parsed.server = Some(ServerInfo::parse(raw)?);
            }
            "--layout" => {
                index += 1;
                let raw = args
                    .get(index)
                    .ok_or_else(|| "--layout requires a layout file name".to_string())?;
                parsed.layout = Some(raw.clone());
            }
            "--file" => {
                index += 1;
                let raw = args
                    .get(index)
                    .ok_or_else(|| "--file requires a path".to_string())?;
                parsed.file = Some(raw.clone());
            }
            "--fresh" => parsed.fresh = true,
            other if other.starts_with("--") => {
                return Err(format!("unknown flag `{other}`"));
            }
            other => {
                return Err(format!("unexpected positional argument `{other}`"));
            }
        }
        index += 1;
    }
    Ok(parsed)
}

pub fn parse_page_args(args: &[String], usage: &str) -> Result<PageArgs, String> {
    let route = args.first().ok_or_else(|| format!("usage: {usage}"))?;
    let page = Page::from_route(route).ok_or_else(|| {
        format!("unknown page route `{route}`; run `layoutdeck pages` for the list")
    })?;
    let session = parse_session_flags(&args[1..])?;
    if session.fresh && !page.has_fresh_load_branch() {
        return Err(format!(
            "`--fresh` only applies to {} and {}",
            Page::CreateStackup,
            Page::CreatePadstack
        ));
    }
    if session.file.is_some() && page.artifact().is_none() {
        return Err(format!("page `{page}` does not take a `--file`"));
    }
    Ok(PageArgs { page, session })
}

/// Builds a fresh session from command-line flags, the way the UI would have
/// populated it before navigating to `page`.
pub fn session_for(page: Page, args: &SessionArgs) -> (SessionStore, IntentTracker) {
    let session = SessionStore::new();
    let intents = IntentTracker::new();
    if let Some(server) = &args.server {
        session.set_server(server.clone());
    }
    if let Some(layout) = &args.layout {
        session.set_active_layout(layout.clone());
    }
    if let (Some(file), Some(kind)) = (&args.file, page.artifact()) {
        session.set_file_ref(kind, file.clone());
    }
    if args.fresh {
        if let Some(file_type) = LoadFileType::for_page(page) {
            intents.request_fresh_load(file_type, page);
        }
    }
    (session, intents)
}

pub fn router_for(settings: &Settings, page: Page, args: &SessionArgs) -> WorkflowRouter {
    let (session, intents) = session_for(page, args);
    WorkflowRouter::from_settings(settings, session, intents)
}

#[derive(Debug, Serialize)]
struct PlannedRequestView<'a> {
    method: &'static str,
    url: String,
    page: &'static str,
    endpoint: &'static str,
    fresh_load: bool,
    artifact: Option<ArtifactKind>,
    body: &'a crate::router::RequestPayload,
}

pub fn render_planned_request(request: &RoutedRequest) -> Result<String, String> {
    let view = PlannedRequestView {
        method: "POST",
        url: request.url(),
        page: request.page.route(),
        endpoint: request.endpoint.path(),
        fresh_load: request.intent.is_fresh_load(),
        artifact: request.page.artifact(),
        body: &request.payload,
    };
    serde_json::to_string_pretty(&view).map_err(|e| format!("failed to encode plan: {e}"))
}

pub fn render_json(value: &serde_json::Value) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("failed to encode output: {e}"))
}
