use crate::config::{MasterServerConfig, Settings};
use crate::gateway::{endpoint_url, BackendGateway, Transport, UreqTransport};
use crate::pages::Page;
use crate::session::{Intent, IntentTracker, SessionState, SessionStore};
use crate::shared::{ClientLog, PageLoadError};
use serde_json::Value;

pub mod endpoints;
pub mod requests;
pub mod responses;
pub mod visits;

pub use endpoints::Endpoint;
pub use requests::{
    plan_request, LayoutArtifactPayload, LayoutInfoPayload, LoadFilePayload, LoadStackupPayload,
    RequestPayload, RoutedRequest,
};
pub use responses::{parse_discovery, parse_page_data, ArtifactData, DiscoveryInfo, PageData};
pub use visits::{VisitToken, VisitTracker};

/// Decides, per page visit, which backend endpoint to call and with what
/// payload, then performs the call. Session, intent and visit state are
/// shared handles, so a router can serve several threads.
#[derive(Debug, Clone)]
pub struct WorkflowRouter<T = UreqTransport> {
    gateway: BackendGateway<T>,
    session: SessionStore,
    intents: IntentTracker,
    visits: VisitTracker,
    master_server: Option<MasterServerConfig>,
    log: ClientLog,
}

impl WorkflowRouter<UreqTransport> {
    pub fn from_settings(settings: &Settings, session: SessionStore, intents: IntentTracker) -> Self {
        let gateway = BackendGateway::new(UreqTransport::new(settings.request_timeout()));
        let log = match &settings.log_file {
            Some(path) => ClientLog::to_file(path),
            None => ClientLog::disabled(),
        };
        let mut router = Self::new(gateway, session, intents).with_log(log);
        router.master_server = settings.master_server.clone();
        router
    }
}

impl<T: Transport> WorkflowRouter<T> {
    pub fn new(gateway: BackendGateway<T>, session: SessionStore, intents: IntentTracker) -> Self {
        Self {
            gateway,
            session,
            intents,
            visits: VisitTracker::new(),
            master_server: None,
            log: ClientLog::disabled(),
        }
    }

    pub fn with_master_server(mut self, master_server: MasterServerConfig) -> Self {
        self.master_server = Some(master_server);
        self
    }

    pub fn with_log(mut self, log: ClientLog) -> Self {
        self.log = log;
        self
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn intents(&self) -> &IntentTracker {
        &self.intents
    }

    pub fn visits(&self) -> &VisitTracker {
        &self.visits
    }

    pub fn gateway(&self) -> &BackendGateway<T> {
        &self.gateway
    }

    /// Plans the request a visit would send right now, without sending it and
    /// without consuming the pending intent.
    pub fn plan(&self, page: Page) -> Result<RoutedRequest, PageLoadError> {
        let state = self.session.snapshot();
        let intent = if page.has_fresh_load_branch() {
            Intent::for_page(self.intents.intent().as_ref(), page)
        } else {
            Intent::RefreshExisting
        };
        plan_request(&state, page, intent)
    }

    pub fn visit(&self, page: Page) -> Result<PageData, PageLoadError> {
        let token = self.visits.begin(page);
        self.log.info("page.visit", page.route());
        let result = self.load(page, &token);
        match &result {
            Ok(data) => {
                let detail = match data.artifact() {
                    Some(artifact) => format!("{page} via {}", artifact.endpoint),
                    None => page.to_string(),
                };
                self.log.info("page.loaded", &detail);
            }
            Err(err @ PageLoadError::Superseded { .. }) => {
                self.log.warn("page.superseded", &err.to_string());
            }
            Err(err) => {
                self.log
                    .error("page.failed", &format!("{page} [{}]: {err}", err.kind()));
            }
        }
        result
    }

    /// Drops interest in the in-flight visit; its response will be discarded.
    pub fn navigate_away(&self) {
        self.visits.supersede();
    }

    fn load(&self, page: Page, token: &VisitToken) -> Result<PageData, PageLoadError> {
        if page == Page::Home {
            let info = self.discover_servers()?;
            self.ensure_current(token)?;
            return Ok(PageData::Discovery(info));
        }

        let state = self.session.snapshot();
        if state.server.is_none() {
            return Err(PageLoadError::ServerUnselected { page });
        }
        let pending = if page.has_fresh_load_branch() {
            self.intents.take()
        } else {
            None
        };
        let intent = if page.has_fresh_load_branch() {
            Intent::for_page(pending.as_ref(), page)
        } else {
            Intent::RefreshExisting
        };

        let result = self.send(&state, page, intent, token);
        if let (Err(err), Some(pending)) = (&result, pending) {
            if intent.is_fresh_load() && err.is_undelivered() {
                self.log.warn("intent.restored", &format!("{page} [{}]", err.kind()));
                self.intents.restore(pending);
            }
        }
        result
    }

    fn send(
        &self,
        state: &SessionState,
        page: Page,
        intent: Intent,
        token: &VisitToken,
    ) -> Result<PageData, PageLoadError> {
        let request = plan_request(state, page, intent)?;
        self.log.info(
            "page.request",
            &format!("POST {} fresh_load={}", request.url(), intent.is_fresh_load()),
        );

        let body =
            self.gateway
                .post_json(&request.server, request.endpoint.path(), &request.payload)?;
        self.ensure_current(token)?;
        parse_page_data(&request, body)
    }

    fn ensure_current(&self, token: &VisitToken) -> Result<(), PageLoadError> {
        if self.visits.is_current(token) {
            Ok(())
        } else {
            Err(PageLoadError::Superseded { page: token.page })
        }
    }

    pub fn discover_servers(&self) -> Result<DiscoveryInfo, PageLoadError> {
        let master = self
            .master_server
            .as_ref()
            .ok_or(PageLoadError::MasterServerUnconfigured)?;
        let url = master.url();
        self.log.info("discovery.request", &format!("GET {url}"));
        let body = self.gateway.get_json(&url)?;
        parse_discovery(&url, body)
    }

    pub fn ping(&self) -> Result<(), PageLoadError> {
        let server = self
            .session
            .server()
            .ok_or(PageLoadError::ServerRequired { operation: "ping" })?;
        let url = endpoint_url(&server, "/ping");
        let body = self.gateway.get_json(&url)?;
        match body.get("result").and_then(Value::as_str) {
            Some("pong") => Ok(()),
            _ => Err(PageLoadError::MalformedResponse {
                url,
                reason: format!("expected {{\"result\":\"pong\"}}, got {body}"),
            }),
        }
    }

    pub fn server_version(&self) -> Result<String, PageLoadError> {
        let server = self
            .session
            .server()
            .ok_or(PageLoadError::ServerRequired {
                operation: "version",
            })?;
        let url = endpoint_url(&server, "/");
        let body = self.gateway.get_json(&url)?;
        body.get("result")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| PageLoadError::MalformedResponse {
                url,
                reason: "missing string `result` version field".to_string(),
            })
    }
}
