//! HTTP server for interactive mode
//!
//! `quizboard serve results.json` → starts server, opens browser, shows the board

use crate::error::{BoardError, Result};
use crate::l10n;
use crate::params::PageParams;
use crate::render::html::{self, PageChrome};
use crate::results::ResultsDocument;
use crate::view::{self, RenderedView, ViewState};
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tiny_http::{Header, Method, Request, Response, Server};

/// Client hints the board renders differently for. Browsers send them only
/// after a response lists them in `Accept-CH`.
const VIEWPORT_HINTS: &str = "Sec-CH-Viewport-Width, Viewport-Width";

#[derive(Serialize)]
struct ApiResponse<T> {
    ok: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self { ok: true, data: Some(data), error: None }
    }
}

#[derive(Serialize)]
pub struct TableReport {
    pub generated: String,
    pub view: RenderedView,
}

/// What the browser tells us about its language and viewport.
#[derive(Debug, Clone, Default)]
pub struct ClientHints {
    pub accept_language: Option<String>,
    pub viewport_width: Option<u32>,
}

impl ClientHints {
    fn from_request(request: &Request) -> Self {
        let mut hints = ClientHints::default();
        for header in request.headers() {
            let value = header.value.as_str();
            if header.field.equiv("Accept-Language") {
                hints.accept_language = Some(value.to_string());
            } else if header.field.equiv("Sec-CH-Viewport-Width") || header.field.equiv("Viewport-Width") {
                hints.viewport_width = value.trim().parse().ok();
            }
        }
        hints
    }

    fn preferences(&self) -> Vec<String> {
        self.accept_language
            .as_deref()
            .map(l10n::accept_language)
            .unwrap_or_default()
    }
}

/// Load the document, start server, open browser, serve the board
pub fn start(port: u16, path: &Path, open_browser: bool) -> Result<()> {
    let doc = ResultsDocument::load(path)?;

    let addr = format!("127.0.0.1:{}", port);
    let server = Server::http(&addr).map_err(|e| BoardError::Server(e.to_string()))?;

    let url = format!("http://localhost:{}", port);
    log::info!("serving {} ({} teams) at {}", path.display(), doc.teams.len(), url);

    if open_browser {
        if let Err(e) = open::that(&url) {
            log::warn!("could not open browser: {}", e);
        }
    }

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &doc) {
            log::error!("request failed: {}", e);
        }
    }

    Ok(())
}

fn handle_request(request: Request, doc: &ResultsDocument) -> Result<()> {
    let url = request.url().to_string();
    let path = url.split('?').next().unwrap_or("/");
    let method = request.method().clone();
    log::debug!("{:?} {}", method, url);

    match (&method, path) {
        (&Method::Get, "/") => {
            let hints = ClientHints::from_request(&request);
            let page = page_html(doc, &url, &hints);
            let response = Response::from_string(page).with_header(content_type("text/html; charset=utf-8")?);
            request.respond(with_viewport_hints(response)?)?;
        }

        (&Method::Get, "/results.json") => {
            let json = serde_json::to_string(doc)?;
            let response = Response::from_string(json).with_header(content_type("application/json")?);
            request.respond(response)?;
        }

        // API: rendered view model for the query's state
        (&Method::Get, "/api/table") => {
            let hints = ClientHints::from_request(&request);
            let json = table_json(doc, &url, &hints)?;
            let response = Response::from_string(json).with_header(content_type("application/json")?);
            request.respond(with_viewport_hints(response)?)?;
        }

        _ => {
            let response = Response::from_string("Not found").with_status_code(404);
            request.respond(response)?;
        }
    }

    Ok(())
}

fn header(field: &str, value: &str) -> Result<Header> {
    Header::from_bytes(field.as_bytes(), value.as_bytes())
        .map_err(|_| BoardError::Server(format!("invalid header {}: {}", field, value)))
}

fn content_type(value: &str) -> Result<Header> {
    header("Content-Type", value)
}

/// Ask for the viewport width on later requests. The body depends on it.
fn with_viewport_hints<R: Read>(response: Response<R>) -> Result<Response<R>> {
    Ok(response
        .with_header(header("Accept-CH", VIEWPORT_HINTS)?)
        .with_header(header("Vary", &format!("Accept-Language, {}", VIEWPORT_HINTS))?))
}

fn view_for(doc: &ResultsDocument, params: &PageParams, hints: &ClientHints) -> RenderedView {
    let state = ViewState::from_preferences(&hints.preferences(), params.highlight_target())
        .with_detail_level(params.detail_level());
    view::render(doc, &state, hints.viewport_width)
}

/// Full page for a request URL such as `/?teamId=3&view=full`.
pub fn page_html(doc: &ResultsDocument, url: &str, hints: &ClientHints) -> String {
    let params = PageParams::from_url(url);
    let view = view_for(doc, &params, hints);

    let chrome = PageChrome {
        quiz_name: params.quiz_name.clone(),
        embedded: params.embedded(),
        toggle_href: Some(format!("?{}", params.with_view(view.toggle.target))),
    };

    let mut out = Vec::new();
    // Writing into a Vec cannot fail
    let _ = html::write_page(&mut out, &view, &chrome);
    String::from_utf8_lossy(&out).into_owned()
}

pub fn table_json(doc: &ResultsDocument, url: &str, hints: &ClientHints) -> Result<String> {
    let params = PageParams::from_url(url);
    let report = TableReport {
        generated: chrono::Local::now().to_rfc3339(),
        view: view_for(doc, &params, hints),
    };
    Ok(serde_json::to_string(&ApiResponse::success(report))?)
}
