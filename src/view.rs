//! View controller: the short/full toggle state machine
//!
//! The controller owns a [`ViewState`] and, once the results document has
//! arrived, rebuilds the whole view on every transition and hands it to a
//! [`DisplayRegion`]. Nothing is rendered until a document is loaded; a failed
//! load is logged and leaves the region untouched.
//!
//! ```text
//!   Loading --document_loaded--> Short <--toggle--> Full
//!      |
//!      +--document_failed--> Loading (nothing rendered)
//! ```

use crate::error::BoardError;
use crate::highlight;
use crate::l10n::{self, Language};
use crate::results::ResultsDocument;
use crate::table::{self, DetailLevel, TableSpec};
use serde::Serialize;
use std::sync::Arc;

/// Minimum viewport width for the sticky table header.
pub const STICKY_HEADER_MIN_WIDTH: u32 = 800;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub language: Language,
    pub detail_level: DetailLevel,
    pub highlight_target: Option<String>,
}

impl ViewState {
    pub fn new(language: Language, highlight_target: Option<String>) -> Self {
        Self { language, detail_level: DetailLevel::Short, highlight_target }
    }

    /// Resolve the language from browser-style preferences.
    pub fn from_preferences<S: AsRef<str>>(preferred: &[S], highlight_target: Option<String>) -> Self {
        Self::new(l10n::resolve(preferred), highlight_target)
    }

    pub fn with_detail_level(mut self, level: DetailLevel) -> Self {
        self.detail_level = level;
        self
    }
}

/// The control that switches to the other detail level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleControl {
    pub label: &'static str,
    pub target: DetailLevel,
}

/// Everything a display region needs for one render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedView {
    pub language: Language,
    pub toggle: ToggleControl,
    pub table: TableSpec,
    pub sticky_header: bool,
}

/// Where rendered views end up: a DOM container, an HTML buffer.
pub trait DisplayRegion {
    /// Replace the region's whole content with `view`.
    fn replace(&mut self, view: &RenderedView);

    /// Current viewport width in CSS pixels, if known.
    fn viewport_width(&self) -> Option<u32> {
        None
    }
}

pub fn sticky_header_requested(viewport_width: Option<u32>) -> bool {
    viewport_width.is_some_and(|w| w >= STICKY_HEADER_MIN_WIDTH)
}

pub fn toggle_control(language: Language, current: DetailLevel) -> ToggleControl {
    let labels = l10n::labels(language);
    let target = current.toggled();
    let label = match target {
        DetailLevel::Full => labels.to_full_view,
        DetailLevel::Short => labels.to_short_view,
    };
    ToggleControl { label, target }
}

/// Build the view for `state` from scratch.
pub fn render(doc: &ResultsDocument, state: &ViewState, viewport_width: Option<u32>) -> RenderedView {
    let labels = l10n::labels(state.language);
    let table = table::build(doc, labels, state.detail_level);
    let table = highlight::apply(table, state.highlight_target.as_deref());

    RenderedView {
        language: state.language,
        toggle: toggle_control(state.language, state.detail_level),
        table,
        sticky_header: sticky_header_requested(viewport_width),
    }
}

#[derive(Debug, Clone, Default)]
pub struct ViewController {
    state: ViewState,
    document: Option<Arc<ResultsDocument>>,
}

impl ViewController {
    pub fn new(state: ViewState) -> Self {
        Self { state, document: None }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    /// Store the fetched document and render the initial view.
    pub fn document_loaded<D, R>(&mut self, doc: D, region: &mut R)
    where
        D: Into<Arc<ResultsDocument>>,
        R: DisplayRegion + ?Sized,
    {
        let doc = doc.into();
        log::debug!(
            "results document loaded: {} teams, {} questions",
            doc.teams.len(),
            doc.questions.len()
        );
        self.document = Some(doc);
        self.refresh(region);
    }

    /// The fetch failed. Nothing is rendered.
    pub fn document_failed(&mut self, err: &BoardError) {
        log::warn!("results document unavailable, nothing rendered: {}", err);
    }

    /// Flip the detail level and re-render. Returns false while loading.
    pub fn toggle<R: DisplayRegion + ?Sized>(&mut self, region: &mut R) -> bool {
        if self.document.is_none() {
            return false;
        }
        self.state.detail_level = self.state.detail_level.toggled();
        self.refresh(region);
        true
    }

    /// Re-render the current state, e.g. after a viewport resize.
    pub fn refresh<R: DisplayRegion + ?Sized>(&self, region: &mut R) {
        if let Some(view) = self.render_view(region.viewport_width()) {
            log::debug!(
                "rendering {} view: {} rows, highlighted row {:?}",
                self.state.detail_level,
                view.table.rows.len(),
                view.table.highlighted_row_index
            );
            region.replace(&view);
        }
    }

    pub fn render_view(&self, viewport_width: Option<u32>) -> Option<RenderedView> {
        self.document
            .as_deref()
            .map(|doc| render(doc, &self.state, viewport_width))
    }
}
