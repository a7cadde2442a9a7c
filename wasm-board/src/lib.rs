//! Browser leaderboard built from the quizboard view model
//!
//! The host page fetches the results document and hands its text to
//! [`Board::show`]. The board resolves the language from
//! `navigator.languages`, renders into a container element and keeps a single
//! click listener on its toggle control for the life of the page.
//!
//! ```js
//! import init, { Board } from "./quizboard_wasm.js";
//!
//! await init();
//! const board = new Board("mainContent", params.get("teamId"));
//! board.set_sticky_handler(table => $(table).stickyTable());
//! fetch(resultsUrl).then(r => r.text()).then(text => board.show(text));
//! ```

use quizboard::params::PageParams;
use quizboard::render::html::cell_style;
use quizboard::table::{CellRole, DetailLevel, RowEmphasis, TableSpec};
use quizboard::{BoardError, DisplayRegion, RenderedView, ResultsDocument, ViewController, ViewState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, Window};

struct DomRegion {
    window: Window,
    document: Document,
    container: Element,
    menu: Element,
    toggle: HtmlElement,
    // Table waiting for the host's sticky handler, called once no borrow is held
    pending_sticky: Option<Element>,
}

impl DomRegion {
    fn new(window: Window, document: Document, container: Element) -> Result<Self, JsValue> {
        let menu = document.create_element("div")?;
        menu.set_class_name("board-menu");

        let toggle: HtmlElement = document.create_element("a")?.dyn_into()?;
        toggle.set_class_name("board-toggle");
        menu.append_child(&toggle)?;

        Ok(Self { window, document, container, menu, toggle, pending_sticky: None })
    }

    fn try_replace(&mut self, view: &RenderedView) -> Result<(), JsValue> {
        self.toggle.set_text_content(Some(view.toggle.label));
        self.toggle.set_attribute("data-detail-level", view.toggle.target.as_str())?;

        let (wrapper, table) = self.build_table(&view.table)?;

        // Drop the previous table; the menu node (and its listener) is reused
        self.container.set_text_content(None);
        self.container.append_child(&self.menu)?;
        self.container.append_child(&wrapper)?;

        self.pending_sticky = None;
        if view.sticky_header {
            table.set_attribute("data-sticky-header", "")?;
            self.pending_sticky = Some(table);
        }

        Ok(())
    }

    fn build_table(&self, spec: &TableSpec) -> Result<(Element, Element), JsValue> {
        let wrapper = self.element("div")?;
        wrapper.set_attribute("style", "display: grid")?;
        let container = self.element("div")?;
        container.set_class_name("table-container");
        wrapper.append_child(&container)?;

        let table = self.element("table")?;
        table.set_class_name(match spec.layout {
            DetailLevel::Short => "table is-hoverable",
            DetailLevel::Full => "table is-hoverable is-fullwidth",
        });
        container.append_child(&table)?;

        let thead = self.element("thead")?;
        let header_row = self.element("tr")?;
        for column in &spec.columns {
            let th = self.element("th")?;
            th.set_text_content(Some(column));
            header_row.append_child(&th)?;
        }
        thead.append_child(&header_row)?;
        table.append_child(&thead)?;

        let tbody = self.element("tbody")?;
        for row in &spec.rows {
            let tr = self.element("tr")?;
            match row.emphasis {
                RowEmphasis::Normal => {}
                RowEmphasis::Bold => tr.set_class_name("is-highlighted"),
                RowEmphasis::Pinned => tr.set_class_name("is-pinned"),
            }

            for cell in &row.cells {
                let td = self.element(match cell.role {
                    CellRole::Data => "td",
                    CellRole::RowHeader => "th",
                })?;
                let style = cell_style(cell, row.emphasis);
                if !style.is_empty() {
                    td.set_attribute("style", &style)?;
                }
                td.set_text_content(Some(&cell.text));
                tr.append_child(&td)?;
            }
            tbody.append_child(&tr)?;
        }
        table.append_child(&tbody)?;

        Ok((wrapper, table))
    }

    fn element(&self, tag: &str) -> Result<Element, JsValue> {
        self.document.create_element(tag)
    }
}

impl DisplayRegion for DomRegion {
    fn replace(&mut self, view: &RenderedView) {
        if let Err(e) = self.try_replace(view) {
            log::error!("failed to render board: {:?}", e);
        }
    }

    fn viewport_width(&self) -> Option<u32> {
        let inner = self.window.inner_width().ok().and_then(|w| w.as_f64()).unwrap_or(0.0);
        let client = self
            .document
            .document_element()
            .map(|el| f64::from(el.client_width()))
            .unwrap_or(0.0);
        Some(inner.max(client) as u32)
    }
}

struct Inner {
    controller: ViewController,
    region: DomRegion,
}

impl Inner {
    fn toggle(&mut self) {
        let Inner { controller, region } = self;
        controller.toggle(region);
    }
}

type StickyHandler = Rc<RefCell<Option<js_sys::Function>>>;

/// Run `f` on the board, then hand a freshly rendered sticky table to the
/// host. The handler runs with no borrow held so it may call back into the
/// board.
fn update(inner: &RefCell<Inner>, sticky: &RefCell<Option<js_sys::Function>>, f: impl FnOnce(&mut Inner)) {
    let table = {
        let mut inner = inner.borrow_mut();
        f(&mut *inner);
        inner.region.pending_sticky.take()
    };
    let handler = sticky.borrow().clone();

    if let (Some(table), Some(handler)) = (table, handler) {
        if let Err(e) = handler.call1(&JsValue::NULL, &table) {
            log::error!("sticky header handler failed: {:?}", e);
        }
    }
}

#[wasm_bindgen]
pub struct Board {
    inner: Rc<RefCell<Inner>>,
    sticky: StickyHandler,
    _on_toggle: Closure<dyn FnMut(Event)>,
}

#[wasm_bindgen]
impl Board {
    /// Attach to the element with `container_id`. `team_id` is the raw
    /// `teamId` query value; blank or `0` disables highlighting.
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str, team_id: Option<String>) -> Result<Board, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element #{}", container_id)))?;

        let preferences = browser_languages(&window);
        let target = PageParams { team_id: team_id.unwrap_or_default(), ..PageParams::default() }.highlight_target();
        let state = ViewState::from_preferences(&preferences, target);
        log::debug!("board language {} from {:?}", state.language, preferences);

        let region = DomRegion::new(window, document, container)?;
        let toggle = region.toggle.clone();
        let inner = Rc::new(RefCell::new(Inner { controller: ViewController::new(state), region }));

        let sticky: StickyHandler = Rc::new(RefCell::new(None));

        let (handle, sticky_handle) = (Rc::clone(&inner), Rc::clone(&sticky));
        let on_toggle = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            update(&handle, &sticky_handle, Inner::toggle);
        });
        toggle.add_event_listener_with_callback("click", on_toggle.as_ref().unchecked_ref())?;

        Ok(Board { inner, sticky, _on_toggle: on_toggle })
    }

    /// Render the fetched results document text. Invalid documents are
    /// logged and nothing is rendered.
    pub fn show(&self, json: &str) {
        match ResultsDocument::from_json(json) {
            Ok(doc) => {
                for key in doc.key_collisions() {
                    log::warn!("questions share canonical key {}", key);
                }
                update(&self.inner, &self.sticky, |inner| {
                    let Inner { controller, region } = inner;
                    controller.document_loaded(doc, region);
                });
            }
            Err(e) => self.inner.borrow_mut().controller.document_failed(&e),
        }
    }

    /// Render an already-parsed document object.
    pub fn show_value(&self, value: &JsValue) {
        match js_sys::JSON::stringify(value).ok().and_then(|s| s.as_string()) {
            Some(json) => self.show(&json),
            None => {
                let err = BoardError::Unavailable("results document is not serializable".to_string());
                self.inner.borrow_mut().controller.document_failed(&err);
            }
        }
    }

    /// The host's fetch failed. Nothing is rendered.
    pub fn failed(&self, message: &str) {
        let err = BoardError::Unavailable(message.to_string());
        self.inner.borrow_mut().controller.document_failed(&err);
    }

    pub fn toggle(&self) {
        update(&self.inner, &self.sticky, Inner::toggle);
    }

    /// Re-render, e.g. after the viewport was resized.
    pub fn refresh(&self) {
        update(&self.inner, &self.sticky, |inner| {
            let Inner { controller, region } = inner;
            controller.refresh(region);
        });
    }

    /// Called with the `<table>` element whenever a sticky header is wanted.
    pub fn set_sticky_handler(&self, handler: js_sys::Function) {
        *self.sticky.borrow_mut() = Some(handler);
    }

    /// Current view model, or `undefined` before a document is shown.
    pub fn view(&self) -> Result<JsValue, JsValue> {
        let inner = self.inner.borrow();
        match inner.controller.render_view(inner.region.viewport_width()) {
            Some(view) => serde_wasm_bindgen::to_value(&view).map_err(JsValue::from),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    pub fn language(&self) -> String {
        self.inner.borrow().controller.state().language.code().to_string()
    }
}

fn browser_languages(window: &Window) -> Vec<String> {
    let navigator = window.navigator();
    let mut languages: Vec<String> = navigator.languages().iter().filter_map(|v| v.as_string()).collect();
    if languages.is_empty() {
        languages.extend(navigator.language());
    }
    languages
}

struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = JsValue::from_str(&format!("[quizboard] {}", record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&message),
            log::Level::Warn => web_sys::console::warn_1(&message),
            log::Level::Info => web_sys::console::info_1(&message),
            log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&message),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

#[wasm_bindgen(start)]
pub fn init() {
    // Set panic hook for better error messages
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }
}
