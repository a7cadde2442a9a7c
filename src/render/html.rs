//! HTML rendering of leaderboard views
//!
//! All text coming from the results document (team names, ids, question
//! names, answers) and from the query string goes through [`esc`]. Nothing is
//! interpolated raw.

use crate::params::PageParams;
use crate::table::{Align, Cell, CellRole, DetailLevel, Row, RowEmphasis, TableSpec};
use crate::view::{DisplayRegion, RenderedView};
use std::io::{self, Write};

/// Page-level settings around the board.
#[derive(Debug, Clone, Default)]
pub struct PageChrome {
    /// Quiz name shown in the title and header.
    pub quiz_name: String,
    /// Embedded pages skip the header.
    pub embedded: bool,
    /// Link target of the toggle control, e.g. `?teamId=3&view=full`.
    pub toggle_href: Option<String>,
}

/// Complete HTML document around the board fragment.
pub fn write_page<W: Write>(writer: &mut W, view: &RenderedView, chrome: &PageChrome) -> io::Result<()> {
    let labels = view.language.labels();
    let title = if chrome.quiz_name.is_empty() {
        labels.results.to_string()
    } else {
        format!("{} - {}", chrome.quiz_name, labels.results)
    };

    write!(
        writer,
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="description" content="{title}">
    <title>{title}</title>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bulma@0.9.4/css/bulma.min.css">
    <style>
        .board-menu {{ margin-bottom: 0.75rem; }}
        .board-toggle {{ cursor: pointer; }}
        table[data-sticky-header] thead th {{ position: sticky; top: 0; background: #fff; z-index: 1; }}
    </style>
</head>
<body>
"#,
        lang = view.language.code(),
        title = esc(&title),
    )?;

    if !chrome.embedded {
        writeln!(
            writer,
            r#"<section class="hero is-small"><div class="hero-body"><p class="title">{}</p></div></section>"#,
            esc(&chrome.quiz_name)
        )?;
    }

    writeln!(writer, r#"<section class="section"><div id="mainContent">"#)?;
    write_fragment(writer, view, chrome.toggle_href.as_deref())?;
    writeln!(writer, "</div></section>\n</body>\n</html>")
}

/// Toggle control followed by the table.
pub fn write_fragment<W: Write>(writer: &mut W, view: &RenderedView, toggle_href: Option<&str>) -> io::Result<()> {
    write!(
        writer,
        r#"<div class="board-menu"><a class="board-toggle" data-detail-level="{}""#,
        view.toggle.target
    )?;
    if let Some(href) = toggle_href {
        write!(writer, r#" href="{}""#, esc(href))?;
    }
    writeln!(writer, ">{}</a></div>", esc(view.toggle.label))?;

    write_table(writer, &view.table, view.sticky_header)
}

pub fn write_table<W: Write>(writer: &mut W, table: &TableSpec, sticky_header: bool) -> io::Result<()> {
    let class = match table.layout {
        DetailLevel::Short => "table is-hoverable",
        DetailLevel::Full => "table is-hoverable is-fullwidth",
    };

    writeln!(writer, r#"<div style="display: grid">"#)?;
    writeln!(writer, r#"<div class="table-container">"#)?;
    write!(writer, r#"<table class="{}""#, class)?;
    if sticky_header {
        write!(writer, " data-sticky-header")?;
    }
    writeln!(writer, ">")?;

    writeln!(writer, "<thead>")?;
    write!(writer, "<tr>")?;
    for column in &table.columns {
        write!(writer, "<th>{}</th>", esc(column))?;
    }
    writeln!(writer, "</tr>")?;
    writeln!(writer, "</thead>")?;

    writeln!(writer, "<tbody>")?;
    for row in &table.rows {
        write_row(writer, row)?;
    }
    writeln!(writer, "</tbody>")?;

    writeln!(writer, "</table>")?;
    writeln!(writer, "</div>")?;
    writeln!(writer, "</div>")
}

fn write_row<W: Write>(writer: &mut W, row: &Row) -> io::Result<()> {
    match row.emphasis {
        RowEmphasis::Normal => write!(writer, "<tr>")?,
        RowEmphasis::Bold => write!(writer, r#"<tr class="is-highlighted">"#)?,
        RowEmphasis::Pinned => write!(writer, r#"<tr class="is-pinned">"#)?,
    }

    for cell in &row.cells {
        let tag = match cell.role {
            CellRole::Data => "td",
            CellRole::RowHeader => "th",
        };
        let style = cell_style(cell, row.emphasis);
        if style.is_empty() {
            write!(writer, "<{tag}>{}</{tag}>", esc(&cell.text))?;
        } else {
            write!(writer, r#"<{tag} style="{}">{}</{tag}>"#, esc(&style), esc(&cell.text))?;
        }
    }

    writeln!(writer, "</tr>")
}

/// Inline style for one cell. Shared by the DOM renderer.
pub fn cell_style(cell: &Cell, emphasis: RowEmphasis) -> String {
    let mut decls: Vec<&str> = Vec::new();

    if cell.role == CellRole::RowHeader {
        decls.push("white-space: nowrap");
        if emphasis == RowEmphasis::Normal {
            decls.push("font-weight: normal");
        }
    }
    if cell.align == Align::Center {
        decls.push("text-align: center");
    }
    if emphasis != RowEmphasis::Normal {
        decls.push("font-weight: bold");
    }
    if emphasis == RowEmphasis::Pinned {
        decls.push("border-bottom: double");
    }

    decls.join("; ")
}

/// Escape text for element content and quoted attribute values.
pub fn esc<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// In-memory display region holding the last rendered fragment.
///
/// With `link_params` set, the toggle control links to the same page at the
/// detail level it switches to.
#[derive(Debug, Clone, Default)]
pub struct HtmlRegion {
    html: String,
    link_params: Option<PageParams>,
    viewport_width: Option<u32>,
}

impl HtmlRegion {
    pub fn new(link_params: Option<PageParams>, viewport_width: Option<u32>) -> Self {
        Self { html: String::new(), link_params, viewport_width }
    }

    fn toggle_href(&self, view: &RenderedView) -> Option<String> {
        self.link_params
            .as_ref()
            .map(|params| format!("?{}", params.with_view(view.toggle.target)))
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }
}

impl DisplayRegion for HtmlRegion {
    fn replace(&mut self, view: &RenderedView) {
        let href = self.toggle_href(view);
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail
        let _ = write_fragment(&mut buf, view, href.as_deref());
        self.html = String::from_utf8_lossy(&buf).into_owned();
    }

    fn viewport_width(&self) -> Option<u32> {
        self.viewport_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::l10n::Language;
    use crate::results::ResultsDocument;
    use crate::view::{render, ViewController, ViewState};

    fn document() -> ResultsDocument {
        ResultsDocument::from_json(
            r#"{"Teams": [
                {"TeamId": 1, "TeamName": "<b>Alpha</b> & Co", "Points": 10, "PlaceFrom": 1, "PlaceTo": 1,
                 "Details": {"[1]": "<i>1</i>"}},
                {"TeamId": 2, "TeamName": "Beta", "Points": 8, "PlaceFrom": 2, "PlaceTo": 3}
            ], "Questions": [{"Name": "Q\"1\"", "Key": [1]}]}"#,
        )
        .unwrap()
    }

    fn fragment(view: &RenderedView, href: Option<&str>) -> String {
        let mut out = Vec::new();
        write_fragment(&mut out, view, href).unwrap();
        String::from_utf8(out).unwrap()
    }

    // ==========================================================================
    // ESCAPING TESTS
    // ==========================================================================
    //
    // Team names come from whoever registered the team. Markup in them must
    // show up as text.
    // ==========================================================================

    #[test]
    fn test_esc() {
        assert_eq!(esc("<a href='x'>\"&\"</a>"), "&lt;a href=&#39;x&#39;&gt;&quot;&amp;&quot;&lt;/a&gt;");
        assert_eq!(esc("Кубок 2024"), "Кубок 2024");
    }

    #[test]
    fn test_team_names_are_escaped() {
        let html = fragment(&render(&document(), &ViewState::default(), None), None);

        assert!(html.contains("<td>&lt;b&gt;Alpha&lt;/b&gt; &amp; Co</td>"));
        assert!(!html.contains("<b>Alpha</b>"));
    }

    #[test]
    fn test_question_names_and_answers_are_escaped() {
        let state = ViewState::default().with_detail_level(DetailLevel::Full);
        let html = fragment(&render(&document(), &state, None), None);

        assert!(html.contains("<th>Q&quot;1&quot;</th>"));
        assert!(html.contains("<td>&lt;i&gt;1&lt;/i&gt;</td>"));
    }

    #[test]
    fn test_toggle_href_is_escaped() {
        let html = fragment(&render(&document(), &ViewState::default(), None), Some("?teamId=1&view=full"));
        assert!(html.contains(r#"href="?teamId=1&amp;view=full""#));
    }

    // ==========================================================================
    // STRUCTURE TESTS
    // ==========================================================================

    #[test]
    fn test_toggle_precedes_table() {
        let html = fragment(&render(&document(), &ViewState::default(), None), None);

        let toggle = html.find("more details").unwrap();
        let table = html.find("<table").unwrap();
        assert!(toggle < table);
        assert!(html.contains(r#"data-detail-level="full""#));
        assert!(html.contains("<thead>") && html.contains("<tbody>"));
    }

    #[test]
    fn test_layout_classes() {
        let short = fragment(&render(&document(), &ViewState::default(), None), None);
        let full_state = ViewState::default().with_detail_level(DetailLevel::Full);
        let full = fragment(&render(&document(), &full_state, None), None);

        assert!(short.contains(r#"<table class="table is-hoverable">"#));
        assert!(full.contains(r#"<table class="table is-hoverable is-fullwidth">"#));
    }

    #[test]
    fn test_full_layout_team_name_is_th() {
        let state = ViewState::default().with_detail_level(DetailLevel::Full);
        let html = fragment(&render(&document(), &state, None), None);
        assert!(html.contains(r#"<th style="white-space: nowrap; font-weight: normal">Beta</th>"#));
    }

    #[test]
    fn test_sticky_header_marker() {
        let wide = fragment(&render(&document(), &ViewState::default(), Some(1280)), None);
        let narrow = fragment(&render(&document(), &ViewState::default(), Some(600)), None);

        assert!(wide.contains("data-sticky-header"));
        assert!(!narrow.contains("data-sticky-header"));
    }

    #[test]
    fn test_highlighted_rows_are_styled() {
        let state = ViewState::new(Language::En, Some("2".into()));
        let html = fragment(&render(&document(), &state, None), None);

        let pinned = html.find(r#"<tr class="is-pinned">"#).unwrap();
        let bold = html.find(r#"<tr class="is-highlighted">"#).unwrap();
        assert!(pinned < bold, "pinned copy comes first");
        assert!(html.contains(r#"<td style="font-weight: bold; border-bottom: double">Beta</td>"#));
        assert!(html.contains(r#"<td style="font-weight: bold">Beta</td>"#));
        assert!(html.contains(r#"<td style="text-align: center; font-weight: bold">2-3</td>"#));
    }

    #[test]
    fn test_cell_style_combinations() {
        let plain = Cell::data("x");
        let header = Cell::row_header("x");
        assert_eq!(cell_style(&plain, RowEmphasis::Normal), "");
        assert_eq!(cell_style(&header, RowEmphasis::Bold), "white-space: nowrap; font-weight: bold");
    }

    // ==========================================================================
    // PAGE AND REGION TESTS
    // ==========================================================================

    #[test]
    fn test_page_title_and_embedded_mode() {
        let view = render(&document(), &ViewState::new(Language::Uk, None), None);

        let mut out = Vec::new();
        let chrome = PageChrome { quiz_name: "Cup <1>".into(), embedded: false, toggle_href: None };
        write_page(&mut out, &view, &chrome).unwrap();
        let page = String::from_utf8(out).unwrap();
        assert!(page.contains("<title>Cup &lt;1&gt; - Результати</title>"));
        assert!(page.contains(r#"<html lang="uk">"#));
        assert!(page.contains("hero"));

        let mut out = Vec::new();
        let chrome = PageChrome { embedded: true, ..chrome };
        write_page(&mut out, &view, &chrome).unwrap();
        assert!(!String::from_utf8(out).unwrap().contains(r#"class="hero"#));
    }

    #[test]
    fn test_html_region_replaces_content() {
        let mut controller = ViewController::new(ViewState::default());
        let mut region = HtmlRegion::new(None, None);

        controller.document_loaded(document(), &mut region);
        assert!(region.html().contains("more details"));
        assert!(!region.html().contains("href="));

        controller.toggle(&mut region);
        assert!(region.html().contains("less details"));
        assert!(!region.html().contains("more details"), "content is replaced, not appended");
        assert_eq!(region.html().matches("<table").count(), 1);
    }

    #[test]
    fn test_html_region_toggle_link_follows_state() {
        let params = PageParams::parse("quiz=5&teamId=2");
        let mut controller = ViewController::new(ViewState::default());
        let mut region = HtmlRegion::new(Some(params), None);

        controller.document_loaded(document(), &mut region);
        assert!(region.html().contains("view=full"));
        assert!(region.html().contains("teamId=2"));

        controller.toggle(&mut region);
        let menu = region.html().lines().next().unwrap();
        assert!(menu.contains("less details"));
        assert!(menu.contains("view=short"));
        assert!(!menu.contains("view=full"));

        controller.toggle(&mut region);
        assert!(region.html().lines().next().unwrap().contains("view=full"));
    }
}
