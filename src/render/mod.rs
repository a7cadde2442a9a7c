//! Output formatters for rendered leaderboard views
//!
//! - **HTML**: the toggle control and table, as a fragment or a full page
//! - **JSON**: the rendered view model, for other front ends
//!
//! # Usage
//!
//! ```ignore
//! use quizboard::render;
//!
//! // Picks the format from the extension
//! render::generate("board.html", &view)?;  // HTML page
//! render::generate("board.json", &view)?;  // JSON
//! ```

pub mod html;
pub mod json;

use crate::view::RenderedView;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Html,
    Json,
}

impl Format {
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "json" => Format::Json,
            _ => Format::Html,
        }
    }
}

/// Write `view` to `path` in the format implied by its extension.
pub fn generate<P: AsRef<Path>>(path: P, view: &RenderedView) -> io::Result<()> {
    let path = path.as_ref();
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);

    match Format::from_path(path) {
        Format::Json => json::write(&mut file, view)?,
        Format::Html => html::write_page(&mut file, view, &html::PageChrome::default())?,
    }

    io::Write::flush(&mut file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::ResultsDocument;
    use crate::view::{render, ViewState};

    fn view() -> RenderedView {
        let doc = ResultsDocument::from_json(
            r#"{"Teams": [{"TeamId": 1, "TeamName": "Alpha", "Points": 10, "PlaceFrom": 1, "PlaceTo": 1}]}"#,
        )
        .unwrap();
        render(&doc, &ViewState::default(), None)
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(Format::from_path(Path::new("board.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("BOARD.JSON")), Format::Json);
        assert_eq!(Format::from_path(Path::new("board.html")), Format::Html);
        assert_eq!(Format::from_path(Path::new("board")), Format::Html);
    }

    #[test]
    fn test_generate_writes_both_formats() {
        let dir = std::env::temp_dir().join(format!("quizboard-render-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let html_path = dir.join("board.html");
        let json_path = dir.join("board.json");
        generate(&html_path, &view()).unwrap();
        generate(&json_path, &view()).unwrap();

        let html = std::fs::read_to_string(&html_path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<td>Alpha</td>"));

        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(json["table"]["rows"][0]["cells"][1]["text"], "Alpha");

        std::fs::remove_dir_all(&dir).ok();
    }
}
