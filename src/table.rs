//! Leaderboard table view model
//!
//! Turns a [`ResultsDocument`] into a [`TableSpec`]: column headers plus one
//! row of rendered cell text per team, in document order. Two layouts exist:
//!
//! - **Short**: `#`, team, points, place
//! - **Full**: `#`, team, one column per question, points, place
//!
//! Builders are pure. The same document and labels always produce the same
//! table, and the document is never modified.

use crate::l10n::Labels;
use crate::results::{ResultsDocument, Team};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    #[default]
    Short,
    Full,
}

impl DetailLevel {
    pub fn toggled(self) -> Self {
        match self {
            DetailLevel::Short => DetailLevel::Full,
            DetailLevel::Full => DetailLevel::Short,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DetailLevel::Short => "short",
            DetailLevel::Full => "full",
        }
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellRole {
    #[default]
    Data,
    /// Team name in the full layout, rendered as a non-bold `<th>`.
    RowHeader,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub text: String,
    pub role: CellRole,
    pub align: Align,
}

impl Cell {
    pub fn data(text: impl Into<String>) -> Self {
        Self { text: text.into(), role: CellRole::Data, align: Align::Left }
    }

    pub fn centered(text: impl Into<String>) -> Self {
        Self { text: text.into(), role: CellRole::Data, align: Align::Center }
    }

    pub fn row_header(text: impl Into<String>) -> Self {
        Self { text: text.into(), role: CellRole::RowHeader, align: Align::Left }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowEmphasis {
    #[default]
    Normal,
    /// The highlighted team's own row.
    Bold,
    /// Copy of the highlighted row pinned above the standings.
    Pinned,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub cells: Vec<Cell>,
    pub emphasis: RowEmphasis,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells, emphasis: RowEmphasis::Normal }
    }

    pub fn first_text(&self) -> Option<&str> {
        self.cells.first().map(|c| c.text.as_str())
    }

    pub fn texts(&self) -> Vec<&str> {
        self.cells.iter().map(|c| c.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSpec {
    pub layout: DetailLevel,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    pub highlighted_row_index: Option<usize>,
}

impl TableSpec {
    /// Every row has exactly one cell per column.
    pub fn is_rectangular(&self) -> bool {
        self.rows.iter().all(|r| r.cells.len() == self.columns.len())
    }
}

pub fn build(doc: &ResultsDocument, labels: &Labels, level: DetailLevel) -> TableSpec {
    match level {
        DetailLevel::Short => build_short(doc, labels),
        DetailLevel::Full => build_full(doc, labels),
    }
}

pub fn build_short(doc: &ResultsDocument, labels: &Labels) -> TableSpec {
    let columns = vec![
        "#".to_string(),
        labels.team.to_string(),
        labels.points.to_string(),
        labels.place.to_string(),
    ];

    let rows = doc
        .teams
        .iter()
        .map(|team| {
            Row::new(vec![
                Cell::data(team.team_id.as_str()),
                Cell::data(team.team_name.as_str()),
                Cell::centered(team.points_text()),
                Cell::centered(team.place_text()),
            ])
        })
        .collect();

    TableSpec { layout: DetailLevel::Short, columns, rows, highlighted_row_index: None }
}

pub fn build_full(doc: &ResultsDocument, labels: &Labels) -> TableSpec {
    let mut columns = Vec::with_capacity(doc.questions.len() + 4);
    columns.push("#".to_string());
    columns.push(labels.team.to_string());
    columns.extend(doc.questions.iter().map(|q| q.name.clone()));
    columns.push(labels.points.to_string());
    columns.push(labels.place.to_string());

    let rows = doc.teams.iter().map(|team| full_row(doc, team)).collect();

    TableSpec { layout: DetailLevel::Full, columns, rows, highlighted_row_index: None }
}

fn full_row(doc: &ResultsDocument, team: &Team) -> Row {
    let mut cells = Vec::with_capacity(doc.questions.len() + 4);
    cells.push(Cell::data(team.team_id.as_str()));
    cells.push(Cell::row_header(team.team_name.as_str()));
    cells.extend(doc.questions.iter().map(|q| Cell::data(team.answer_text(q))));
    cells.push(Cell::centered(team.points_text()));
    cells.push(Cell::centered(team.place_text()));
    Row::new(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::l10n::{labels, Language};

    fn single_team_document() -> ResultsDocument {
        ResultsDocument::from_json(
            r#"{"Teams": [{"TeamId": 1, "TeamName": "Alpha", "Points": 10,
                "PlaceFrom": 1, "PlaceTo": 1, "Details": {}}],
                "Questions": []}"#,
        )
        .unwrap()
    }

    fn tournament_document() -> ResultsDocument {
        ResultsDocument::from_json(
            r#"{
                "Teams": [
                    {"TeamId": 3, "TeamName": "Owls", "Points": 5, "PlaceFrom": 1, "PlaceTo": 1,
                     "Details": {"[1,1]": 1, "[1,2]": 1, "[2,1]": 1}},
                    {"TeamId": 12, "TeamName": "Foxes", "Points": 4, "PlaceFrom": 2, "PlaceTo": 3,
                     "Details": {"[1,1]": 1, "[2,1]": 0}},
                    {"TeamId": 5, "TeamName": "Bears", "Points": 4, "PlaceFrom": 2, "PlaceTo": 3,
                     "Details": {}}
                ],
                "Questions": [
                    {"Name": "1", "Key": [1, 1]},
                    {"Name": "2", "Key": [1, 2]},
                    {"Name": "3", "Key": [2, 1]}
                ]
            }"#,
        )
        .unwrap()
    }

    // ==========================================================================
    // SHORT LAYOUT TESTS
    // ==========================================================================

    #[test]
    fn test_short_single_team_scenario() {
        let table = build_short(&single_team_document(), labels(Language::En));

        assert_eq!(table.columns, vec!["#", "Team", "Points", "Place"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].texts(), vec!["1", "Alpha", "10", "1"]);
        assert_eq!(table.highlighted_row_index, None);
    }

    #[test]
    fn test_short_row_and_column_counts() {
        let doc = tournament_document();
        let table = build_short(&doc, labels(Language::En));

        assert_eq!(table.columns.len(), 4);
        assert_eq!(table.rows.len(), doc.teams.len());
        assert!(table.is_rectangular());
    }

    #[test]
    fn test_short_keeps_document_order() {
        let table = build_short(&tournament_document(), labels(Language::En));
        let ids: Vec<_> = table.rows.iter().filter_map(|r| r.first_text()).collect();
        assert_eq!(ids, vec!["3", "12", "5"], "rows must not be re-sorted");
    }

    #[test]
    fn test_short_shared_place_range() {
        let table = build_short(&tournament_document(), labels(Language::En));
        assert_eq!(table.rows[0].cells[3].text, "1");
        assert_eq!(table.rows[1].cells[3].text, "2-3");
    }

    #[test]
    fn test_short_localized_headers() {
        let table = build_short(&tournament_document(), labels(Language::Uk));
        assert_eq!(table.columns, vec!["#", "Команда", "Очки", "Місце"]);
    }

    #[test]
    fn test_points_and_place_are_centered() {
        let table = build_short(&tournament_document(), labels(Language::En));
        let aligns: Vec<_> = table.rows[0].cells.iter().map(|c| c.align).collect();
        assert_eq!(aligns, vec![Align::Left, Align::Left, Align::Center, Align::Center]);
    }

    // ==========================================================================
    // FULL LAYOUT TESTS
    // ==========================================================================

    #[test]
    fn test_full_row_and_column_counts() {
        let doc = tournament_document();
        let table = build_full(&doc, labels(Language::En));

        assert_eq!(table.columns.len(), 2 + doc.questions.len() + 2);
        assert_eq!(table.rows.len(), doc.teams.len());
        assert!(table.is_rectangular());
    }

    #[test]
    fn test_full_columns_follow_question_order() {
        let table = build_full(&tournament_document(), labels(Language::Ru));
        assert_eq!(table.columns, vec!["#", "Команда", "1", "2", "3", "Очки", "Место"]);
    }

    #[test]
    fn test_full_cells_look_up_details_by_key() {
        let table = build_full(&tournament_document(), labels(Language::En));

        assert_eq!(table.rows[0].texts(), vec!["3", "Owls", "1", "1", "1", "5", "1"]);
        assert_eq!(table.rows[1].texts(), vec!["12", "Foxes", "1", "", "0", "4", "2-3"]);
        assert_eq!(table.rows[2].texts(), vec!["5", "Bears", "", "", "", "4", "2-3"]);
    }

    #[test]
    fn test_full_team_name_is_row_header() {
        let table = build_full(&tournament_document(), labels(Language::En));
        assert_eq!(table.rows[0].cells[1].role, CellRole::RowHeader);
        assert_eq!(table.rows[0].cells[0].role, CellRole::Data);
    }

    #[test]
    fn test_full_without_questions_matches_short_columns() {
        let doc = single_team_document();
        let table = build_full(&doc, labels(Language::En));
        assert_eq!(table.columns, vec!["#", "Team", "Points", "Place"]);
        assert_eq!(table.rows[0].texts(), vec!["1", "Alpha", "10", "1"]);
    }

    // ==========================================================================
    // EDGE CASES
    // ==========================================================================

    #[test]
    fn test_empty_teams_yields_header_only() {
        let doc = ResultsDocument::from_json(r#"{"Teams": [], "Questions": [{"Name": "1", "Key": 1}]}"#).unwrap();

        let short = build_short(&doc, labels(Language::En));
        let full = build_full(&doc, labels(Language::En));

        assert_eq!(short.columns.len(), 4);
        assert!(short.rows.is_empty());
        assert_eq!(full.columns.len(), 5);
        assert!(full.rows.is_empty());
    }

    #[test]
    fn test_colliding_keys_show_same_value() {
        let doc = ResultsDocument::from_json(
            r#"{"Teams": [{"TeamId": 1, "TeamName": "A", "Points": 1, "PlaceFrom": 1, "PlaceTo": 1,
                "Details": {"[1]": "x"}}],
                "Questions": [{"Name": "a", "Key": [1]}, {"Name": "b", "Key": [1]}]}"#,
        )
        .unwrap();

        let table = build_full(&doc, labels(Language::En));
        assert_eq!(table.rows[0].cells[2].text, "x");
        assert_eq!(table.rows[0].cells[3].text, "x");
    }

    // ==========================================================================
    // PURITY TESTS
    // ==========================================================================

    #[test]
    fn test_building_twice_is_identical() {
        let doc = tournament_document();
        let l = labels(Language::En);

        assert_eq!(build_short(&doc, l), build_short(&doc, l));
        assert_eq!(build_full(&doc, l), build_full(&doc, l));
    }

    #[test]
    fn test_full_then_short_reproduces_short() {
        let doc = tournament_document();
        let before = doc.clone();
        let l = labels(Language::En);

        let short = build(&doc, l, DetailLevel::Short);
        let _full = build(&doc, l, DetailLevel::Full);
        let short_again = build(&doc, l, DetailLevel::Full.toggled());

        assert_eq!(short, short_again);
        assert_eq!(doc, before, "building must not touch the document");
    }

    #[test]
    fn test_detail_level_toggle() {
        assert_eq!(DetailLevel::default(), DetailLevel::Short);
        assert_eq!(DetailLevel::Short.toggled(), DetailLevel::Full);
        assert_eq!(DetailLevel::Full.toggled().toggled(), DetailLevel::Full);
    }
}
