//! Results document model
//!
//! The results document is produced upstream (scores are already computed) and
//! fetched once per session. It is read-only from this crate's point of view.
//!
//! ```json
//! {
//!   "Teams": [
//!     {"TeamId": 1, "TeamName": "Alpha", "Points": 10, "PlaceFrom": 1, "PlaceTo": 1,
//!      "Details": {"[1,1]": 1, "[1,2]": 0}}
//!   ],
//!   "Questions": [{"Name": "1.1", "Key": [1, 1]}, {"Name": "1.2", "Key": [1, 2]}]
//! }
//! ```
//!
//! Per-question results are indexed by the *canonical key* of a question: the
//! compact JSON text of its `Key`, with object members kept in document order.
//! The producer builds `Details` with `JSON.stringify`, so both sides must
//! serialize keys the same way.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResultsDocument {
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Team {
    pub team_id: TeamId,
    #[serde(default)]
    pub team_name: String,
    pub points: Number,
    pub place_from: u32,
    pub place_to: u32,
    #[serde(default)]
    pub details: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Question {
    pub name: String,
    pub key: Value,
}

/// Team identifier as rendered text. Documents use numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawTeamId", into = "String")]
pub struct TeamId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTeamId {
    Number(Number),
    Text(String),
}

impl From<RawTeamId> for TeamId {
    fn from(raw: RawTeamId) -> Self {
        match raw {
            RawTeamId::Number(n) => TeamId(number_text(&n)),
            RawTeamId::Text(s) => TeamId(s),
        }
    }
}

impl From<TeamId> for String {
    fn from(id: TeamId) -> Self {
        id.0
    }
}

impl From<&str> for TeamId {
    fn from(s: &str) -> Self {
        TeamId(s.to_string())
    }
}

impl TeamId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Question {
    /// Compact JSON text of `Key`, the index into `Team::details`.
    pub fn canonical_key(&self) -> String {
        self.key.to_string()
    }
}

impl Team {
    /// `"3"` for an exact place, `"3-5"` for a shared one.
    pub fn place_text(&self) -> String {
        if self.place_from == self.place_to {
            self.place_from.to_string()
        } else {
            format!("{}-{}", self.place_from, self.place_to)
        }
    }

    pub fn points_text(&self) -> String {
        number_text(&self.points)
    }

    /// Result text for one question. Absent entries render empty.
    pub fn answer_text(&self, question: &Question) -> String {
        self.details
            .get(&question.canonical_key())
            .map(value_text)
            .unwrap_or_default()
    }
}

impl ResultsDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Read a document from disk, warning about questions that share a key.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let doc = Self::from_reader(std::io::BufReader::new(file))?;

        log::debug!(
            "loaded {}: {} teams, {} questions",
            path.display(),
            doc.teams.len(),
            doc.questions.len()
        );
        for key in doc.key_collisions() {
            log::warn!("questions share canonical key {}; their columns show the same results", key);
        }

        Ok(doc)
    }

    /// Canonical keys used by more than one question, in first-seen order.
    pub fn key_collisions(&self) -> Vec<String> {
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut collisions = Vec::new();

        for question in &self.questions {
            let key = question.canonical_key();
            let count = seen.entry(key.clone()).or_insert(0);
            *count += 1;
            if *count == 2 {
                collisions.push(key);
            }
        }

        collisions
    }
}

/// Render a JSON number the way a browser prints it: `10.0` shows as `10`.
pub fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f != 0.0 && (f.abs() >= 1e21 || f.abs() < 1e-6) => exponent_text(f),
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// `1e21` as `1e+21`, `1.5e-7` as `1.5e-7`.
fn exponent_text(f: f64) -> String {
    let text = format!("{:e}", f);
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => text,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => number_text(n),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
