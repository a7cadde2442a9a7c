//! Page query parameters
//!
//! Result links look like `?quiz=42&quizName=Cup&token=ab12&teamId=7`. Only
//! `teamId` (highlight target) and `view` (detail level) affect the board; the
//! rest names the quiz for the page title.

use crate::table::DetailLevel;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageParams {
    pub quiz: u64,
    pub quiz_name: String,
    pub quiz_img: String,
    pub team_id: String,
    pub token: String,
    pub who: String,
    pub view: ViewParam,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewParam {
    #[default]
    Short,
    Full,
}

impl From<ViewParam> for DetailLevel {
    fn from(view: ViewParam) -> Self {
        match view {
            ViewParam::Short => DetailLevel::Short,
            ViewParam::Full => DetailLevel::Full,
        }
    }
}

impl From<DetailLevel> for ViewParam {
    fn from(level: DetailLevel) -> Self {
        match level {
            DetailLevel::Short => ViewParam::Short,
            DetailLevel::Full => ViewParam::Full,
        }
    }
}

impl PageParams {
    /// Decode a query string (with or without the leading `?`).
    ///
    /// Malformed input yields the defaults rather than an error.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        match serde_urlencoded::from_str::<PageParams>(query) {
            Ok(params) => params,
            Err(e) => {
                log::debug!("ignoring malformed query string '{}': {}", query, e);
                PageParams::default()
            }
        }
    }

    /// Query part of a request URL such as `/?teamId=3`.
    pub fn from_url(url: &str) -> Self {
        url.split_once('?').map(|(_, q)| Self::parse(q)).unwrap_or_default()
    }

    /// `teamId` as a highlight target. `0` and blank mean no highlight.
    pub fn highlight_target(&self) -> Option<String> {
        let id = self.team_id.trim();
        if id.is_empty() || id == "0" {
            None
        } else {
            Some(id.to_string())
        }
    }

    pub fn detail_level(&self) -> DetailLevel {
        self.view.into()
    }

    /// Embedded pages (`who=emb`) have no header.
    pub fn embedded(&self) -> bool {
        self.who == "emb"
    }

    /// Query string for the same page at another detail level.
    pub fn with_view(&self, level: DetailLevel) -> String {
        let params = PageParams { view: level.into(), ..self.clone() };
        serde_urlencoded::to_string(&params).unwrap_or_default()
    }
}
