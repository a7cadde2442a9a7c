//! UI language resolution and label tables
//!
//! Three languages are supported. The first preference whose tag starts with a
//! supported code wins; anything else falls back to English.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ru,
    Uk,
}

/// Fixed label set for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Labels {
    pub results: &'static str,
    pub team: &'static str,
    pub points: &'static str,
    pub place: &'static str,
    pub to_short_view: &'static str,
    pub to_full_view: &'static str,
}

const EN: Labels = Labels {
    results: "Results",
    team: "Team",
    points: "Points",
    place: "Place",
    to_short_view: "less details",
    to_full_view: "more details",
};

const RU: Labels = Labels {
    results: "Результаты",
    team: "Команда",
    points: "Очки",
    place: "Место",
    to_short_view: "скрыть детали",
    to_full_view: "показать детали",
};

const UK: Labels = Labels {
    results: "Результати",
    team: "Команда",
    points: "Очки",
    place: "Місце",
    to_short_view: "сховати подробицi",
    to_full_view: "показати подробицi",
};

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Ru, Language::Uk];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
            Language::Uk => "uk",
        }
    }

    pub fn labels(self) -> &'static Labels {
        labels(self)
    }

    fn from_tag(tag: &str) -> Option<Language> {
        Language::ALL.into_iter().find(|lang| tag.starts_with(lang.code()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language '{0}' (expected en, ru or uk)")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_tag(&s.trim().to_ascii_lowercase()).ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

/// Pick the UI language from an ordered preference list.
pub fn resolve<S: AsRef<str>>(preferred: &[S]) -> Language {
    preferred
        .iter()
        .find_map(|tag| Language::from_tag(tag.as_ref()))
        .unwrap_or_default()
}

pub fn labels(language: Language) -> &'static Labels {
    match language {
        Language::En => &EN,
        Language::Ru => &RU,
        Language::Uk => &UK,
    }
}

/// Split an `Accept-Language` header into tags, highest weight first.
///
/// Tags come back lowercased. Entries with `q=0` and the `*` wildcard are
/// dropped. Equal weights keep header order.
pub fn accept_language(header: &str) -> Vec<String> {
    let mut weighted: Vec<(f32, String)> = header
        .split(',')
        .filter_map(|part| {
            let mut pieces = part.split(';');
            let tag = pieces.next()?.trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }

            let weight = pieces
                .filter_map(|p| p.trim().strip_prefix("q="))
                .find_map(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);

            (weight > 0.0).then(|| (weight, tag.to_ascii_lowercase()))
        })
        .collect();

    // sort_by is stable, so equal weights stay in header order
    weighted.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    weighted.into_iter().map(|(_, tag)| tag).collect()
}

/// Language preferences from the POSIX locale environment.
pub fn environment_preferences() -> Vec<String> {
    let mut prefs = Vec::new();

    if let Ok(list) = std::env::var("LANGUAGE") {
        prefs.extend(list.split(':').filter(|s| !s.is_empty()).map(str::to_string));
    }
    for var in ["LC_ALL", "LC_MESSAGES", "LANG"] {
        if let Ok(value) = std::env::var(var) {
            if !value.is_empty() {
                prefs.push(value);
            }
        }
    }

    prefs
}
