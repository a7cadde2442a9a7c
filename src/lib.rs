//! Quizboard - quiz leaderboards from results documents
//!
//! Quizboard turns a pre-computed results document (teams, points, places and
//! per-question answers) into a leaderboard table. A viewer switches between
//! the condensed standings and the per-question view, and one team's row can
//! be highlighted and pinned to the top.
//!
//! # Pipeline
//!
//! 1. **Localize**: pick `en`, `ru` or `uk` from the viewer's language
//!    preferences ([`l10n`]).
//! 2. **Build**: turn the document into a [`TableSpec`] for the current
//!    [`DetailLevel`] ([`table`]).
//! 3. **Highlight**: bold the target team's row and pin a copy above the
//!    standings ([`highlight`]).
//! 4. **Display**: the [`ViewController`] hands the result to a
//!    [`DisplayRegion`] and re-runs the pipeline on every toggle ([`view`]).
//!
//! # Quick Start
//!
//! ```no_run
//! use quizboard::{ResultsDocument, ViewController, ViewState};
//! use quizboard::render::html::HtmlRegion;
//!
//! let doc = ResultsDocument::load("results.json")?;
//! let state = ViewState::from_preferences(&["ru-RU"], Some("7".to_string()));
//!
//! let mut controller = ViewController::new(state);
//! let mut region = HtmlRegion::default();
//! controller.document_loaded(doc, &mut region);
//! println!("{}", region.html());
//!
//! controller.toggle(&mut region);  // now the per-question view
//! # Ok::<(), quizboard::BoardError>(())
//! ```
//!
//! # Modules
//!
//! - [`results`]: results document model and canonical question keys
//! - [`l10n`]: language resolution and label tables
//! - [`table`]: short and full table builders
//! - [`highlight`]: highlighted/pinned team rows
//! - [`view`]: view state and the toggle controller
//! - [`params`]: page query parameters
//! - [`render`]: HTML and JSON output
//! - `serve`: local HTTP server (feature `serve`)

pub mod error;
pub mod highlight;
pub mod l10n;
pub mod params;
pub mod render;
pub mod results;
#[cfg(feature = "serve")]
pub mod serve;
pub mod table;
pub mod view;

pub use error::{BoardError, Result};
pub use l10n::{Labels, Language};
pub use results::{Question, ResultsDocument, Team, TeamId};
pub use table::{DetailLevel, TableSpec};
pub use view::{DisplayRegion, RenderedView, ViewController, ViewState};
