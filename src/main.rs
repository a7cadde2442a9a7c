use clap::{Parser, Subcommand};
use quizboard::render::html::HtmlRegion;
use quizboard::{l10n, render, view, DetailLevel, ResultsDocument, ViewController, ViewState};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quizboard")]
#[command(author, version, about = "Render quiz leaderboards from results documents")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one view of the leaderboard
    Render {
        /// Results document (JSON)
        path: PathBuf,

        /// Team to highlight and pin to the top
        #[arg(short, long)]
        team_id: Option<String>,

        /// Language preferences, most preferred first (default: from locale)
        #[arg(short, long, value_delimiter = ',')]
        lang: Vec<String>,

        /// Show one column per question
        #[arg(long)]
        full: bool,

        /// Viewport width used for the sticky header decision
        #[arg(long)]
        width: Option<u32>,

        /// Output file (.html, .json); prints the HTML fragment when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start a local server showing the leaderboard
    #[cfg(feature = "serve")]
    Serve {
        /// Results document (JSON)
        path: PathBuf,

        /// Port to listen on
        #[arg(short, long, default_value = "3001")]
        port: u16,

        /// Don't open a browser
        #[arg(long)]
        no_open: bool,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match args.command {
        Command::Render { path, team_id, lang, full, width, output } => {
            let doc = match ResultsDocument::load(&path) {
                Ok(doc) => doc,
                Err(e) => {
                    log::error!("failed to read {}: {}", path.display(), e);
                    std::process::exit(1);
                }
            };

            let prefs = if lang.is_empty() { l10n::environment_preferences() } else { lang };
            let team_id = team_id.filter(|id| !id.trim().is_empty());
            let level = if full { DetailLevel::Full } else { DetailLevel::Short };
            let state = ViewState::from_preferences(&prefs, team_id).with_detail_level(level);
            log::debug!("rendering with {:?}", state);

            match output {
                Some(output_path) => {
                    let rendered = view::render(&doc, &state, width);
                    if let Err(e) = render::generate(&output_path, &rendered) {
                        log::error!("failed to write {}: {}", output_path.display(), e);
                        std::process::exit(1);
                    }
                    log::info!("board saved: {}", output_path.display());
                }
                None => {
                    let mut controller = ViewController::new(state);
                    let mut region = HtmlRegion::new(None, width);
                    controller.document_loaded(doc, &mut region);
                    print!("{}", region.html());
                }
            }
        }

        #[cfg(feature = "serve")]
        Command::Serve { path, port, no_open } => {
            if let Err(e) = quizboard::serve::start(port, &path, !no_open) {
                log::error!("server stopped: {}", e);
                std::process::exit(1);
            }
        }
    }
}
