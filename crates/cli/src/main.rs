use anyhow::Result;
use clap::{CommandFactory, Parser};
use recommender::config::{DEFAULT_ITEM_MAP_FILE, DEFAULT_MODEL_FILE, DEFAULT_USER_MAP_FILE};
use recommender::{Recommender, RecommenderConfig};
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

/// movie-recs - one-shot movie recommendations from a pretrained model
///
/// Prints exactly one line: a JSON array of up to 10 movie ids, or `[]` if
/// anything goes wrong. `--help` and `--version` are only recognised as the
/// sole argument; anywhere else they are ordinary values.
#[derive(Parser, Debug)]
#[command(name = "movie-recs", version)]
#[command(about = "Recommend movies for one user from a pretrained model", long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// JSON-encoded ratings of the user (must be valid JSON; not used for scoring)
    #[arg(allow_hyphen_values = true)]
    user_ratings: String,

    /// External id of the user to recommend for
    #[arg(allow_hyphen_values = true)]
    user_id: String,

    /// Extra arguments are ignored
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    _rest: Vec<String>,

    /// Directory holding the model and id maps [default: directory of this executable]
    #[arg(long, env = "MOVIE_RECS_ARTIFACT_DIR")]
    artifact_dir: Option<PathBuf>,

    /// Model artifact file name inside the artifact directory
    #[arg(long, default_value = DEFAULT_MODEL_FILE)]
    model_file: String,

    /// Item (movie) id map file name
    #[arg(long, default_value = DEFAULT_ITEM_MAP_FILE)]
    item_map_file: String,

    /// User id map file name
    #[arg(long, default_value = DEFAULT_USER_MAP_FILE)]
    user_map_file: String,
}

impl Cli {
    fn into_config(self) -> RecommenderConfig {
        let artifact_dir = self.artifact_dir.unwrap_or_else(default_artifact_dir);
        RecommenderConfig {
            model_file: self.model_file,
            item_map_file: self.item_map_file,
            user_map_file: self.user_map_file,
            ..RecommenderConfig::with_artifact_dir(artifact_dir)
        }
    }
}

/// The directory containing the running executable, or `.` if unknown
fn default_artifact_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Usage or version text, when the only argument asks for it
fn usage_for(args: &[OsString]) -> Option<String> {
    let [_, only] = args else {
        return None;
    };
    match only.to_str()? {
        "-h" | "--help" => Some(Cli::command().render_help().to_string()),
        "-V" | "--version" => Some(Cli::command().render_version()),
        _ => None,
    }
}

fn main() -> Result<()> {
    // Diagnostics go to stderr and are off unless RUST_LOG asks for them
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .init();

    let args: Vec<OsString> = std::env::args_os().collect();
    if let Some(usage) = usage_for(&args) {
        eprint!("{}", usage);
    }

    let line = match Cli::try_parse_from(&args) {
        Ok(cli) => handle_recommend(cli),
        Err(e) => {
            tracing::warn!("Invalid arguments: {}", e);
            "[]".to_string()
        }
    };

    write_line(&mut std::io::stdout().lock(), &line);
    Ok(())
}

/// Write the output line. Failures are logged, never turned into an exit status.
fn write_line<W: Write>(out: &mut W, line: &str) -> bool {
    match writeln!(out, "{}", line).and_then(|_| out.flush()) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("Failed to write recommendations: {}", e);
            false
        }
    }
}

/// Handle a recommendation request, returning the JSON line to print
fn handle_recommend(cli: Cli) -> String {
    let user_ratings = cli.user_ratings.clone();
    let user_id = cli.user_id.clone();
    let config = cli.into_config();
    tracing::debug!("Using artifacts in {:?}", config.artifact_dir());

    let recommender = Recommender::new(config);
    recommender.recommend(&user_ratings, &user_id).to_json()
}
