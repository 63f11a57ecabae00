use std::path::PathBuf;

use anyhow::Context;
use clap::{
    Parser,
    Subcommand,
};
use tag_difficulty::{
    analysis::{
        load_parent_tags,
        TagDifficultyAnalyzer,
    },
    anki::{
        wait_awake,
        AnkiConnect,
        CardCollection,
        CollectionSnapshot,
        TagQuery,
    },
    persistence::{
        get_data_file_path,
        Settings,
        SETTINGS_FILE,
    },
    report::{
        browse_query,
        chart_points,
        render_bars,
        render_table,
    },
};

const WAKE_RETRY_SECS: u64 = 2;
const WAKE_ATTEMPTS: u32 = 3;

#[derive(Parser)]
#[command(name = "tag-difficulty", about = "Rank Anki sub-tags by card difficulty", version)]
struct Cli {
    /// AnkiConnect endpoint (overrides the settings file)
    #[arg(long, global = true, env = "ANKI_CONNECT_URL")]
    url: Option<String>,

    /// Read cards from a JSON snapshot instead of AnkiConnect
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the parent tags available for analysis
    Tags {
        /// Deepest parent level to list
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Rank the sub-tags of a parent tag by median difficulty
    Analyze {
        parent: String,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
        /// Number of groups to chart
        #[arg(long)]
        top: Option<usize>,
    },

    /// Print the browser search for a sub-tag group
    Search { tag: String },

    /// Save the cards under a parent tag to a JSON snapshot
    Export { parent: String, output: PathBuf },

    /// Show the effective settings
    Config {
        /// Write them to the settings file
        #[arg(long)]
        save: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut settings = Settings::load();
    if let Some(url) = cli.url {
        settings.anki_connect_url = url;
    }
    settings.validate()?;

    match cli.command {
        Command::Tags { max_depth } => {
            let collection = open_collection(cli.snapshot, &settings)?;
            for tag in load_parent_tags(&*collection, max_depth.unwrap_or(settings.max_depth))? {
                println!("{tag}");
            }
        }
        Command::Analyze { parent, json, top } => {
            let collection = open_collection(cli.snapshot, &settings)?;
            let results = TagDifficultyAnalyzer::new(&*collection)
                .analyze(&parent)
                .with_context(|| format!("analyzing '{parent}'"))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
                return Ok(());
            }

            let points = chart_points(&results, top.unwrap_or(settings.chart_limit));
            if !points.is_empty() {
                println!("{}", render_bars(&points));
            }
            print!("{}", render_table(&results));
        }
        Command::Search { tag } => {
            println!("{}", browse_query(&tag));
        }
        Command::Export { parent, output } => {
            let collection = open_collection(cli.snapshot, &settings)?;
            let snapshot = CollectionSnapshot::capture(&*collection, &TagQuery::under(&parent))?;
            snapshot.save(&output)?;
            println!("Exported {} cards to {}", snapshot.cards.len(), output.display());
        }
        Command::Config { save } => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
            if save {
                settings.save_to(&get_data_file_path(SETTINGS_FILE))?;
            }
        }
    }
    Ok(())
}

fn open_collection(
    snapshot: Option<PathBuf>,
    settings: &Settings,
) -> anyhow::Result<Box<dyn CardCollection>> {
    match snapshot {
        Some(path) => {
            let snapshot = CollectionSnapshot::load(&path)
                .with_context(|| format!("reading snapshot {}", path.display()))?;
            Ok(Box::new(snapshot))
        }
        None => {
            let anki = AnkiConnect::new(&settings.anki_connect_url, settings.request_timeout())?;
            wait_awake(&anki, WAKE_RETRY_SECS, WAKE_ATTEMPTS)
                .with_context(|| format!("connecting to {}", settings.anki_connect_url))?;
            Ok(Box::new(anki))
        }
    }
}
