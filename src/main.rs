use nbanext::nba::classifier::classify_misses;
use nbanext::nba::config::FetchConfig;
use nbanext::nba::db::{load_miss_outcomes, save_miss_outcomes};
use nbanext::nba::endpoints::{StatsClient, StatsSource};
use nbanext::nba::events::{shooting_events, EventMsgType, EventRow};
use nbanext::nba::gather::scrape;
use nbanext::nba::join::to_dataframe;
use nbanext::nba::summary::{distance_profile, next_value_distribution};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use rusqlite::Connection;
use std::fs::File;
use std::path::PathBuf;
use tabled::{Table, Tabled};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct NBACli {
    /// JSON file overriding the fetch defaults
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Season to scrape, e.g. 2015-16, or "current"
    #[clap(short, long)]
    season: Option<String>,

    #[clap(subcommand)]
    cmd: Commands
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Classify the misses of a single game and print them
    Classify {
        game_id: String,
    },
    /// Scrape the season and store every miss with its next value
    Gather {
        #[clap(short, long)]
        limit: Option<usize>,

        #[clap(short, long, default_value = "nba_next.db")]
        db: PathBuf,

        #[clap(short, long, default_value = "miss_outcomes")]
        table: String,

        #[clap(short, long)]
        json: Option<PathBuf>,
    },
    /// Summarize a stored scrape
    Summary {
        #[clap(short, long, default_value = "nba_next.db")]
        db: PathBuf,

        #[clap(short, long, default_value = "miss_outcomes")]
        table: String,

        #[clap(short, long, default_value = "3")]
        bucket: i64,
    },
}

#[derive(Tabled)]
struct ClassifiedMiss {
    eventnum: i64,
    team: String,
    description: String,
    next: i32,
}

fn classified_misses(rows: &[EventRow]) -> Vec<ClassifiedMiss> {
    rows.iter()
        .filter(|r| r.msg_type == EventMsgType::MissedShot)
        .map(|r| {
            let side = r.missing_side();
            ClassifiedMiss {
                eventnum: r.event_num,
                team: format!("{:?}", side),
                description: r.description(side).to_string(),
                next: r.next,
            }
        })
        .collect()
}

fn load_config(args: &NBACli) -> Result<FetchConfig> {
    let mut config = match &args.config {
        Some(path) => FetchConfig::load(path)?,
        None => FetchConfig::default(),
    };
    if let Some(season) = &args.season {
        config = config.with_season(season.parse()?);
    }
    Ok(config)
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let args = NBACli::parse();
    let config = load_config(&args)?;
    info!("season {}", config.season.as_str());

    match args.cmd {
        Commands::Classify { game_id } => {
            let client = StatsClient::new(config);
            let mut rows = shooting_events(client.play_by_play(&game_id)?);
            classify_misses(&mut rows);
            println!("{}", Table::new(classified_misses(&rows)).to_string());
        }
        Commands::Gather { limit, db, table, json } => {
            let client = StatsClient::new(config);
            let records = scrape(&client, limit)?;
            let mut conn = Connection::open(&db)
                .with_context(|| format!("failed to open {}", db.display()))?;
            save_miss_outcomes(&mut conn, &table, &records)?;
            if let Some(path) = json {
                let writer = File::create(&path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                serde_json::to_writer_pretty(writer, &records)?;
            }
            println!("{}", to_dataframe(&records)?);
        }
        Commands::Summary { db, table, bucket } => {
            let conn = Connection::open(&db)
                .with_context(|| format!("failed to open {}", db.display()))?;
            let records = load_miss_outcomes(&conn, &table)?;
            println!("{} misses", records.len());
            println!("{}", Table::new(next_value_distribution(&records)).to_string());
            println!("{}", Table::new(distance_profile(&records, bucket)).to_string());
        }
    }
    Ok(())
}
