use clap::{Parser, Subcommand};
use log::error;

use osrs_bytes::fetcher::MarketClient;
use osrs_bytes::{Config, Family, Hiscores, OsrsError, Result};

#[derive(Parser)]
#[command(name = "osrs-bytes", about = "Old School RuneScape hiscores and exchange lookups")]
struct Cli {
    /// Overrides DATABASE_URL for the feed cache.
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Always fetch from the hiscores instead of the feed cache.
    #[arg(long, global = true)]
    no_cache: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show a player's hiscores, or one value of them.
    Player {
        name: String,
        /// N, IM, UIM or HIM/HIC
        #[arg(short, long, default_value = "N")]
        account: String,
        /// skill, clue, bounty, minigame or boss
        #[arg(short, long, default_value = "skill")]
        family: String,
        category: Option<String>,
        #[arg(long)]
        field: Option<String>,
        /// Print the full parsed stats as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show exchange prices for an item name or id.
    Item { name_or_id: String },
    /// List the categories of a family in hiscores order.
    Categories { family: String },
}

fn parse_family(name: &str) -> Result<Family> {
    Family::from_name(name)
        .ok_or_else(|| OsrsError::ConfigError(format!("unknown family '{}'", name)))
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(url) = cli.database_url {
        config.database_url = Some(url);
    }
    if cli.no_cache {
        config.database_url = None;
    }

    match cli.command {
        Command::Player { name, account, family, category, field, json } => {
            let family = parse_family(&family)?;
            let mut hiscores = Hiscores::from_config(&config).await?;
            let stats = hiscores.lookup(&name, &account).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(stats)?);
                return Ok(());
            }

            match category {
                Some(category) => {
                    let default_field = if family == Family::Skill { "level" } else { "score" };
                    let field = field.unwrap_or_else(|| default_field.to_string());
                    let value = osrs_bytes::hiscores::lookup(stats, family, &category, &field)?;
                    println!("{} {} {}: {}", name, category, field, value);
                }
                None => {
                    let total = stats.total();
                    println!(
                        "{}: total level {} ({} xp, rank {})",
                        name, total.level, total.experience, total.rank
                    );
                    for (skill, record) in stats.skills() {
                        println!(
                            "  {:<14} {:>3}  {:>11} xp  {:>11} to next",
                            skill.name(),
                            record.level,
                            record.experience,
                            record.exp_to_next_level
                        );
                    }
                }
            }
        }
        Command::Item { name_or_id } => {
            let market = MarketClient::new(config.market_summary_url, config.buy_limits_url);
            let items = market.fetch_catalogue().await?;
            let item = items.get(&name_or_id)?;

            let members = if item.members { " [members]" } else { "" };
            println!("{} (id {}){}", item.name, item.id, members);
            println!("  buy average:  {} ({} traded)", item.buy_average, item.buy_quantity);
            println!("  sell average: {} ({} traded)", item.sell_average, item.sell_quantity);
            println!("  shop price:   {}", item.sp);
            println!("  alchemy:      low {} / high {}", item.low_alch(), item.high_alch());
            match item.buy_limit {
                Some(limit) => println!("  buy limit:    {}", limit),
                None => println!("  buy limit:    unknown"),
            }
        }
        Command::Categories { family } => {
            for name in parse_family(&family)?.categories() {
                println!("{}", name);
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}
