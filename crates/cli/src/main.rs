// FILE: crates/cli/src/main.rs

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use log::LevelFilter;
use rsskeep_config::{Config, ConfigManager};
use rsskeep_store::{FeedService, FileFeedStore};
use std::io;
use std::path::PathBuf;

mod commands;
mod prompt;

use prompt::Prompter;

fn build_cli() -> Command {
    Command::new("rsskeep")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Maintain a local RSS 2.0 feed file")
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("PATH")
                .help("Path to the feed file (defaults to rss.xml)")
                .global(true),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Path to the config file")
                .global(true),
        )
        .subcommand(
            Command::new("new")
                .about("Create a new feed")
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help("Replace an existing feed")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("add").about("Add an item to the feed"))
        .subcommand(Command::new("remove").about("Remove an item from the feed"))
        .subcommand(
            Command::new("list").about("List the items in the feed").arg(
                Arg::new("json")
                    .long("json")
                    .help("Print items as JSON")
                    .action(clap::ArgAction::SetTrue),
            ),
        )
        .subcommand(
            Command::new("config")
                .about("Show the effective configuration")
                .arg(
                    Arg::new("init")
                        .long("init")
                        .help("Write a default config file if none exists")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
}

fn config_manager(matches: &ArgMatches) -> ConfigManager {
    match matches.get_one::<String>("config") {
        Some(path) => ConfigManager::with_file(PathBuf::from(path)),
        None => ConfigManager::new().unwrap_or_else(|_| {
            ConfigManager::with_file(PathBuf::from(rsskeep_config::CONFIG_FILE_NAME))
        }),
    }
}

fn load_config(manager: &ConfigManager, matches: &ArgMatches) -> Result<Config> {
    let mut config = manager
        .load_with_env_overrides()
        .with_context(|| format!("Failed to load config from {}", manager.config_path().display()))?;

    if let Some(file) = matches.get_one::<String>("file") {
        config.feed.path = PathBuf::from(file);
    }
    Ok(config)
}

/// Level used until the config file has been read
const STARTUP_LEVEL: LevelFilter = LevelFilter::Warn;

/// Installs the logger before anything else runs, so config warnings show
///
/// Returns whether `RUST_LOG` chose the filter.
fn init_logging() -> bool {
    let from_env = std::env::var_os("RUST_LOG").is_some();
    // Accept every record; the max level set below decides what passes
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace")).init();
    if !from_env {
        log::set_max_level(STARTUP_LEVEL);
    }
    from_env
}

/// Level from `app.log_level`, unless `RUST_LOG` already decided
fn configured_level(config: &Config, rust_log_set: bool) -> Option<LevelFilter> {
    (!rust_log_set).then(|| config.app.log_level.to_level_filter())
}

fn feed_service(config: &Config, force: bool) -> FeedService<FileFeedStore> {
    let store = FileFeedStore::new(config.feed.path.clone()).with_backup(config.feed.keep_backup);
    let policy = if force {
        config.policy.with_overwrite(true)
    } else {
        config.policy
    };
    FeedService::new(store, policy)
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let rust_log_set = init_logging();
    let manager = config_manager(&matches);
    let config = load_config(&manager, &matches)?;
    if let Some(level) = configured_level(&config, rust_log_set) {
        log::set_max_level(level);
    }

    log::debug!(
        "Using feed {} (config {})",
        config.feed.path.display(),
        manager.config_path().display()
    );

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    match matches.subcommand() {
        Some(("new", sub_matches)) => {
            let service = feed_service(&config, sub_matches.get_flag("force"));
            commands::create_feed(&service, &mut prompter)
        }
        Some(("add", _)) => commands::add_item(&feed_service(&config, false), &mut prompter),
        Some(("remove", _)) => commands::remove_item(&feed_service(&config, false), &mut prompter),
        Some(("list", sub_matches)) => commands::list_items(
            &feed_service(&config, false),
            sub_matches.get_flag("json"),
            prompter.output(),
        ),
        Some(("config", sub_matches)) => commands::show_config(
            &manager,
            &config,
            sub_matches.get_flag("init"),
            prompter.output(),
        ),
        _ => {
            build_cli().print_help()?;
            Ok(())
        }
    }
}
