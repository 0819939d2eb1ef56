use clap::Parser;
use color_eyre::Result;
use hbt_tui::{
    cli::{Cli, Commands},
    Config, Database, Profile,
};

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Determine profile: --dev flag enables dev mode, otherwise use prod
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    // Load configuration with the determined profile
    let config = Config::load_with_profile(profile)?;

    // The owner handle scopes every store operation; --owner overrides the
    // configured profile name
    let owner = cli.owner.clone().unwrap_or_else(|| config.owner.clone());

    // Initialize database
    let db_path = config.get_database_path();
    let db = Database::new(
        db_path
            .to_str()
            .ok_or_else(|| color_eyre::eyre::eyre!("Database path contains invalid UTF-8"))?,
    )?;

    // Dispatch to appropriate command handler
    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let app = hbt_tui::tui::App::new(config, db, owner)?;
            hbt_tui::tui::run_event_loop(app)?;
        }
        Commands::AddHabit {
            name,
            kind,
            goal_workdays,
            goal_weekends,
            days,
        } => {
            hbt_tui::cli::handle_add_habit(
                name,
                kind,
                goal_workdays,
                goal_weekends,
                days,
                &owner,
                &db,
            )?;
        }
        Commands::Log {
            name,
            date,
            value,
            not_done,
        } => {
            hbt_tui::cli::handle_log(name, date, value, not_done, &owner, &db)?;
        }
        Commands::List => {
            hbt_tui::cli::handle_list(&owner, &db)?;
        }
        Commands::Week => {
            hbt_tui::cli::handle_week(&owner, &db)?;
        }
    }

    Ok(())
}
