use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::SqliteStore;
use crate::ui::messages::{info, success, warning};

/// Handle the `init` subcommand
pub fn handle(cli: &Cli) -> AppResult<()> {
    if let Commands::Init { employee_id, name } = &cli.command {
        info("Initializing emsclock...");

        let cfg = Config::init_all(
            cli.api.clone(),
            employee_id.clone(),
            name.clone(),
            cli.db.clone(),
        )?;

        // Creates the database file and its schema.
        SqliteStore::open(&cfg.state_db)?;

        println!("📄 Config file: {}", Config::config_file().display());
        println!("🗄️ State db:    {}", cfg.state_db);

        if cfg.employee_id.is_empty() {
            warning("No employee set. Add employee_id to the config or rerun with --employee-id.");
        }
        success("emsclock initialized.");
    }
    Ok(())
}
