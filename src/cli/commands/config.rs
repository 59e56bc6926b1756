use std::path::Path;
use std::process::Command;

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success, warning};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            println!("📄 Current configuration:\n");
            println!("{}", serde_yaml::to_string(cfg).unwrap_or_default());
        }

        if *edit_config {
            edit(editor.as_deref(), &path);
        }

        if !*print_config && !*edit_config {
            info(format!("Configuration file: {}", path.display()));
        }
    }
    Ok(())
}

/// Open the config file in the requested editor, falling back to the
/// environment's default when the requested one fails to run.
fn edit(requested: Option<&str>, path: &Path) {
    let default = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });
    let chosen = requested.unwrap_or(&default);

    if launch(chosen, path) {
        success(format!("Configuration edited with '{chosen}'"));
        return;
    }
    if chosen == default {
        error(format!("Could not edit the configuration with '{chosen}'"));
        return;
    }

    warning(format!("Editor '{chosen}' not available, trying '{default}'"));
    if launch(&default, path) {
        success(format!("Configuration edited with '{default}'"));
    } else {
        error(format!("Could not edit the configuration with '{default}'"));
    }
}

fn launch(editor: &str, path: &Path) -> bool {
    Command::new(editor)
        .arg(path)
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
