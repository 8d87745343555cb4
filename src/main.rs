//! chat2html - CLI entry point

use anyhow::Result;
use clap::Parser;

use chat2html::cli::{Cli, Commands, ConfigCommands};
use chat2html::commands;
use chat2html::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            files,
            output,
            title,
            css,
            include_private,
        } => commands::convert::handle(
            &files,
            output.as_deref(),
            title,
            css.as_deref(),
            include_private,
        ),
        Commands::Inspect { files, json } => commands::inspect::handle(&files, json),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => cmd_config_show(),
            ConfigCommands::Edit => cmd_config_edit(),
            ConfigCommands::Path => cmd_config_path(),
        },
        Commands::Completions { shell } => {
            commands::completions::generate_completions::<Cli>(shell)
        }
    }
}

fn cmd_config_show() -> Result<()> {
    let config = Config::load()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{}", toml_str);
    Ok(())
}

fn cmd_config_edit() -> Result<()> {
    let config_path = Config::config_path()?;

    // Ensure config exists
    if !config_path.exists() {
        let config = Config::default();
        config.save()?;
    }

    // Get editor from environment
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

    println!("Opening {} with {}", config_path.display(), editor);

    std::process::Command::new(&editor)
        .arg(&config_path)
        .status()
        .map_err(|e| anyhow::anyhow!("Failed to open editor: {}", e))?;

    Ok(())
}

fn cmd_config_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}
