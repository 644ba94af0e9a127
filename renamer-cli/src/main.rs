use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use renamer_core::{exit_code_for, Config, OutputFormatter, VersionResult};
use std::process;

mod analyze;
mod cli;
mod rename;

use cli::{Cli, Commands, OutputFormat};

fn main() {
    let cli = Cli::parse();

    // Handle -C directory flag
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir)
            .with_context(|| format!("Failed to change to directory: {}", dir.display()))
            .unwrap_or_else(|e| {
                eprintln!("Error: {e:#}");
                process::exit(2);
            });
    }

    match run(cli) {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(exit_code_for(&e));
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load().context("Failed to load .renamer/config.toml")?;

    // --no-color wins, then the config file, then terminal detection
    let use_color = if cli.no_color {
        Some(false)
    } else {
        config.defaults.use_color
    };

    match cli.command {
        Commands::Analyze {
            project_path,
            compare_with,
            branch,
            output_file,
            output,
            quiet,
        } => analyze::handle_analyze(
            &project_path,
            compare_with,
            branch,
            output_file,
            &config,
            output,
            quiet,
        ),

        Commands::Rename {
            project_paths,
            import_file,
            filter,
            dry_run,
            preview,
            log_file,
            output,
            quiet,
        } => rename::handle_rename(
            &project_paths,
            &import_file,
            filter,
            dry_run,
            preview.map(Into::into),
            log_file,
            &config,
            use_color,
            output,
            quiet,
        ),

        Commands::Version { output } => handle_version(output),

        Commands::Completions { shell, out_dir } => {
            let mut cmd = Cli::command();
            match out_dir {
                Some(dir) => generate_completions(shell, &mut cmd, "renamer", &dir),
                None => {
                    clap_complete::generate(shell, &mut cmd, "renamer", &mut std::io::stdout());
                    Ok(())
                },
            }
        },
    }
}

// Generate shell completions
pub fn generate_completions<G: clap_complete::Generator>(
    gen: G,
    cmd: &mut clap::Command,
    name: &str,
    out_dir: &std::path::Path,
) -> Result<()> {
    use clap_complete::generate_to;
    use std::fs;

    fs::create_dir_all(out_dir)?;
    let path = generate_to(gen, cmd, name, out_dir)?;
    println!("Generated completion file: {}", path.display());
    Ok(())
}

fn handle_version(output: OutputFormat) -> Result<()> {
    let version_result = VersionResult {
        name: "renamer".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    println!("{}", version_result.format(output.into()));
    Ok(())
}
