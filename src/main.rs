use clap::Parser;
use component_detection::cli::commands::{cmd_cache_clear, cmd_classify, cmd_hash};
use component_detection::cli::config::{Cli, Commands, load_config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Classify {
            input,
            format,
            output,
            schema_dir,
            min_confidence,
            no_cache,
            cache_dir,
        } => {
            cmd_classify(
                &input,
                &format,
                output.as_deref(),
                schema_dir.as_deref(),
                min_confidence,
                no_cache,
                cache_dir.as_deref(),
                &config,
                cli.verbose,
            )?;
        }
        Commands::Hash { input } => {
            cmd_hash(&input)?;
        }
        Commands::CacheClear { cache_dir } => {
            cmd_cache_clear(cache_dir.as_deref(), &config, cli.verbose)?;
        }
    }

    Ok(())
}
