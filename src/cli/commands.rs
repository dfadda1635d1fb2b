//! Command implementations

use super::Args;
use crate::config::{CliConfig, ConfigBuilder, ConfigSource};
use crate::core::ChunkCalculator;
use crate::error::{ErrorSeverity, Result};
use crate::output::{create_formatter, create_writer, report_diagnostics};

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Calculate the chunk specification for the configured entry points
    Calculate(Args),
    /// Initialize a default configuration file
    Init,
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        if args.init {
            return Command::Init;
        }

        Command::Calculate(args)
    }

    /// Execute the command; `Ok(true)` is full success, `Ok(false)` means
    /// output was produced but the process must exit with error status
    pub fn execute(&self) -> Result<bool> {
        match self {
            Command::Calculate(args) => {
                // Convert Args to a configuration source
                let cli_config = CliConfig::from_args(args);
                let partial_settings = cli_config.load()?;

                let config_builder = ConfigBuilder::new();

                // Add config file if specified, otherwise try the default one
                let config_builder = if let Some(config_path) = cli_config.config_path() {
                    config_builder.add_config_file(config_path)?
                } else {
                    config_builder.try_add_default_config_file()
                };

                // Merge CLI settings (highest priority)
                let settings = config_builder.merge(partial_settings).build()?;

                if settings.verbose && !settings.quiet {
                    eprintln!(
                        "chunker v{} - {} entry point(s), base directory {}",
                        env!("CARGO_PKG_VERSION"),
                        settings.entrypoints.len(),
                        settings.base_directory.display()
                    );
                }

                let calculator = ChunkCalculator::new(settings.clone());
                let outcome = calculator.calculate()?;

                report_diagnostics(&outcome.diagnostics, settings.use_colors);

                let formatter = create_formatter(
                    settings.output_format,
                    settings.legacy_sources_key,
                    settings.use_colors,
                );
                let rendered = formatter.format(&outcome.spec)?;

                let writer = create_writer(settings.output_file.as_ref());
                writer.write(&rendered)?;

                if !settings.quiet && settings.output_file.is_some() {
                    eprintln!(
                        "{}",
                        crate::output::formatters::format_summary(&outcome.spec, settings.use_colors)
                    );
                }

                Ok(!outcome.entrypoint_missing)
            }
            Command::Init => {
                let config_path = std::path::PathBuf::from(crate::config::file::DEFAULT_CONFIG_FILE);

                if config_path.exists() {
                    println!("Configuration file already exists at: {}", config_path.display());
                    println!("To overwrite it, delete the file first and run this command again.");
                    return Ok(true);
                }

                crate::config::parser::create_default_config(&config_path)?;

                println!("Created default configuration file at: {}", config_path.display());
                println!("Edit it to configure entry points, naming, and legacy namespace support.");

                Ok(true)
            }
        }
    }

    /// Run the command and map the result to an exit code
    pub fn run(&self) -> i32 {
        match self.execute() {
            Ok(true) => 0,
            Ok(false) => 1,
            Err(err) => {
                eprintln!("{}: {}", err.severity(), err.user_message());

                match err.severity() {
                    ErrorSeverity::Warning => 0,
                    _ => 1,
                }
            }
        }
    }
}
