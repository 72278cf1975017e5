// Licensed under the Apache-2.0 license

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;

use registers_header_gen::{
    generate_all_from_file, generate_constants_from_file, generate_functions_from_file,
    FunctionFilter,
};

#[derive(Parser, Debug)]
#[command(
    name = "registers-header-gen",
    author,
    version,
    about = "Generate C register accessor headers from a JSON bitfield description"
)]
struct Cli {
    /// Path to the JSON configuration
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,

    /// Enable debug logging (stderr)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Emit the offset/mask #define constants for every descriptor
    Constants,
    /// Emit the get/set/unset accessor functions
    Functions {
        /// Restrict output to one register
        #[arg(long, value_name = "REG")]
        register: Option<String>,

        /// Field names within --register to include
        #[arg(value_name = "FIELD", requires = "register")]
        fields: Vec<String>,
    },
    /// Emit the complete header: optional prelude, constants, then functions
    All {
        /// File whose contents are emitted verbatim before the generated text
        #[arg(long, value_name = "FILE")]
        prelude: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = SimpleLogger::new().with_level(level).init();

    let output = match &cli.command {
        Command::Constants => generate_constants_from_file(&cli.config)?,
        Command::Functions { register, fields } => {
            let filter = register
                .as_ref()
                .map(|reg| FunctionFilter::new(reg, fields.iter().cloned()));
            generate_functions_from_file(&cli.config, filter.as_ref())?
        }
        Command::All { prelude } => generate_all_from_file(&cli.config, prelude.as_deref())?,
    };

    info!("generated {} bytes from {}", output.len(), cli.config.display());

    // Output is fully buffered; nothing is printed if generation failed.
    print!("{}", output);
    Ok(())
}
