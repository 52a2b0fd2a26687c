//! Config command implementation.
//!
//! Resolves one build configuration and hands it to the bundler as JSON.

use std::fs;

use tabula_config::{BuildArgv, BuildConfiguration, BuildEnv, ConfigBuilder, Invocation};

use crate::cli::ConfigArgs;
use crate::commands::utils;
use crate::error::{CliError, Result, ResultExt};

/// Execute the config command.
///
/// # Steps
///
/// 1. Resolve the project root and load settings
/// 2. Pick the invocation style (`--mode`/`--env` or raw arguments)
/// 3. Build the configuration (logs the resolved mode)
/// 4. Write the JSON document to `--out`
pub fn execute(args: ConfigArgs) -> Result<()> {
    let root = utils::project_root(args.cwd.as_deref())?;
    let settings = utils::load_settings(&root, args.config.as_deref())?;

    let invocation = invocation(&args)?;
    let config = ConfigBuilder::new(&root)
        .with_settings(settings)
        .build(&invocation)?;

    let document = render(&config, args.compact)?;
    let path = utils::resolve_path(&args.out, &root);
    if path.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "--out must name a file, {} is a directory",
            path.display()
        )));
    }
    fs::write(&path, document + "\n").with_path(&path)?;
    tracing::info!("Wrote configuration to {}", path.display());

    Ok(())
}

/// Build the invocation described by the arguments.
pub fn invocation(args: &ConfigArgs) -> Result<Invocation> {
    if args.is_explicit() {
        let env = BuildEnv::from_pairs(&args.env)?;
        let argv = BuildArgv {
            mode: args.mode.clone(),
        };
        Ok(Invocation::explicit(env, argv))
    } else {
        Ok(Invocation::RawArgs(args.args.clone()))
    }
}

fn render(config: &BuildConfiguration, compact: bool) -> Result<String> {
    let document = if compact {
        config.to_json()?
    } else {
        config.to_json_pretty()?
    };
    Ok(document)
}
