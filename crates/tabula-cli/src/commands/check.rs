//! Check command implementation.
//!
//! Builds both modes without emitting anything and validates the results.

use tabula_config::{BuildMode, ConfigBuilder, ConfigValidator, FsValidator, SchemaValidator};

use crate::cli::CheckArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Execute the check command.
///
/// Stops at the first mode that fails validation.
pub fn execute(args: CheckArgs) -> Result<()> {
    let root = utils::project_root(args.cwd.as_deref())?;
    let settings = utils::load_settings(&root, args.config.as_deref())?;
    let builder = ConfigBuilder::new(&root).with_settings(settings);

    let validator: Box<dyn ConfigValidator> = if args.schema_only {
        Box::new(SchemaValidator)
    } else {
        Box::new(FsValidator::new(&root))
    };

    for mode in [BuildMode::Production, BuildMode::Development] {
        let checked = builder
            .build_for_mode(mode)
            .and_then(|config| validator.validate(&config).map(|()| config));
        let config = match checked {
            Ok(config) => config,
            Err(err) => {
                ui::error(&format!("{mode} configuration is invalid"));
                return Err(err.into());
            }
        };
        ui::success(&format!(
            "{mode}: {} rules, {} plugins, bundle {}",
            config.rules().len(),
            config.plugins().len(),
            config.bundle_path().display()
        ));
    }

    if args.schema_only {
        ui::warning("Filesystem checks skipped (--schema-only)");
    }

    Ok(())
}
