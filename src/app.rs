//! Application orchestrator.
//! Merges config from CLI/XML/prompts, initializes logging, runs the
//! relocation walk and prints the end-of-run summary.

use anyhow::Result;
use tracing::{debug, error};

use longpath_move::cli::Args;
use longpath_move::config::{
    default_config_path, ensure_default_config_exists, merge_config_from_xml, Config, CONFIG_ENV,
};
use longpath_move::output as out;
use longpath_move::{prompt, relocate_long_paths, report, RunOptions};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        if let Ok(cfg_env) = std::env::var(CONFIG_ENV) {
            out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {cfg_env}\n"));
            out::print_info(&format!(
                "To override, unset {CONFIG_ENV} or set it to another file."
            ));
            return Ok(());
        }
        match default_config_path() {
            Some(p) => {
                out::print_info(&format!(
                    "Default longpath_move config path:\n  {}\n",
                    p.display()
                ));
                if p.exists() {
                    out::print_info("A config file already exists at that location.");
                } else {
                    out::print_info(
                        "No config file exists there yet. One is created on first interactive use.",
                    );
                }
            }
            None => {
                out::print_error("Could not determine a default config path.");
            }
        }
        return Ok(());
    }

    // First interactive use: write a template config so repeat invocations can
    // skip the prompts. A fully flag-driven invocation never touches it.
    if args.source.is_none() || args.target.is_none() {
        if let Some(path) = ensure_default_config_exists() {
            out::print_success(&format!(
                "A template longpath_move config was written to: {}",
                path.display()
            ));
            out::print_info(
                "Fill in `source_base` and `target_base` there to skip the prompts next time.",
            );
        }
    }

    // Build config: XML first, then CLI overrides (CLI wins).
    let mut cfg = Config::default();
    merge_config_from_xml(&mut cfg);
    args.apply_overrides(&mut cfg);

    // Interactive prompts collect anything still missing.
    if cfg.source_base.is_none() {
        cfg.source_base = Some(prompt::prompt_source_dir()?);
    }
    if cfg.target_base.is_none() {
        cfg.target_base = Some(prompt::prompt_target_dir()?);
    }
    if cfg.max_path_len.is_none() {
        cfg.max_path_len = Some(prompt::prompt_max_path_len()?);
    }

    // Initialize logging; hold the guard so the file appender flushes on exit.
    let _guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    debug!("Starting longpath_move: {:?}", args);

    cfg.validate()?;
    let opts = RunOptions::from_config(&cfg)?;

    match relocate_long_paths(&opts) {
        Ok(run_report) => {
            report::print_summary(&run_report);
            Ok(())
        }
        Err(e) => {
            error!(code = e.code(), error = %e, "relocation aborted");
            out::print_error(&e.to_string());
            Err(e.into())
        }
    }
}
