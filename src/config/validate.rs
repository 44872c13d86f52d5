//! Config validation logic.
//! Sanity-checks the merged settings before a run starts. Deliberately light:
//! source existence is NOT required here — a missing source surfaces as a
//! recorded walk failure, not a config error.

use anyhow::{bail, Result};
use tracing::debug;

use super::types::Config;

impl Config {
    /// Validate the merged configuration.
    ///
    /// - source, target and threshold must all be present (prompts fill them
    ///   before this runs),
    /// - the threshold must be non-zero,
    /// - source and target must not be the same path textually.
    ///
    /// Deeper checks (absolutization, target-inside-source) belong to the
    /// relocator, which owns path resolution.
    pub fn validate(&self) -> Result<()> {
        let Some(source) = self.source_base.as_deref() else {
            bail!("no source directory configured");
        };
        let Some(target) = self.target_base.as_deref() else {
            bail!("no target directory configured");
        };

        if self.effective_max_path_len() == 0 {
            bail!("maximum path length must be greater than zero");
        }

        if source == target {
            bail!(
                "source and target must be different directories; both are '{}'",
                source.display()
            );
        }

        debug!(
            "Config validated: source='{}' target='{}' max_len={}",
            source.display(),
            target.display(),
            self.effective_max_path_len()
        );
        Ok(())
    }
}
