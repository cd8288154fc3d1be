//! Configuration validation

use crate::error::{RegifyError, Result};
use crate::models::config::RegifyConfig;

/// Checks a merged or partial configuration for values that cannot work
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return the first problem found
    pub fn validate(config: &RegifyConfig) -> Result<()> {
        if let Some(output_dir) = &config.output_dir {
            if output_dir.as_os_str().is_empty() {
                return Err(RegifyError::config_error("outputDir must not be empty"));
            }
        }

        // `base_path()` treats "" as unset, so look at the raw field
        if let Some(base_path) = &config.base_path {
            if base_path.trim().is_empty() {
                return Err(RegifyError::config_error("basePath must not be empty"));
            }
        }

        if let Some(deps) = &config.registry_dependencies {
            for (name, url) in deps {
                if name.trim().is_empty() {
                    return Err(RegifyError::config_error(
                        "registryDependencies contains an empty module name",
                    ));
                }
                if url.trim().is_empty() {
                    return Err(RegifyError::config_error(format!(
                        "registryDependencies entry '{}' has an empty URL",
                        name
                    )));
                }
            }
        }

        Ok(())
    }
}
