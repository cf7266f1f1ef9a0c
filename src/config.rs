use crate::error::{CategorizerError, CategorizerResult};
use crate::logging::log_debug;
use crate::taxonomy::{DEFAULT_LINUX_EXTENSION_HANDLERS, DEFAULT_WINDOWS_EXTENSION_HANDLERS};
use serde::{Deserialize, Serialize};

/// Policy knobs for a [`Classifier`](crate::Classifier).
///
/// The contract tables (client-error codes, retryable codes, extension exit
/// codes, connectivity keywords) are not configurable; only which extension
/// handlers count as service-managed and whether decisions are logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Linux extension handler types owned by the service.
    pub linux_extension_handlers: Vec<String>,
    /// Windows extension handler types owned by the service.
    pub windows_extension_handlers: Vec<String>,
    /// Emit a debug log for every categorization decision.
    pub log_decisions: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            linux_extension_handlers: DEFAULT_LINUX_EXTENSION_HANDLERS
                .iter()
                .map(|handler| handler.to_string())
                .collect(),
            windows_extension_handlers: DEFAULT_WINDOWS_EXTENSION_HANDLERS
                .iter()
                .map(|handler| handler.to_string())
                .collect(),
            log_decisions: true,
        }
    }
}

impl ClassifierConfig {
    /// Validate the handler allow-lists
    ///
    /// # Errors
    ///
    /// Returns [`CategorizerError::ConfigurationError`] if:
    /// - A handler name is empty or whitespace
    /// - A handler appears in both the Linux and the Windows list
    pub fn validate(&self) -> CategorizerResult<()> {
        if self
            .linux_extension_handlers
            .iter()
            .chain(&self.windows_extension_handlers)
            .any(|handler| handler.trim().is_empty())
        {
            return Err(CategorizerError::configuration_error(
                "extension handler names must not be empty",
            ));
        }

        if let Some(shared) = self
            .linux_extension_handlers
            .iter()
            .find(|handler| self.windows_extension_handlers.contains(handler))
        {
            return Err(CategorizerError::configuration_error(format!(
                "extension handler {shared} is listed as both Linux and Windows"
            )));
        }

        log_debug!(
            linux_handlers = self.linux_extension_handlers.len(),
            windows_handlers = self.windows_extension_handlers.len(),
            log_decisions = self.log_decisions,
            "Classifier configuration validated"
        );
        Ok(())
    }

    pub fn is_linux_handler(&self, handler: &str) -> bool {
        self.linux_extension_handlers.iter().any(|h| h == handler)
    }

    pub fn is_windows_handler(&self, handler: &str) -> bool {
        self.windows_extension_handlers.iter().any(|h| h == handler)
    }
}
