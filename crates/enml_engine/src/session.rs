use enml_logging::enml_warn;

use crate::table::ResourceTable;

/// Messages collected while converting one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Issues recovered from by dropping content.
    pub warnings: Vec<String>,
    /// Recoverable errors reported by the HTML parser.
    pub errors: Vec<String>,
}

impl Diagnostics {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty()
    }
}

/// State owned by a single conversion; nothing here outlives the call.
#[derive(Debug, Default)]
pub(crate) struct ConversionSession {
    pub(crate) resources: ResourceTable,
    pub(crate) diagnostics: Diagnostics,
}

impl ConversionSession {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        enml_warn!("{}", message);
        self.diagnostics.warnings.push(message);
    }

    pub(crate) fn error(&mut self, message: impl Into<String>) {
        self.diagnostics.errors.push(message.into());
    }
}
