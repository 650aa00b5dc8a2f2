use crate::lang::Language;
use crate::options::Options;

/// Everything about the current file the pass needs to know.
///
/// The original beautifier kept the active filename and option values in
/// process-wide state; here they travel as an explicit value threaded
/// through every operation.
#[derive(Debug, Clone)]
pub struct Context {
    /// Display name of the file being processed (diagnostics only).
    pub filename: String,
    pub language: Language,
    pub options: Options,
}

impl Context {
    pub fn new(filename: impl Into<String>, language: Language, options: Options) -> Self {
        Self {
            filename: filename.into(),
            language,
            options,
        }
    }
}
