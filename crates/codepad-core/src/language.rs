//! Language registry.
//!
//! Single table mapping a display name ("C++", "Python 3", ...) to the editor
//! mode, the download file extension and the code understood by the execution
//! service. Both the editor state and the run dispatch read from here.

use crate::error::{CodepadError, Result};
use serde::Serialize;

/// Execution code that selects the isolated script worker instead of the
/// remote execution service.
pub const IN_BROWSER_EXECUTION_CODE: &str = "jsv";

/// Base name used when deriving a download file name.
pub const DEFAULT_FILE_STEM: &str = "download";

/// A supported language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageSpec {
    /// Human-readable name, also the key of the per-language code map.
    pub name: &'static str,
    /// Editor mode identifier (the session's `runtime_id`).
    pub mode: &'static str,
    /// File extension including the leading dot.
    pub extension: &'static str,
    /// Code sent as `lang` to the execution service.
    pub execution_code: &'static str,
}

impl LanguageSpec {
    /// Default file name for this language, e.g. `download.py`.
    pub fn default_file_name(&self) -> String {
        format!("{}{}", DEFAULT_FILE_STEM, self.extension)
    }

    /// Whether programs in this language run in the local script worker.
    pub fn runs_in_browser(&self) -> bool {
        self.execution_code == IN_BROWSER_EXECUTION_CODE
    }
}

const LANGUAGES: &[LanguageSpec] = &[
    LanguageSpec {
        name: "C",
        mode: "c",
        extension: ".c",
        execution_code: "c",
    },
    LanguageSpec {
        name: "C++",
        mode: "cpp",
        extension: ".cpp",
        execution_code: "cpp",
    },
    LanguageSpec {
        name: "C#",
        mode: "csharp",
        extension: ".cs",
        execution_code: "csharp",
    },
    LanguageSpec {
        name: "Java",
        mode: "java",
        extension: ".java",
        execution_code: "java",
    },
    LanguageSpec {
        name: "Python",
        mode: "python",
        extension: ".py",
        execution_code: "py2",
    },
    LanguageSpec {
        name: "Python 3",
        mode: "python",
        extension: ".py",
        execution_code: "py3",
    },
    LanguageSpec {
        name: "JavaScript",
        mode: "javascript",
        extension: ".js",
        execution_code: IN_BROWSER_EXECUTION_CODE,
    },
    LanguageSpec {
        name: "Node.js",
        mode: "javascript",
        extension: ".js",
        execution_code: "js",
    },
    LanguageSpec {
        name: "Ruby",
        mode: "ruby",
        extension: ".rb",
        execution_code: "ruby",
    },
];

/// All supported languages in display order.
pub fn all() -> &'static [LanguageSpec] {
    LANGUAGES
}

/// Looks up a language by its display name.
pub fn find(name: &str) -> Option<&'static LanguageSpec> {
    LANGUAGES.iter().find(|spec| spec.name == name)
}

/// Like [`find`], but unknown names are an error.
pub fn lookup(name: &str) -> Result<&'static LanguageSpec> {
    find(name).ok_or_else(|| CodepadError::UnknownLanguage(name.to_string()))
}

/// Guesses a language from a file extension (with or without the dot).
///
/// Extensions shared by several languages resolve to the first entry in
/// display order ("Python" for `.py`, "JavaScript" for `.js`).
pub fn from_extension(extension: &str) -> Option<&'static LanguageSpec> {
    let wanted = extension.trim_start_matches('.');
    LANGUAGES
        .iter()
        .find(|spec| spec.extension.trim_start_matches('.').eq_ignore_ascii_case(wanted))
}
