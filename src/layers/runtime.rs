//! Runtime classification for serverless functions
//!
//! Maps the free-form runtime identifier declared on a function (for example
//! `"nodejs18.x"` or `"python3.9"`) to the coarse runtime family layerline
//! knows how to instrument. Classification is a pure prefix match and never
//! fails; anything unrecognized is [`RuntimeType::Unsupported`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse runtime family of a serverless function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeType {
    /// Node.js runtimes (`nodejs*`)
    Node,
    /// Python runtimes (`python*`)
    Python,
    /// Everything else, including container-image functions with no
    /// textual runtime
    Unsupported,
}

impl RuntimeType {
    /// Classifies a runtime identifier by prefix.
    ///
    /// The match is case-sensitive, mirroring how the platform spells
    /// runtime identifiers. An empty or unrecognized identifier yields
    /// [`RuntimeType::Unsupported`].
    ///
    /// # Example
    ///
    /// ```
    /// use layerline::RuntimeType;
    ///
    /// assert_eq!(RuntimeType::classify("nodejs18.x"), RuntimeType::Node);
    /// assert_eq!(RuntimeType::classify("python3.9"), RuntimeType::Python);
    /// assert_eq!(RuntimeType::classify("go1.10"), RuntimeType::Unsupported);
    /// ```
    pub fn classify(runtime: &str) -> Self {
        if runtime.starts_with("nodejs") {
            RuntimeType::Node
        } else if runtime.starts_with("python") {
            RuntimeType::Python
        } else {
            RuntimeType::Unsupported
        }
    }

    /// Whether layers exist for this runtime family
    pub fn is_supported(&self) -> bool {
        !matches!(self, RuntimeType::Unsupported)
    }
}

impl fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeType::Node => write!(f, "node"),
            RuntimeType::Python => write!(f, "python"),
            RuntimeType::Unsupported => write!(f, "unsupported"),
        }
    }
}
