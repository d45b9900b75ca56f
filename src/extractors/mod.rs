pub mod ecmascript;
pub mod python;
pub mod reader;

use std::collections::BTreeSet;

pub const ECMASCRIPT_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".jsx", ".mjs", ".cjs"];
pub const PYTHON_EXTENSIONS: &[&str] = &[".py", ".pyw"];

/// Which import grammar applies to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageClass {
    EcmaScript,
    Python,
    None,
}

impl LanguageClass {
    /// Classify a lowercase, dot-prefixed extension.
    pub fn from_extension(extension: &str) -> Self {
        if ECMASCRIPT_EXTENSIONS.contains(&extension) {
            LanguageClass::EcmaScript
        } else if PYTHON_EXTENSIONS.contains(&extension) {
            LanguageClass::Python
        } else {
            LanguageClass::None
        }
    }

    /// Raw import specifiers found in `content`. Nothing is validated here.
    pub fn extract_imports(self, content: &str) -> BTreeSet<String> {
        match self {
            LanguageClass::EcmaScript => ecmascript::extract_imports(content),
            LanguageClass::Python => python::extract_imports(content),
            LanguageClass::None => BTreeSet::new(),
        }
    }

    pub fn has_imports(self) -> bool {
        !matches!(self, LanguageClass::None)
    }
}
