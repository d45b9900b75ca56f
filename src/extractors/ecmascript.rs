//! Import specifiers for JavaScript and TypeScript sources.
//!
//! Four shapes are recognised, each tolerant of `'`, `"` and backtick quoting:
//!
//! - `import { a } from "./a"` (including multi-line import lists)
//! - `import "./side-effect"`
//! - `require("./b")`
//! - `import("./lazy")`
//!
//! Matching is lexical. Specifiers built at runtime (template expressions,
//! variables) are not seen, and commented-out imports are.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

fn regex_import_from() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"import\s+[^"'`]*?from\s+["'`]([^"'`]+)["'`]"#).unwrap())
}

fn regex_side_effect_import() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"import\s+["'`]([^"'`]+)["'`]"#).unwrap())
}

fn regex_require() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"require\(\s*["'`]([^"'`]+)["'`]\s*\)"#).unwrap())
}

fn regex_dynamic_import() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"import\(\s*["'`]([^"'`]+)["'`]\s*\)"#).unwrap())
}

pub fn extract_imports(content: &str) -> BTreeSet<String> {
    let patterns = [
        regex_import_from(),
        regex_side_effect_import(),
        regex_require(),
        regex_dynamic_import(),
    ];

    patterns
        .iter()
        .flat_map(|re| re.captures_iter(content))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}
