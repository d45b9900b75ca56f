use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

fn regex_from_import() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^[ \t]*from[ \t]+([.\w]+)[ \t]+import\b").unwrap())
}

fn regex_plain_import() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^[ \t]*import[ \t]+([\w.][\w. \t,]*?)[ \t]*(?:#[^\r\n]*)?\r?$").unwrap()
    })
}

/// Dotted module names from `from x import …` and `import a, b as c` lines.
///
/// Relative forms keep their leading dots (`from . import b` yields `.`).
pub fn extract_imports(content: &str) -> BTreeSet<String> {
    let mut imports = BTreeSet::new();

    for caps in regex_from_import().captures_iter(content) {
        if let Some(module) = caps.get(1) {
            imports.insert(module.as_str().to_string());
        }
    }

    for caps in regex_plain_import().captures_iter(content) {
        let Some(list) = caps.get(1) else {
            continue;
        };
        for item in list.as_str().split(',') {
            // `pkg.mod as alias` keeps only `pkg.mod`
            if let Some(module) = item.split_whitespace().next() {
                imports.insert(module.to_string());
            }
        }
    }

    imports
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn from_and_plain_imports() {
        let src = "\
import os, sys as system
from .utils import helper
from ..pkg.mod import (a, b)
    import json  # indented
import numpy.linalg as la
x = 'import nope'
";
        assert_eq!(
            extract_imports(src),
            set(&[".utils", "..pkg.mod", "json", "numpy.linalg", "os", "sys"])
        );
    }

    #[test]
    fn bare_relative_import_keeps_dot() {
        assert_eq!(extract_imports("from . import b\n"), set(&["."]));
    }

    #[test]
    fn consecutive_lines_do_not_merge() {
        let src = "import os\nimport sys\n";
        assert_eq!(extract_imports(src), set(&["os", "sys"]));
    }

    #[test]
    fn crlf_line_endings() {
        let src = "import os\r\nfrom pkg import x\r\n";
        assert_eq!(extract_imports(src), set(&["os", "pkg"]));
    }

    #[test]
    fn mid_line_keywords_are_ignored() {
        let src = "print('from x import y')\nvalue = 1  # import z\n";
        assert!(extract_imports(src).is_empty());
    }
}
