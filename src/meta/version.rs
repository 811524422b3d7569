//! Release metadata.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

/// Current release and what the next one brings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Version {
    pub version: String,
    /// Modules shipped, by directory.
    pub content: BTreeMap<String, Vec<String>>,
    /// Modules in development, by directory.
    pub next: BTreeMap<String, Vec<String>>,
}

fn table(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(dir, names)| (dir.to_string(), names.iter().map(|n| n.to_string()).collect()))
        .collect()
}

impl Version {
    pub fn current() -> Self {
        Self {
            version: "1.0".to_string(),
            content: table(&[
                ("creators", &["createCompoundInput", "createContainer", "createInput"]),
                ("fillers", &["fillSelectableGroup"]),
                (
                    "handlers",
                    &[
                        "handleAlphaNumeric",
                        "handleDecimal",
                        "handleEmailString",
                        "handleInt",
                        "handleString",
                        "handleTel",
                    ],
                ),
                ("helpers", &["helperSentinel", "helperSubdomainRouter"]),
                ("validators", &["validateAlphaNumeric", "validateNumber", "validateString"]),
            ]),
            next: table(&[
                ("creators", &["createFieldset", "createButton"]),
                ("fillers", &["fillContainer"]),
                ("handlers", &[]),
                ("helpers", &[]),
                ("validators", &[]),
            ]),
        }
    }

    /// Whether the current release lists `module`.
    pub fn includes(&self, module: &str) -> bool {
        self.content.values().flatten().any(|m| m == module)
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Version information:\n\n");
        let _ = write!(out, "Current version: {}\n\n", self.version);

        if self.content.values().any(|v| !v.is_empty()) {
            out.push_str("Includes:\n");
            bullets(&mut out, &self.content);
        }
        out.push('\n');
        if self.next.values().any(|v| !v.is_empty()) {
            out.push_str("Coming next:\n");
            bullets(&mut out, &self.next);
        }
        out
    }
}

fn bullets(out: &mut String, groups: &BTreeMap<String, Vec<String>>) {
    for name in groups.values().flatten() {
        let _ = writeln!(out, "\t\u{2022} {name}");
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::current()
    }
}
