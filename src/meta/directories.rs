//! Module name prefix → directory table.

use serde::Serialize;

/// Directory a module lives in, picked from its name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Directory {
    Creators,
    Fillers,
    Handlers,
    Helpers,
    Validators,
}

/// Prefixes in match order.
pub const PREFIXES: [(&str, Directory); 5] = [
    ("create", Directory::Creators),
    ("fill", Directory::Fillers),
    ("handle", Directory::Handlers),
    ("helper", Directory::Helpers),
    ("validate", Directory::Validators),
];

impl Directory {
    /// First directory whose prefix `module` starts with.
    pub fn for_module(module: &str) -> Option<Self> {
        PREFIXES
            .iter()
            .find(|(prefix, _)| module.starts_with(prefix))
            .map(|(_, dir)| *dir)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Directory::Creators => "creators",
            Directory::Fillers => "fillers",
            Directory::Handlers => "handlers",
            Directory::Helpers => "helpers",
            Directory::Validators => "validators",
        }
    }
}

impl std::fmt::Display for Directory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
