//! Help center text for the bundled modules.

use std::fmt::Write as _;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpEntry {
    pub name: String,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Help {
    pub title: String,
    pub content: Vec<HelpEntry>,
    pub footer: String,
}

const ENTRIES: &[(&str, &[&str])] = &[
    (
        "createCompoundInput",
        &[
            "Builds a div with the classes \"container\", \"grid-rows-2\" and \"cursor-pointer\" holding a label and an input placeholder that turns into the input on click.",
            "input: an object with id, name and value (plus optional pattern, title, placeholder, handler and type), or an input element.",
            "label: an object with text and an optional for, or a label element.",
            "prefix: optional, set as data-prefix on the input container.",
            "suffix: optional, set as data-suffix on the input container.",
        ],
    ),
    (
        "createContainer",
        &[
            "Builds a div with the class \"container\" for dynamic content.",
            "Extra classes can be passed as an array of strings.",
        ],
    ),
    (
        "createInput",
        &[
            "Creates an input, or adds one to a div with the class container.",
            "The input can be an object or an input element, as in createCompoundInput.",
        ],
    ),
    (
        "fillSelectableGroup",
        &[
            "Makes a group of elements inside a container selectable.",
            "Selectable elements must carry the class \"option__selectable\".",
            "container: the div the listener is attached to.",
        ],
    ),
    (
        "handleAlphaNumeric",
        &[
            "Rewrites an input value as the user types.",
            "Keeps only unaccented letters and digits.",
            "Useful for tokens and simple verification codes.",
        ],
    ),
    ("handleDecimal", &["Keeps only digits and decimal points."]),
    (
        "handleEmailString",
        &["Checks the value looks like an email address and marks the input \"invalid-value\" while it does not."],
    ),
    ("handleInt", &["Keeps only digits (unsigned integers)."]),
    ("handleString", &["Removes suspicious fragments from the value."]),
    ("handleTel", &["Keeps the characters of a phone number."]),
    (
        "helperSentinel",
        &[
            "Asks the sanitization service to clean a value and returns its report.",
            "input: the value to clean.",
            "profile: \"alnum\" keeps unaccented letters and digits, \"numeric+dot\" keeps digits and dots, \"any\" keeps everything.",
            "encoding: \"HTML\", \"UNICODE\" or \"ASCII\" for replaced characters.",
        ],
    ),
    (
        "helperSubdomainRouter",
        &["Routes views by subdomain and path. Point the bare domain at \"@\" and add a \"404\" route to each subdomain; navigation to an unknown route falls back to it and fails when it is missing."],
    ),
    (
        "validateAlphaNumeric",
        &["Cleans a value through helperSentinel, keeping only unaccented letters and digits."],
    ),
    ("validateNumber", &["Cleans a value through the service, keeping digits and decimal points."]),
    ("validateString", &["Cleans text through the service, encoding symbols as HTML entities."]),
];

impl Help {
    pub fn bundled() -> Self {
        Self {
            title: "Help center - BienUtils".to_string(),
            content: ENTRIES
                .iter()
                .map(|(name, lines)| HelpEntry {
                    name: name.to_string(),
                    description: lines.iter().map(|l| l.to_string()).collect(),
                })
                .collect(),
            footer: "Thanks for being part of us! BienStudios Develops.".to_string(),
        }
    }

    pub fn entry(&self, name: &str) -> Option<&HelpEntry> {
        self.content.iter().find(|e| e.name == name)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        if !self.title.is_empty() {
            let _ = write!(out, "{}\n\n", self.title.to_uppercase());
        }
        for entry in &self.content {
            let _ = writeln!(out, "{}:", entry.name);
            for line in &entry.description {
                let _ = writeln!(out, " - {line}");
            }
            out.push('\n');
        }
        if !self.footer.is_empty() {
            let _ = write!(out, "\n{}", self.footer);
        }
        out
    }
}

impl Default for Help {
    fn default() -> Self {
        Self::bundled()
    }
}
