//! Live input handlers.
//!
//! Each handler takes the raw value of an input and returns the value the
//! field should hold afterwards.

use std::sync::LazyLock;

use regex::Regex;

static NON_ALNUM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]").unwrap());
static NON_DECIMAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9.]").unwrap());
static NON_DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9]").unwrap());
static NON_TEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9()+\-]").unwrap());
static SUSPICIOUS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(--|;|\sOR\s|\sAND\s|<script>|</script>|onerror=|onclick=|["'])|[\x00-\x1F]"#)
        .unwrap()
});
static EMAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Keep unaccented ASCII letters and digits.
pub fn handle_alpha_numeric(value: &str) -> String {
    NON_ALNUM.replace_all(value, "").into_owned()
}

/// Keep digits and dots.
pub fn handle_decimal(value: &str) -> String {
    NON_DECIMAL.replace_all(value, "").into_owned()
}

/// Keep digits.
pub fn handle_int(value: &str) -> String {
    NON_DIGIT.replace_all(value, "").into_owned()
}

/// Strip injection-looking fragments and control characters.
pub fn handle_string(value: &str) -> String {
    SUSPICIOUS.replace_all(value, "").into_owned()
}

/// Keep digits, parentheses, `+` and `-`, then strip suspicious input.
pub fn handle_tel(value: &str) -> String {
    handle_string(&NON_TEL.replace_all(value, ""))
}

/// Cleaned email input and whether the raw value looked like an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailInput {
    pub value: String,
    pub valid: bool,
}

/// Check the email shape on the raw value, then clean it.
pub fn handle_email_string(value: &str) -> EmailInput {
    EmailInput {
        valid: EMAIL.is_match(value),
        value: handle_string(value),
    }
}

/// A bundled input handler, addressable by its module name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    AlphaNumeric,
    Decimal,
    EmailString,
    Int,
    String,
    Tel,
}

/// Outcome of running a handler on a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handled {
    pub value: String,
    /// False when the handler flags the value as invalid (email only).
    pub valid: bool,
}

impl Handler {
    pub const ALL: [Handler; 6] = [
        Handler::AlphaNumeric,
        Handler::Decimal,
        Handler::EmailString,
        Handler::Int,
        Handler::String,
        Handler::Tel,
    ];

    pub fn module_name(self) -> &'static str {
        match self {
            Handler::AlphaNumeric => "handleAlphaNumeric",
            Handler::Decimal => "handleDecimal",
            Handler::EmailString => "handleEmailString",
            Handler::Int => "handleInt",
            Handler::String => "handleString",
            Handler::Tel => "handleTel",
        }
    }

    pub fn from_module_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.module_name() == name)
    }

    pub fn apply(self, value: &str) -> Handled {
        let cleaned = |value: String| Handled { value, valid: true };
        match self {
            Handler::AlphaNumeric => cleaned(handle_alpha_numeric(value)),
            Handler::Decimal => cleaned(handle_decimal(value)),
            Handler::Int => cleaned(handle_int(value)),
            Handler::String => cleaned(handle_string(value)),
            Handler::Tel => cleaned(handle_tel(value)),
            Handler::EmailString => {
                let email = handle_email_string(value);
                Handled {
                    value: email.value,
                    valid: email.valid,
                }
            }
        }
    }
}
