//! Remote-backed input validators.
//!
//! Validators run on blur, or on keydown when the key is Enter, and
//! delegate cleaning to a `Sanitizer` (the sentinel service by default).

use async_trait::async_trait;

use crate::input::sentinel::{Encoding, Profile, SentinelClient, SentinelError, SentinelReport};

/// The event that triggered validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Blur,
    Keydown(String),
}

impl InputEvent {
    fn should_validate(&self) -> bool {
        match self {
            InputEvent::Blur => true,
            InputEvent::Keydown(key) => key == "Enter",
        }
    }
}

/// Result of a validator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Cleaned value returned by the sanitizer.
    pub value: String,
    /// True when the input should be marked hostile.
    pub hostile: bool,
}

/// Cleans input remotely.
#[async_trait]
pub trait Sanitizer: Send + Sync {
    async fn sanitize(
        &self,
        input: &str,
        profile: Profile,
        encoding: Encoding,
    ) -> Result<SentinelReport, SentinelError>;
}

#[async_trait]
impl Sanitizer for SentinelClient {
    async fn sanitize(
        &self,
        input: &str,
        profile: Profile,
        encoding: Encoding,
    ) -> Result<SentinelReport, SentinelError> {
        SentinelClient::sanitize(self, input, profile, encoding).await
    }
}

/// A bundled validator, addressable by its module name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    AlphaNumeric,
    Number,
    String,
}

impl Validator {
    pub const ALL: [Validator; 3] = [Validator::AlphaNumeric, Validator::Number, Validator::String];

    pub fn module_name(self) -> &'static str {
        match self {
            Validator::AlphaNumeric => "validateAlphaNumeric",
            Validator::Number => "validateNumber",
            Validator::String => "validateString",
        }
    }

    pub fn from_module_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.module_name() == name)
    }

    fn profile(self) -> Profile {
        match self {
            Validator::AlphaNumeric => Profile::AlphaNumeric,
            Validator::Number => Profile::NumericDot,
            Validator::String => Profile::Any,
        }
    }

    /// Validate `value` for `event`. Returns `Ok(None)` when the event
    /// does not trigger validation or there is nothing to check.
    pub async fn run(
        self,
        sanitizer: &dyn Sanitizer,
        event: &InputEvent,
        value: &str,
    ) -> Result<Option<Verdict>, SentinelError> {
        if !event.should_validate() {
            return Ok(None);
        }
        if self == Validator::String && value.is_empty() {
            return Ok(None);
        }

        let report = sanitizer.sanitize(value, self.profile(), Encoding::Html).await?;
        Ok(Some(Verdict {
            value: report.value,
            hostile: report.hostility,
        }))
    }
}

/// Clean any text, encoding symbols as HTML entities.
pub async fn validate_string(
    sanitizer: &dyn Sanitizer,
    event: &InputEvent,
    value: &str,
) -> Result<Option<Verdict>, SentinelError> {
    Validator::String.run(sanitizer, event, value).await
}

/// Keep digits and decimal points.
pub async fn validate_number(
    sanitizer: &dyn Sanitizer,
    event: &InputEvent,
    value: &str,
) -> Result<Option<Verdict>, SentinelError> {
    Validator::Number.run(sanitizer, event, value).await
}

/// Keep unaccented letters and digits.
pub async fn validate_alpha_numeric(
    sanitizer: &dyn Sanitizer,
    event: &InputEvent,
    value: &str,
) -> Result<Option<Verdict>, SentinelError> {
    Validator::AlphaNumeric.run(sanitizer, event, value).await
}
