//! Input sanitizers and validators.
//!
//! # Data Flow
//! ```text
//! raw input value
//!     → handlers.rs (local regex filters, on every keystroke)
//!     → validators.rs (on blur / Enter)
//!         → sentinel.rs (remote sanitization report)
//!         → Verdict { value, hostile }
//! ```

pub mod handlers;
pub mod sentinel;
pub mod validators;

pub use handlers::{Handled, Handler};
pub use sentinel::{Encoding, Profile, SentinelClient, SentinelError, SentinelReport};
pub use validators::{InputEvent, Sanitizer, Validator, Verdict};
