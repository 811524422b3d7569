//! Library metadata and the lazy module importer.
//!
//! # Data Flow
//! ```text
//! module name ("handleTel")
//!     → directories.rs (prefix → "handlers")
//!     → importer.rs ({origin}/modules/handlers/handleTel.js, cached Utility)
//!
//! help.rs / version.rs → plain-text reports for the CLI
//! ```

pub mod directories;
pub mod help;
pub mod importer;
pub mod version;

pub use directories::Directory;
pub use help::{Help, HelpEntry};
pub use importer::{Helper, ImportError, ImportedModule, Importer, Utility};
pub use version::Version;
