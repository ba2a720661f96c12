//! Directory-to-bundle packing engine.
//!
//! stubpack-core packages a directory tree into a single distributable
//! bundle: an optional executable stub, a tar payload (optionally
//! gzip- or bzip2-compressed), and a SHA-256 digest trailer. Files are
//! selected by walking the tree and testing every candidate against an
//! ordered ignore list of literal paths and shell-glob patterns.
//!
//! # Examples
//!
//! ```no_run
//! use stubpack_core::{build, NullObserver, PackSpec};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let spec = PackSpec::new("./plugin", "plugin.spk")
//!     .with_ignore(vec!["*.log".to_string(), "target/*".to_string()]);
//! let report = build(&spec, &mut NullObserver)?;
//! println!("packed {} files", report.files_added);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod builder;
pub mod bundle;
pub mod config;
pub mod error;
pub mod glob;
pub mod ignore;
pub mod report;
pub mod walk;

// Re-export main API types
pub use builder::BuildObserver;
pub use builder::NullObserver;
pub use builder::build;
pub use builder::build_with;
pub use bundle::CompressionMode;
pub use bundle::Container;
pub use bundle::DigestAlgorithm;
pub use bundle::TarBundle;
pub use config::DEFAULT_STUB;
pub use config::PackSpec;
pub use config::STUB_FILE;
pub use error::PackError;
pub use error::Result;
pub use glob::MatchFlags;
pub use glob::Matcher;
pub use ignore::IGNORE_FILE;
pub use ignore::IgnoreRules;
pub use report::BuildReport;
pub use report::IgnoredEntry;
pub use walk::Candidate;
pub use walk::walk;
