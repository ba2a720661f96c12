//! Build configuration.

use std::path::Path;
use std::path::PathBuf;

use crate::bundle::CompressionMode;
use crate::bundle::DigestAlgorithm;

/// Marker file inside the base directory whose contents become the
/// stub when no other stub resolves.
pub const STUB_FILE: &str = "stub.sh";

/// Built-in stub: halts a shell before it reads the tar payload.
pub const DEFAULT_STUB: &str = "#!/bin/sh\nexit 0\n";

/// One bundle build: constructed per invocation, consumed by
/// [`build`](crate::builder::build), never persisted.
#[derive(Debug, Clone)]
pub struct PackSpec {
    /// Directory whose tree is packaged.
    pub base_dir: PathBuf,

    /// Output bundle path.
    pub output: PathBuf,

    /// Caller-supplied ignore entries. Replaced wholesale by a
    /// `pack.ignore` file inside the base directory when one exists.
    pub ignore: Vec<String>,

    /// Stub argument: literal stub text, or a path to a stub file.
    /// `None` means fall through to the in-base marker file or an
    /// empty stub.
    pub stub: Option<String>,

    /// Compression mode. `None` means no compression pass at all.
    pub compression: Option<CompressionMode>,

    /// Trailer digest algorithm.
    pub digest: DigestAlgorithm,
}

impl PackSpec {
    /// Creates a spec with no ignore entries, no stub argument, and no
    /// compression pass.
    #[must_use]
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(base_dir: P, output: Q) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            ignore: Vec::new(),
            stub: None,
            compression: None,
            digest: DigestAlgorithm::default(),
        }
    }

    /// Sets the caller-supplied ignore entries.
    #[must_use]
    pub fn with_ignore(mut self, entries: Vec<String>) -> Self {
        self.ignore = entries;
        self
    }

    /// Sets the stub argument.
    #[must_use]
    pub fn with_stub<S: Into<String>>(mut self, stub: S) -> Self {
        self.stub = Some(stub.into());
        self
    }

    /// Requests a compression pass.
    #[must_use]
    pub fn with_compression(mut self, mode: CompressionMode) -> Self {
        self.compression = Some(mode);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_builder() {
        let spec = PackSpec::new("/src", "/out/app.spk")
            .with_ignore(vec!["*.log".to_string()])
            .with_stub("#!/bin/sh\n")
            .with_compression(CompressionMode::Gzip);

        assert_eq!(spec.base_dir, PathBuf::from("/src"));
        assert_eq!(spec.output, PathBuf::from("/out/app.spk"));
        assert_eq!(spec.ignore, vec!["*.log".to_string()]);
        assert_eq!(spec.stub.as_deref(), Some("#!/bin/sh\n"));
        assert_eq!(spec.compression, Some(CompressionMode::Gzip));
        assert_eq!(spec.digest, DigestAlgorithm::Sha256);
    }

    #[test]
    fn test_spec_defaults() {
        let spec = PackSpec::new("in", "out");
        assert!(spec.ignore.is_empty());
        assert!(spec.stub.is_none());
        assert!(spec.compression.is_none());
    }
}
