//! Container facility for bundle output.
//!
//! The builder never writes archive bytes itself; it drives a
//! [`Container`] through the batch lifecycle and lets the
//! implementation own the on-disk layout. [`TarBundle`] is the shipped
//! implementation:
//!
//! ```text
//! [stub bytes][tar payload, optionally gzip/bzip2][b"SPK0"][SHA-256]
//! ```
//!
//! Entries are buffered in memory between `begin` and `finish`, so a
//! compression mode chosen after insertion still applies to the whole
//! payload.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use sha2::Digest;
use sha2::Sha256;

use crate::error::PackError;
use crate::error::Result;

/// Magic bytes opening the digest trailer.
pub const TRAILER_MAGIC: [u8; 4] = *b"SPK0";

/// Total trailer length: magic plus a SHA-256 digest.
pub const TRAILER_LEN: usize = TRAILER_MAGIC.len() + 32;

/// Stream compression applied to the tar payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    /// Explicitly uncompressed (a requested no-op pass).
    None,
    /// Gzip via flate2.
    Gzip,
    /// Bzip2.
    Bzip2,
}

impl CompressionMode {
    /// Parses a user-supplied mode string, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::InvalidCompressionMode`] for anything other
    /// than `gz`, `bz2`, or `none`.
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "gz" => Ok(Self::Gzip),
            "bz2" => Ok(Self::Bzip2),
            "none" => Ok(Self::None),
            _ => Err(PackError::InvalidCompressionMode {
                value: value.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for CompressionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Gzip => write!(f, "gz"),
            Self::Bzip2 => write!(f, "bz2"),
        }
    }
}

/// Digest written into the bundle trailer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DigestAlgorithm {
    /// SHA-256 over everything preceding the trailer.
    #[default]
    Sha256,
}

/// Batch-oriented bundle container contract.
///
/// Call order: `set_stub` / `set_digest`, then `begin`, `insert_many`,
/// optionally `compress`, and finally `finish`. Nothing reaches disk
/// before `finish`.
pub trait Container {
    /// Attaches the executable stub prepended to the payload.
    fn set_stub(&mut self, stub: &[u8]);

    /// Selects the trailer digest algorithm.
    fn set_digest(&mut self, algorithm: DigestAlgorithm);

    /// Opens the buffered batch.
    fn begin(&mut self);

    /// Inserts `entries` (bundle-relative key to source path) into the
    /// batch and returns how many were added.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::ArchiveWrite`] if a source file cannot be
    /// read or appended.
    fn insert_many(&mut self, entries: &BTreeMap<PathBuf, PathBuf>) -> Result<usize>;

    /// Requests a compression pass over the batched payload.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::ArchiveWrite`] if the pass cannot be set up.
    fn compress(&mut self, mode: CompressionMode) -> Result<()>;

    /// Closes the batch and flushes the finished bundle.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::ArchiveWrite`] on any encoding or write
    /// failure.
    fn finish(self) -> Result<()>;
}

/// Deletes a bundle file.
///
/// This is the facility-level removal; callers fall back to a plain
/// filesystem delete when it fails.
///
/// # Errors
///
/// Returns the underlying I/O error.
pub fn remove(path: &Path) -> std::io::Result<()> {
    std::fs::remove_file(path)
}

/// Tar-backed [`Container`] implementation.
pub struct TarBundle {
    file: File,
    stub: Vec<u8>,
    digest: DigestAlgorithm,
    mode: Option<CompressionMode>,
    batch: Option<tar::Builder<Vec<u8>>>,
}

impl TarBundle {
    /// Creates the output file and an empty container around it.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::ArchiveWrite`] when the file cannot be
    /// created.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(PackError::ArchiveWrite)?;
        Ok(Self {
            file,
            stub: Vec::new(),
            digest: DigestAlgorithm::default(),
            mode: None,
            batch: None,
        })
    }
}

impl Container for TarBundle {
    fn set_stub(&mut self, stub: &[u8]) {
        self.stub = stub.to_vec();
    }

    fn set_digest(&mut self, algorithm: DigestAlgorithm) {
        self.digest = algorithm;
    }

    fn begin(&mut self) {
        self.batch = Some(tar::Builder::new(Vec::new()));
    }

    fn insert_many(&mut self, entries: &BTreeMap<PathBuf, PathBuf>) -> Result<usize> {
        let batch = self
            .batch
            .get_or_insert_with(|| tar::Builder::new(Vec::new()));

        let mut count = 0;
        for (relative, source) in entries {
            let mut file = File::open(source).map_err(PackError::ArchiveWrite)?;
            batch
                .append_file(relative, &mut file)
                .map_err(PackError::ArchiveWrite)?;
            count += 1;
        }
        Ok(count)
    }

    fn compress(&mut self, mode: CompressionMode) -> Result<()> {
        self.mode = Some(mode);
        Ok(())
    }

    fn finish(mut self) -> Result<()> {
        let payload = match self.batch.take() {
            Some(batch) => batch.into_inner().map_err(PackError::ArchiveWrite)?,
            None => Vec::new(),
        };

        let mut out = Vec::with_capacity(self.stub.len() + payload.len() + TRAILER_LEN);
        out.extend_from_slice(&self.stub);

        match self.mode {
            Some(CompressionMode::Gzip) => {
                let mut encoder =
                    flate2::write::GzEncoder::new(&mut out, flate2::Compression::default());
                encoder.write_all(&payload).map_err(PackError::ArchiveWrite)?;
                encoder.finish().map_err(PackError::ArchiveWrite)?;
            }
            Some(CompressionMode::Bzip2) => {
                let mut encoder =
                    bzip2::write::BzEncoder::new(&mut out, bzip2::Compression::default());
                encoder.write_all(&payload).map_err(PackError::ArchiveWrite)?;
                encoder.finish().map_err(PackError::ArchiveWrite)?;
            }
            Some(CompressionMode::None) | None => out.extend_from_slice(&payload),
        }

        match self.digest {
            DigestAlgorithm::Sha256 => {
                let hash = Sha256::digest(&out);
                out.extend_from_slice(&TRAILER_MAGIC);
                out.extend_from_slice(&hash);
            }
        }

        self.file.write_all(&out).map_err(PackError::ArchiveWrite)?;
        self.file.flush().map_err(PackError::ArchiveWrite)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sample_entries(root: &Path) -> BTreeMap<PathBuf, PathBuf> {
        fs::write(root.join("a.txt"), "alpha").unwrap();
        fs::write(root.join("b.txt"), "beta").unwrap();

        let mut entries = BTreeMap::new();
        entries.insert(PathBuf::from("a.txt"), root.join("a.txt"));
        entries.insert(PathBuf::from("b.txt"), root.join("b.txt"));
        entries
    }

    fn check_trailer(bytes: &[u8]) {
        assert!(bytes.len() > TRAILER_LEN);
        let body = &bytes[..bytes.len() - TRAILER_LEN];
        let trailer = &bytes[bytes.len() - TRAILER_LEN..];
        assert_eq!(&trailer[..4], b"SPK0");
        assert_eq!(&trailer[4..], Sha256::digest(body).as_slice());
    }

    #[test]
    fn test_plain_bundle_layout() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out.spk");
        let entries = sample_entries(temp.path());

        let mut bundle = TarBundle::create(&out).unwrap();
        bundle.set_stub(b"#!/bin/sh\nexit 0\n");
        bundle.begin();
        assert_eq!(bundle.insert_many(&entries).unwrap(), 2);
        bundle.finish().unwrap();

        let bytes = fs::read(&out).unwrap();
        assert!(bytes.starts_with(b"#!/bin/sh\nexit 0\n"));
        check_trailer(&bytes);

        // Tar stores the entry name at the start of each 512-byte
        // header, so the first key follows the stub directly.
        let stub_len = b"#!/bin/sh\nexit 0\n".len();
        assert!(bytes[stub_len..].starts_with(b"a.txt"));
    }

    #[test]
    fn test_gzip_magic_after_stub() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out.spk");
        let entries = sample_entries(temp.path());

        let mut bundle = TarBundle::create(&out).unwrap();
        bundle.set_stub(b"STUB");
        bundle.begin();
        bundle.insert_many(&entries).unwrap();
        bundle.compress(CompressionMode::Gzip).unwrap();
        bundle.finish().unwrap();

        let bytes = fs::read(&out).unwrap();
        assert_eq!(&bytes[4..6], &[0x1f, 0x8b]);
        check_trailer(&bytes);
    }

    #[test]
    fn test_bzip2_magic_after_stub() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out.spk");
        let entries = sample_entries(temp.path());

        let mut bundle = TarBundle::create(&out).unwrap();
        bundle.begin();
        bundle.insert_many(&entries).unwrap();
        bundle.compress(CompressionMode::Bzip2).unwrap();
        bundle.finish().unwrap();

        let bytes = fs::read(&out).unwrap();
        assert_eq!(&bytes[..3], b"BZh");
        check_trailer(&bytes);
    }

    #[test]
    fn test_none_mode_leaves_payload_uncompressed() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out.spk");
        let entries = sample_entries(temp.path());

        let mut bundle = TarBundle::create(&out).unwrap();
        bundle.begin();
        bundle.insert_many(&entries).unwrap();
        bundle.compress(CompressionMode::None).unwrap();
        bundle.finish().unwrap();

        let bytes = fs::read(&out).unwrap();
        assert!(bytes.starts_with(b"a.txt"));
    }

    #[test]
    fn test_empty_bundle_is_stub_plus_trailer() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out.spk");

        let mut bundle = TarBundle::create(&out).unwrap();
        bundle.set_stub(b"XY");
        bundle.begin();
        bundle.insert_many(&BTreeMap::new()).unwrap();
        bundle.finish().unwrap();

        let bytes = fs::read(&out).unwrap();
        check_trailer(&bytes);
        assert!(bytes.starts_with(b"XY"));
    }

    #[test]
    fn test_insert_missing_source_is_archive_error() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out.spk");

        let mut entries = BTreeMap::new();
        entries.insert(PathBuf::from("gone.txt"), temp.path().join("gone.txt"));

        let mut bundle = TarBundle::create(&out).unwrap();
        bundle.begin();
        let err = bundle.insert_many(&entries).unwrap_err();
        assert!(err.is_archive_error());
    }

    #[test]
    fn test_parse_compression_mode() {
        assert_eq!(CompressionMode::parse("gz").unwrap(), CompressionMode::Gzip);
        assert_eq!(CompressionMode::parse("GZ").unwrap(), CompressionMode::Gzip);
        assert_eq!(
            CompressionMode::parse("Bz2").unwrap(),
            CompressionMode::Bzip2
        );
        assert_eq!(
            CompressionMode::parse("none").unwrap(),
            CompressionMode::None
        );
        assert!(matches!(
            CompressionMode::parse("zip").unwrap_err(),
            PackError::InvalidCompressionMode { .. }
        ));
    }

    #[test]
    fn test_remove() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bundle.spk");
        fs::write(&path, "x").unwrap();

        remove(&path).unwrap();
        assert!(!path.exists());
        assert!(remove(&path).is_err());
    }
}
