//! Build orchestration: stub resolution, walk-and-filter, and the
//! container batch lifecycle.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use crate::bundle;
use crate::bundle::CompressionMode;
use crate::bundle::Container;
use crate::bundle::TarBundle;
use crate::config::PackSpec;
use crate::config::STUB_FILE;
use crate::error::Result;
use crate::ignore::IgnoreRules;
use crate::report::BuildReport;
use crate::report::IgnoredEntry;
use crate::walk::walk;

/// Receives build progress notices as they happen.
///
/// The CLI wires this to its output formatter; library callers that do
/// not care can pass [`NullObserver`].
pub trait BuildObserver {
    /// An existing output file is about to be deleted.
    fn on_overwrite(&mut self, output: &Path);

    /// A candidate was excluded by `rule`.
    fn on_ignored(&mut self, path: &Path, rule: &str);

    /// All surviving candidates were handed to the container.
    fn on_inserted(&mut self, count: usize);

    /// A compression pass is starting.
    fn on_compressing(&mut self, mode: CompressionMode);
}

/// Observer that discards every notice.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl BuildObserver for NullObserver {
    fn on_overwrite(&mut self, _output: &Path) {}
    fn on_ignored(&mut self, _path: &Path, _rule: &str) {}
    fn on_inserted(&mut self, _count: usize) {}
    fn on_compressing(&mut self, _mode: CompressionMode) {}
}

/// Builds a bundle on disk from `spec` using the tar container.
///
/// Deletes a pre-existing output file first (facility removal with a
/// plain filesystem delete as fallback), then runs the batch against a
/// fresh [`TarBundle`].
///
/// # Errors
///
/// Propagates walk, ignore-rule, and container failures; any container
/// error aborts the build with no cleanup beyond the initial overwrite
/// deletion.
pub fn build(spec: &PackSpec, observer: &mut dyn BuildObserver) -> Result<BuildReport> {
    let overwrote = prepare_output(&spec.output, observer)?;
    let container = TarBundle::create(&spec.output)?;
    let mut report = build_with(spec, container, observer)?;
    report.overwrote = overwrote;
    Ok(report)
}

/// Builds a bundle through an already-created container.
///
/// Exposed separately so alternative containers (and test doubles) can
/// reuse the orchestration unchanged. Does not handle output
/// overwriting; see [`build`].
///
/// # Errors
///
/// Same as [`build`], minus output deletion failures.
pub fn build_with<C: Container>(
    spec: &PackSpec,
    mut container: C,
    observer: &mut dyn BuildObserver,
) -> Result<BuildReport> {
    let start = Instant::now();
    let mut report = BuildReport::new();

    let stub = resolve_stub(spec)?;
    if !stub.is_empty() {
        container.set_stub(&stub);
    }
    container.set_digest(spec.digest);
    container.begin();

    let rules = IgnoreRules::for_base(&spec.base_dir, &spec.ignore)?;
    let mut entries: BTreeMap<PathBuf, PathBuf> = BTreeMap::new();
    for candidate in walk(&spec.base_dir)? {
        if let Some(rule) = rules.evaluate(&candidate) {
            observer.on_ignored(&candidate.relative, rule);
            report.ignored.push(IgnoredEntry {
                path: candidate.relative.clone(),
                rule: rule.to_string(),
            });
            continue;
        }
        entries.insert(candidate.relative, candidate.source);
    }

    report.files_added = container.insert_many(&entries)?;
    observer.on_inserted(report.files_added);

    if let Some(mode) = spec.compression {
        observer.on_compressing(mode);
        container.compress(mode)?;
        report.compressed = true;
    }

    container.finish()?;

    report.duration = start.elapsed();
    Ok(report)
}

/// Deletes a pre-existing output file. Returns whether one existed.
///
/// Facility removal failure falls back to a plain filesystem delete;
/// only the fallback's failure propagates.
fn prepare_output(output: &Path, observer: &mut dyn BuildObserver) -> Result<bool> {
    if !output.exists() {
        return Ok(false);
    }
    observer.on_overwrite(output);
    if bundle::remove(output).is_err() {
        fs::remove_file(output)?;
    }
    Ok(true)
}

/// Resolves the stub bytes for a build.
///
/// A stub argument naming an existing file is read from disk; otherwise
/// the argument is the literal stub text. When nothing resolved, a
/// `stub.sh` marker inside the base directory is read if present. The
/// result may be empty.
fn resolve_stub(spec: &PackSpec) -> Result<Vec<u8>> {
    let mut stub = match &spec.stub {
        Some(argument) => {
            let as_path = Path::new(argument);
            if as_path.is_file() {
                fs::read(as_path)?
            } else {
                argument.clone().into_bytes()
            }
        }
        None => Vec::new(),
    };

    if stub.is_empty() {
        let marker = spec.base_dir.join(STUB_FILE);
        if marker.is_file() {
            stub = fs::read(&marker)?;
        }
    }

    Ok(stub)
}
