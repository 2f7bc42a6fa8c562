use crate::error::AicatError;
use crate::options::{AicatOptions, BinaryDetection};
use crate::resolve::ResolvedPaths;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Number of leading bytes inspected by binary detection.
pub const PROBE_LEN: u64 = 1024;

/// Why a walked entry did not make it into the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotAFile,
    OutputFile,
    Excluded,
    Ignored,
    ExtensionMismatch,
    Binary,
}

/// Lower-cased, dot-stripped extensions. Empty accepts everything.
#[derive(Debug, Clone, Default)]
pub(crate) struct ExtensionFilter {
    allowed: HashSet<String>,
}

impl ExtensionFilter {
    pub fn new(types: &[String]) -> Self {
        let allowed = types
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
            .collect();
        Self { allowed }
    }

    pub fn accepts(&self, path: &Path) -> bool {
        if self.allowed.is_empty() {
            return true;
        }
        // No extension is the empty extension, so a trailing comma in `-t` admits such files.
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        self.allowed.contains(&ext)
    }
}

/// Plain prefixes over the raw path bytes, so excluding `foo` also drops `foobar`.
#[derive(Debug, Clone, Default)]
pub(crate) struct ExclusionSet {
    prefixes: Vec<PathBuf>,
}

impl ExclusionSet {
    pub fn new(paths: &[PathBuf]) -> Self {
        Self {
            prefixes: paths.to_vec(),
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        let path = path.as_os_str().as_encoded_bytes();
        self.prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_os_str().as_encoded_bytes()))
    }
}

fn build_ignore_set(patterns: &[String]) -> Result<Option<GlobSet>, AicatError> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| {
            AicatError::InvalidPattern(format!("Invalid glob pattern '{}': {}", pattern, e))
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map(Some)
        .map_err(|e| AicatError::InvalidPattern(format!("Failed to build glob set: {}", e)))
}

/// Returns true when the first [`PROBE_LEN`] bytes look like text.
///
/// Any error opening or reading the file counts as binary.
pub fn is_text_file(path: &Path, detection: BinaryDetection) -> bool {
    let mut prefix = Vec::with_capacity(PROBE_LEN as usize);
    let probed = File::open(path).and_then(|file| file.take(PROBE_LEN).read_to_end(&mut prefix));
    if probed.is_err() {
        return false;
    }
    match detection {
        BinaryDetection::Simple => !prefix.contains(&0),
        BinaryDetection::Accurate => content_inspector::inspect(&prefix).is_text(),
        BinaryDetection::None => true,
    }
}

/// The ordered checks every walked entry goes through.
#[derive(Debug)]
pub(crate) struct FilterChain {
    root: PathBuf,
    output: PathBuf,
    exclusions: ExclusionSet,
    ignore: Option<GlobSet>,
    extensions: ExtensionFilter,
    binary_detection: BinaryDetection,
}

impl FilterChain {
    pub fn new(paths: &ResolvedPaths, options: &AicatOptions) -> Result<Self, AicatError> {
        Ok(Self {
            root: paths.root.clone(),
            output: paths.output.clone(),
            exclusions: ExclusionSet::new(&paths.excluded),
            ignore: build_ignore_set(&options.ignore_patterns)?,
            extensions: ExtensionFilter::new(&options.types),
            binary_detection: options.binary_detection,
        })
    }

    pub fn check(&self, path: &Path) -> Result<(), Rejection> {
        if !path.is_file() {
            return Err(Rejection::NotAFile);
        }
        if fs::canonicalize(path).is_ok_and(|resolved| resolved == self.output) {
            return Err(Rejection::OutputFile);
        }
        if self.exclusions.contains(path) {
            return Err(Rejection::Excluded);
        }
        if let Some(ref ignore) = self.ignore {
            if ignore.is_match(path.strip_prefix(&self.root).unwrap_or(path)) {
                return Err(Rejection::Ignored);
            }
        }
        if !self.extensions.accepts(path) {
            return Err(Rejection::ExtensionMismatch);
        }
        if !is_text_file(path, self.binary_detection) {
            return Err(Rejection::Binary);
        }
        Ok(())
    }
}
