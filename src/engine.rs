use crate::error::AicatError;
use crate::filter::FilterChain;
use crate::options::AicatOptions;
use crate::output::ContextWriter;
use crate::resolve::ResolvedPaths;
use crate::types::{AicatReport, Diagnostic, FileRecord, SkippedFile};
use ignore::WalkBuilder;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
#[cfg(feature = "logging")]
use tracing;
struct Walker {
    inner: ignore::Walk,
}
impl Walker {
    fn new(root: &Path, follow_links: bool) -> Self {
        let mut builder = WalkBuilder::new(root);
        builder.standard_filters(false).follow_links(follow_links);
        Self {
            inner: builder.build(),
        }
    }
}
impl Iterator for Walker {
    type Item = Result<PathBuf, AicatError>;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|result| match result {
            Ok(entry) => Ok(entry.into_path()),
            Err(e) => Err(AicatError::Walk(e.to_string())),
        })
    }
}

/// Lazy sequence of the files that pass every filter stage, in walk order.
///
/// Walk errors are yielded as `Err` items and the stream keeps going after them.
pub struct AicatStream {
    walker: Walker,
    filter: FilterChain,
    root: PathBuf,
    output: PathBuf,
}
impl AicatStream {
    pub fn new(options: &AicatOptions) -> Result<Self, AicatError> {
        let paths = ResolvedPaths::resolve(&options.root, &options.exclude)?;
        #[cfg(feature = "logging")]
        tracing::debug!(
            "Resolved root {} with {} exclusion(s)",
            paths.root.display(),
            paths.excluded.len()
        );
        let filter = FilterChain::new(&paths, options)?;
        Ok(Self {
            walker: Walker::new(&paths.root, options.follow_links),
            filter,
            root: paths.root,
            output: paths.output,
        })
    }
    /// The canonical root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
    /// Where `aicat` writes its output.
    pub fn output_path(&self) -> &Path {
        &self.output
    }
}
impl Iterator for AicatStream {
    type Item = Result<FileRecord, AicatError>;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let path = match self.walker.next()? {
                Ok(p) => p,
                Err(e) => return Some(Err(e)),
            };
            match self.filter.check(&path) {
                Ok(()) => return Some(Ok(FileRecord::new(&self.root, path))),
                #[cfg(feature = "logging")]
                Err(reason) => tracing::debug!("Rejected {} ({:?})", path.display(), reason),
                #[cfg(not(feature = "logging"))]
                Err(_) => {}
            }
        }
    }
}

/// Concatenates every accepted file under the root into `<root>/ai-context.txt`.
///
/// The output file is only created once the root has been validated. Content
/// read failures and walk errors are recorded in the report; failing to write
/// the output is fatal.
pub fn aicat(options: AicatOptions) -> Result<AicatReport, AicatError> {
    aicat_with(options, |_| {})
}

/// Like [`aicat`], calling `on_diagnostic` for each recoverable failure as it happens.
pub fn aicat_with<F>(options: AicatOptions, mut on_diagnostic: F) -> Result<AicatReport, AicatError>
where
    F: FnMut(&Diagnostic),
{
    #[cfg(feature = "logging")]
    tracing::debug!("Starting aicat with root: {}", options.root.display());
    let stream = AicatStream::new(&options)?;
    let output = stream.output_path().to_path_buf();
    let file = File::create(&output).map_err(|e| AicatError::io(&output, e))?;
    let mut writer = ContextWriter::new(BufWriter::new(file));
    let mut report = AicatReport::new(output.clone());
    for item in stream {
        match item {
            Ok(record) => write_record(&mut writer, record, &mut report, &mut on_diagnostic)?,
            Err(e) => {
                let error = e.to_string();
                on_diagnostic(&Diagnostic::Walk(error.clone()));
                report.walk_errors.push(error);
            }
        }
    }
    writer.finish().map_err(|e| AicatError::io(&output, e))?;
    #[cfg(feature = "logging")]
    tracing::debug!(
        "Wrote {} file(s) to {}",
        report.files.len(),
        report.output.display()
    );
    Ok(report)
}

/// Writes one block. The header stays even when the content cannot be read.
fn write_record<W, F>(
    writer: &mut ContextWriter<W>,
    record: FileRecord,
    report: &mut AicatReport,
    on_diagnostic: &mut F,
) -> Result<(), AicatError>
where
    W: Write,
    F: FnMut(&Diagnostic),
{
    writer
        .write_header(&record.relative_path)
        .map_err(|e| AicatError::io(&report.output, e))?;
    match record.read_content() {
        Ok(content) => {
            writer
                .write_content(&content)
                .map_err(|e| AicatError::io(&report.output, e))?;
            report.files.push(record.relative_path);
        }
        Err(e) => {
            #[cfg(feature = "logging")]
            tracing::debug!("Could not read {}: {}", record.absolute_path.display(), e);
            let skipped = SkippedFile {
                path: record.absolute_path,
                error: e.to_string(),
            };
            on_diagnostic(&Diagnostic::Unreadable(skipped.clone()));
            report.skipped.push(skipped);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::AicatBuilder;
    use crate::output::format_header;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn vanished_file_keeps_header_and_is_reported() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "hello").unwrap();
        let mut stream = AicatStream::new(&AicatBuilder::new(dir.path()).build()).unwrap();
        let output = stream.output_path().to_path_buf();
        let record = stream.next().unwrap().unwrap();
        let absolute = record.absolute_path.clone();
        fs::remove_file(&absolute).unwrap();

        let mut writer = ContextWriter::new(Vec::new());
        let mut report = AicatReport::new(output);
        let mut lines = Vec::new();
        write_record(&mut writer, record, &mut report, &mut |d: &Diagnostic| {
            lines.push(d.to_string())
        })
        .unwrap();

        let bytes = writer.finish().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            format_header(Path::new("a.txt"))
        );
        assert!(report.files.is_empty());
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].path, absolute);
        assert!(!report.skipped[0].error.is_empty());
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with(&format!("Skipping {} due to error: ", absolute.display())));
    }

    #[test]
    fn readable_file_is_written_after_header() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "hello").unwrap();
        let mut stream = AicatStream::new(&AicatBuilder::new(dir.path()).build()).unwrap();
        let output = stream.output_path().to_path_buf();
        let record = stream.next().unwrap().unwrap();

        let mut writer = ContextWriter::new(Vec::new());
        let mut report = AicatReport::new(output);
        write_record(&mut writer, record, &mut report, &mut |_: &Diagnostic| {}).unwrap();

        let bytes = writer.finish().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            format!("{}hello", format_header(Path::new("a.txt")))
        );
        assert_eq!(report.files, vec![PathBuf::from("a.txt")]);
        assert!(report.skipped.is_empty());
    }
}
