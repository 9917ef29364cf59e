//! Bulk import of log files into the message store

use std::path::Path;
use std::time::Instant;

use crate::error::{AppError, AppResult};
use crate::source::Source;
use crate::store::Store;
use crate::utils::debug_log;

/// Files between progress lines during a directory import
const PROGRESS_EVERY: usize = 10;

/// Outcome of an import run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct ImportSummary {
    pub(crate) files: usize,
    pub(crate) inserted: usize,
    /// Valid records that were already stored
    pub(crate) duplicates: usize,
    /// Lines that could not be turned into records
    pub(crate) skipped: usize,
    /// Files that could not be read at all
    pub(crate) failed_files: usize,
}

impl ImportSummary {
    fn add_file(&mut self, parsed: usize, inserted: usize, skipped: usize) {
        self.files += 1;
        self.inserted += inserted;
        self.duplicates += parsed - inserted;
        self.skipped += skipped;
    }
}

/// Feeds records from a source into a store, one transaction per file
pub(crate) struct Importer<'a> {
    source: &'a dyn Source,
    store: &'a mut Store,
    quiet: bool,
}

impl<'a> Importer<'a> {
    pub(crate) fn new(source: &'a dyn Source, store: &'a mut Store, quiet: bool) -> Self {
        Self {
            source,
            store,
            quiet,
        }
    }

    fn import_one(&mut self, path: &Path, summary: &mut ImportSummary) -> AppResult<()> {
        let parsed = self.source.parse_file(path)?;
        let inserted = self.store.insert_records(&parsed.records)?;
        debug_log!(
            "{}: {} records, {} new, {} skipped lines",
            path.display(),
            parsed.records.len(),
            inserted,
            parsed.skipped
        );
        summary.add_file(parsed.records.len(), inserted, parsed.skipped);
        Ok(())
    }

    /// Import every log file under the source root.
    ///
    /// Unreadable files are counted and skipped; store failures abort.
    pub(crate) fn import_all(&mut self) -> AppResult<ImportSummary> {
        let root = self.source.root();
        if !root.is_dir() {
            return Err(AppError::ProjectsDirNotFound {
                path: root.to_path_buf(),
            });
        }

        let discovery_start = Instant::now();
        let files = self.source.find_files();
        let discovery_ms = discovery_start.elapsed().as_secs_f64() * 1000.0;

        if !self.quiet {
            eprintln!(
                "Found {} {} files ({:.2}ms)",
                files.len(),
                self.source.display_name(),
                discovery_ms
            );
        }

        let mut summary = ImportSummary::default();
        let total = files.len();
        for (i, path) in files.iter().enumerate() {
            match self.import_one(path, &mut summary) {
                Ok(()) => {}
                Err(AppError::Io(e)) => {
                    if !self.quiet {
                        eprintln!("Warning: could not read {}: {}", path.display(), e);
                    }
                    summary.failed_files += 1;
                }
                Err(e) => return Err(e),
            }

            let done = i + 1;
            if !self.quiet && (done % PROGRESS_EVERY == 0 || done == total) {
                eprintln!(
                    "Processed {}/{} files, {} messages inserted",
                    done, total, summary.inserted
                );
            }
        }

        Ok(summary)
    }

    /// Import a single log file
    pub(crate) fn import_file(&mut self, path: &Path) -> AppResult<ImportSummary> {
        if !path.is_file() {
            return Err(AppError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let mut summary = ImportSummary::default();
        self.import_one(path, &mut summary)?;
        Ok(summary)
    }
}
