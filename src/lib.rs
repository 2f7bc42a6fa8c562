//! # aicat
//!
//! `aicat` recursively concatenates the text files under a root directory into a single
//! `ai-context.txt` inside that root, each file preceded by a header naming its path relative
//! to the root.
//!
//! Walked entries go through a fixed filter chain: regular files only, never the output file
//! itself, nothing under an excluded subdirectory, optional ignore globs, an optional extension
//! allow-list, and finally binary detection over the first 1024 bytes.
//!
//! The blocking API ([`aicat`]) writes the output file and returns an [`AicatReport`];
//! [`aicat_with`] also hands each recoverable [`Diagnostic`] to a callback as it happens. The
//! lazy [`AicatStream`] yields the accepted [`FileRecord`]s without writing anything.
//!
//! # Features
//!
//! - `logging` (default): Emits debug events via the `tracing` crate.
//!
//! # Example
//!
//! ```no_run
//! use aicat::{AicatBuilder, aicat};
//!
//! let options = AicatBuilder::new(".")
//!     .types(["rs", "toml"])
//!     .exclude(["target"])
//!     .build();
//!
//! let report = aicat(options).expect("Failed to concatenate directory");
//!
//! println!("Wrote {} files to {}", report.files.len(), report.output.display());
//! ```

mod engine;
mod error;
mod filter;
mod options;
pub mod output;
mod resolve;
mod types;

pub use engine::{AicatStream, aicat, aicat_with};
pub use error::AicatError;
pub use filter::{PROBE_LEN, Rejection, is_text_file};
pub use options::{AicatBuilder, AicatOptions, BinaryDetection, OUTPUT_FILE_NAME, split_list};
pub use types::{AicatReport, Diagnostic, FileRecord, SkippedFile};
