use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the file written inside the root directory.
pub const OUTPUT_FILE_NAME: &str = "ai-context.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryDetection {
    /// Null byte anywhere in the first 1024 bytes.
    Simple,
    /// `content_inspector` over the same prefix.
    Accurate,
    None,
}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AicatOptions {
    pub root: PathBuf,
    pub types: Vec<String>,
    pub exclude: Vec<String>,
    pub ignore_patterns: Vec<String>,
    pub binary_detection: BinaryDetection,
    pub follow_links: bool,
}
impl Default for AicatOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            types: Vec::new(),
            exclude: Vec::new(),
            ignore_patterns: Vec::new(),
            binary_detection: BinaryDetection::Simple,
            follow_links: false,
        }
    }
}
#[derive(Debug, Default)]
pub struct AicatBuilder {
    options: AicatOptions,
}
impl AicatBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: AicatOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    pub fn types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.types = types.into_iter().map(Into::into).collect();
        self
    }
    pub fn exclude<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.exclude = dirs.into_iter().map(Into::into).collect();
        self
    }
    pub fn ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.options.ignore_patterns = patterns;
        self
    }
    pub fn binary_detection(mut self, method: BinaryDetection) -> Self {
        self.options.binary_detection = method;
        self
    }
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.options.follow_links = yes;
        self
    }
    pub fn build(self) -> AicatOptions {
        self.options
    }
}

/// Splits a comma-separated command line value into its entries.
///
/// Entries are kept verbatim (including empty ones); trimming is up to the
/// consumer since extensions and directories normalize differently.
pub fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_empty_entries() {
        assert_eq!(split_list("cpp, h,"), vec!["cpp", " h", ""]);
        assert_eq!(split_list("txt"), vec!["txt"]);
    }

    #[test]
    fn builder_defaults_to_simple_detection() {
        let options = AicatBuilder::new("/tmp").types(["rs"]).build();
        assert_eq!(options.binary_detection, BinaryDetection::Simple);
        assert_eq!(options.types, vec!["rs".to_string()]);
        assert!(options.exclude.is_empty());
        assert!(!options.follow_links);
    }
}
