//! Pre-parsed command line input handed to routes

/// Name, version, and description of the running package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    pub description: String,
}

impl PackageInfo {
    /// Metadata of this build
    pub fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: env!("CARGO_PKG_DESCRIPTION").to_string(),
        }
    }
}

impl Default for PackageInfo {
    fn default() -> Self {
        Self::current()
    }
}

/// Flags routes may inspect
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags {
    pub help: bool,
    pub version: bool,
    /// Storage strategy override for this invocation
    pub store: Option<String>,
    /// Message key for `read`
    pub key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    /// Positional command words, e.g. `["add", "org"]`
    pub input: Vec<String>,
    pub flags: Flags,
    pub pkg: PackageInfo,
}

impl ParsedArgs {
    pub fn new(input: Vec<String>, flags: Flags) -> Self {
        Self {
            input,
            flags,
            pkg: PackageInfo::current(),
        }
    }

    /// Parse whitespace separated command words with no flags set
    pub fn from_words(words: &str) -> Self {
        Self::new(
            words.split_whitespace().map(str::to_string).collect(),
            Flags::default(),
        )
    }

    /// Whether the input begins with exactly these words
    pub fn starts_with(&self, words: &[&str]) -> bool {
        self.input.len() >= words.len() && self.input.iter().zip(words).all(|(a, b)| a == b)
    }
}
