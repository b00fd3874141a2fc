//! Lazy transcription-profile resolution and caching.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::transducer::{parse_rules, ConfigurationError, RuleSet, TranscriptionProfile};

/// Source of orthographic-profile metadata and rule-file contents.
///
/// Sources reference their profile as an ordered list of rule-file names;
/// where the names come from (source metadata, a config file) and how files
/// are read is the provider's business.
pub trait ProfileSource {
    /// The ordered rule-file names for a source, or `None` when the source
    /// has no orthographic profile.
    ///
    /// An empty list is legal and distinct from `None`: it means the
    /// source's values are already phonetic and need no rewriting, while
    /// `None` means the orthography is idiosyncratic and a phonetic form
    /// must be supplied explicitly.
    fn profile(&self, source: &str) -> Option<Vec<String>>;

    /// Read the contents of one rule file.
    fn read_rules(&self, file: &str) -> io::Result<String>;
}

/// In-memory profile source for tests and embedded configurations.
#[derive(Debug, Clone, Default)]
pub struct MemoryProfiles {
    profiles: FxHashMap<String, Vec<String>>,
    files: FxHashMap<String, String>,
}

impl MemoryProfiles {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source's ordered rule files.
    pub fn set_profile<I, S>(&mut self, source: impl Into<String>, files: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.profiles
            .insert(source.into(), files.into_iter().map(Into::into).collect());
    }

    /// Register one rule file's contents.
    pub fn set_rules(&mut self, file: impl Into<String>, text: impl Into<String>) {
        self.files.insert(file.into(), text.into());
    }
}

impl ProfileSource for MemoryProfiles {
    fn profile(&self, source: &str) -> Option<Vec<String>> {
        self.profiles.get(source).cloned()
    }

    fn read_rules(&self, file: &str) -> io::Result<String> {
        self.files.get(file).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no rule file {file}"))
        })
    }
}

/// Profile source reading rule files from a directory.
///
/// Profile references are supplied up front, typically lifted from source
/// metadata; rule files resolve relative to the root directory.
#[derive(Debug, Clone)]
pub struct DirectoryProfiles {
    root: PathBuf,
    profiles: FxHashMap<String, Vec<String>>,
}

impl DirectoryProfiles {
    /// Create a provider rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            profiles: FxHashMap::default(),
        }
    }

    /// Register a source's ordered rule files.
    pub fn set_profile<I, S>(&mut self, source: impl Into<String>, files: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.profiles
            .insert(source.into(), files.into_iter().map(Into::into).collect());
    }
}

impl ProfileSource for DirectoryProfiles {
    fn profile(&self, source: &str) -> Option<Vec<String>> {
        self.profiles.get(source).cloned()
    }

    fn read_rules(&self, file: &str) -> io::Result<String> {
        std::fs::read_to_string(self.root.join(file))
    }
}

/// Lazily built source-to-profile mapping with per-file rule-set sharing.
///
/// Two append-only caches, both owned by the catalog for one checker run:
/// rule files are parsed once even when several sources share them, and
/// each source's profile is resolved once. Records without a source group
/// under `None`, which never has a profile.
#[derive(Debug)]
pub struct TranscriptionCatalog<P> {
    provider: P,
    rule_sets: FxHashMap<String, Arc<RuleSet>>,
    profiles: FxHashMap<Option<String>, Option<TranscriptionProfile>>,
}

impl<P: ProfileSource> TranscriptionCatalog<P> {
    /// Create a catalog over a profile source.
    pub fn new(provider: P) -> Self {
        let mut profiles = FxHashMap::default();
        profiles.insert(None, None);
        Self {
            provider,
            rule_sets: FxHashMap::default(),
            profiles,
        }
    }

    /// Resolve (and cache) the profile for a source.
    ///
    /// A missing profile is a legal outcome, not an error; rule files that
    /// fail to load or parse are fatal for the whole source.
    pub fn resolve(
        &mut self,
        source: Option<&str>,
    ) -> Result<Option<&TranscriptionProfile>, ConfigurationError> {
        let key = source.map(str::to_string);
        if !self.profiles.contains_key(&key) {
            let built = match source.and_then(|name| self.provider.profile(name)) {
                None => None,
                Some(files) => {
                    let mut stages = Vec::with_capacity(files.len());
                    for file in &files {
                        stages.push(self.rule_set(file)?);
                    }
                    Some(TranscriptionProfile::new(stages))
                }
            };
            self.profiles.insert(key.clone(), built);
        }
        Ok(self.profiles.get(&key).and_then(Option::as_ref))
    }

    /// Parse (and cache) one rule file.
    fn rule_set(&mut self, file: &str) -> Result<Arc<RuleSet>, ConfigurationError> {
        if let Some(cached) = self.rule_sets.get(file) {
            return Ok(Arc::clone(cached));
        }
        let text = self
            .provider
            .read_rules(file)
            .map_err(|source| ConfigurationError::Read {
                file: file.to_string(),
                source,
            })?;
        let set = Arc::new(parse_rules(file, &text)?);
        self.rule_sets.insert(file.to_string(), Arc::clone(&set));
        Ok(set)
    }
}
