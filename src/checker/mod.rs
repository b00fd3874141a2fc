//! Run-grouped consistency checking of word-list records.
//!
//! Records are processed strictly in input order and grouped into *runs*,
//! maximal contiguous stretches sharing one source. Each record's
//! orthographic value is transduced through its source's transcription
//! profile, reconciled with the recorded form (resolving bracket variants
//! and stress-mark differences), tokenized against the phonetic inventory,
//! and compared with the recorded segmentation. Every inconsistency is
//! reported through the diagnostic sink; nothing short of a broken rule
//! file stops the pipeline.
//!
//! At each run boundary the override policy decides whether the original or
//! the derived records survive; interactive modes delegate to the injected
//! [`DecisionProvider`]. When the policy persists changes at all, the table
//! is replaced exactly once, after the last record.

pub mod catalog;
pub mod diagnostics;
pub mod policy;
pub mod record;

pub use catalog::{DirectoryProfiles, MemoryProfiles, ProfileSource, TranscriptionCatalog};
pub use diagnostics::{DiagnosticSink, WriterSink};
pub use policy::{DecisionProvider, FixedDecision, OverrideMode};
pub use record::{Record, RecordId, RecordTable, PLACEHOLDER_VALUE};

use crate::normalize::{expand_brackets, StressPolicy};
use crate::segment::{Inventory, Segment};
use crate::transducer::ConfigurationError;

use policy::resolve_run;

/// Drives the per-record consistency pipeline over runs of records.
///
/// One checker instance owns the transcription catalog caches and the run
/// accumulators; nothing is shared between instances or hidden in globals.
/// Capabilities are injected at construction: the profile source behind the
/// catalog, the phonetic inventory, the diagnostic sink, and the decision
/// provider backing the interactive override modes.
pub struct ConsistencyChecker<P, I, S, D> {
    catalog: TranscriptionCatalog<P>,
    inventory: I,
    sink: S,
    decider: D,
    stress: StressPolicy,
    mode: OverrideMode,
    /// `Some(source)` while a run is open.
    current_source: Option<Option<String>>,
    run_original: Vec<Record>,
    run_derived: Vec<Record>,
    output: Vec<Record>,
}

impl<P, I, S, D> ConsistencyChecker<P, I, S, D>
where
    P: ProfileSource,
    I: Inventory,
    S: DiagnosticSink,
    D: DecisionProvider,
{
    /// Create a checker with the default policy settings: stress marks
    /// ignored in comparisons, [`OverrideMode::KeepOld`].
    pub fn new(provider: P, inventory: I, sink: S, decider: D) -> Self {
        Self {
            catalog: TranscriptionCatalog::new(provider),
            inventory,
            sink,
            decider,
            stress: StressPolicy::default(),
            mode: OverrideMode::default(),
            current_source: None,
            run_original: Vec::new(),
            run_derived: Vec::new(),
            output: Vec::new(),
        }
    }

    /// Set the override mode.
    pub fn with_mode(mut self, mode: OverrideMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the stress policy used for comparisons.
    pub fn with_stress(mut self, stress: StressPolicy) -> Self {
        self.stress = stress;
        self
    }

    /// The override mode this checker was configured with.
    pub fn mode(&self) -> OverrideMode {
        self.mode
    }

    /// Process one record, flushing the previous run if the source changed.
    ///
    /// Records must be fed in their table order; run grouping and the
    /// interactive prompts are order-dependent.
    pub fn process(&mut self, record: &Record) -> Result<(), ConfigurationError> {
        if record.source.is_none() {
            self.sink
                .emit(&format!("Source not found for form {}.", record.id));
        }

        if self.current_source.as_ref() != Some(&record.source) {
            self.flush_run();
            self.current_source = Some(record.source.clone());
            self.sink.emit(&format!(
                "Checking source {}.",
                record.source.as_deref().unwrap_or("(none)")
            ));
        }

        if record.is_placeholder() {
            self.process_placeholder(record);
            return Ok(());
        }

        let Some(mut form) = self.derive_form(record)? else {
            // idiosyncratic orthography without a recorded form: nothing to
            // derive, nothing to validate
            self.run_original.push(record.clone());
            self.run_derived.push(record.clone());
            return Ok(());
        };

        form = self.reconcile_form(record, form);
        let segments = self.validate_segments(record, &form);

        let mut derived = record.clone();
        derived.form = Some(form);
        derived.segments = segments;
        self.run_original.push(record.clone());
        self.run_derived.push(derived);
        Ok(())
    }

    /// Flush the final run and return the accumulated output.
    pub fn finish(&mut self) -> Vec<Record> {
        self.flush_run();
        self.current_source = None;
        std::mem::take(&mut self.output)
    }

    /// Process a whole record list in order and return the reconciled
    /// output.
    pub fn check_all(&mut self, records: &[Record]) -> Result<Vec<Record>, ConfigurationError> {
        for record in records {
            self.process(record)?;
        }
        Ok(self.finish())
    }

    /// Check a table and, unless the mode is [`OverrideMode::KeepOld`],
    /// replace its contents with the reconciled output.
    ///
    /// The replacement happens exactly once, after every record has been
    /// processed; there are no partial writes.
    pub fn check_table<T: RecordTable>(
        &mut self,
        table: &mut T,
    ) -> Result<Vec<Record>, ConfigurationError> {
        let snapshot = table.records().to_vec();
        let output = self.check_all(&snapshot)?;
        if self.mode.persists() {
            table.replace(output.clone());
        }
        Ok(output)
    }

    /// A record whose value is empty or a placeholder: clear the dependent
    /// fields and report anything that should not have been there.
    fn process_placeholder(&mut self, record: &Record) {
        if let Some(form) = record.given_form() {
            self.sink.emit(&format!(
                "Form {} is not given in source, but had a form [{}] specified.",
                record.id, form
            ));
        }
        if !record.segments.is_empty() {
            self.sink.emit(&format!(
                "Form {} is not given in source, but had segments [{}] specified.",
                record.id,
                record.segments.join(" ")
            ));
        }
        let mut cleared = record.clone();
        cleared.form = None;
        cleared.segments.clear();
        // the cleared record goes to both lists: original and derived agree,
        // so per-record prompting auto-keeps it
        self.run_original.push(cleared.clone());
        self.run_derived.push(cleared);
    }

    /// Derive the phonetic form for a record, or `None` when the source has
    /// no profile and no form was recorded.
    fn derive_form(&mut self, record: &Record) -> Result<Option<String>, ConfigurationError> {
        match self.catalog.resolve(record.source.as_deref())? {
            Some(profile) => Ok(Some(profile.apply(&record.value))),
            None => match record.given_form() {
                Some(given) => Ok(Some(given.to_string())),
                None => {
                    self.sink.emit(&format!(
                        "Form {} has idiosyncratic orthography and original value <{}>, \
                         but no form was given.",
                        record.id, record.value
                    ));
                    Ok(None)
                }
            },
        }
    }

    /// Reconcile the derived form with the recorded one, resolving bracket
    /// variants and stress differences. Returns the form to carry forward.
    fn reconcile_form(&mut self, record: &Record, derived: String) -> String {
        let given = record.given_form();
        if given == Some(derived.as_str()) {
            return derived;
        }

        let variants = expand_brackets(&derived);
        if variants.len() > 1 {
            if let Some(given) = given {
                let target = self.stress.normalize(given);
                let mut matches = variants
                    .iter()
                    .filter(|variant| self.stress.normalize(variant.as_str()) == target);
                if let (Some(resolution), None) = (matches.next(), matches.next()) {
                    // exactly one variant of the derived form is the
                    // recorded one; keep whichever spelling is longer
                    if resolution.chars().count() > given.chars().count() {
                        self.sink.emit(&format!(
                            "Form {} has original value <{}>, which contains brackets. \
                             Canonically, it would be [{}] according to the orthography. \
                             Variant form [{}] was given explicitly. \
                             Taking form [{}] as compromise.",
                            record.id, record.value, derived, given, resolution
                        ));
                        return resolution.clone();
                    }
                    self.sink.emit(&format!(
                        "Form {} has original value <{}>, which contains brackets. \
                         Canonically, it would be [{}] according to the orthography. \
                         Variant form [{}] was given explicitly.",
                        record.id, record.value, derived, given
                    ));
                    return given.to_string();
                }
            }
        }

        match given {
            Some(given) if self.stress.eq(given, &derived) => {
                // only stress marks differ: no diagnostic
            }
            Some(given) => {
                self.sink.emit(&format!(
                    "Form {} has original value <{}>, which should correspond to [{}] \
                     according to the orthography, but form [{}] was given.",
                    record.id, record.value, derived, given
                ));
            }
            None => {
                self.sink.emit(&format!(
                    "Form {} has original value <{}>, which should correspond to [{}] \
                     according to the orthography, but no form was given.",
                    record.id, record.value, derived
                ));
            }
        }
        derived
    }

    /// Tokenize the form, report unknown segments and any divergence from
    /// the recorded segmentation, and return the derived segmentation.
    fn validate_segments(&mut self, record: &Record, form: &str) -> Vec<String> {
        let segments = self.inventory.tokenize(form);
        for segment in &segments {
            if let Segment::Unknown(raw) = segment {
                self.sink.emit(&format!(
                    "Form {} [{}] contains unknown segment '{}'.",
                    record.id, form, raw
                ));
            }
        }
        let derived: Vec<String> = segments.into_iter().map(Segment::into_string).collect();

        let given_normalized: Vec<String> = record
            .segments
            .iter()
            .map(|segment| self.stress.normalize(segment).into_owned())
            .collect();
        let derived_normalized: Vec<String> = derived
            .iter()
            .map(|segment| self.stress.normalize(segment).into_owned())
            .collect();
        if given_normalized != derived_normalized {
            self.sink.emit(&format!(
                "Form {} has form {}, which should correspond to segments [{}], \
                 but segments [{}] were given.",
                record.id,
                form,
                derived.join(" "),
                record.segments.join(" ")
            ));
        }
        derived
    }

    /// Resolve the accumulated run through the override policy.
    fn flush_run(&mut self) {
        if self.current_source.is_none() {
            return;
        }
        let original = std::mem::take(&mut self.run_original);
        let derived = std::mem::take(&mut self.run_derived);
        let source = self.current_source.clone().flatten();
        let winners = resolve_run(
            self.mode,
            &mut self.decider,
            source.as_deref(),
            original,
            derived,
        );
        self.output.extend(winners);
    }
}
