//! Override policy: reconciling original and derived record runs.

use super::record::Record;

/// How derived changes are reconciled with recorded values.
///
/// Selected once per checker; applied at every run boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverrideMode {
    /// Discard all derived changes. The safe default: the table is never
    /// written.
    #[default]
    KeepOld,
    /// Adopt every derived change.
    KeepNew,
    /// Ask once per source run; the single answer governs the whole run.
    AskPerRun,
    /// Ask once per record, auto-keeping records the check left unchanged.
    AskPerRecord,
}

impl OverrideMode {
    /// Whether this mode writes the accumulated output back to the table.
    pub fn persists(&self) -> bool {
        !matches!(self, OverrideMode::KeepOld)
    }
}

/// Synchronous decision capability backing the interactive modes.
///
/// The checker blocks on these calls; tests substitute a deterministic
/// implementation such as [`FixedDecision`].
pub trait DecisionProvider {
    /// Decide whether a whole run of derived records replaces the
    /// originals.
    fn confirm_run(&mut self, source: Option<&str>, original: &[Record], derived: &[Record])
        -> bool;

    /// Decide whether one derived record replaces its original.
    fn confirm_record(&mut self, original: &Record, derived: &Record) -> bool;
}

impl<T: DecisionProvider + ?Sized> DecisionProvider for &mut T {
    fn confirm_run(
        &mut self,
        source: Option<&str>,
        original: &[Record],
        derived: &[Record],
    ) -> bool {
        (**self).confirm_run(source, original, derived)
    }

    fn confirm_record(&mut self, original: &Record, derived: &Record) -> bool {
        (**self).confirm_record(original, derived)
    }
}

/// Answers every prompt with a fixed decision; the non-interactive harness.
#[derive(Debug, Clone, Copy)]
pub struct FixedDecision(pub bool);

impl DecisionProvider for FixedDecision {
    fn confirm_run(&mut self, _: Option<&str>, _: &[Record], _: &[Record]) -> bool {
        self.0
    }

    fn confirm_record(&mut self, _: &Record, _: &Record) -> bool {
        self.0
    }
}

/// Select which of two equal-length record lists survives for one run.
///
/// Never reorders records: the output is element-wise one of the two
/// inputs.
pub(crate) fn resolve_run<D: DecisionProvider>(
    mode: OverrideMode,
    decider: &mut D,
    source: Option<&str>,
    original: Vec<Record>,
    derived: Vec<Record>,
) -> Vec<Record> {
    debug_assert_eq!(original.len(), derived.len());
    match mode {
        OverrideMode::KeepOld => original,
        OverrideMode::KeepNew => derived,
        OverrideMode::AskPerRun => {
            if derived.is_empty() {
                original
            } else if decider.confirm_run(source, &original, &derived) {
                derived
            } else {
                original
            }
        }
        OverrideMode::AskPerRecord => original
            .into_iter()
            .zip(derived)
            .map(|(old, new)| {
                if old == new || !decider.confirm_record(&old, &new) {
                    old
                } else {
                    new
                }
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_fixture() -> (Vec<Record>, Vec<Record>) {
        let original = vec![
            Record::new(1u64, Some("s"), "aa").with_form("aa"),
            Record::new(2u64, Some("s"), "bb").with_form("bb"),
        ];
        let mut derived = original.clone();
        derived[1].form = Some("pp".into());
        (original, derived)
    }

    #[test]
    fn keep_old_discards_everything() {
        let (original, derived) = run_fixture();
        let out = resolve_run(
            OverrideMode::KeepOld,
            &mut FixedDecision(true),
            Some("s"),
            original.clone(),
            derived,
        );
        assert_eq!(out, original);
    }

    #[test]
    fn keep_new_adopts_everything() {
        let (original, derived) = run_fixture();
        let out = resolve_run(
            OverrideMode::KeepNew,
            &mut FixedDecision(false),
            Some("s"),
            original,
            derived.clone(),
        );
        assert_eq!(out, derived);
    }

    #[test]
    fn ask_per_run_applies_one_answer_to_the_whole_run() {
        let (original, derived) = run_fixture();
        let accepted = resolve_run(
            OverrideMode::AskPerRun,
            &mut FixedDecision(true),
            Some("s"),
            original.clone(),
            derived.clone(),
        );
        assert_eq!(accepted, derived);

        let declined = resolve_run(
            OverrideMode::AskPerRun,
            &mut FixedDecision(false),
            Some("s"),
            original.clone(),
            derived,
        );
        assert_eq!(declined, original);
    }

    #[test]
    fn ask_per_record_only_prompts_for_changed_records() {
        struct Counting(usize, bool);
        impl DecisionProvider for Counting {
            fn confirm_run(&mut self, _: Option<&str>, _: &[Record], _: &[Record]) -> bool {
                self.1
            }
            fn confirm_record(&mut self, _: &Record, _: &Record) -> bool {
                self.0 += 1;
                self.1
            }
        }

        let (original, derived) = run_fixture();
        let mut decider = Counting(0, true);
        let out = resolve_run(
            OverrideMode::AskPerRecord,
            &mut decider,
            Some("s"),
            original.clone(),
            derived.clone(),
        );
        // only record 2 changed, so only one prompt
        assert_eq!(decider.0, 1);
        assert_eq!(out[0], original[0]);
        assert_eq!(out[1], derived[1]);
    }

    #[test]
    fn persists_everywhere_but_keep_old() {
        assert!(!OverrideMode::KeepOld.persists());
        assert!(OverrideMode::KeepNew.persists());
        assert!(OverrideMode::AskPerRun.persists());
        assert!(OverrideMode::AskPerRecord.persists());
    }
}
