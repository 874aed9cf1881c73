//! One `stepsort run`: config and input in, a sorted (or cancelled) report out.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};

use crate::core::algorithm::Algorithm;
use crate::core::sink::{SortOutcome, StepSink};
use crate::core::step::Step;
use crate::core::tally::StepTally;
use crate::dispatch::{RunOptions, run_integers};
use crate::io::config::SortConfig;
use crate::io::input::generate;
use crate::io::trace::TraceWriter;

/// Everything one session needs, after CLI flags were folded into the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub algorithm: Algorithm,
    pub input: Vec<i64>,
    /// Stop after this many events; `0` means unlimited.
    pub max_steps: u64,
    pub delay: Duration,
    pub seed: Option<u64>,
    pub trace: Option<PathBuf>,
}

impl SessionSettings {
    /// Use `values` when given, otherwise generate input from `cfg.input`.
    pub fn from_config(algorithm: Algorithm, cfg: &SortConfig, values: Option<Vec<i64>>) -> Self {
        let input = values.unwrap_or_else(|| generate(&cfg.input, cfg.run.seed));
        Self {
            algorithm,
            input,
            max_steps: cfg.run.max_steps,
            delay: Duration::from_millis(cfg.run.delay_ms),
            seed: cfg.run.seed,
            trace: None,
        }
    }
}

/// Reason why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStop {
    Completed,
    /// The step limit refused the `max_steps`-th event.
    StepLimit { max_steps: u64 },
}

/// Summary of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub algorithm: Algorithm,
    pub input: Vec<i64>,
    pub outcome: SortOutcome<i64>,
    pub tally: StepTally,
    pub stop: SessionStop,
}

/// Composite sink: tally, optional trace, pacing and the step limit.
struct SessionSink {
    tally: StepTally,
    trace: Option<TraceWriter<BufWriter<File>>>,
    max_steps: u64,
    seen: u64,
    delay: Duration,
}

impl SessionSink {
    fn limit_reached(&self) -> bool {
        self.max_steps > 0 && self.seen >= self.max_steps
    }
}

impl StepSink<i64> for SessionSink {
    fn on_step(&mut self, step: Step<i64>, sequence: &[i64]) -> bool {
        self.seen += 1;
        self.tally.record(&step);
        if let Some(trace) = self.trace.as_mut() {
            if !trace.on_step(step, sequence) {
                return false;
            }
        }
        if self.limit_reached() {
            return false;
        }
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        true
    }
}

/// Run one sort with the session's sink wrapped around the dispatcher.
///
/// Reaching the step limit is a normal outcome. A trace write failure is an
/// error even though the sort itself stopped cleanly.
pub fn run_session(settings: &SessionSettings) -> Result<SessionReport> {
    let trace = match &settings.trace {
        Some(path) => Some(TraceWriter::create(path)?),
        None => None,
    };
    let mut sink = SessionSink {
        tally: StepTally::new(settings.input.len()),
        trace,
        max_steps: settings.max_steps,
        seen: 0,
        delay: settings.delay,
    };

    info!(
        algorithm = %settings.algorithm,
        len = settings.input.len(),
        max_steps = settings.max_steps,
        "session started"
    );
    let options = RunOptions {
        seed: settings.seed,
    };
    let outcome = run_integers(settings.algorithm, &settings.input, &mut sink, &options);

    if let Some(trace) = sink.trace.take() {
        trace.finish()?;
    }
    let stop = if outcome.is_completed() {
        SessionStop::Completed
    } else {
        warn!(
            algorithm = %settings.algorithm,
            max_steps = settings.max_steps,
            "step limit reached, sort cancelled"
        );
        SessionStop::StepLimit {
            max_steps: settings.max_steps,
        }
    };
    info!(steps = outcome.steps, stop = ?stop, "session finished");

    Ok(SessionReport {
        algorithm: settings.algorithm,
        input: settings.input.clone(),
        outcome,
        tally: sink.tally,
        stop,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::step::StepKind;
    use crate::test_support::{is_permutation, is_sorted};
    use std::fs;

    fn settings(algorithm: Algorithm, input: Vec<i64>) -> SessionSettings {
        SessionSettings {
            algorithm,
            input,
            max_steps: 0,
            delay: Duration::ZERO,
            seed: Some(1),
            trace: None,
        }
    }

    #[test]
    fn unlimited_session_completes_with_full_coverage() {
        let report = run_session(&settings(Algorithm::Heap, vec![5, 3, 1, 4, 2])).expect("run");
        assert_eq!(report.stop, SessionStop::Completed);
        assert_eq!(report.outcome.sequence, vec![1, 2, 3, 4, 5]);
        assert!(report.tally.all_sorted());
        assert!(report.tally.completed());
        assert_eq!(report.tally.total(), report.outcome.steps);
    }

    #[test]
    fn step_limit_cancels_on_the_limit() {
        let mut s = settings(Algorithm::Bubble, vec![5, 4, 3, 2, 1]);
        s.max_steps = 4;
        let report = run_session(&s).expect("run");
        assert_eq!(report.stop, SessionStop::StepLimit { max_steps: 4 });
        assert_eq!(report.outcome.steps, 4);
        assert_eq!(report.tally.count(StepKind::Completed), 0);
        assert!(is_permutation(&report.outcome.sequence, &report.input));
    }

    #[test]
    fn bogo_with_limit_always_terminates() {
        let mut s = settings(Algorithm::Bogo, (0..30).rev().collect());
        s.max_steps = 1_000;
        let report = run_session(&s).expect("run");
        assert_eq!(report.stop, SessionStop::StepLimit { max_steps: 1_000 });
    }

    #[test]
    fn generated_input_follows_config() {
        let mut cfg = SortConfig::default();
        cfg.input.size = 12;
        cfg.run.seed = Some(8);
        let s = SessionSettings::from_config(Algorithm::Radix, &cfg, None);
        assert_eq!(s.input.len(), 12);
        let report = run_session(&s).expect("run");
        assert!(is_sorted(&report.outcome.sequence));
    }

    #[test]
    fn explicit_values_win_over_generation() {
        let cfg = SortConfig::default();
        let s = SessionSettings::from_config(Algorithm::Quick, &cfg, Some(vec![2, 1]));
        assert_eq!(s.input, vec![2, 1]);
    }

    #[test]
    fn trace_file_has_one_line_per_event() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("trace.jsonl");
        let mut s = settings(Algorithm::Bucket, vec![42, 7, 19]);
        s.trace = Some(path.clone());
        let report = run_session(&s).expect("run");
        let contents = fs::read_to_string(&path).expect("read trace");
        assert_eq!(contents.lines().count() as u64, report.outcome.steps);
        assert!(contents.lines().last().expect("line").contains("\"completed\""));
    }

    #[test]
    fn unwritable_trace_path_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let mut s = settings(Algorithm::Merge, vec![2, 1]);
        s.trace = Some(temp.path().join("missing").join("trace.jsonl"));
        assert!(run_session(&s).is_err());
    }
}
