use std::fmt;

use ordered_float::OrderedFloat;
use tracing::debug;

use crate::interpreter::{evaluator::core::Context, source::logical_lines};

/// What a suite line expects from its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// The line must succeed and leave this value on top of the stack.
    /// `NaN` matches `NaN`.
    Value(OrderedFloat<f64>),
    /// The line must fail.
    Error,
    /// The line must succeed; its value is not checked.
    Ignore,
}

impl Expectation {
    /// Parses the expected column of a suite line.
    ///
    /// ```
    /// use stackcalc::suite::Expectation;
    ///
    /// assert_eq!(Expectation::parse("ERROR"), Some(Expectation::Error));
    /// assert_eq!(Expectation::parse(" -2.5 "), Some(Expectation::Value((-2.5).into())));
    /// assert_eq!(Expectation::parse("maybe"), None);
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "ERROR" => Some(Self::Error),
            "IGNORE" => Some(Self::Ignore),
            number => number.parse::<f64>().ok().map(|n| Self::Value(n.into())),
        }
    }
}

/// How a failed case failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The line succeeded with the wrong value, or succeeded where it should
    /// have failed.
    Missed {
        /// Postfix form of the evaluated tree, if the line was an expression.
        postfix: Option<String>,
        /// The value on top of the stack, if any.
        actual:  Option<OrderedFloat<f64>>,
    },
    /// The line failed unexpectedly, or the suite line itself is malformed.
    Errored {
        /// The error message.
        message: String,
    },
}

/// One failed suite case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseFailure {
    /// 1-based line number in the suite source.
    pub line:    usize,
    /// The input column, or the whole line when it could not be split.
    pub input:   String,
    /// What went wrong.
    pub failure: Failure,
}

/// Counts and failures of a suite run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteReport {
    /// Cases that met their expectation.
    pub ok:       usize,
    /// Cases that succeeded but did not meet their expectation.
    pub missed:   usize,
    /// Cases that failed unexpectedly.
    pub errored:  usize,
    /// Every missed or errored case, in suite order.
    pub failures: Vec<CaseFailure>,
}

impl SuiteReport {
    /// Returns whether every case met its expectation.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.missed == 0 && self.errored == 0
    }

    fn record(&mut self, line: usize, input: &str, failure: Failure) {
        match failure {
            Failure::Missed { .. } => self.missed += 1,
            Failure::Errored { .. } => self.errored += 1,
        }
        self.failures.push(CaseFailure { line,
                                         input: input.to_string(),
                                         failure });
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for case in &self.failures {
            match &case.failure {
                Failure::Missed { postfix, actual } => {
                    write!(f, "MIS {}: {}", case.line, case.input)?;
                    if let Some(postfix) = postfix {
                        write!(f, " => {postfix}")?;
                    }
                    match actual {
                        Some(value) => writeln!(f, " = {value}")?,
                        None => writeln!(f, " = (empty stack)")?,
                    }
                },
                Failure::Errored { message } => {
                    writeln!(f, "ERR {}: {} => {message}", case.line, case.input)?;
                },
            }
        }

        writeln!(f, "OK: {}", self.ok)?;
        writeln!(f, "MIS: {}", self.missed)?;
        write!(f, "ERR: {}", self.errored)
    }
}

/// Runs a test suite against a context.
///
/// Each logical line has the form `input,expected`, split at the first comma.
/// Blank lines and lines starting with `#` are skipped. The input is run as a
/// line, then the top of the stack is taken as its value and the rest of the
/// stack is discarded, so every case starts from an empty stack. Symbols and
/// directives carry over from one case to the next.
///
/// # Parameters
/// - `context`: The context to run the cases in.
/// - `source`: The suite text.
///
/// # Returns
/// The counts and the list of failed cases.
///
/// # Example
/// ```
/// use stackcalc::{interpreter::evaluator::core::Context, suite::run_suite};
///
/// let suite = "1 + 2 * 3,7\n@x = 2,IGNORE\nx ^ 3,8\ny,ERROR\n0/0,nan\n2 + 2,5\n";
/// let report = run_suite(&mut Context::new(), suite);
///
/// assert_eq!(report.ok, 5);
/// assert_eq!(report.missed, 1);
/// assert_eq!(report.errored, 0);
/// ```
pub fn run_suite(context: &mut Context, source: &str) -> SuiteReport {
    let mut report = SuiteReport::default();

    for (number, line) in logical_lines(source) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((input, expected)) = line.split_once(',') else {
            report.record(number,
                          &line,
                          Failure::Errored { message: "suite line has no ',' separator".to_string() });
            continue;
        };
        let Some(expected) = Expectation::parse(expected) else {
            report.record(number,
                          input,
                          Failure::Errored { message: format!("invalid expected value '{}'",
                                                              expected.trim()) });
            continue;
        };

        let outcome = context.run_line(input);
        let actual = context.pop_from_stack().map(OrderedFloat);
        context.clear_stack();

        let failure = match (outcome, expected) {
            (Err(_), Expectation::Error) | (Ok(_), Expectation::Ignore) => None,
            (Ok(_), Expectation::Value(value)) if actual == Some(value) => None,
            (Ok(tree), _) => Some(Failure::Missed { postfix: tree.map(|tree| tree.postfix()),
                                                    actual }),
            (Err(error), _) => Some(Failure::Errored { message: error.to_string() }),
        };

        debug!(line = number, input, passed = failure.is_none(), "suite case");
        match failure {
            None => report.ok += 1,
            Some(failure) => report.record(number, input, failure),
        }
    }

    report
}
