use thiserror::Error;

/// Reasons a rating period can not be constructed or rated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Every opponent needs exactly one outcome, and vice versa.
    #[error("got {opponents} opponents but {outcomes} outcomes")]
    LengthMismatch { opponents: usize, outcomes: usize },
    /// A rating, deviation, volatility or system constant outside of its
    /// domain. Accepting it would only propagate `NaN` through the update.
    #[error("degenerate input: {what} = {value}")]
    DegenerateInput { what: &'static str, value: f64 },
    /// The volatility iteration did not converge within the configured
    /// number of iterations.
    #[error("volatility did not converge within {iterations} iterations")]
    ConvergenceFailure { iterations: usize },
}

impl Error {
    pub(crate) fn degenerate(what: &'static str, value: f64) -> Error {
        Error::DegenerateInput { what, value }
    }
}
