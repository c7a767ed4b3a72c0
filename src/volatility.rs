//! Step 5 of the Glicko-2 algorithm: the new volatility `σ'`.
//!
//! The new volatility is the root of
//!
//! ```text
//! f(x) = e^x (Δ² − φ² − v − e^x) / (2 (φ² + v + e^x)²) − (x − a) / τ²
//! ```
//!
//! with `x = ln(σ'²)` and `a = ln(σ²)`. `f` is not well-behaved enough for
//! plain secant iteration, so the root is first bracketed and then found
//! with the Illinois variant of regula falsi.

use crate::{
    rating_system::{CONVERGENCE_TOLERANCE, MAX_ITERATIONS},
    Error, Volatility,
};

/// Inputs of the volatility update, all on the internal scale.
#[derive(Debug, Copy, Clone)]
pub(crate) struct VolatilityProblem {
    /// Prior volatility `σ`.
    pub volatility: Volatility,
    /// Prior deviation `φ`.
    pub deviation: f64,
    /// Estimated variance `v`.
    pub variance: f64,
    /// Estimated improvement `Δ`.
    pub improvement: f64,
    /// System constant `τ`.
    pub tau: f64,
}

struct Convergence {
    a: f64,
    delta_sq: f64,
    phi_sq_plus_v: f64,
    tau_sq: f64,
}

impl Convergence {
    fn new(problem: &VolatilityProblem) -> Convergence {
        Convergence {
            a: problem.volatility.sq().ln(),
            delta_sq: problem.improvement.powi(2),
            phi_sq_plus_v: problem.deviation.powi(2) + problem.variance,
            tau_sq: problem.tau.powi(2),
        }
    }

    fn f(&self, x: f64) -> f64 {
        let ex = x.exp();
        ex * (self.delta_sq - self.phi_sq_plus_v - ex) / (2.0 * (self.phi_sq_plus_v + ex).powi(2))
            - (x - self.a) / self.tau_sq
    }
}

#[derive(Debug, Copy, Clone)]
pub(crate) struct IllinoisSolver {
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for IllinoisSolver {
    fn default() -> IllinoisSolver {
        IllinoisSolver {
            tolerance: CONVERGENCE_TOLERANCE,
            max_iterations: MAX_ITERATIONS,
        }
    }
}

impl IllinoisSolver {
    pub fn solve(&self, problem: &VolatilityProblem) -> Result<Volatility, Error> {
        let conv = Convergence::new(problem);

        let mut a = conv.a;
        let mut b = self.bracket(&conv, problem.tau)?;

        let mut fa = conv.f(a);
        let mut fb = conv.f(b);
        let mut iterations = 0;

        while (b - a).abs() > self.tolerance {
            iterations += 1;
            if iterations > self.max_iterations {
                return Err(Error::ConvergenceFailure { iterations: self.max_iterations });
            }

            let c = a + (a - b) * fa / (fb - fa);
            let fc = conv.f(c);
            if !c.is_finite() || !fc.is_finite() {
                return Err(Error::ConvergenceFailure { iterations });
            }
            tracing::trace!(iterations, a, b, c, fc, "illinois step");

            if fc * fb <= 0.0 {
                a = b;
                fa = fb;
            } else {
                fa /= 2.0;
            }
            b = c;
            fb = fc;
        }

        Ok(Volatility((a / 2.0).exp()))
    }

    /// Finds the second endpoint `B` of a bracket `[A, B]` around the root,
    /// where `A = a`.
    fn bracket(&self, conv: &Convergence, tau: f64) -> Result<f64, Error> {
        if conv.delta_sq > conv.phi_sq_plus_v {
            return Ok((conv.delta_sq - conv.phi_sq_plus_v).ln());
        }

        // f(x) grows without bound as x decreases, so stepping down from a
        // eventually crosses zero.
        for k in 1..=self.max_iterations {
            let b = conv.a - k as f64 * tau;
            if conv.f(b) >= 0.0 {
                return Ok(b);
            }
        }

        Err(Error::ConvergenceFailure { iterations: self.max_iterations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper_problem() -> VolatilityProblem {
        VolatilityProblem {
            volatility: Volatility(0.06),
            deviation: 1.1513,
            variance: 1.7785,
            improvement: -0.4834,
            tau: 0.5,
        }
    }

    #[test]
    fn test_paper_volatility() {
        let Volatility(volatility) = IllinoisSolver::default().solve(&paper_problem()).unwrap();
        assert!((volatility - 0.05999).abs() < 0.00001, "{volatility}");
    }

    #[test]
    fn test_large_improvement_increases_volatility() {
        // Δ² > φ² + v takes the closed form bracket.
        let problem = VolatilityProblem {
            deviation: 0.3,
            variance: 0.5,
            improvement: 2.0,
            ..paper_problem()
        };
        let Volatility(volatility) = IllinoisSolver::default().solve(&problem).unwrap();
        assert!(volatility > 0.06, "{volatility}");
    }

    #[test]
    fn test_root() {
        let problem = paper_problem();
        let Volatility(volatility) = IllinoisSolver::default().solve(&problem).unwrap();
        let conv = Convergence::new(&problem);
        assert!(conv.f(volatility.powi(2).ln()).abs() < 1e-4);
    }

    #[test]
    fn test_iteration_limit() {
        let solver = IllinoisSolver {
            tolerance: 0.0,
            max_iterations: 3,
        };
        assert_eq!(
            solver.solve(&paper_problem()),
            Err(Error::ConvergenceFailure { iterations: 3 })
        );
    }

    #[test]
    fn test_bracket_limit() {
        let solver = IllinoisSolver {
            tolerance: CONVERGENCE_TOLERANCE,
            max_iterations: 1,
        };
        // With a huge prior volatility, f(a − τ) is still negative.
        let problem = VolatilityProblem {
            volatility: Volatility(5.0f64.exp()),
            deviation: 1.0,
            variance: 2.0,
            improvement: 0.0,
            tau: 4.0,
        };
        assert_eq!(
            solver.solve(&problem),
            Err(Error::ConvergenceFailure { iterations: 1 })
        );
    }
}
