use crate::Utils::formatter::{format_constant, format_factor, format_number, format_term, subscript_label};
use crate::symbolic::equation_types::{ClassifiedEquation, CoefficientSet};
use log::info;
use nalgebra::Matrix2;
use strum_macros::Display;

/// relative size below which a discriminant or determinant counts as exactly zero
pub const ZERO_TOLERANCE: f64 = 1e-12;

/// terminal outcomes with no unique numeric answer. Not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DegenerateKind {
    #[strum(serialize = "infinitely many solutions")]
    InfinitelyManySolutions,
    #[strum(serialize = "no solution")]
    NoSolution,
    #[strum(serialize = "no real solution")]
    NoRealSolution,
    #[strum(serialize = "not a quadratic equation")]
    NotQuadratic,
    #[strum(serialize = "inconsistent or dependent system")]
    InconsistentOrDependent,
    /// an intermediate value or a result overflowed f64
    #[strum(serialize = "coefficients out of numeric range")]
    OutOfRange,
}

/// Unique values are ordered: x for linear, x₁ (the + branch) then x₂ for quadratics,
/// x then y for systems. x₁ is the smaller root when a < 0. Values keep full precision
/// and are always finite.
#[derive(Debug, Clone, PartialEq)]
pub enum SolutionRecord {
    Unique(Vec<f64>),
    Degenerate(DegenerateKind),
}

impl SolutionRecord {
    pub fn values(&self) -> &[f64] {
        match self {
            SolutionRecord::Unique(values) => values,
            SolutionRecord::Degenerate(_) => &[],
        }
    }
    pub fn is_degenerate(&self) -> bool {
        matches!(self, SolutionRecord::Degenerate(_))
    }
}

/// a solution together with the ordered derivation trace that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Derivation {
    pub solution: SolutionRecord,
    pub steps: Vec<String>,
}

/// Steps are recorded while the numbers are computed, in hand-solving order.
struct Trace {
    steps: Vec<String>,
    precision: usize,
}

impl Trace {
    fn new(precision: usize) -> Self {
        Trace { steps: Vec::new(), precision }
    }
    fn push(&mut self, step: String) {
        self.steps.push(step);
    }
    fn num(&self, value: f64) -> String {
        format_number(value, self.precision)
    }
    fn factor(&self, value: f64) -> String {
        format_factor(value, self.precision)
    }
    fn finish(self, solution: SolutionRecord) -> Derivation {
        Derivation { solution, steps: self.steps }
    }
    fn out_of_range(mut self, what: &str) -> Derivation {
        self.push(format!(
            "{} is not a finite number: the coefficients are out of numeric range",
            what
        ));
        self.finish(SolutionRecord::Degenerate(DegenerateKind::OutOfRange))
    }
}

/// snaps values that are zero up to round-off of their product terms.
/// An overflowed scale snaps nothing.
fn snap_to_zero(value: f64, scale: f64) -> f64 {
    if scale.is_finite() && value.abs() <= ZERO_TOLERANCE * scale {
        0.0
    } else {
        value
    }
}

/// Δ = b² - 4ac
pub fn discriminant(a: f64, b: f64, c: f64) -> f64 {
    let (bb, ac4) = (b * b, 4.0 * a * c);
    snap_to_zero(bb - ac4, bb.abs().max(ac4.abs()))
}

/// D = a₁·b₂ - a₂·b₁ for rows (a, b, c)
pub fn determinant(first: &[f64; 3], second: &[f64; 3]) -> f64 {
    let m = Matrix2::new(first[0], first[1], second[0], second[1]);
    let scale = (first[0] * second[1]).abs().max((second[0] * first[1]).abs());
    snap_to_zero(m.determinant(), scale)
}

/// Routes a classified equation to the strategy of its family.
pub fn dispatch(equation: &ClassifiedEquation, precision: usize) -> Derivation {
    let derivation = match equation.coefficients {
        CoefficientSet::Linear { a, b, c } => solve_linear(a, b, c, equation.variable, precision),
        CoefficientSet::Quadratic { a, b, c } => {
            solve_quadratic(a, b, c, equation.variable, precision)
        }
        CoefficientSet::System { first, second } => solve_system(&first, &second, precision),
    };
    info!(
        "{} equation solved: {:?} in {} steps",
        equation.class(),
        derivation.solution,
        derivation.steps.len()
    );
    derivation
}

/// a·x + b = c
pub fn solve_linear(a: f64, b: f64, c: f64, variable: char, precision: usize) -> Derivation {
    let v = variable.to_string();
    let mut trace = Trace::new(precision);
    let lhs = format_term(a, &v, true, precision);
    if b == 0.0 {
        trace.push(format!("Equation: {} = {}", lhs, trace.num(c)));
    } else {
        trace.push(format!(
            "Equation: {} {} = {}",
            lhs,
            format_constant(b, precision),
            trace.num(c)
        ));
    }

    if a == 0.0 {
        trace.push(format!(
            "The coefficient of {} is 0, so the equation reduces to {} = {}",
            v,
            trace.num(b),
            trace.num(c)
        ));
        return if b == c {
            trace.push(format!(
                "{} = {} holds for every {}: infinitely many solutions",
                trace.num(b),
                trace.num(c),
                v
            ));
            trace.finish(SolutionRecord::Degenerate(DegenerateKind::InfinitelyManySolutions))
        } else {
            trace.push(format!(
                "{} ≠ {} for any {}: no solution",
                trace.num(b),
                trace.num(c),
                v
            ));
            trace.finish(SolutionRecord::Degenerate(DegenerateKind::NoSolution))
        };
    }

    let rhs = c - b;
    if !rhs.is_finite() {
        let what = format!("{} - {}", trace.num(c), trace.factor(b));
        return trace.out_of_range(&what);
    }
    if b > 0.0 {
        trace.push(format!(
            "Subtract {} from both sides: {} = {} - {} = {}",
            trace.num(b),
            lhs,
            trace.num(c),
            trace.num(b),
            trace.num(rhs)
        ));
    } else if b < 0.0 {
        trace.push(format!(
            "Add {} to both sides: {} = {} + {} = {}",
            trace.num(-b),
            lhs,
            trace.num(c),
            trace.num(-b),
            trace.num(rhs)
        ));
    } else {
        trace.push(format!("No constant to move: {} = {}", lhs, trace.num(rhs)));
    }

    let x = rhs / a + 0.0;
    trace.push(format!(
        "Divide both sides by {}: {} = {} / {} = {}",
        trace.num(a),
        v,
        trace.num(rhs),
        trace.factor(a),
        trace.num(x)
    ));
    if !x.is_finite() {
        return trace.out_of_range(&v);
    }
    trace.finish(SolutionRecord::Unique(vec![x]))
}

/// a·x² + b·x + c = 0
pub fn solve_quadratic(a: f64, b: f64, c: f64, variable: char, precision: usize) -> Derivation {
    let v = variable.to_string();
    let mut trace = Trace::new(precision);
    let mut equation = format_term(a, &format!("{}^2", v), true, precision);
    if b != 0.0 {
        equation = format!("{} {}", equation, format_term(b, &v, false, precision));
    }
    if c != 0.0 {
        equation = format!("{} {}", equation, format_constant(c, precision));
    }
    trace.push(format!("Equation: {} = 0", equation));
    trace.push(format!(
        "Coefficients: a = {}, b = {}, c = {}",
        trace.num(a),
        trace.num(b),
        trace.num(c)
    ));

    let delta = discriminant(a, b, c);
    trace.push(format!(
        "Discriminant: Δ = b^2 - 4ac = {}^2 - 4·{}·{} = {}",
        trace.factor(b),
        trace.factor(a),
        trace.factor(c),
        trace.num(delta)
    ));

    // no fallback to the linear strategy
    if a == 0.0 {
        trace.push("The leading coefficient a is 0, so the equation is not quadratic".to_string());
        return trace.finish(SolutionRecord::Degenerate(DegenerateKind::NotQuadratic));
    }

    if !delta.is_finite() {
        return trace.out_of_range("Δ");
    }

    let two_a = 2.0 * a;
    if delta < 0.0 {
        trace.push(format!(
            "Δ = {} < 0: the parabola does not cross the {}-axis, no real solution",
            trace.num(delta),
            v
        ));
        trace.finish(SolutionRecord::Degenerate(DegenerateKind::NoRealSolution))
    } else if delta == 0.0 {
        trace.push("Δ = 0: the equation has one repeated root".to_string());
        let x = -b / two_a + 0.0;
        trace.push(format!(
            "{} = -b / (2a) = {} / {} = {}",
            v,
            trace.num(-b),
            trace.factor(two_a),
            trace.num(x)
        ));
        if !x.is_finite() {
            return trace.out_of_range(&v);
        }
        trace.finish(SolutionRecord::Unique(vec![x]))
    } else {
        trace.push(format!(
            "Δ = {} > 0: the equation has two distinct real roots",
            trace.num(delta)
        ));
        let sqrt_delta = delta.sqrt();
        trace.push(format!("√Δ = {}", trace.num(sqrt_delta)));
        let x1 = (-b + sqrt_delta) / two_a + 0.0;
        let x2 = (-b - sqrt_delta) / two_a + 0.0;
        for (i, (x, op)) in [(x1, '+'), (x2, '-')].into_iter().enumerate() {
            trace.push(format!(
                "{} = (-b {} √Δ) / (2a) = ({} {} {}) / {} = {}",
                subscript_label(variable, i + 1),
                op,
                trace.num(-b),
                op,
                trace.num(sqrt_delta),
                trace.factor(two_a),
                trace.num(x)
            ));
        }
        if !(x1.is_finite() && x2.is_finite()) {
            return trace.out_of_range("a root");
        }
        trace.finish(SolutionRecord::Unique(vec![x1, x2]))
    }
}

/// a₁·x + b₁·y = c₁, a₂·x + b₂·y = c₂ by Cramer's rule
pub fn solve_system(first: &[f64; 3], second: &[f64; 3], precision: usize) -> Derivation {
    let mut trace = Trace::new(precision);
    for (i, row) in [first, second].into_iter().enumerate() {
        trace.push(format!(
            "Equation {}: {} {} = {}",
            i + 1,
            format_term(row[0], "x", true, precision),
            format_term(row[1], "y", false, precision),
            trace.num(row[2])
        ));
    }
    let [a1, b1, c1] = *first;
    let [a2, b2, c2] = *second;

    let d = determinant(first, second);
    trace.push(format!(
        "Determinant: D = a₁·b₂ - a₂·b₁ = {}·{} - {}·{} = {}",
        trace.factor(a1),
        trace.factor(b2),
        trace.factor(a2),
        trace.factor(b1),
        trace.num(d)
    ));
    if !d.is_finite() {
        return trace.out_of_range("D");
    }
    // inconsistent and dependent systems are not told apart
    if d == 0.0 {
        trace.push(
            "D = 0: Cramer's rule does not apply, the system is inconsistent or dependent"
                .to_string(),
        );
        return trace.finish(SolutionRecord::Degenerate(DegenerateKind::InconsistentOrDependent));
    }

    let dx = Matrix2::new(c1, b1, c2, b2).determinant();
    let dy = Matrix2::new(a1, c1, a2, c2).determinant();
    let x = dx / d + 0.0;
    let y = dy / d + 0.0;
    trace.push(format!(
        "x = (c₁·b₂ - c₂·b₁) / D = {} / {} = {}",
        trace.num(dx),
        trace.factor(d),
        trace.num(x)
    ));
    trace.push(format!(
        "y = (a₁·c₂ - a₂·c₁) / D = {} / {} = {}",
        trace.num(dy),
        trace.factor(d),
        trace.num(y)
    ));
    if !(x.is_finite() && y.is_finite()) {
        return trace.out_of_range("a Cramer ratio");
    }
    trace.finish(SolutionRecord::Unique(vec![x, y]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const TOL: f64 = 1e-6;

    #[test]
    fn test_linear_unique() {
        let d = solve_linear(2.0, 5.0, 11.0, 'x', 3);
        assert_eq!(d.solution, SolutionRecord::Unique(vec![3.0]));
        assert_eq!(
            d.steps,
            vec![
                "Equation: 2x + 5 = 11",
                "Subtract 5 from both sides: 2x = 11 - 5 = 6",
                "Divide both sides by 2: x = 6 / 2 = 3",
            ]
        );
    }

    #[test]
    fn test_linear_negative_coefficient() {
        let d = solve_linear(-1.0, 10.0, 5.0, 'x', 3);
        assert_eq!(d.solution, SolutionRecord::Unique(vec![5.0]));
        assert_eq!(d.steps[2], "Divide both sides by -1: x = -5 / (-1) = 5");
        let d = solve_linear(3.0, -2.0, -8.0, 'x', 3);
        assert_eq!(d.steps[1], "Add 2 to both sides: 3x = -8 + 2 = -6");
        assert_eq!(d.solution.values(), &[-2.0]);
    }

    #[test]
    fn test_linear_zero_result_is_positive_zero() {
        let d = solve_linear(-1.0, 4.0, 4.0, 'x', 3);
        let x = d.solution.values()[0];
        assert!(x == 0.0 && x.is_sign_positive());
    }

    #[test]
    fn test_linear_degenerate() {
        let d = solve_linear(0.0, 5.0, 5.0, 'x', 3);
        assert_eq!(
            d.solution,
            SolutionRecord::Degenerate(DegenerateKind::InfinitelyManySolutions)
        );
        assert_eq!(d.steps.len(), 3);
        assert_eq!(d.steps[0], "Equation: 0x + 5 = 5");
        let d = solve_linear(0.0, 5.0, 4.0, 'x', 3);
        assert_eq!(d.solution, SolutionRecord::Degenerate(DegenerateKind::NoSolution));
        assert_eq!(d.steps[2], "5 ≠ 4 for any x: no solution");
    }

    #[test]
    fn test_linear_random_coefficients_satisfy_equation() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let a: f64 = rng.random_range(-50.0..50.0);
            let b: f64 = rng.random_range(-50.0..50.0);
            let c: f64 = rng.random_range(-50.0..50.0);
            if a.abs() < 1e-3 {
                continue;
            }
            let d = solve_linear(a, b, c, 'x', 3);
            let x = d.solution.values()[0];
            assert_abs_diff_eq!(a * x + b, c, epsilon = TOL);
        }
    }

    #[test]
    fn test_quadratic_two_roots() {
        let d = solve_quadratic(1.0, -4.0, 3.0, 'x', 3);
        assert_eq!(d.solution, SolutionRecord::Unique(vec![3.0, 1.0]));
        assert_eq!(
            d.steps,
            vec![
                "Equation: x^2 - 4x + 3 = 0",
                "Coefficients: a = 1, b = -4, c = 3",
                "Discriminant: Δ = b^2 - 4ac = (-4)^2 - 4·1·3 = 4",
                "Δ = 4 > 0: the equation has two distinct real roots",
                "√Δ = 2",
                "x₁ = (-b + √Δ) / (2a) = (4 + 2) / 2 = 3",
                "x₂ = (-b - √Δ) / (2a) = (4 - 2) / 2 = 1",
            ]
        );
    }

    #[test]
    fn test_quadratic_repeated_root() {
        let d = solve_quadratic(1.0, 2.0, 1.0, 'x', 3);
        assert_eq!(d.solution, SolutionRecord::Unique(vec![-1.0]));
        assert_eq!(d.steps[2], "Discriminant: Δ = b^2 - 4ac = 2^2 - 4·1·1 = 0");
        assert_eq!(d.steps[3], "Δ = 0: the equation has one repeated root");
        assert_eq!(d.steps[4], "x = -b / (2a) = -2 / 2 = -1");
    }

    #[test]
    fn test_quadratic_no_real_solution() {
        let d = solve_quadratic(1.0, 0.0, 1.0, 'x', 3);
        assert_eq!(d.solution, SolutionRecord::Degenerate(DegenerateKind::NoRealSolution));
        assert_eq!(d.steps[0], "Equation: x^2 + 1 = 0");
        assert_eq!(d.steps[2], "Discriminant: Δ = b^2 - 4ac = 0^2 - 4·1·1 = -4");
        assert!(d.steps[3].starts_with("Δ = -4 < 0"));
    }

    #[test]
    fn test_quadratic_zero_leading_coefficient() {
        let d = solve_quadratic(0.0, 2.0, 1.0, 'x', 3);
        assert_eq!(d.solution, SolutionRecord::Degenerate(DegenerateKind::NotQuadratic));
        assert_eq!(d.steps.len(), 4);
        assert!(d.steps[2].ends_with("= 4"));
    }

    #[test]
    fn test_quadratic_plus_branch_first_for_negative_leading_coefficient() {
        // -x^2 + 5x - 6 = 0: + branch gives the smaller root when a < 0
        let d = solve_quadratic(-1.0, 5.0, -6.0, 'x', 3);
        let values = d.solution.values();
        assert_abs_diff_eq!(values[0], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(values[1], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_discriminant_snapping() {
        // 0.1^2 - 4 * 0.25 * 0.01 is zero only up to round-off
        assert_eq!(discriminant(0.25, 0.1, 0.01), 0.0);
        assert_eq!(discriminant(1.0, -4.0, 3.0), 4.0);
        // 4ac overflows: no snapping to zero
        assert_eq!(discriminant(1e200, 0.0, 1e200), f64::NEG_INFINITY);
        assert!(discriminant(1e200, 1e200, 1e200).is_nan());
    }

    #[test]
    fn test_overflow_is_out_of_range() {
        let out_of_range = SolutionRecord::Degenerate(DegenerateKind::OutOfRange);
        assert_eq!(solve_quadratic(1e200, 0.0, 1e200, 'x', 3).solution, out_of_range);
        assert_eq!(solve_quadratic(1e200, 1e200, 1e200, 'x', 3).solution, out_of_range);
        // finite Δ, roots overflow
        assert_eq!(solve_quadratic(1e-320, 1.0, 0.0, 'x', 3).solution, out_of_range);
        let d = solve_linear(1e-321, 5.0, 11.0, 'x', 3);
        assert_eq!(d.solution, out_of_range);
        assert!(d.steps.last().unwrap().contains("out of numeric range"));
        assert_eq!(solve_linear(1.0, -1e308, 1e308, 'x', 3).solution, out_of_range);
        let d = solve_system(&[1e200, 1e200, 1.0], &[-1e200, 1e200, 1.0], 3);
        assert_eq!(d.solution, out_of_range);
        // D = 1e-200 is finite, x = 1e200 / 1e-200 is not
        let d = solve_system(&[1e-100, 0.0, 1e300], &[0.0, 1e-100, 1.0], 3);
        assert_eq!(d.solution, out_of_range);
    }

    #[test]
    fn test_quadratic_random_branch_and_roots() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let a: f64 = rng.random_range(-10.0..10.0);
            let b: f64 = rng.random_range(-10.0..10.0);
            let c: f64 = rng.random_range(-10.0..10.0);
            if a.abs() < 1e-3 {
                continue;
            }
            let delta = discriminant(a, b, c);
            let d = solve_quadratic(a, b, c, 'x', 3);
            match &d.solution {
                SolutionRecord::Degenerate(kind) => {
                    assert!(delta < 0.0);
                    assert_eq!(*kind, DegenerateKind::NoRealSolution);
                }
                SolutionRecord::Unique(values) if values.len() == 1 => assert_eq!(delta, 0.0),
                SolutionRecord::Unique(values) => {
                    assert!(delta > 0.0);
                    assert_eq!(values.len(), 2);
                    assert_ne!(values[0], values[1]);
                }
            }
            for x in d.solution.values() {
                assert_abs_diff_eq!(a * x * x + b * x + c, 0.0, epsilon = TOL);
            }
        }
    }

    #[test]
    fn test_system_unique() {
        let d = solve_system(&[2.0, 3.0, 7.0], &[1.0, -1.0, 1.0], 3);
        assert_eq!(d.solution, SolutionRecord::Unique(vec![2.0, 1.0]));
        assert_eq!(
            d.steps,
            vec![
                "Equation 1: 2x + 3y = 7",
                "Equation 2: x - y = 1",
                "Determinant: D = a₁·b₂ - a₂·b₁ = 2·(-1) - 1·3 = -5",
                "x = (c₁·b₂ - c₂·b₁) / D = -10 / (-5) = 2",
                "y = (a₁·c₂ - a₂·c₁) / D = -5 / (-5) = 1",
            ]
        );
    }

    #[test]
    fn test_system_singular() {
        let d = solve_system(&[2.0, 3.0, 7.0], &[4.0, 6.0, 9.0], 3);
        assert_eq!(
            d.solution,
            SolutionRecord::Degenerate(DegenerateKind::InconsistentOrDependent)
        );
        // dependent rows give the same message
        let d = solve_system(&[2.0, 3.0, 7.0], &[4.0, 6.0, 14.0], 3);
        assert_eq!(
            d.solution,
            SolutionRecord::Degenerate(DegenerateKind::InconsistentOrDependent)
        );
        assert_eq!(d.steps.len(), 4);
    }

    #[test]
    fn test_system_random_solution_satisfies_both_rows() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..500 {
            let first: [f64; 3] = [
                rng.random_range(-20.0..20.0),
                rng.random_range(-20.0..20.0),
                rng.random_range(-20.0..20.0),
            ];
            let second: [f64; 3] = [
                rng.random_range(-20.0..20.0),
                rng.random_range(-20.0..20.0),
                rng.random_range(-20.0..20.0),
            ];
            if determinant(&first, &second).abs() < 1e-2 {
                continue;
            }
            let d = solve_system(&first, &second, 3);
            let [x, y] = [d.solution.values()[0], d.solution.values()[1]];
            for row in [first, second] {
                assert_abs_diff_eq!(row[0] * x + row[1] * y, row[2], epsilon = TOL);
            }
        }
    }

    #[test]
    fn test_dispatch_routes_by_class() {
        let eq = ClassifiedEquation {
            coefficients: CoefficientSet::Linear { a: 2.0, b: 5.0, c: 11.0 },
            variable: 'x',
        };
        assert_eq!(dispatch(&eq, 3), solve_linear(2.0, 5.0, 11.0, 'x', 3));
        let eq = ClassifiedEquation {
            coefficients: CoefficientSet::System {
                first: [2.0, 3.0, 7.0],
                second: [1.0, -1.0, 1.0],
            },
            variable: 'x',
        };
        assert_eq!(dispatch(&eq, 3).solution.values(), &[2.0, 1.0]);
    }
}
