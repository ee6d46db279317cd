#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// equation families, coefficient shapes and per-family metadata (corrective examples, labels)
pub mod equation_types;
///____________________________________________________________________________________________________________________________
/// turns raw user text into the canonical ASCII form the classifier expects
///# Example
/// ```
/// use RustedEquationSolver::symbolic::normalizer::normalize;
/// assert_eq!(normalize(" ۲X + ۵ = ۱۱ "), "2x+5=11");
/// ```
pub mod normalizer;
///____________________________________________________________________________________________________________________________
/// # Equation classifier
/// validates a normalized string against the grammar of the requested family and extracts coefficients
///# Example
/// ```
/// use RustedEquationSolver::symbolic::classifier::classify;
/// use RustedEquationSolver::symbolic::equation_types::{CoefficientSet, EquationClass};
/// let classified = classify("x^2-4x+3=0", EquationClass::Quadratic).unwrap();
/// assert_eq!(classified.coefficients, CoefficientSet::Quadratic { a: 1.0, b: -4.0, c: 3.0 });
/// // wrong family is a reported error, not a panic
/// let err = classify("2x+5=11", EquationClass::Quadratic).unwrap_err();
/// println!("{}", err);
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod classifier;
