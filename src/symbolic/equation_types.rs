//! Equation families recognised by the engine and the coefficient shapes they carry.
use std::fmt;
use strum_macros::{Display, EnumIter};

/// the solving mode. The caller knows it from the active input mode, so classification
/// only has to validate the text against the grammar of this family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum EquationClass {
    #[strum(serialize = "linear")]
    Linear,
    #[strum(serialize = "quadratic")]
    Quadratic,
    #[strum(serialize = "system")]
    System,
}

impl EquationClass {
    /// a valid input for this family, shown to the user when the text does not match
    pub fn example(&self) -> &'static str {
        match self {
            EquationClass::Linear => "2x+5=11",
            EquationClass::Quadratic => "x^2-4x+3=0",
            EquationClass::System => "2x+3y=7 and x-y=1",
        }
    }
    /// number of equation strings the family needs
    pub fn equations_required(&self) -> usize {
        match self {
            EquationClass::System => 2,
            _ => 1,
        }
    }
    /// parse mode name as typed on the command line or in a config document
    pub fn from_name(name: &str) -> Option<EquationClass> {
        match name.trim().to_lowercase().as_str() {
            "linear" | "lin" => Some(EquationClass::Linear),
            "quadratic" | "quad" => Some(EquationClass::Quadratic),
            "system" | "sys" => Some(EquationClass::System),
            _ => None,
        }
    }
}

/// variant-specific numeric tuple
/// Linear:    a*x + b = c
/// Quadratic: a*x^2 + b*x + c = 0
/// System:    a1*x + b1*y = c1,  a2*x + b2*y = c2
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoefficientSet {
    Linear { a: f64, b: f64, c: f64 },
    Quadratic { a: f64, b: f64, c: f64 },
    System { first: [f64; 3], second: [f64; 3] },
}

impl CoefficientSet {
    pub fn class(&self) -> EquationClass {
        match self {
            CoefficientSet::Linear { .. } => EquationClass::Linear,
            CoefficientSet::Quadratic { .. } => EquationClass::Quadratic,
            CoefficientSet::System { .. } => EquationClass::System,
        }
    }
    /// all coefficients in declaration order
    pub fn to_vec(&self) -> Vec<f64> {
        match *self {
            CoefficientSet::Linear { a, b, c } | CoefficientSet::Quadratic { a, b, c } => {
                vec![a, b, c]
            }
            CoefficientSet::System { first, second } => {
                first.iter().chain(second.iter()).copied().collect()
            }
        }
    }
}

/// result of a successful classification: the coefficients and the letter used as unknown
/// (for systems the unknowns are always x and y)
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedEquation {
    pub coefficients: CoefficientSet,
    pub variable: char,
}

impl ClassifiedEquation {
    pub fn class(&self) -> EquationClass {
        self.coefficients.class()
    }
}

impl fmt::Display for ClassifiedEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} equation in {} with coefficients {:?}",
            self.class(),
            self.variable,
            self.coefficients.to_vec()
        )
    }
}
