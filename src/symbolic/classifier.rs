use crate::symbolic::equation_types::{ClassifiedEquation, CoefficientSet, EquationClass};
use log::{debug, warn};
use regex::{Captures, Regex};
use std::sync::LazyLock;

// Fixed-shape grammars, one per equation family. The supported language is finite and shallow,
// so every family is a single anchored pattern over the normalized text.
//   linear     [±a][*]v[±b]=±c
//   quadratic  [±a][*]v^2[±b[*]v][±c]=0
//   system row [±a][*]x±[b][*]y=±c
// an empty or sign-only coefficient of a variable term means ±1, a missing constant means 0

const NUMBER: &str = r"(?:\d+(?:\.\d*)?|\.\d+)";

static LINEAR: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"^(?P<a>[+-]?{n}?)(?P<s1>\*)?(?P<v>[a-z])(?P<b>[+-]{n})?=(?P<c>[+-]?{n})$",
        n = NUMBER
    ))
});

static QUADRATIC: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"^(?P<a>[+-]?{n}?)(?P<s1>\*)?(?P<v>[a-z])\^2(?:(?P<b>[+-]{n}?)(?P<s2>\*)?(?P<w>[a-z]))?(?P<c>[+-]{n})?=0(?:\.0*)?$",
        n = NUMBER
    ))
});

static SYSTEM_ROW: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"^(?P<a>[+-]?{n}?)(?P<s1>\*)?x(?P<b>[+-]{n}?)(?P<s2>\*)?y=(?P<c>[+-]?{n})$",
        n = NUMBER
    ))
});

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("grammar pattern is a valid regex")
}

/// Reported, user-facing classification failure. Every variant carries the requested family
/// so the message can point at a valid example.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassificationError {
    #[error("the equation is empty, enter a {class} equation such as {}", .class.example())]
    EmptyInput { class: EquationClass },

    #[error("'{input}' is not a valid {class} equation, expected something like {}", .class.example())]
    GrammarMismatch { class: EquationClass, input: String },

    #[error("a system needs two equations, for example {}", .class.example())]
    MissingSecondEquation { class: EquationClass },

    #[error("coefficient '{token}' in '{input}' is not a finite number")]
    NonFiniteCoefficient {
        class: EquationClass,
        input: String,
        token: String,
    },
}

impl ClassificationError {
    pub fn class(&self) -> EquationClass {
        match self {
            ClassificationError::EmptyInput { class }
            | ClassificationError::GrammarMismatch { class, .. }
            | ClassificationError::MissingSecondEquation { class }
            | ClassificationError::NonFiniteCoefficient { class, .. } => *class,
        }
    }
    /// corrective example string for the requested family
    pub fn example(&self) -> &'static str {
        self.class().example()
    }
}

/// Validates normalized text against the grammar of `requested` and extracts the coefficients.
/// A system is given as two equations separated by ';'.
pub fn classify(
    normalized: &str,
    requested: EquationClass,
) -> Result<ClassifiedEquation, ClassificationError> {
    let res = match requested {
        EquationClass::Linear => classify_linear(normalized),
        EquationClass::Quadratic => classify_quadratic(normalized),
        EquationClass::System => match normalized.split_once(';') {
            Some((first, second)) => classify_system(first, second),
            None if normalized.is_empty() => Err(ClassificationError::EmptyInput {
                class: EquationClass::System,
            }),
            None => Err(ClassificationError::MissingSecondEquation {
                class: EquationClass::System,
            }),
        },
    };
    match &res {
        Ok(classified) => debug!("classified '{}' as {}", normalized, classified),
        Err(e) => warn!("classification failed: {}", e),
    }
    res
}

pub fn classify_linear(normalized: &str) -> Result<ClassifiedEquation, ClassificationError> {
    let class = EquationClass::Linear;
    let caps = match_grammar(&LINEAR, normalized, class)?;
    let reader = CoefficientReader { class, input: normalized, caps: &caps };
    reader.check_star("a", "s1")?;
    let a = reader.implicit_one("a")?;
    let b = reader.constant_or_zero("b")?;
    let c = reader.constant_or_zero("c")?;
    Ok(ClassifiedEquation {
        coefficients: CoefficientSet::Linear { a, b, c },
        variable: reader.letter("v"),
    })
}

pub fn classify_quadratic(normalized: &str) -> Result<ClassifiedEquation, ClassificationError> {
    let class = EquationClass::Quadratic;
    let caps = match_grammar(&QUADRATIC, normalized, class)?;
    let reader = CoefficientReader { class, input: normalized, caps: &caps };
    let variable = reader.letter("v");
    // the linear term must use the same unknown as the squared term
    if caps.name("w").is_some() && reader.letter("w") != variable {
        return Err(reader.mismatch());
    }
    reader.check_star("a", "s1")?;
    reader.check_star("b", "s2")?;
    let a = reader.implicit_one("a")?;
    let b = if caps.name("b").is_some() {
        reader.implicit_one("b")?
    } else {
        0.0
    };
    let c = reader.constant_or_zero("c")?;
    Ok(ClassifiedEquation {
        coefficients: CoefficientSet::Quadratic { a, b, c },
        variable,
    })
}

/// two independent applications of the a*x + b*y = c grammar
pub fn classify_system(
    first: &str,
    second: &str,
) -> Result<ClassifiedEquation, ClassificationError> {
    let class = EquationClass::System;
    if first.is_empty() && second.is_empty() {
        return Err(ClassificationError::EmptyInput { class });
    }
    if second.is_empty() {
        return Err(ClassificationError::MissingSecondEquation { class });
    }
    let first = classify_system_row(first)?;
    let second = classify_system_row(second)?;
    Ok(ClassifiedEquation {
        coefficients: CoefficientSet::System { first, second },
        variable: 'x',
    })
}

fn classify_system_row(normalized: &str) -> Result<[f64; 3], ClassificationError> {
    let class = EquationClass::System;
    let caps = match_grammar(&SYSTEM_ROW, normalized, class)?;
    let reader = CoefficientReader { class, input: normalized, caps: &caps };
    reader.check_star("a", "s1")?;
    reader.check_star("b", "s2")?;
    Ok([
        reader.implicit_one("a")?,
        reader.implicit_one("b")?,
        reader.constant_or_zero("c")?,
    ])
}

fn match_grammar<'t>(
    grammar: &Regex,
    normalized: &'t str,
    class: EquationClass,
) -> Result<Captures<'t>, ClassificationError> {
    if normalized.is_empty() {
        return Err(ClassificationError::EmptyInput { class });
    }
    grammar
        .captures(normalized)
        .ok_or_else(|| ClassificationError::GrammarMismatch {
            class,
            input: normalized.to_string(),
        })
}

/// reads named coefficient groups out of one grammar match
struct CoefficientReader<'a> {
    class: EquationClass,
    input: &'a str,
    caps: &'a Captures<'a>,
}

impl<'a> CoefficientReader<'a> {
    fn token(&self, name: &str) -> &'a str {
        self.caps.name(name).map(|m| m.as_str()).unwrap_or("")
    }

    fn letter(&self, name: &str) -> char {
        self.token(name).chars().next().unwrap_or('x')
    }

    fn mismatch(&self) -> ClassificationError {
        ClassificationError::GrammarMismatch {
            class: self.class,
            input: self.input.to_string(),
        }
    }

    /// '*' is only allowed after an explicit numeral
    fn check_star(&self, coefficient: &str, star: &str) -> Result<(), ClassificationError> {
        let has_digits = self.token(coefficient).chars().any(|c| c.is_ascii_digit());
        if self.caps.name(star).is_some() && !has_digits {
            return Err(self.mismatch());
        }
        Ok(())
    }

    /// coefficient of a variable term: "", "+" mean 1 and "-" means -1
    fn implicit_one(&self, name: &str) -> Result<f64, ClassificationError> {
        match self.token(name) {
            "" | "+" => Ok(1.0),
            "-" => Ok(-1.0),
            token => self.number(token),
        }
    }

    fn constant_or_zero(&self, name: &str) -> Result<f64, ClassificationError> {
        match self.token(name) {
            "" => Ok(0.0),
            token => self.number(token),
        }
    }

    fn number(&self, token: &str) -> Result<f64, ClassificationError> {
        let value = token
            .trim_start_matches('+')
            .parse::<f64>()
            .map_err(|_| self.mismatch())?;
        if !value.is_finite() {
            return Err(ClassificationError::NonFiniteCoefficient {
                class: self.class,
                input: self.input.to_string(),
                token: token.to_string(),
            });
        }
        Ok(value)
    }
}
