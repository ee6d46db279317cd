use crate::numerical::solver_dispatch::SolutionRecord;
use crate::symbolic::equation_types::EquationClass;
use itertools::Itertools;

/// decimals used for every displayed number unless configured otherwise
pub const DEFAULT_PRECISION: usize = 3;

/// Fixed-precision display string with trailing zeros trimmed: 3.0 -> "3", 1.23456 -> "1.235".
/// Negative zero is shown as "0".
pub fn format_number(value: f64, precision: usize) -> String {
    let s = format!("{:.*}", precision, value);
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    };
    if s == "-0" { "0".to_string() } else { s }
}

/// number wrapped in brackets when negative, used inside products: (-4)
pub fn format_factor(value: f64, precision: usize) -> String {
    let s = format_number(value, precision);
    if s.starts_with('-') { format!("({})", s) } else { s }
}

/// Variable term such as "2x", "-x" (leading) or "+ 3y", "- y" (following another term).
pub fn format_term(coefficient: f64, symbol: &str, leading: bool, precision: usize) -> String {
    let shown = if leading { coefficient } else { coefficient.abs() };
    let body = match format_number(shown, precision).as_str() {
        "1" => symbol.to_string(),
        "-1" => format!("-{}", symbol),
        n => format!("{}{}", n, symbol),
    };
    if leading {
        body
    } else {
        format!("{} {}", sign_of(coefficient), body)
    }
}

/// constant following another term: "+ 5", "- 2"
pub fn format_constant(value: f64, precision: usize) -> String {
    format!(
        "{} {}",
        sign_of(value),
        format_number(value.abs(), precision)
    )
}

fn sign_of(value: f64) -> &'static str {
    if value < 0.0 { "-" } else { "+" }
}

/// x₁, x₂ ...
pub fn subscript_label(symbol: char, index: usize) -> String {
    const SUBSCRIPTS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];
    let digits: String = index
        .to_string()
        .chars()
        .filter_map(|d| d.to_digit(10).map(|d| SUBSCRIPTS[d as usize]))
        .collect();
    format!("{}{}", symbol, digits)
}

/// names of the values of a unique solution, in the order the solver reports them
pub fn value_labels(class: EquationClass, variable: char, count: usize) -> Vec<String> {
    match (class, count) {
        (_, 1) => vec![variable.to_string()],
        (EquationClass::System, _) => vec!["x".to_string(), "y".to_string()],
        _ => (1..=count).map(|i| subscript_label(variable, i)).collect(),
    }
}

/// Final display line: "x = 3", "x₁ = 3, x₂ = 1", "x = 2, y = 1", or the degenerate message
/// passed through verbatim.
pub fn format_answer(
    solution: &SolutionRecord,
    class: EquationClass,
    variable: char,
    precision: usize,
) -> String {
    match solution {
        SolutionRecord::Degenerate(kind) => kind.to_string(),
        SolutionRecord::Unique(values) => value_labels(class, variable, values.len())
            .iter()
            .zip(values.iter())
            .map(|(label, v)| format!("{} = {}", label, format_number(*v, precision)))
            .join(", "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::solver_dispatch::DegenerateKind;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0, 3), "3");
        assert_eq!(format_number(1.0 / 3.0, 3), "0.333");
        assert_eq!(format_number(-1.5, 3), "-1.5");
        assert_eq!(format_number(2.0006, 3), "2.001");
        assert_eq!(format_number(-0.0001, 3), "0");
        assert_eq!(format_number(-0.0, 3), "0");
        assert_eq!(format_number(12.0, 0), "12");
        assert_eq!(format_number(1234.5678, 2), "1234.57");
    }

    #[test]
    fn test_terms() {
        assert_eq!(format_term(2.0, "x", true, 3), "2x");
        assert_eq!(format_term(1.0, "x", true, 3), "x");
        assert_eq!(format_term(-1.0, "x", true, 3), "-x");
        assert_eq!(format_term(0.0, "x", true, 3), "0x");
        assert_eq!(format_term(-4.0, "x", false, 3), "- 4x");
        assert_eq!(format_term(1.0, "y", false, 3), "+ y");
        assert_eq!(format_term(-1.0, "y", false, 3), "- y");
        assert_eq!(format_constant(5.0, 3), "+ 5");
        assert_eq!(format_constant(-2.5, 3), "- 2.5");
        assert_eq!(format_factor(-4.0, 3), "(-4)");
        assert_eq!(format_factor(4.0, 3), "4");
    }

    #[test]
    fn test_labels() {
        assert_eq!(subscript_label('x', 1), "x₁");
        assert_eq!(subscript_label('t', 12), "t₁₂");
        assert_eq!(value_labels(EquationClass::Quadratic, 'x', 2), vec!["x₁", "x₂"]);
        assert_eq!(value_labels(EquationClass::Quadratic, 'x', 1), vec!["x"]);
        assert_eq!(value_labels(EquationClass::System, 'x', 2), vec!["x", "y"]);
    }

    #[test]
    fn test_format_answer() {
        let linear = SolutionRecord::Unique(vec![3.0]);
        assert_eq!(format_answer(&linear, EquationClass::Linear, 'x', 3), "x = 3");
        let quadratic = SolutionRecord::Unique(vec![3.0, 1.0]);
        assert_eq!(
            format_answer(&quadratic, EquationClass::Quadratic, 'x', 3),
            "x₁ = 3, x₂ = 1"
        );
        let system = SolutionRecord::Unique(vec![2.0, 1.0 / 3.0]);
        assert_eq!(
            format_answer(&system, EquationClass::System, 'x', 3),
            "x = 2, y = 0.333"
        );
        let degenerate = SolutionRecord::Degenerate(DegenerateKind::NoRealSolution);
        assert_eq!(
            format_answer(&degenerate, EquationClass::Quadratic, 'x', 3),
            "no real solution"
        );
    }
}
