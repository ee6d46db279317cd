//! Entry points of the equation-solving engine.
//!
//! raw text -> normalize -> classify -> dispatch (solution + steps) -> format,
//! plus plot samples for quadratics. [`solve`] is pure; [`EquationSolver`] also keeps the
//! session history and statistics.
use crate::Utils::formatter::format_answer;
use crate::Utils::history::HistoryRecorder;
use crate::Utils::logger::init_logger;
use crate::Utils::task_parser::SolverConfig;
use crate::numerical::sampling::{PlotPoint, sample_points_with};
use crate::numerical::solver_dispatch::{DegenerateKind, SolutionRecord, dispatch};
use crate::symbolic::classifier::{ClassificationError, classify, classify_system};
use crate::symbolic::equation_types::{CoefficientSet, EquationClass};
use crate::symbolic::normalizer::normalize;
use log::{debug, info, warn};
use std::collections::HashMap;
use tabled::{builder::Builder, settings::Style};

/// everything one solve produces
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    pub class: EquationClass,
    /// unknown of a linear or quadratic equation, 'x' for systems
    pub variable: char,
    /// normalized equation text, the two equations of a system are joined with "; "
    pub equation: String,
    pub solution: SolutionRecord,
    /// derivation trace in hand-solving order
    pub steps: Vec<String>,
    /// samples around the vertex, quadratics with a nonzero leading coefficient and finite
    /// arithmetic only
    pub plot: Option<Vec<PlotPoint>>,
}

impl SolveResult {
    /// headline answer line
    pub fn answer(&self, precision: usize) -> String {
        format_answer(&self.solution, self.class, self.variable, precision)
    }
}

/// Solves with the default configuration. Same input always gives the same result.
pub fn solve(
    raw: &str,
    second: Option<&str>,
    mode: EquationClass,
) -> Result<SolveResult, ClassificationError> {
    solve_with(raw, second, mode, &SolverConfig::default())
}

/// `second` is required for [`EquationClass::System`] and ignored otherwise.
pub fn solve_with(
    raw: &str,
    second: Option<&str>,
    mode: EquationClass,
    config: &SolverConfig,
) -> Result<SolveResult, ClassificationError> {
    let first = normalize(raw);
    let (classified, equation) = match mode {
        EquationClass::System => {
            let second = second.map(normalize).unwrap_or_default();
            let classified = classify_system(&first, &second)?;
            (classified, format!("{}; {}", first, second))
        }
        _ => {
            if second.is_some() {
                debug!("second equation ignored in {} mode", mode);
            }
            (classify(&first, mode)?, first)
        }
    };

    let derivation = dispatch(&classified, config.precision);
    let in_range = derivation.solution != SolutionRecord::Degenerate(DegenerateKind::OutOfRange);
    let plot = match classified.coefficients {
        CoefficientSet::Quadratic { a, b, c } if a != 0.0 && in_range => Some(sample_points_with(
            a,
            b,
            c,
            config.plot_half_width,
            config.plot_step,
        )),
        _ => None,
    };
    Ok(SolveResult {
        class: mode,
        variable: classified.variable,
        equation,
        solution: derivation.solution,
        steps: derivation.steps,
        plot,
    })
}

/// Solver session: configuration, bounded history of solved equations and statistics.
pub struct EquationSolver {
    pub config: SolverConfig,
    history: HistoryRecorder,
    calc_statistics: HashMap<String, usize>,
    logger_ready: bool,
}

impl Default for EquationSolver {
    fn default() -> Self {
        EquationSolver::with_config(SolverConfig::default())
    }
}

impl EquationSolver {
    pub fn new() -> EquationSolver {
        EquationSolver::default()
    }

    pub fn with_config(config: SolverConfig) -> EquationSolver {
        EquationSolver {
            history: HistoryRecorder::with_capacity(config.history_capacity),
            config,
            calc_statistics: HashMap::new(),
            logger_ready: false,
        }
    }

    /// change loglevel and/or display precision; None keeps the current value
    pub fn set_solver_params(
        &mut self,
        loglevel: Option<String>,
        precision: Option<usize>,
    ) -> Result<(), String> {
        let mut config = self.config.clone();
        if let Some(level) = loglevel {
            config.loglevel = level.to_lowercase();
        }
        if let Some(precision) = precision {
            config.precision = precision;
        }
        config.validate()?;
        self.config = config;
        Ok(())
    }

    fn ensure_logger(&mut self) {
        if self.logger_ready {
            return;
        }
        match init_logger(&self.config.loglevel, self.config.log_to_file) {
            Ok(Some(file)) => info!("logging into {}", file),
            Ok(None) => {}
            Err(e) => println!("logger is not available: {}", e),
        }
        self.logger_ready = true;
    }

    /// Solves and records every classified outcome, degenerate ones included, in the history.
    pub fn solve(
        &mut self,
        raw: &str,
        second: Option<&str>,
        mode: EquationClass,
    ) -> Result<SolveResult, ClassificationError> {
        self.ensure_logger();
        let res = solve_with(raw, second, mode, &self.config);
        match &res {
            Ok(result) => {
                let answer = result.answer(self.config.precision);
                info!("{}: {}", result.equation, answer);
                self.history.record(&result.equation, &answer);
                *self
                    .calc_statistics
                    .entry(format!("{} solves", mode))
                    .or_insert(0) += 1;
                if result.solution.is_degenerate() {
                    *self
                        .calc_statistics
                        .entry("degenerate outcomes".to_string())
                        .or_insert(0) += 1;
                }
            }
            Err(e) => {
                warn!("{}", e);
                *self
                    .calc_statistics
                    .entry("classification failures".to_string())
                    .or_insert(0) += 1;
            }
        }
        res
    }

    /// newest first
    pub fn history(&self) -> &HistoryRecorder {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn statistics(&self) -> &HashMap<String, usize> {
        &self.calc_statistics
    }

    /// session statistics as a table
    pub fn calc_statistics(&self) -> String {
        let mut stats: Vec<(String, usize)> = self
            .calc_statistics
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        stats.push(("history length".to_string(), self.history.len()));
        stats.sort();
        let mut builder = Builder::default();
        for (key, value) in stats {
            builder.push_record([key, value.to_string()]);
        }
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        let table = table.to_string();
        info!("\n \n SESSION STATISTICS \n \n {}", table);
        table
    }
}
