#![allow(non_snake_case)]
use RustedEquationSolver::Utils::logger::save_samples_to_csv;
use RustedEquationSolver::Utils::plots::plot_samples;
use RustedEquationSolver::Utils::task_parser::SolverConfig;
use RustedEquationSolver::numerical::engine::{EquationSolver, SolveResult};
use RustedEquationSolver::symbolic::equation_types::EquationClass;
use std::path::Path;

const USAGE: &str = "usage: RustedEquationSolver [--config FILE] [--plot FILE.png] [--csv FILE.csv] <linear|quadratic|system> <equation> [second equation]";

fn print_result(result: &SolveResult, precision: usize) {
    println!("\n{} ({})", result.equation, result.class);
    for (i, step) in result.steps.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
    println!("  => {}", result.answer(precision));
}

fn main() {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let mut option = |name: &str| -> Option<String> {
        let pos = args.iter().position(|a| a == name)?;
        let value = args.get(pos + 1).cloned();
        args.drain(pos..(pos + 2).min(args.len()));
        value
    };
    let config_path = option("--config");
    let plot_path = option("--plot");
    let csv_path = option("--csv");

    let config = match config_path {
        Some(path) => match SolverConfig::from_file(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(2);
            }
        },
        None => SolverConfig::default(),
    };
    let precision = config.precision;
    let mut solver = EquationSolver::with_config(config);

    if args.is_empty() {
        // demo set
        let demos: [(&str, Option<&str>, EquationClass); 8] = [
            ("2x+5=11", None, EquationClass::Linear),
            ("-x+10=5", None, EquationClass::Linear),
            ("0x+5=5", None, EquationClass::Linear),
            ("x^2-4x+3=0", None, EquationClass::Quadratic),
            ("x^2+2x+1=0", None, EquationClass::Quadratic),
            ("x^2+1=0", None, EquationClass::Quadratic),
            ("2x+3y=7", Some("x-y=1"), EquationClass::System),
            ("2x+3y=7", Some("4x+6y=9"), EquationClass::System),
        ];
        for (raw, second, mode) in demos {
            match solver.solve(raw, second, mode) {
                Ok(result) => print_result(&result, precision),
                Err(e) => println!("\n{}", e),
            }
        }
        println!("\n{}", solver.history());
        println!("{}", solver.calc_statistics());
        return;
    }

    let Some(mode) = EquationClass::from_name(&args[0]) else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };
    if args.len() < 1 + mode.equations_required() {
        eprintln!("{} mode needs {} equation(s)\n{}", mode, mode.equations_required(), USAGE);
        std::process::exit(2);
    }
    let first = args.get(1).map(String::as_str).unwrap_or("");
    let second = args.get(2).map(String::as_str);
    match solver.solve(first, second, mode) {
        Ok(result) => {
            print_result(&result, precision);
            if let Some(points) = &result.plot {
                if let Some(path) = &csv_path {
                    if let Err(e) = save_samples_to_csv(points, path) {
                        eprintln!("cannot save {}: {}", path, e);
                    }
                }
                if let Some(path) = &plot_path {
                    if let Err(e) = plot_samples(points, result.solution.values(), &result.equation, path) {
                        eprintln!("cannot plot {}: {}", path, e);
                    }
                }
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
