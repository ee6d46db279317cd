///  Example#1
/// ```
/// use RustedEquationSolver::numerical::engine::solve;
/// use RustedEquationSolver::symbolic::equation_types::EquationClass;
/// // the shortest way: one call, no session state
/// let result = solve("x^2-4x+3=0", None, EquationClass::Quadratic).unwrap();
/// for step in &result.steps {
///     println!("{}", step);
/// }
/// assert_eq!(result.answer(3), "x₁ = 3, x₂ = 1");
/// assert_eq!(result.plot.as_ref().map(|p| p.len()), Some(51));
/// ```
/// Example#2
/// ```
/// // or with a session that keeps the history of solved equations
/// use RustedEquationSolver::numerical::engine::EquationSolver;
/// use RustedEquationSolver::symbolic::equation_types::EquationClass;
/// let mut solver = EquationSolver::new();
/// solver.set_solver_params(Some("off".to_string()), None).unwrap();
/// let result = solver.solve("2x+3y=7", Some("x-y=1"), EquationClass::System).unwrap();
/// assert_eq!(result.answer(3), "x = 2, y = 1");
/// assert_eq!(solver.history().len(), 1);
/// ```
pub mod engine;
/// evenly spaced (x, y) samples of a parabola around its vertex
pub mod sampling;
/// closed-form strategies for the three equation families, each producing a derivation trace
pub mod solver_dispatch;
