/// Terminal logging set-up (simplelog).
pub mod logger;
/// JSON task files describing one pyrolysis solve.
///
/// # Examples
/// ```
/// use PyroKin::Utils::task_config::PyrolysisTask;
/// let task = PyrolysisTask::from_json_str(r#"{"t_span": [0.0, 5.0]}"#).unwrap();
/// let mut reactor = task.into_reactor().unwrap();
/// reactor.solve().unwrap();
/// ```
pub mod task_config;
