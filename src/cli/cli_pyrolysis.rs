use crate::Kinetics::kinetic_schemes::{KineticScheme, LIDEN_FIXED_CARBON, LIDEN_PHI_STAR};
use crate::Kinetics::rate_law::TemperatureProfile;
use crate::ReactorsIVP::batch_reactor::{InitialState, PyrolysisResult};
use crate::ReactorsIVP::dormand_prince::DormandPrince45;
use crate::ReactorsIVP::forward_euler::ForwardEuler;
use crate::Utils::task_config::PyrolysisTask;
use crate::error::PyrolysisError;
use log::info;
use std::io::{BufRead, Write};

/// Builds the reactor of `task`, prints the set-up, solves and prints the result.
pub fn run_task(task: PyrolysisTask) -> Result<PyrolysisResult, PyrolysisError> {
    let rows = task.print_rows;
    let mut reactor = task.into_reactor()?;
    reactor.pretty_print_task()?;
    println!("Solving...");
    let result = reactor.solve()?.clone();
    result.pretty_print(rows);
    Ok(result)
}

pub fn pyrolysis_menu<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> Result<(), PyrolysisError> {
    loop {
        writeln!(out, "\n=== Wood Pyrolysis Batch Reactor ===")?;
        writeln!(out, "1. Five-pathway scheme (Chan/Blasi), forward Euler")?;
        writeln!(out, "2. Theoretical tar yield scheme (Liden 1988), adaptive RK45")?;
        writeln!(out, "3. Run task from JSON file")?;
        writeln!(out, "4. Write task template")?;
        writeln!(out, "5. Show kinetic schemes")?;
        writeln!(out, "0. Back")?;
        let Some(choice) = ask(input, out, "Choose option: ")? else {
            return Ok(());
        };
        let outcome = match choice.as_str() {
            "1" => chan_blasi_task(input, out).and_then(run_task).map(|_| ()),
            "2" => liden_task(input, out).and_then(run_task).map(|_| ()),
            "3" => ask(input, out, "Task file: ")?
                .ok_or_else(|| PyrolysisError::invalid_configuration("no file given"))
                .and_then(PyrolysisTask::from_file)
                .and_then(run_task)
                .map(|_| ()),
            "4" => write_template(input, out),
            "5" => show_schemes(input, out),
            "0" => return Ok(()),
            _ => {
                writeln!(out, "Invalid option")?;
                Ok(())
            }
        };
        // a bad task sends the user back to the menu
        if let Err(e) = outcome {
            writeln!(out, "Error: {}", e)?;
        }
    }
}

/// one trimmed line, `None` at end of input
fn ask<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> Result<Option<String>, PyrolysisError> {
    write!(out, "{}", prompt)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

/// number with a default taken on an empty answer
fn ask_f64<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
    default: f64,
) -> Result<f64, PyrolysisError> {
    match ask(input, out, &format!("{} [{}]: ", prompt, default))? {
        None => Ok(default),
        Some(answer) if answer.is_empty() => Ok(default),
        Some(answer) => answer.parse().map_err(|_| {
            PyrolysisError::invalid_parameter(format!("invalid number for {}: '{}'", prompt, answer))
        }),
    }
}

fn chan_blasi_task<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> Result<PyrolysisTask, PyrolysisError> {
    let temperature = ask_f64(input, out, "Temperature, K", 773.0)?;
    let rho = ask_f64(input, out, "Wood density, kg/m3", 700.0)?;
    let dt = ask_f64(input, out, "Time step, s", 0.01)?;
    let t_end = ask_f64(input, out, "Final time, s", 25.0)?;
    info!("five-pathway run: T = {} K, rho = {}, dt = {}", temperature, rho, dt);
    Ok(PyrolysisTask {
        problem_name: Some("five-pathway batch pyrolysis".to_string()),
        scheme: KineticScheme::chan_blasi(),
        temperature: TemperatureProfile::constant(temperature),
        initial_state: InitialState::WoodDensity { rho },
        t_span: (0.0, t_end),
        integrator: ForwardEuler::new(dt).into(),
        ..Default::default()
    })
}

fn liden_task<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> Result<PyrolysisTask, PyrolysisError> {
    let temperature = ask_f64(input, out, "Temperature, K", 773.15)?;
    let phi_star = ask_f64(input, out, "Theoretical tar yield phi*", LIDEN_PHI_STAR)?;
    let fixed_carbon = ask_f64(input, out, "Fixed carbon fraction", LIDEN_FIXED_CARBON)?;
    let rtol = ask_f64(input, out, "Relative tolerance", 1e-3)?;
    let t_end = ask_f64(input, out, "Final time, s", 25.0)?;
    Ok(PyrolysisTask {
        problem_name: Some("Liden 1988 batch pyrolysis".to_string()),
        scheme: KineticScheme::liden_1988(phi_star),
        temperature: TemperatureProfile::constant(temperature),
        initial_state: InitialState::WoodMassFraction,
        t_span: (0.0, t_end),
        integrator: DormandPrince45::new(rtol, 1e-6).into(),
        fixed_carbon: Some(fixed_carbon),
        ..Default::default()
    })
}

fn write_template<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<(), PyrolysisError> {
    let path = ask(input, out, "Template file [pyrolysis_task.json]: ")?
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| "pyrolysis_task.json".to_string());
    PyrolysisTask::default().save(&path)?;
    writeln!(out, "template written to {}", path)?;
    Ok(())
}

fn show_schemes<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<(), PyrolysisError> {
    let temperature = ask_f64(input, out, "Temperature, K", 773.0)?;
    KineticScheme::chan_blasi().pretty_print(temperature)?;
    KineticScheme::liden_1988(LIDEN_PHI_STAR).pretty_print(temperature)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_on_empty_answers() {
        let mut input = Cursor::new("\n\n\n\n");
        let mut out = Vec::new();
        let task = chan_blasi_task(&mut input, &mut out).unwrap();
        assert_eq!(task.temperature, TemperatureProfile::constant(773.0));
        assert_eq!(task.t_span, (0.0, 25.0));
        let prompts = String::from_utf8(out).unwrap();
        assert!(prompts.contains("Time step, s [0.01]"));
    }

    #[test]
    fn test_bad_number_is_reported() {
        let mut input = Cursor::new("hot\n");
        let mut out = Vec::new();
        let err = liden_task(&mut input, &mut out).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_menu_survives_errors_and_exits() {
        // option 1 with a negative step, then an unknown option, then back
        let mut input = Cursor::new("1\n\n\n-1\n\n7\n0\n");
        let mut out = Vec::new();
        pyrolysis_menu(&mut input, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Error:"));
        assert!(text.contains("Invalid option"));
    }

    #[test]
    fn test_template_is_a_valid_task() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("task.json");
        let answers = format!("{}\n", path.display());
        let mut out = Vec::new();
        write_template(&mut Cursor::new(answers), &mut out).unwrap();
        let task = PyrolysisTask::from_file(&path).unwrap();
        assert_eq!(task, PyrolysisTask::default());
    }
}
