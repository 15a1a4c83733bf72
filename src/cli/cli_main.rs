use super::cli_pyrolysis::pyrolysis_menu;
use crate::Examples::pyrolysis_examples::pyro_examples;
use crate::error::PyrolysisError;
use std::io::{self, BufRead, Write};

pub fn run_interactive_menu() -> Result<(), PyrolysisError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    main_menu(&mut input, &mut out)
}

pub fn main_menu<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<(), PyrolysisError> {
    loop {
        show_main_menu(out)?;
        let mut choice = String::new();
        if input.read_line(&mut choice)? == 0 {
            return Ok(());
        }
        match choice.trim() {
            "1" => pyrolysis_menu(input, out)?,
            "2" => examples_menu(input, out)?,
            "0" => {
                writeln!(out, "Goodbye!")?;
                return Ok(());
            }
            _ => writeln!(out, "Invalid choice. Please try again.")?,
        }
    }
}
/* colors
Blue (\x1b[34m) - header, Yellow (\x1b[33m) - options, Cyan (\x1b[36m) - prompt
*/
fn show_main_menu<W: Write>(out: &mut W) -> Result<(), PyrolysisError> {
    writeln!(
        out,
        "\x1b[34m\n PyroKin: batch-reactor kinetics of wood pyrolysis \n \x1b[0m"
    )?;
    writeln!(out, "\x1b[33m1. Pyrolysis batch reactor\x1b[0m")?;
    writeln!(out, "\x1b[33m2. Examples\x1b[0m")?;
    writeln!(out, "\x1b[33m0. Exit\x1b[0m")?;
    write!(out, "\x1b[36mEnter your choice: \x1b[0m")?;
    out.flush()?;
    Ok(())
}

fn examples_menu<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<(), PyrolysisError> {
    writeln!(out, "\n=== Examples ===")?;
    writeln!(out, "0. Five-pathway scheme, forward Euler")?;
    writeln!(out, "1. Liden 1988 scheme, adaptive RK45 with gas/char split")?;
    writeln!(out, "2. Every integrator on one task")?;
    writeln!(out, "3. Linear heating ramp")?;
    writeln!(out, "4. Hand-made reaction network")?;
    writeln!(out, "5. Forward Euler beyond its stability limit")?;
    write!(out, "Enter example number: ")?;
    out.flush()?;
    let mut choice = String::new();
    input.read_line(&mut choice)?;
    match choice.trim().parse::<usize>() {
        Ok(n) => {
            if let Err(e) = pyro_examples(n) {
                writeln!(out, "Error: {}", e)?;
            }
        }
        Err(_) => writeln!(out, "Invalid choice.")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_main_menu_exit_and_eof() {
        let mut out = Vec::new();
        main_menu(&mut Cursor::new("9\n0\n"), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Invalid choice"));
        assert!(text.contains("Goodbye!"));

        let mut out = Vec::new();
        main_menu(&mut Cursor::new(""), &mut out).unwrap();
    }

    #[test]
    fn test_unknown_example_is_reported() {
        let mut out = Vec::new();
        main_menu(&mut Cursor::new("2\n17\n0\n"), &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Error:"));
    }
}
