//! # Pretty printing of pyrolysis tasks and results
//!
//! Tabular output of the task set-up, the trajectory (thinned to a readable number of rows),
//! the final yields and the mass balance. Tables are built with prettytable.
use super::batch_reactor::{PyrolysisReactor, PyrolysisResult};
use super::integrators::Integrator;
use super::post_processing::final_yields;
use super::trajectory::Trajectory;
use crate::Kinetics::rate_law::TemperatureProfile;
use crate::error::PyrolysisError;
use prettytable::{Cell, Row, Table, row};

/// indices of at most `max_rows` samples, evenly spread, always including the last one
pub fn thinned_rows(n_samples: usize, max_rows: usize) -> Vec<usize> {
    if n_samples == 0 || max_rows == 0 {
        return Vec::new();
    }
    if n_samples <= max_rows {
        return (0..n_samples).collect();
    }
    let stride = (n_samples - 1).div_ceil(max_rows.saturating_sub(1).max(1));
    let mut rows: Vec<usize> = (0..n_samples).step_by(stride).collect();
    if rows.last() != Some(&(n_samples - 1)) {
        rows.push(n_samples - 1);
    }
    rows
}

/// trajectory as a table of at most `max_rows` rows
pub fn trajectory_table(traj: &Trajectory, max_rows: usize) -> Table {
    let mut table = Table::new();
    let mut header = vec![Cell::new("t, s")];
    header.extend(traj.species.iter().map(|s| Cell::new(s)));
    header.push(Cell::new("total"));
    table.add_row(Row::new(header));
    for i in thinned_rows(traj.len(), max_rows) {
        let state = traj.state(i);
        let mut cells = vec![Cell::new(&format!("{:.4}", traj.t[i]))];
        cells.extend(state.iter().map(|v| Cell::new(&format!("{:.6e}", v))));
        cells.push(Cell::new(&format!("{:.6e}", state.sum())));
        table.add_row(Row::new(cells));
    }
    table
}

pub fn pretty_print_trajectory(traj: &Trajectory, max_rows: usize) {
    trajectory_table(traj, max_rows).printstd();
}

impl PyrolysisReactor {
    /// Displays the scheme, temperature, initial state and integrator of the task.
    pub fn pretty_print_task(&self) -> Result<(), PyrolysisError> {
        println!("\n=== PYROLYSIS TASK SUMMARY ===");
        println!("Problem Name: {:?}", self.problem_name);

        let mut table = Table::new();
        table.add_row(row!["Parameter", "Value", "Units"]);
        match &self.temperature {
            Some(TemperatureProfile::Constant { T }) => {
                table.add_row(row!["Temperature (T)", format!("{:.2}", T), "K"]);
            }
            Some(TemperatureProfile::LinearRamp { T0, heating_rate }) => {
                table.add_row(row!["Initial temperature (T0)", format!("{:.2}", T0), "K"]);
                table.add_row(row!["Heating rate", format!("{:.3}", heating_rate), "K/s"]);
            }
            None => {
                table.add_row(row!["Temperature", "not set", "-"]);
            }
        }
        table.add_row(row![
            "Time span",
            format!("[{}, {}]", self.t_span.0, self.t_span.1),
            "s"
        ]);
        table.add_row(row![
            "Gas constant (R)",
            format!("{}", self.gas_constant),
            "kJ/mol/K"
        ]);
        table.add_row(row![
            "Initial state",
            format!("{:?}", self.initial_state),
            "-"
        ]);
        if let Some(fc) = self.fixed_carbon {
            table.add_row(row!["Fixed carbon", format!("{:.3}", fc), "-"]);
        }
        table.add_row(row!["Integrator", self.integrator.method_name(), "-"]);
        table.add_row(row![
            "Conservation tolerance",
            format!("{:.1e}", self.conservation_tolerance),
            "-"
        ]);
        table.printstd();

        if let (Some(scheme), Some(temperature)) = (&self.scheme, &self.temperature) {
            scheme.pretty_print(temperature.at(self.t_span.0))?;
        }
        Ok(())
    }

    /// Displays the last result, or a note when nothing has been solved yet.
    pub fn pretty_print_result(&self, max_rows: usize) {
        match self.result() {
            Some(result) => result.pretty_print(max_rows),
            None => println!("no result: call solve() first"),
        }
    }
}

impl PyrolysisResult {
    pub fn pretty_print(&self, max_rows: usize) {
        println!("____________________TRAJECTORY_________________________");
        pretty_print_trajectory(&self.trajectory, max_rows);

        if let Some(split) = &self.split {
            println!("____________________GAS / TAR / CHAR FRACTIONS_________________________");
            pretty_print_trajectory(split, max_rows);
        }

        println!("____________________FINAL YIELDS_________________________");
        let mut table = Table::new();
        table.add_row(row!["Species", "Yield"]);
        for (name, value) in final_yields(self.fractions()) {
            table.add_row(row![name, format!("{:.4}", value)]);
        }
        table.printstd();

        println!("mass balance: {}", self.conservation);
        if let Some(report) = &self.split_conservation {
            println!("mass balance after split: {}", report);
        }
        for warning in &self.trajectory.warnings {
            println!("warning: {}", warning);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DVector;

    #[test]
    fn test_thinned_rows_keep_ends() {
        assert_eq!(thinned_rows(5, 10), vec![0, 1, 2, 3, 4]);
        let rows = thinned_rows(2501, 11);
        assert_eq!(rows[0], 0);
        assert_eq!(*rows.last().unwrap(), 2500);
        assert!(rows.len() <= 12);
        assert!(thinned_rows(0, 10).is_empty());
    }

    #[test]
    fn test_trajectory_table_has_header_and_rows() {
        let names = vec!["wood".to_string(), "char".to_string()];
        let states = vec![
            DVector::from_vec(vec![1.0, 0.0]),
            DVector::from_vec(vec![0.6, 0.4]),
            DVector::from_vec(vec![0.2, 0.8]),
        ];
        let traj = Trajectory::from_samples(names, vec![0.0, 1.0, 2.0], &states).unwrap();
        let table = trajectory_table(&traj, 10);
        assert_eq!(table.len(), 4);
        let rendered = table.to_string();
        assert!(rendered.contains("wood"));
        assert!(rendered.contains("total"));
    }
}
