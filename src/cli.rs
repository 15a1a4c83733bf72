/// Main menu: pyrolysis reactor or examples.
pub mod cli_main;
/// Interactive set-up of a pyrolysis run or of a JSON task file.
pub mod cli_pyrolysis;
