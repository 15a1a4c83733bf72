//! Terminal logger for the binary and the interactive menu.
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// `level` as "error" | "warn" | "info" | "debug" | "trace" | "off"; `None` reads `RUST_LOG`,
/// anything unparsable falls back to `Info`
pub fn parse_level(level: Option<&str>) -> LevelFilter {
    level
        .map(str::to_owned)
        .or_else(|| std::env::var("RUST_LOG").ok())
        .and_then(|l| l.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Installs the global logger. A second call is a no-op and returns false.
pub fn init_logging(level: Option<&str>) -> bool {
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Debug)
        .build();
    TermLogger::init(
        parse_level(level),
        config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .is_ok()
}
