use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// 19 standard nurses plus one Morning-only auxiliary.
    Auxiliary,
    /// 19 standard nurses, narrower hour band, no auxiliary.
    Compact,
}

#[derive(Debug, Clone)]
pub struct CliOptions {
    pub preset: Preset,
    pub config_path: Option<PathBuf>,
    pub csv_path: Option<PathBuf>,
    pub time_limit: Duration,
    pub workers: usize,
    pub debug: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        CliOptions {
            preset: Preset::Auxiliary,
            config_path: None,
            csv_path: None,
            time_limit: Duration::from_secs(60),
            workers: 8,
            debug: false,
        }
    }
}

/// Parses command-line arguments:
/// - preset selection: "compact" anywhere switches variants
/// - --config=FILE to load a JSON configuration instead of a preset
/// - --csv=FILE to export the solved grid
/// - --time-limit=SECS and --workers=N, forwarded to the solver
/// - --debug to trace compilation
pub fn parse_from_args() -> CliOptions {
    let args: Vec<String> = env::args().collect();
    let mut options = CliOptions::default();

    if args.iter().any(|a| a.eq_ignore_ascii_case("compact")) {
        options.preset = Preset::Compact;
    }

    if let Some(arg) = args.iter().find(|a| a.starts_with("--config=")) {
        if let Some(path) = arg.strip_prefix("--config=") {
            options.config_path = Some(PathBuf::from(path));
        }
    }

    if let Some(arg) = args.iter().find(|a| a.starts_with("--csv=")) {
        if let Some(path) = arg.strip_prefix("--csv=") {
            options.csv_path = Some(PathBuf::from(path));
        }
    }

    if let Some(arg) = args.iter().find(|a| a.starts_with("--time-limit=")) {
        if let Some(value) = arg.strip_prefix("--time-limit=") {
            if let Ok(secs) = value.parse::<u64>() {
                options.time_limit = Duration::from_secs(secs);
            }
        }
    }

    if let Some(arg) = args.iter().find(|a| a.starts_with("--workers=")) {
        if let Some(value) = arg.strip_prefix("--workers=") {
            if let Ok(workers) = value.parse::<usize>() {
                options.workers = workers;
            }
        }
    }

    if args.iter().any(|a| a == "--debug") {
        options.debug = true;
    }

    options
}
