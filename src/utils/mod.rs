pub mod build_info;
pub mod persistence;

use std::{env, path::PathBuf, sync::Once};

use dirs::home_dir;

const DEFAULT_DIR_NAME: &str = ".family_ledger";
const SHEET_FILE: &str = "sheet.json";
const CONFIG_FILE: &str = "config.json";

pub const HOME_ENV: &str = "FAMILY_LEDGER_HOME";
pub const SHEET_ENV: &str = "FAMILY_LEDGER_SHEET";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber, honouring `RUST_LOG`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("family_ledger=info"));

        // Logs go to stderr so tables on stdout stay clean for scripts.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
        tracing::debug!("Family ledger tracing initialized.");
    });
}

/// Returns the application data directory, defaulting to `~/.family_ledger`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Default location of the sheet file inside `base`.
pub fn sheet_file_in(base: &std::path::Path) -> PathBuf {
    base.join(SHEET_FILE)
}

/// Location of the configuration file inside `base`.
pub fn config_file_in(base: &std::path::Path) -> PathBuf {
    base.join(CONFIG_FILE)
}
