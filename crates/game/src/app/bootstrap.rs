use runtime::LoopConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::gameplay::{self, ChaseSession};

const CONFIG_ENV_VAR: &str = "ROLLICK_CONFIG";

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) session: ChaseSession,
}

pub(crate) fn build_app() -> Result<AppWiring, String> {
    init_tracing();
    info!("=== Rollick Startup ===");

    let game_config = match std::env::var(CONFIG_ENV_VAR) {
        Ok(path) => {
            info!(path = path.as_str(), "config_from_env");
            gameplay::load_config_file(path.as_ref())?
        }
        Err(_) => gameplay::GameConfigFile::default(),
    };
    game_config.validate()?;

    let session = gameplay::build_session(game_config);
    Ok(AppWiring {
        config: LoopConfig::default(),
        session,
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
