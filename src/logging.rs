use std::sync::Once;

/// wgpu crates that log per-call detail at info; capped unless asked for
const GPU_MODULES: [&str; 3] = ["wgpu_core", "wgpu_hal", "naga"];

/// Where log output goes and how much of it.
///
/// `filter` takes `env_logger` directives such as `"debug"` or
/// `"space_invaders=trace,wgpu_core=info"`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    pub color: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            color: env_logger::WriteStyle::Auto,
        }
    }
}

/// Filter directives the logger ends up with
#[derive(Debug, Clone, PartialEq, Eq)]
enum Directives {
    /// `--log` on the command line
    Flag(String),
    /// `RUST_LOG` from the environment
    Environment(String),
    /// Info for the game, warnings only from the GPU stack
    Default,
}

impl Directives {
    fn select(flag: Option<String>, environment: Option<String>) -> Self {
        match (flag, environment) {
            (Some(flag), _) => Directives::Flag(flag),
            (None, Some(env)) if !env.trim().is_empty() => Directives::Environment(env),
            _ => Directives::Default,
        }
    }

    fn apply(&self, builder: &mut env_logger::Builder) {
        match self {
            Directives::Flag(filter) | Directives::Environment(filter) => {
                builder.parse_filters(filter);
            }
            Directives::Default => {
                builder.filter_level(log::LevelFilter::Info);
                for module in GPU_MODULES {
                    builder.filter_module(module, log::LevelFilter::Warn);
                }
            }
        }
    }
}

static INIT: Once = Once::new();

/// Install the global logger. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let directives = Directives::select(config.filter, std::env::var("RUST_LOG").ok());

        let mut builder = env_logger::Builder::new();
        directives.apply(&mut builder);
        builder.write_style(config.color);
        builder.init();

        log::debug!("logger installed with {:?}", directives);
    });
}
