use crate::cli::Cli;
use crate::core::color::{PackedColor, ARCADE_GREEN};
use crate::core::{ARCADE_HEIGHT, ARCADE_WIDTH};
use crate::gpu::ContextOptions;
use crate::logging::LoggingConfig;

/// Runtime configuration assembled from the command line
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    /// Initial window size in logical pixels
    pub window_size: (u32, u32),
    /// Virtual resolution of the framebuffer
    pub buffer_size: (u32, u32),
    pub clear_color: PackedColor,
    pub context: ContextOptions,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Space Invaders".to_string(),
            window_size: (640, 480),
            buffer_size: (ARCADE_WIDTH, ARCADE_HEIGHT),
            clear_color: ARCADE_GREEN,
            context: ContextOptions::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl From<Cli> for AppConfig {
    fn from(cli: Cli) -> Self {
        let present_mode = if cli.no_vsync {
            wgpu::PresentMode::AutoNoVsync
        } else {
            wgpu::PresentMode::Fifo
        };

        Self {
            title: cli.title,
            window_size: (cli.width.max(1), cli.height.max(1)),
            context: ContextOptions { present_mode },
            logging: LoggingConfig {
                filter: cli.log_filter,
                ..LoggingConfig::default()
            },
            ..Self::default()
        }
    }
}
