// cli.rs - Command-line interface configuration
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "space-invaders")]
#[command(about = "Space Invaders - arcade framebuffer presented with wgpu", long_about = None)]
pub struct Cli {
    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 640)]
    pub width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 480)]
    pub height: u32,

    /// Window title
    #[arg(long, default_value = "Space Invaders")]
    pub title: String,

    /// Present without waiting for vertical refresh
    #[arg(long = "no-vsync", default_value = "false")]
    pub no_vsync: bool,

    /// Log filter in env_logger syntax, overrides RUST_LOG
    #[arg(long = "log")]
    pub log_filter: Option<String>,
}
