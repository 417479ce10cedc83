use clap::Parser;

use ecco::config::{DEFAULT_HOST_PORT, DEFAULT_TAG, DEFAULT_USER, DEFAULT_WORKDIR};

#[derive(Parser, Debug)]
#[command(
    name = "ecco",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("ECCO_BUILD_DATE"), ")"),
    about = "Start ecco from Docker image.",
    override_usage = "ecco [OPTIONS] [CMD]...",
    after_long_help = "Examples:\n  ecco\n  ecco -t 0.4 -p 8888 -m ~/models -m ./notes\n  ecco -l -d -- bash\n"
)]
pub(crate) struct Cli {
    /// Run specific version (e.g. '0.4')
    #[arg(short = 't', long, default_value = DEFAULT_TAG)]
    pub(crate) tag: String,

    /// Run from local Docker repository
    #[arg(short = 'l', long)]
    pub(crate) local: bool,

    /// Run jupyter on specific host port
    #[arg(short = 'p', long, default_value_t = DEFAULT_HOST_PORT)]
    pub(crate) port: u16,

    /// Do not launch web browser
    #[arg(short = 'n', long = "no-browse")]
    pub(crate) no_browse: bool,

    /// Print Docker output and debugging messages
    #[arg(short = 'd', long)]
    pub(crate) debug: bool,

    /// Run command as USER
    #[arg(short = 'u', long, value_name = "USER", default_value = DEFAULT_USER)]
    pub(crate) user: String,

    /// Start Desktop integration helper
    #[arg(short = 'g', long)]
    pub(crate) gui: bool,

    /// Set working directory to DIR
    #[arg(short = 'c', long, value_name = "DIR", default_value = DEFAULT_WORKDIR)]
    pub(crate) chdir: String,

    /// Mount local directory DIR into the Docker container (repeatable)
    #[arg(short = 'm', long, value_name = "DIR")]
    pub(crate) mount: Vec<String>,

    /// Prepare and print what would run, but do not execute
    #[arg(long)]
    pub(crate) dry_run: bool,

    /// Colorize output: auto|always|never
    #[arg(long = "color", value_enum)]
    pub(crate) color: Option<ecco::ColorMode>,

    #[arg(long = "tray-parent", hide = true, requires = "tray_url")]
    pub(crate) tray_parent: Option<u32>,

    #[arg(long = "tray-url", hide = true, requires = "tray_parent")]
    pub(crate) tray_url: Option<String>,

    /// Start a specific command (default: jupyter-notebook)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub(crate) cmd: Vec<String>,
}
