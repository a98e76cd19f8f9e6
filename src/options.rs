use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt, Clone)]
#[structopt(
    name = "ipp23-interpret",
    about = "Interpreter for the IPPcode23 stack/frame-based intermediate language"
)]
pub struct Options {
    #[structopt(
        long = "source",
        help = "Path to the source document; defaults to standard input"
    )]
    pub source: Option<PathBuf>,

    #[structopt(
        long = "input",
        help = "Path to the input stream READ consumes; defaults to standard input"
    )]
    pub input: Option<PathBuf>,

    #[structopt(
        short = "v",
        long = "verbose",
        parse(from_occurrences),
        help = "Increase logging verbosity (-v, -vv, -vvv)"
    )]
    pub verbosity: u8,
}

impl Options {
    /// `tracing_subscriber::EnvFilter` directive implied by `-v` count,
    /// overridable with `RUST_LOG`.
    pub fn default_log_filter(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
