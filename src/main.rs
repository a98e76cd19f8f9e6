use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use ipp23_interpret::engine::Engine;
use ipp23_interpret::error::InterpError;
use ipp23_interpret::input::InputSource;
use ipp23_interpret::loader;
use ipp23_interpret::options::Options;

use structopt::StructOpt;

fn init_tracing(opts: &Options) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(opts.default_log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(opts: Options) -> Result<i32, InterpError> {
    if opts.source.is_none() && opts.input.is_none() {
        return Err(InterpError::MissingParam(
            "at least one of --source / --input must be given".into(),
        ));
    }

    let source_text = match &opts.source {
        Some(path) => std::fs::read_to_string(path).map_err(|e| InterpError::InputOpen {
            path: path.display().to_string(),
            source: e,
        })?,
        None => {
            use std::io::Read;
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| InterpError::InputOpen {
                    path: "<stdin>".into(),
                    source: e,
                })?;
            buf
        }
    };

    let program = loader::load(&source_text)?;

    let input = match &opts.input {
        Some(path) => InputSource::open(path).map_err(|e| InterpError::InputOpen {
            path: path.display().to_string(),
            source: e,
        })?,
        None => InputSource::stdin(),
    };

    let mut stdout = std::io::stdout();
    let engine = Engine::new(&program, input, &mut stdout);
    engine.run()
}

fn main() -> ExitCode {
    let opts = Options::from_args();
    init_tracing(&opts);

    match run(opts) {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
