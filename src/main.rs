use std::process::ExitCode;

use anyhow::Result;
use env_logger::Env;
use log::{debug, info};

use stub_gen::cli::{self, Cli};
use stub_gen::StubProcessor;

fn run(cli: &Cli) -> Result<()> {
    let options = cli.options()?;
    let processor = StubProcessor::new(options)?;
    let result = processor.run(&cli.input_dir, &cli.output_dir)?;

    for path in result.written_files() {
        debug!("Wrote {}", path.display());
    }

    info!(
        "{} of {} files documented, {} empty, {:.1} stubs per file",
        result.stats.files_written,
        result.stats.total_files,
        result.stats.empty_files,
        result.stats.avg_stubs_per_file()
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = match cli::parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(err) => {
            println!("{}", err);
            return ExitCode::from(err.exit_code());
        }
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_filter())).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::FAILURE
        }
    }
}
