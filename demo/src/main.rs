use std::{
    error::Error,
    path::PathBuf,
    process::ExitCode,
    thread,
};

use logy::{
    Color, LogLevel, Logger, LogyResult, SharedLogger,
    debug, error, fatal, info, trace, warn,
};

fn run(directory: PathBuf) -> Result<(), Box<dyn Error>> {
    let mut logger = Logger::from_env(true);
    logger.open(&directory).into_result()?;
    logger.console_fmt(LogLevel::Warn, |fmt| {
        fmt
            .text("!! ", |spec| spec.with_fg(Color::Yellow))
            .level(|spec| spec.with_fg(Color::Yellow))
            .text(": ", |spec| spec)
            .message(|spec| spec);
    });

    info!(logger, "writing to {}", directory.display()).into_result()?;
    debug!(logger, "level is {}", logger.level()).into_result()?;
    warn!(logger, "custom console format").into_result()?;

    let shared = SharedLogger::new(logger);
    let workers: Vec<_> = (0..3)
        .map(|id| {
            let logger = shared.clone();
            thread::spawn(move || -> Result<(), LogyResult> {
                for step in 0..3 {
                    trace!(logger, "worker {} step {}", id, step).into_result()?;
                }
                error!(logger, "worker {} done", id).into_result()
            })
        })
        .collect();
    for worker in workers {
        worker.join().map_err(|_| "worker thread panicked")??;
    }

    shared.set_level(LogLevel::Off);
    fatal!(shared, "never written").into_result()?;
    shared.close();
    Ok(())
}

fn main() -> ExitCode {
    let directory = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("logs"));
    match run(directory) {
        Ok(()) => ExitCode::SUCCESS,
        Err(result) => {
            eprintln!("demo failed: {}", result);
            ExitCode::FAILURE
        },
    }
}
