use twisty::app;

/// Log file written next to the binary. The terminal runs in raw mode, so
/// logs must never go to stdout.
const LOG_FILE: &str = "twisty.log";

/// Route tracing output to a non-blocking file writer. The returned guard
/// must stay alive for the process lifetime or buffered logs are dropped.
fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    guard
}

fn main() -> std::io::Result<()> {
    let _guard = init_tracing();
    tracing::info!("twisty starting");

    let mut stdout = std::io::stdout();
    app::setup_terminal(&mut stdout)?;
    let result = app::run(&mut stdout);
    app::restore_terminal(&mut stdout)?;

    if let Err(error) = &result {
        tracing::error!("exited with error: {error}");
    }
    result
}
