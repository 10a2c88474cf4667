mod console;

use std::thread;

fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_colors(true)
        .with_threads(true)
        .with_local_timestamps()
        .init()?;

    let channels = teeplatform_bridge::BridgeChannels::default();
    let backend = teeplatform_backend::run(channels.backend_rx, channels.backend_tx);
    let frontend_rx = channels.frontend_rx;
    let printer = thread::spawn(move || console::print_messages(frontend_rx));

    // returns on EOF, which drops the last command sender and stops the backend
    console::read_commands(channels.frontend_tx);

    if backend.join().is_err() {
        anyhow::bail!("backend thread panicked");
    }
    if printer.join().is_err() {
        anyhow::bail!("printer thread panicked");
    }
    Ok(())
}
