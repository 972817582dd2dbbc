mod collection;
mod ui;

use ui::app::CommanderApp;

fn main() {
    let appender = tracing_appender::rolling::daily("logs", "red_commander.log");
    let (writer, _guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .init();

    tracing::info!("Starting RED Commander v{}", env!("CARGO_PKG_VERSION"));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .build()
        .expect("Could not build the tokio runtime!");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([700.0, 500.0])
            .with_min_inner_size([500.0, 400.0]),
        ..Default::default()
    };

    match eframe::run_native(
        "RED Commander",
        options,
        Box::new(|cc| Ok(Box::new(CommanderApp::new(cc, runtime)))),
    ) {
        Ok(()) => (),
        Err(e) => tracing::error!("The UI loop exited with an error: {e}"),
    }
}
