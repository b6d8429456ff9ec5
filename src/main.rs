use anyhow::anyhow;
use clap::Parser;
use eframe::egui;
use notepad::cli::CliArgs;
use notepad::{logging, NotepadApp};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    logging::init(args.log_level());
    let config = args.into_config();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 600.0])
            .with_title("Untitled - Notepad"),
        ..Default::default()
    };

    eframe::run_native(
        "Notepad",
        options,
        Box::new(move |cc| Ok(Box::new(NotepadApp::new(cc, config)))),
    )
    .map_err(|e| anyhow!("failed to start the window: {e}"))
}
