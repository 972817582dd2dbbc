use eframe::egui::{Color32, RichText, Ui};

/// Render the about module
pub fn render_about_panel(ui: &mut Ui) {
    ui.label(
        RichText::new("RED Commander")
            .color(Color32::LIGHT_BLUE)
            .size(18.0),
    );
    ui.label(RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION"))).size(16.0));
    ui.separator();
    ui.label(
        "Control panel for rotation electron diffraction data collection. The stage is \
         tilted over the requested range in discrete steps while the camera integrates \
         for the configured exposure at each step; the acquisition service listening on \
         the collection signals does the rest.",
    );
    ui.separator();
    ui.hyperlink_to(
        "Rotation electron diffraction",
        "https://en.wikipedia.org/wiki/Electron_crystallography",
    );
}
