use super::about_panel::render_about_panel;
use super::config::Config;
use super::modules::{default_module, ModuleId, MODULES};
use super::red_panel::{render_red_panel, RedPanel};
use crate::collection::link::AcquisitionLink;

use eframe::egui::{CentralPanel, Color32, RichText, TopBottomPanel};
use rfd::FileDialog;

const DEFAULT_TEXT_COLOR: Color32 = Color32::LIGHT_GRAY;

/// CommanderApp implements the eframe::App trait,
/// and holds the acquisition link and the state of every registered module.
#[derive(Debug)]
pub struct CommanderApp {
    pub config: Config,
    pub link: AcquisitionLink,
    pub red: RedPanel,
    pub active_module: ModuleId,
}

impl CommanderApp {
    /// Create the app from an eframe context and a tokio runtime, start the
    /// acquisition link, and wire the RED panel to it.
    pub fn new(cc: &eframe::CreationContext<'_>, runtime: tokio::runtime::Runtime) -> Self {
        let mut visuals = eframe::egui::Visuals::dark();
        visuals.override_text_color = Some(DEFAULT_TEXT_COLOR);
        cc.egui_ctx.set_visuals(visuals);
        cc.egui_ctx.set_theme(eframe::egui::Theme::Dark);

        let mut config = Config::new();
        if config.path.exists() {
            match config.load(config.path.clone()) {
                Ok(()) => tracing::info!("Config loaded from {}", config.path.display()),
                Err(e) => tracing::error!("Could not load Config: {e}"),
            }
        }

        let mut link = AcquisitionLink::new(runtime);
        let handles = link.startup(config.collection);

        let mut red = RedPanel::new(config.collection);
        red.set_trigger(handles.trigger);
        red.set_events(handles.start, handles.stop);
        red.set_params_sink(handles.params);

        CommanderApp {
            config,
            link,
            red,
            active_module: default_module(),
        }
    }

    fn save_config_as(&mut self) {
        if let Some(path) = FileDialog::new()
            .set_directory(std::env::current_dir().expect("Couldn't access runtime directory"))
            .add_filter("YAML", &["yaml", "yml"])
            .save_file()
        {
            self.config.path = path;
            self.config.collection = self.red.get_params();
            match self.config.save() {
                Ok(()) => (),
                Err(e) => tracing::error!("Could not save Config: {e}"),
            }
        }
    }

    fn open_config(&mut self) {
        if let Some(path) = FileDialog::new()
            .set_directory(std::env::current_dir().expect("Couldn't access runtime directory"))
            .add_filter("YAML", &["yaml", "yml"])
            .pick_file()
        {
            match self.config.load(path) {
                Ok(()) => self.red.apply_params(self.config.collection),
                Err(e) => tracing::error!("Could not load Config: {e}"),
            }
        }
    }
}

impl eframe::App for CommanderApp {
    fn update(&mut self, ctx: &eframe::egui::Context, _frame: &mut eframe::Frame) {
        TopBottomPanel::top("Commander_Top").show(ctx, |ui| {
            ui.menu_button(RichText::new("File").size(16.0), |ui| {
                if ui.button(RichText::new("Save").size(14.0)).clicked() {
                    self.save_config_as();
                    ui.close_menu();
                }
                if ui.button(RichText::new("Open").size(14.0)).clicked() {
                    self.open_config();
                    ui.close_menu();
                }
            });
            ui.separator();
            ui.horizontal(|ui| {
                for module in MODULES {
                    ui.selectable_value(
                        &mut self.active_module,
                        module.id,
                        RichText::new(module.title).size(16.0),
                    );
                }
            });
        });

        CentralPanel::default().show(ctx, |ui| match self.active_module {
            ModuleId::Red => render_red_panel(&mut self.red, ui),
            ModuleId::About => render_about_panel(ui),
        });

        // Keep the elapsed-time readout ticking while a collection runs
        ctx.request_repaint_after(std::time::Duration::from_millis(500));
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.config.collection = self.red.get_params();
        match self.config.save() {
            Ok(()) => tracing::info!("Config autosaved to {}", self.config.path.display()),
            Err(e) => tracing::error!("Could not autosave Config: {e}"),
        }
        if self.link.is_connected() {
            match self.link.shutdown() {
                Ok(()) => tracing::info!("Disconnected the acquisition link"),
                Err(e) => tracing::error!("Failed to stop the acquisition link: {e}"),
            }
        }
    }
}
