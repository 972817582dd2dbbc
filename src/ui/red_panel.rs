use super::time_format::pretty_elapsed_time;
use crate::collection::error::SignalError;
use crate::collection::params::CollectionParams;
use crate::collection::signals::SignalHandle;
use eframe::egui::{Button, Color32, DragValue, Grid, RichText, Ui};
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Lifecycle of the RED collection as seen by the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionState {
    Idle,
    Collecting,
}

impl std::fmt::Display for CollectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Collecting => write!(f, "Collecting"),
        }
    }
}

/// State of the rotation electron diffraction panel. The panel edits the
/// collection parameters and drives the acquisition side through the
/// trigger, start, and stop signals wired in by the application.
#[derive(Debug)]
pub struct RedPanel {
    pub exposure_time: f64,
    pub tilt_range: f64,
    pub step_size: f64,
    state: CollectionState,
    collection_start: Option<Instant>,
    trigger: Option<SignalHandle>,
    start: Option<SignalHandle>,
    stop: Option<SignalHandle>,
    params_sink: Option<watch::Sender<CollectionParams>>,
}

impl RedPanel {
    pub fn new(initial: CollectionParams) -> Self {
        RedPanel {
            exposure_time: initial.exposure_time,
            tilt_range: initial.tilt_range,
            step_size: initial.step_size,
            state: CollectionState::Idle,
            collection_start: None,
            trigger: None,
            start: None,
            stop: None,
            params_sink: None,
        }
    }

    /// Wire the generic trigger signal
    pub fn set_trigger(&mut self, trigger: SignalHandle) {
        self.trigger = Some(trigger);
    }

    /// Wire the start and stop signals
    pub fn set_events(&mut self, start: SignalHandle, stop: SignalHandle) {
        self.start = Some(start);
        self.stop = Some(stop);
    }

    /// Wire the channel over which armed parameters reach the acquisition side
    pub fn set_params_sink(&mut self, sink: watch::Sender<CollectionParams>) {
        self.params_sink = Some(sink);
    }

    /// Current values of the three collection parameters
    pub fn get_params(&self) -> CollectionParams {
        CollectionParams {
            exposure_time: self.exposure_time,
            tilt_range: self.tilt_range,
            step_size: self.step_size,
        }
    }

    pub fn state(&self) -> CollectionState {
        self.state
    }

    pub fn is_collecting(&self) -> bool {
        self.state == CollectionState::Collecting
    }

    pub fn can_start(&self) -> bool {
        !self.is_collecting()
    }

    pub fn can_continue(&self) -> bool {
        self.is_collecting()
    }

    pub fn can_finalize(&self) -> bool {
        self.is_collecting()
    }

    /// Exposure time and step size are locked while a collection runs. The
    /// tilt range stays editable so the next sweep can be retargeted.
    pub fn params_locked(&self) -> bool {
        self.is_collecting()
    }

    /// How long the current collection has been running
    pub fn elapsed(&self) -> Option<Duration> {
        self.collection_start.map(|start| Instant::now() - start)
    }

    /// Replace the parameter values, e.g. after a configuration load.
    /// Ignored while a collection is running so locked fields cannot change
    /// mid-run.
    pub fn apply_params(&mut self, params: CollectionParams) {
        if self.is_collecting() {
            tracing::warn!("Parameter update ignored while a collection is running");
            return;
        }
        self.exposure_time = params.exposure_time;
        self.tilt_range = params.tilt_range;
        self.step_size = params.step_size;
    }

    /// Begin a collection: lock the panel, publish the parameters, then
    /// pulse start followed by trigger.
    pub fn start_collection(&mut self) -> Result<(), SignalError> {
        self.state = CollectionState::Collecting;
        self.collection_start = Some(Instant::now());
        self.publish_params();
        fire(&self.start, "start")?;
        fire(&self.trigger, "trigger")?;
        tracing::info!("Collection started with {}", self.get_params());
        Ok(())
    }

    /// Resume the collection for another sweep without touching enablement
    pub fn continue_collection(&mut self) -> Result<(), SignalError> {
        self.publish_params();
        fire(&self.start, "start")?;
        fire(&self.trigger, "trigger")?;
        tracing::info!("Collection continued with {}", self.get_params());
        Ok(())
    }

    /// Close out the collection: unlock the panel, then pulse trigger
    /// followed by stop.
    pub fn finalize_collection(&mut self) -> Result<(), SignalError> {
        self.state = CollectionState::Idle;
        self.collection_start = None;
        fire(&self.trigger, "trigger")?;
        fire(&self.stop, "stop")?;
        tracing::info!("Collection finalized");
        Ok(())
    }

    // Publication must precede the start pulse so the acquisition side
    // never arms against stale values.
    fn publish_params(&self) {
        if let Some(sink) = &self.params_sink {
            sink.send_replace(self.get_params());
        }
    }
}

fn fire(handle: &Option<SignalHandle>, name: &'static str) -> Result<(), SignalError> {
    match handle {
        Some(handle) => handle.fire(),
        None => Err(SignalError::NotWired(name)),
    }
}

/// Render the rotation electron diffraction panel
pub fn render_red_panel(panel: &mut RedPanel, ui: &mut Ui) {
    ui.label(
        RichText::new("Rotation Electron Diffraction")
            .color(Color32::LIGHT_BLUE)
            .size(18.0),
    );
    let state = panel.state();
    let status = match panel.elapsed() {
        Some(elapsed) => format!("Status: {} ({})", state, pretty_elapsed_time(elapsed.as_secs())),
        None => format!("Status: {state}"),
    };
    ui.label(RichText::new(status).size(16.0).color(&state));
    ui.separator();

    let locked = panel.params_locked();
    Grid::new("red_params").min_col_width(120.0).show(ui, |ui| {
        ui.label(RichText::new("Exposure time (s)").size(16.0));
        ui.add_enabled(!locked, DragValue::new(&mut panel.exposure_time).speed(0.1));
        ui.end_row();

        ui.label(RichText::new("Tilt range (deg)").size(16.0));
        ui.add(DragValue::new(&mut panel.tilt_range).speed(0.5));
        ui.end_row();

        ui.label(RichText::new("Step size (deg)").size(16.0));
        ui.add_enabled(!locked, DragValue::new(&mut panel.step_size).speed(0.05));
        ui.end_row();
    });
    ui.separator();

    ui.horizontal(|ui| {
        if ui
            .add_enabled(
                panel.can_start(),
                Button::new(
                    RichText::new("Start Collection")
                        .color(Color32::GREEN)
                        .size(16.0),
                )
                .min_size([130.0, 25.0].into()),
            )
            .clicked()
        {
            match panel.start_collection() {
                Ok(()) => (),
                Err(e) => tracing::error!("Could not start the collection: {e}"),
            }
        }
        if ui
            .add_enabled(
                panel.can_continue(),
                Button::new(
                    RichText::new("Continue")
                        .color(Color32::LIGHT_BLUE)
                        .size(16.0),
                )
                .min_size([100.0, 25.0].into()),
            )
            .clicked()
        {
            match panel.continue_collection() {
                Ok(()) => (),
                Err(e) => tracing::error!("Could not continue the collection: {e}"),
            }
        }
        if ui
            .add_enabled(
                panel.can_finalize(),
                Button::new(RichText::new("Finalize").color(Color32::RED).size(16.0))
                    .min_size([100.0, 25.0].into()),
            )
            .clicked()
        {
            match panel.finalize_collection() {
                Ok(()) => (),
                Err(e) => tracing::error!("Could not finalize the collection: {e}"),
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::signals::{signal_channel, SignalListener};

    struct Wired {
        panel: RedPanel,
        trigger: SignalListener,
        start: SignalListener,
        stop: SignalListener,
        params: watch::Receiver<CollectionParams>,
    }

    fn wired_panel() -> Wired {
        let mut panel = RedPanel::new(CollectionParams::default());
        let (trigger_tx, trigger_rx) = signal_channel();
        let (start_tx, start_rx) = signal_channel();
        let (stop_tx, stop_rx) = signal_channel();
        let (params_tx, params_rx) = watch::channel(panel.get_params());
        panel.set_trigger(trigger_tx);
        panel.set_events(start_tx, stop_tx);
        panel.set_params_sink(params_tx);
        Wired {
            panel,
            trigger: trigger_rx,
            start: start_rx,
            stop: stop_rx,
            params: params_rx,
        }
    }

    #[test]
    fn initial_state() {
        let panel = RedPanel::new(CollectionParams::default());
        assert!(panel.can_start());
        assert!(!panel.can_continue());
        assert!(!panel.can_finalize());
        assert!(!panel.params_locked());
        assert!(panel.elapsed().is_none());
        assert_eq!(panel.get_params(), CollectionParams::default());
    }

    #[test]
    fn start_locks_the_panel_and_fires_each_signal_once() {
        let mut w = wired_panel();
        w.panel.start_collection().unwrap();

        assert!(!w.panel.can_start());
        assert!(w.panel.can_continue());
        assert!(w.panel.can_finalize());
        assert!(w.panel.params_locked());
        assert!(w.panel.elapsed().is_some());

        assert_eq!(w.start.drain(), 1);
        assert_eq!(w.trigger.drain(), 1);
        assert_eq!(w.stop.drain(), 0);
        assert_eq!(*w.params.borrow(), w.panel.get_params());
    }

    #[test]
    fn continue_refires_without_enablement_change() {
        let mut w = wired_panel();
        w.panel.start_collection().unwrap();
        w.start.drain();
        w.trigger.drain();

        w.panel.tilt_range = 25.0;
        w.panel.continue_collection().unwrap();

        assert!(w.panel.can_continue());
        assert!(w.panel.can_finalize());
        assert!(w.panel.params_locked());
        assert_eq!(w.start.drain(), 1);
        assert_eq!(w.trigger.drain(), 1);
        assert_eq!(w.stop.drain(), 0);
        assert_eq!(w.params.borrow().tilt_range, 25.0);
    }

    #[test]
    fn finalize_restores_enablement_and_fires_trigger_then_stop() {
        let mut w = wired_panel();
        w.panel.start_collection().unwrap();
        w.start.drain();
        w.trigger.drain();

        w.panel.finalize_collection().unwrap();

        assert!(w.panel.can_start());
        assert!(!w.panel.can_continue());
        assert!(!w.panel.can_finalize());
        assert!(!w.panel.params_locked());
        assert!(w.panel.elapsed().is_none());
        assert_eq!(w.trigger.drain(), 1);
        assert_eq!(w.stop.drain(), 1);
        assert_eq!(w.start.drain(), 0);
    }

    #[test]
    fn get_params_tracks_edits() {
        let mut w = wired_panel();
        w.panel.exposure_time = 0.8;
        w.panel.tilt_range = 60.0;
        w.panel.step_size = 0.05;
        assert_eq!(
            w.panel.get_params(),
            CollectionParams {
                exposure_time: 0.8,
                tilt_range: 60.0,
                step_size: 0.05,
            }
        );
    }

    #[test]
    fn unwired_signals_error() {
        let mut panel = RedPanel::new(CollectionParams::default());
        let err = panel.start_collection().unwrap_err();
        assert!(matches!(err, SignalError::NotWired(_)));
    }

    #[test]
    fn apply_params_is_ignored_while_collecting() {
        let mut w = wired_panel();
        w.panel.start_collection().unwrap();

        let edited = CollectionParams {
            exposure_time: 2.0,
            tilt_range: 90.0,
            step_size: 1.0,
        };
        w.panel.apply_params(edited);
        assert_eq!(w.panel.get_params(), CollectionParams::default());

        w.panel.finalize_collection().unwrap();
        w.panel.apply_params(edited);
        assert_eq!(w.panel.get_params(), edited);
    }
}
