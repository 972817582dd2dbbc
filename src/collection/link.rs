use super::error::LinkError;
use super::monitor::run_collection_monitor;
use super::params::CollectionParams;
use super::signals::{signal_channel, SignalHandle};
use tokio::runtime::Runtime;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

/// UI-side handles returned by [`AcquisitionLink::startup`], to be wired
/// into the panels that drive a collection.
#[derive(Debug)]
pub struct CollectionHandles {
    pub trigger: SignalHandle,
    pub start: SignalHandle,
    pub stop: SignalHandle,
    pub params: watch::Sender<CollectionParams>,
}

/// The link is the bridge between the synchronous UI and the async
/// acquisition side. It owns the tokio runtime and the monitor task and
/// hands out the signal handles the panels fire.
#[derive(Debug)]
pub struct AcquisitionLink {
    cancel: Option<broadcast::Sender<()>>,
    handle: Option<JoinHandle<()>>,
    runtime: Runtime,
    is_connected: bool,
}

impl AcquisitionLink {
    /// Create a link with a tokio Runtime
    pub fn new(runtime: Runtime) -> Self {
        AcquisitionLink {
            cancel: None,
            handle: None,
            runtime,
            is_connected: false,
        }
    }

    /// Spawn the collection monitor and return the UI-side signal handles
    pub fn startup(&mut self, initial: CollectionParams) -> CollectionHandles {
        let (trigger_tx, trigger_rx) = signal_channel();
        let (start_tx, start_rx) = signal_channel();
        let (stop_tx, stop_rx) = signal_channel();
        let (params_tx, params_rx) = watch::channel(initial);
        let (cancel_tx, cancel_rx) = broadcast::channel(4);

        let handle = self.runtime.spawn(async move {
            match run_collection_monitor(start_rx, trigger_rx, stop_rx, params_rx, cancel_rx).await
            {
                Ok(()) => (),
                Err(e) => tracing::error!("The collection monitor exited with an error: {e}"),
            }
        });

        self.cancel = Some(cancel_tx);
        self.handle = Some(handle);
        self.is_connected = true;
        tracing::info!("Acquisition link started");

        CollectionHandles {
            trigger: trigger_tx,
            start: start_tx,
            stop: stop_tx,
            params: params_tx,
        }
    }

    /// Cancel the monitor task and wait for it to join back. This can cause
    /// a small blocking period on the UI thread.
    pub fn shutdown(&mut self) -> Result<(), LinkError> {
        if let Some(cancel) = self.cancel.take() {
            cancel.send(())?;
        }
        if let Some(handle) = self.handle.take() {
            self.runtime.block_on(handle)?;
        }
        self.is_connected = false;
        Ok(())
    }

    /// Is the link connected to the acquisition side
    pub fn is_connected(&self) -> bool {
        self.is_connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_runtime() -> Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .build()
            .expect("Could not build the test runtime!")
    }

    #[test]
    fn startup_then_shutdown_joins_the_monitor() {
        let mut link = AcquisitionLink::new(test_runtime());
        assert!(!link.is_connected());

        let handles = link.startup(CollectionParams::default());
        assert!(link.is_connected());

        handles.start.fire().unwrap();
        handles.trigger.fire().unwrap();
        handles.stop.fire().unwrap();

        link.shutdown().unwrap();
        assert!(!link.is_connected());
    }

    #[test]
    fn shutdown_before_startup_is_a_noop() {
        let mut link = AcquisitionLink::new(test_runtime());
        link.shutdown().unwrap();
        assert!(!link.is_connected());
    }
}
