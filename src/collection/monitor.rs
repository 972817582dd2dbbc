use super::error::SignalError;
use super::params::CollectionParams;
use super::signals::SignalListener;
use tokio::sync::{broadcast, watch};

/// Acquisition-side counterpart to the RED panel. Waits on the collection
/// signals and logs the protocol; the stage and camera control acting on
/// these pulses is attached here by the acquisition service, outside this
/// crate. A stop pulse closes out the current collection but keeps the
/// monitor alive for the next start; only a cancel ends the task.
pub async fn run_collection_monitor(
    mut start: SignalListener,
    mut trigger: SignalListener,
    mut stop: SignalListener,
    params: watch::Receiver<CollectionParams>,
    mut cancel: broadcast::Receiver<()>,
) -> Result<(), SignalError> {
    loop {
        tokio::select! {
            _ = cancel.recv() => {
                tracing::info!("Collection monitor shutting down");
                return Ok(());
            }
            res = start.fired() => {
                res?;
                let current = *params.borrow();
                tracing::info!("Collection armed with {current}");
            }
            res = trigger.fired() => {
                res?;
                tracing::info!("Trigger pulse received");
            }
            res = stop.fired() => {
                res?;
                tracing::info!("Finalize requested, closing out the collection");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::signals::signal_channel;

    #[tokio::test]
    async fn exits_cleanly_on_cancel() {
        let (start_tx, start_rx) = signal_channel();
        let (trigger_tx, trigger_rx) = signal_channel();
        let (stop_tx, stop_rx) = signal_channel();
        let (_params_tx, params_rx) = watch::channel(CollectionParams::default());
        let (cancel_tx, cancel_rx) = broadcast::channel(4);

        let handle = tokio::spawn(run_collection_monitor(
            start_rx, trigger_rx, stop_rx, params_rx, cancel_rx,
        ));

        start_tx.fire().unwrap();
        trigger_tx.fire().unwrap();
        stop_tx.fire().unwrap();
        cancel_tx.send(()).unwrap();

        let result = handle.await.unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn errors_when_the_panel_side_disappears() {
        let (start_tx, start_rx) = signal_channel();
        let (trigger_tx, trigger_rx) = signal_channel();
        let (stop_tx, stop_rx) = signal_channel();
        let (_params_tx, params_rx) = watch::channel(CollectionParams::default());
        let (_cancel_tx, cancel_rx) = broadcast::channel::<()>(4);

        let handle = tokio::spawn(run_collection_monitor(
            start_rx, trigger_rx, stop_rx, params_rx, cancel_rx,
        ));

        drop(start_tx);
        drop(trigger_tx);
        drop(stop_tx);

        let result = handle.await.unwrap();
        assert!(result.is_err());
    }
}
