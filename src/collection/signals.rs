use super::error::SignalError;
use tokio::sync::mpsc;

/// Create a connected signal pair. The handle side lives with the UI, the
/// listener side with the acquisition task.
pub fn signal_channel() -> (SignalHandle, SignalListener) {
    let (tx, rx) = mpsc::unbounded_channel();
    (SignalHandle { tx }, SignalListener { rx })
}

/// UI-side half of a collection signal. Firing enqueues a pulse without
/// blocking the UI thread.
#[derive(Debug, Clone)]
pub struct SignalHandle {
    tx: mpsc::UnboundedSender<()>,
}

impl SignalHandle {
    pub fn fire(&self) -> Result<(), SignalError> {
        self.tx.send(())?;
        Ok(())
    }
}

/// Acquisition-side half of a collection signal.
#[derive(Debug)]
pub struct SignalListener {
    rx: mpsc::UnboundedReceiver<()>,
}

impl SignalListener {
    /// Wait for the next pulse. Errors if the UI side dropped its handle.
    pub async fn fired(&mut self) -> Result<(), SignalError> {
        match self.rx.recv().await {
            Some(()) => Ok(()),
            None => Err(SignalError::Closed),
        }
    }

    /// Drain any pending pulses without waiting, returning how many had fired.
    #[cfg(test)]
    pub fn drain(&mut self) -> usize {
        let mut count = 0;
        while self.rx.try_recv().is_ok() {
            count += 1;
        }
        count
    }
}
