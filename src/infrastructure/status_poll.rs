//! Background polling of the backend's service status

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, SyncSender, TrySendError};
use std::thread::JoinHandle;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    Available,
    Maintenance,
}

/// Source of the current service status
pub trait StatusProbe: Send + 'static {
    fn check(&mut self) -> ServiceStatus;
}

/// Reports maintenance while a flag file exists
#[derive(Debug, Clone)]
pub struct FileMaintenanceProbe {
    flag: PathBuf,
}

impl FileMaintenanceProbe {
    pub fn new(flag: PathBuf) -> Self {
        FileMaintenanceProbe { flag }
    }
}

impl StatusProbe for FileMaintenanceProbe {
    fn check(&mut self) -> ServiceStatus {
        if self.flag.exists() {
            ServiceStatus::Maintenance
        } else {
            ServiceStatus::Available
        }
    }
}

/// Periodic status check running on its own thread.
///
/// The probe runs once immediately, then every `interval`. Only changes are
/// reported and at most one report waits in the channel, so an idle reader
/// never accumulates a backlog. Read it with [`StatusPoller::latest`].
/// Dropping the poller cancels the worker.
pub struct StatusPoller {
    cancel_tx: Option<Sender<()>>,
    status_rx: Receiver<ServiceStatus>,
    worker: Option<JoinHandle<()>>,
}

impl StatusPoller {
    pub fn start<P: StatusProbe>(mut probe: P, interval: Duration) -> Self {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let (status_tx, status_rx) = mpsc::sync_channel::<ServiceStatus>(1);

        let worker = std::thread::spawn(move || {
            let mut reported = None;
            loop {
                let status = probe.check();
                if reported != Some(status) && !Self::report(&status_tx, status, &mut reported) {
                    break;
                }

                match cancel_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        log::debug!("status poller started, interval {:?}", interval);
        StatusPoller {
            cancel_tx: Some(cancel_tx),
            status_rx,
            worker: Some(worker),
        }
    }

    /// Status change reported since the last call, if any
    pub fn latest(&self) -> Option<ServiceStatus> {
        self.status_rx.try_recv().ok()
    }

    /// Hand `status` to the reader. A full slot is retried on the next tick
    /// with whatever the probe says then. Returns false once the reader is gone.
    fn report(
        status_tx: &SyncSender<ServiceStatus>,
        status: ServiceStatus,
        reported: &mut Option<ServiceStatus>,
    ) -> bool {
        match status_tx.try_send(status) {
            Ok(()) => {
                *reported = Some(status);
                true
            }
            Err(TrySendError::Full(_)) => true,
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Cancel the worker and wait for it to finish
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(cancel_tx) = self.cancel_tx.take() {
            let _ = cancel_tx.send(());
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::warn!("status poller worker panicked");
            }
            log::debug!("status poller stopped");
        }
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Instant;
    use tempfile::TempDir;

    struct CountingProbe {
        calls: Arc<AtomicUsize>,
    }

    impl StatusProbe for CountingProbe {
        fn check(&mut self) -> ServiceStatus {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ServiceStatus::Available
        }
    }

    fn wait_for<F: FnMut() -> bool>(mut condition: F) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !condition() {
            assert!(Instant::now() < deadline, "timed out waiting for poller");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_polls_repeatedly() {
        let calls = Arc::new(AtomicUsize::new(0));
        let poller = StatusPoller::start(
            CountingProbe {
                calls: calls.clone(),
            },
            Duration::from_millis(10),
        );

        wait_for(|| calls.load(Ordering::SeqCst) >= 3);
        poller.stop();
    }

    #[test]
    fn test_stop_is_prompt_with_long_interval() {
        let calls = Arc::new(AtomicUsize::new(0));
        let poller = StatusPoller::start(
            CountingProbe {
                calls: calls.clone(),
            },
            Duration::from_secs(3600),
        );
        wait_for(|| calls.load(Ordering::SeqCst) >= 1);

        let started = Instant::now();
        poller.stop();
        assert!(started.elapsed() < Duration::from_secs(5));

        let after_stop = calls.load(Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(calls.load(Ordering::SeqCst), after_stop);
    }

    #[test]
    fn test_file_probe_reports_maintenance() {
        let temp = TempDir::new().unwrap();
        let flag = temp.path().join("maintenance");
        let mut probe = FileMaintenanceProbe::new(flag.clone());

        assert_eq!(probe.check(), ServiceStatus::Available);
        std::fs::write(&flag, "").unwrap();
        assert_eq!(probe.check(), ServiceStatus::Maintenance);
    }

    #[test]
    fn test_latest_reports_file_status() {
        let temp = TempDir::new().unwrap();
        let flag = temp.path().join("maintenance");
        std::fs::write(&flag, "").unwrap();

        let poller = StatusPoller::start(FileMaintenanceProbe::new(flag), Duration::from_secs(3600));
        let mut seen = None;
        wait_for(|| {
            seen = poller.latest();
            seen.is_some()
        });
        assert_eq!(seen, Some(ServiceStatus::Maintenance));
    }

    /// Alternates for the first 50 checks, then settles on Available
    struct Flapping {
        calls: Arc<AtomicUsize>,
    }

    impl StatusProbe for Flapping {
        fn check(&mut self) -> ServiceStatus {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < 50 && call % 2 == 1 {
                ServiceStatus::Maintenance
            } else {
                ServiceStatus::Available
            }
        }
    }

    #[test]
    fn test_idle_reader_sees_at_most_one_pending_status() {
        let calls = Arc::new(AtomicUsize::new(0));
        let poller = StatusPoller::start(
            Flapping {
                calls: calls.clone(),
            },
            Duration::from_millis(1),
        );
        wait_for(|| calls.load(Ordering::SeqCst) >= 60);

        assert_eq!(poller.latest(), Some(ServiceStatus::Available));
        assert_eq!(poller.latest(), None);
        poller.stop();
    }

    #[test]
    fn test_unchanged_status_is_reported_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let poller = StatusPoller::start(
            CountingProbe {
                calls: calls.clone(),
            },
            Duration::from_millis(1),
        );
        wait_for(|| calls.load(Ordering::SeqCst) >= 2);
        assert_eq!(poller.latest(), Some(ServiceStatus::Available));

        let seen = calls.load(Ordering::SeqCst);
        wait_for(|| calls.load(Ordering::SeqCst) >= seen + 5);
        assert_eq!(poller.latest(), None);
        poller.stop();
    }
}
