//! Cancellable repeating timer backing the blink task.
//!
//! A [`Blinker`] runs its callback immediately on spawn and then once per
//! period on a dedicated worker thread. Cancellation signals the worker
//! through a channel and joins it, so once [`Blinker::cancel`] (or drop)
//! returns, no further tick can run. The channel wait doubles as the period
//! sleep, so a cancel interrupts the wait instead of lingering for up to a
//! full period.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Handle to a running repeating task. Dropping it cancels the task.
pub struct Blinker {
    stop_tx: mpsc::Sender<()>,
    worker: Option<thread::JoinHandle<()>>,
}

impl Blinker {
    /// Start a worker that runs `tick` now and then every `period`.
    pub fn spawn<F>(period: Duration, mut tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let worker = thread::spawn(move || {
            loop {
                // A cancel that lands before the tick suppresses it, so a
                // superseded task never fires even once.
                match stop_rx.try_recv() {
                    Err(mpsc::TryRecvError::Empty) => {}
                    Ok(()) | Err(mpsc::TryRecvError::Disconnected) => break,
                }
                tick();
                match stop_rx.recv_timeout(period) {
                    Err(mpsc::RecvTimeoutError::Timeout) => continue,
                    // Stop signal, or the handle was dropped without one.
                    Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
                }
            }
        });
        Blinker {
            stop_tx,
            worker: Some(worker),
        }
    }

    /// Stop the worker and wait for it to exit.
    ///
    /// A tick already in progress finishes first; no new tick starts after
    /// this returns.
    pub fn cancel(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let _ = self.stop_tx.send(());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for Blinker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_blinker(period: Duration) -> (Blinker, Arc<AtomicUsize>) {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);
        let blinker = Blinker::spawn(period, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (blinker, ticks)
    }

    #[test]
    fn first_tick_fires_immediately() {
        let (blinker, ticks) = counting_blinker(Duration::from_secs(60));
        thread::sleep(Duration::from_millis(50));
        assert_eq!(ticks.load(Ordering::SeqCst), 1);
        blinker.cancel();
    }

    #[test]
    fn ticks_repeat_every_period() {
        let (blinker, ticks) = counting_blinker(Duration::from_millis(20));
        thread::sleep(Duration::from_millis(200));
        blinker.cancel();
        // 1 immediate + at least a few periodic ticks, with slack for slow CI.
        assert!(ticks.load(Ordering::SeqCst) >= 3);
    }

    #[test]
    fn cancel_stops_ticks() {
        let (blinker, ticks) = counting_blinker(Duration::from_millis(10));
        thread::sleep(Duration::from_millis(50));
        blinker.cancel();
        let after_cancel = ticks.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(100));
        assert_eq!(ticks.load(Ordering::SeqCst), after_cancel);
    }

    #[test]
    fn drop_cancels_like_cancel() {
        let (blinker, ticks) = counting_blinker(Duration::from_millis(10));
        thread::sleep(Duration::from_millis(50));
        drop(blinker);
        let after_drop = ticks.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(100));
        assert_eq!(ticks.load(Ordering::SeqCst), after_drop);
    }

    #[test]
    fn cancel_interrupts_a_long_period() {
        let (blinker, ticks) = counting_blinker(Duration::from_secs(60));
        thread::sleep(Duration::from_millis(30));
        // Must return promptly rather than waiting out the 60s period.
        let start = std::time::Instant::now();
        blinker.cancel();
        assert!(start.elapsed() < Duration::from_secs(5));
        assert_eq!(ticks.load(Ordering::SeqCst), 1);
    }
}
