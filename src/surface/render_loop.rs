//! Dedicated render thread with a cooperative stop flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::error::GridError;

/// Owns at most one render thread at a time.
///
/// The thread calls the frame closure in a loop, checking the running flag
/// before every frame.  `stop` clears the flag and joins, so once it returns
/// no frame is in progress.
#[derive(Debug)]
pub struct RenderLoop {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    frame_interval: Duration,
}

impl RenderLoop {
    /// `frame_interval` is slept after each frame; zero renders back to back.
    pub fn new(frame_interval: Duration) -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
            frame_interval,
        }
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Applies from the next `start`.
    pub fn set_frame_interval(&mut self, interval: Duration) {
        self.frame_interval = interval;
    }

    /// `true` while a render thread is alive and has not been told to stop.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
            && self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Spawn the render thread.  Does nothing if one is already running; a
    /// thread that died on its own is reaped and replaced.
    pub fn start<F>(&mut self, mut frame: F) -> Result<(), GridError>
    where
        F: FnMut() + Send + 'static,
    {
        if self.is_running() {
            tracing::debug!("render loop already running");
            return Ok(());
        }
        if let Some(stale) = self.handle.take() {
            if stale.join().is_err() {
                tracing::warn!("previous render thread had panicked; respawning");
            }
        }

        // Fresh flag per thread so a stale thread can never observe a restart.
        let running = Arc::new(AtomicBool::new(true));
        self.running = Arc::clone(&running);
        let interval = self.frame_interval;

        let handle = thread::Builder::new()
            .name("grid-render".into())
            .spawn(move || {
                tracing::debug!(?interval, "render thread started");
                let mut frames: u64 = 0;
                while running.load(Ordering::Acquire) {
                    frame();
                    frames = frames.wrapping_add(1);
                    if !interval.is_zero() {
                        thread::sleep(interval);
                    }
                }
                tracing::debug!(frames, "render thread leaving loop");
            })
            .map_err(|e| {
                self.running.store(false, Ordering::Release);
                GridError::SpawnRenderThread(e)
            })?;

        self.handle = Some(handle);
        Ok(())
    }

    /// Clear the running flag and block until the thread has exited.
    /// Stopping an idle loop is a no-op.
    pub fn stop(&mut self) -> Result<(), GridError> {
        self.running.store(false, Ordering::Release);
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        // `join` is not interruptible, so a single call always completes.
        handle.join().map_err(|_| GridError::RenderThreadPanicked)?;
        tracing::info!("render thread terminated");
        Ok(())
    }
}

impl Drop for RenderLoop {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            tracing::warn!("render loop dropped: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU64;

    fn counting_frame() -> (Arc<AtomicU64>, impl FnMut() + Send + 'static) {
        let count = Arc::new(AtomicU64::new(0));
        let c = Arc::clone(&count);
        (count, move || {
            c.fetch_add(1, Ordering::Relaxed);
        })
    }

    fn wait_until(mut cond: impl FnMut() -> bool) -> bool {
        for _ in 0..500 {
            if cond() {
                return true;
            }
            thread::sleep(Duration::from_millis(2));
        }
        false
    }

    #[test]
    fn start_renders_and_stop_joins() {
        let mut lp = RenderLoop::new(Duration::from_millis(1));
        let (count, frame) = counting_frame();
        lp.start(frame).unwrap();
        assert!(lp.is_running());
        assert!(wait_until(|| count.load(Ordering::Relaxed) >= 3));

        lp.stop().unwrap();
        assert!(!lp.is_running());
        let after_stop = count.load(Ordering::Relaxed);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(count.load(Ordering::Relaxed), after_stop);
    }

    #[test]
    fn second_start_keeps_first_thread() {
        let mut lp = RenderLoop::new(Duration::from_millis(1));
        let (first, frame) = counting_frame();
        lp.start(frame).unwrap();
        let (second, frame) = counting_frame();
        lp.start(frame).unwrap();
        assert!(wait_until(|| first.load(Ordering::Relaxed) >= 2));
        lp.stop().unwrap();
        assert_eq!(second.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn restart_after_stop() {
        let mut lp = RenderLoop::new(Duration::ZERO);
        let (_, frame) = counting_frame();
        lp.start(frame).unwrap();
        lp.stop().unwrap();

        let (count, frame) = counting_frame();
        lp.start(frame).unwrap();
        assert!(wait_until(|| count.load(Ordering::Relaxed) > 0));
        lp.stop().unwrap();
    }

    #[test]
    fn stop_when_idle_is_noop() {
        let mut lp = RenderLoop::new(Duration::ZERO);
        lp.stop().unwrap();
        lp.stop().unwrap();
        assert!(!lp.is_running());
    }

    #[test]
    fn panicking_frame_is_reported_on_stop() {
        let mut lp = RenderLoop::new(Duration::ZERO);
        lp.start(|| panic!("frame failed")).unwrap();
        let mut lp_done = false;
        for _ in 0..500 {
            if !lp.is_running() {
                lp_done = true;
                break;
            }
            thread::sleep(Duration::from_millis(2));
        }
        assert!(lp_done);
        assert!(matches!(lp.stop(), Err(GridError::RenderThreadPanicked)));
    }
}
