//! Cancellable scheduled tasks behind the cosmetic timers.
//!
//! Every spawn returns a [`TaskHandle`]; dropping it aborts the task. Views keep
//! their handles in [`ViewTasks`] so that leaving a screen stops its timers.

use std::{future::Future, time::Duration};

use rand::{Rng, SeedableRng, rngs::StdRng};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{config::TimingCfg, events::AppEvent};

/// Owns a spawned task and aborts it on drop.
#[derive(Debug)]
pub struct TaskHandle {
    name: &'static str,
    inner: JoinHandle<()>,
}

impl TaskHandle {
    /// Spawn `fut` on the current runtime.
    pub fn spawn<F>(name: &'static str, fut: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::debug!("task start: {name}");
        Self {
            name,
            inner: tokio::spawn(fut),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        if !self.inner.is_finished() {
            tracing::debug!("task cancelled: {}", self.name);
        }
        self.inner.abort();
    }
}

/// Tasks owned by the currently visible view.
#[derive(Debug, Default)]
pub struct ViewTasks {
    handles: Vec<TaskHandle>,
}

impl ViewTasks {
    pub fn push(&mut self, handle: TaskHandle) {
        // Finished timers have nothing left to cancel.
        self.handles.retain(|h| !h.is_finished());
        self.handles.push(handle);
    }

    /// Abort everything; called on view teardown.
    pub fn cancel_all(&mut self) {
        self.handles.clear();
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// Send `event` once after `delay`.
pub fn spawn_after(
    name: &'static str,
    delay: Duration,
    event: AppEvent,
    tx: mpsc::Sender<AppEvent>,
) -> TaskHandle {
    TaskHandle::spawn(name, async move {
        tokio::time::sleep(delay).await;
        // The loop may already be gone on shutdown.
        let _ = tx.send(event).await;
    })
}

/// Simulate a download: after a random stagger, add a random step on a fixed
/// random interval until 100 is reached. Every tick is reported through
/// `make_event`.
pub fn spawn_progress<F>(
    name: &'static str,
    timing: &TimingCfg,
    tx: mpsc::Sender<AppEvent>,
    make_event: F,
) -> TaskHandle
where
    F: Fn(f32) -> AppEvent + Send + 'static,
{
    let mut rng = StdRng::from_entropy();
    let stagger = Duration::from_millis(rng.gen_range(0..timing.sync_stagger_max_ms.max(1)));
    let tick = Duration::from_millis(
        timing.sync_tick_min_ms + rng.gen_range(0..timing.sync_tick_jitter_ms.max(1)),
    );
    let step_max = timing.sync_step_max.max(f32::EPSILON);

    TaskHandle::spawn(name, async move {
        tokio::time::sleep(stagger).await;
        let mut percent = 0.0_f32;
        loop {
            tokio::time::sleep(tick).await;
            percent = (percent + rng.gen_range(0.0..step_max)).min(100.0);
            if tx.send(make_event(percent)).await.is_err() {
                break;
            }
            if percent >= 100.0 {
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[tokio::test(start_paused = true)]
    async fn test_timer_fires_after_delay() {
        let (tx, mut rx) = mpsc::channel(4);
        let _h = spawn_after("splash", Duration::from_millis(2600), AppEvent::SplashElapsed, tx);
        let ev = rx.recv().await;
        assert!(matches!(ev, Some(AppEvent::SplashElapsed)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_cancels_timer() {
        let (tx, mut rx) = mpsc::channel(4);
        let h = spawn_after("splash", Duration::from_millis(2600), AppEvent::SplashElapsed, tx);
        drop(h);
        // The aborted task drops its sender, so the channel closes empty.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_view_teardown_cancels_every_task() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut tasks = ViewTasks::default();
        for _ in 0..3 {
            tasks.push(spawn_after(
                "gen",
                Duration::from_secs(2),
                AppEvent::GenerationFinished,
                tx.clone(),
            ));
        }
        drop(tx);
        assert_eq!(tasks.len(), 3);
        tasks.cancel_all();
        assert!(tasks.is_empty());
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_is_monotonic_and_ends_at_100() {
        let timing = Config::default().timing;
        let (tx, mut rx) = mpsc::channel(16);
        let _h = spawn_progress("sync", &timing, tx, |p| AppEvent::TemplateSync {
            template_id: "1".into(),
            percent: p,
        });

        let mut last = 0.0;
        let mut seen = 0;
        while let Some(ev) = rx.recv().await {
            let AppEvent::TemplateSync { percent, .. } = ev else {
                panic!("unexpected event");
            };
            assert!(percent >= last);
            last = percent;
            seen += 1;
        }
        assert_eq!(last, 100.0);
        // Each step is below 20, so at least five ticks are needed.
        assert!(seen >= 5);
    }
}
