use anyhow::{Context, Result};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
};

pub struct ThreadLoop {
    join_handle: Option<JoinHandle<()>>,
    running: Arc<AtomicBool>,
}

impl ThreadLoop {
    pub fn request_stop(&self) {
        self.running.store(false, Ordering::Relaxed)
    }

    /// Returns once the loop body has finished its last iteration.
    pub fn stop(mut self) {
        self.join();
    }

    fn join(&mut self) {
        self.request_stop();
        if let Some(handle) = self.join_handle.take() {
            handle.join().ok();
        }
    }
}

impl Drop for ThreadLoop {
    fn drop(&mut self) {
        self.join();
    }
}

pub fn spawn(name: &str, mut loop_body: impl FnMut() + Send + 'static) -> Result<ThreadLoop> {
    let running = Arc::new(AtomicBool::new(true));

    let join_handle = thread::Builder::new()
        .name(name.into())
        .spawn({
            let running = Arc::clone(&running);
            move || {
                while running.load(Ordering::Relaxed) {
                    loop_body()
                }
            }
        })
        .with_context(|| format!("Failed to spawn thread {name}"))?;

    Ok(ThreadLoop {
        join_handle: Some(join_handle),
        running,
    })
}
