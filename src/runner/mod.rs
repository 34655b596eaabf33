//! Runners implement threading strategies for servers.
//!
//! A connection job suspends only on socket reads and writes and owns
//! its request/response lifecycle exclusively, so any of these
//! strategies preserves per-connection isolation.
use std::thread;

use log::error;

use threadpool::ThreadPool;

mod threadpool;

/// How connection jobs are scheduled.
pub enum Runner {
    /// Run each job inline on the accept thread.
    Inline,
    /// Spawn a new thread per job, joined on drop.
    ThreadPerJob(Vec<thread::JoinHandle<()>>),
    /// Queue jobs onto a fixed worker pool.
    Pool(ThreadPool),
}

impl Runner {
    /// Create a runner for the given number of threads.
    /// * 0: a new thread for each job (unbounded)
    /// * 1: run jobs on the accept thread
    /// * n: worker pool of n threads
    pub fn new(n_threads: usize) -> Self {
        match n_threads {
            0 => Self::ThreadPerJob(vec![]),
            1 => Self::Inline,
            n => Self::Pool(ThreadPool::new(n)),
        }
    }

    pub fn run<F>(&mut self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        match self {
            Self::Inline => f(),
            Self::ThreadPerJob(handles) => handles.push(thread::spawn(f)),
            Self::Pool(pool) => match pool.execute(f) {
                Ok(_) => (),
                Err(e) => error!("thread pool error: {}", e),
            },
        }
    }
}

impl Drop for Runner {
    fn drop(&mut self) {
        if let Self::ThreadPerJob(handles) = self {
            for handle in handles.drain(..) {
                match handle.join() {
                    Ok(_) => (),
                    Err(e) => error!("error joining thread: {:?}", e),
                }
            }
        }
    }
}
