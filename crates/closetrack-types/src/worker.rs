//! Worker pool. Runs synchronous jobs (headless-browser renders) on
//! dedicated threads so they never block the async runtime.

use flume::{Receiver, Sender};
use futures::channel::oneshot;
use std::{sync::Arc, thread};

use crate::prelude::*;

#[derive(Debug)]
pub struct WorkerPool {
	jobs: Sender<Box<dyn FnOnce() + Send>>,
}

impl WorkerPool {
	pub fn new(threads: usize) -> Self {
		let (jobs, rx) = flume::unbounded();
		let rx = Arc::new(rx);

		for _ in 0..threads.max(1) {
			let rx = Arc::clone(&rx);
			thread::spawn(move || worker_loop(&rx));
		}

		Self { jobs }
	}

	/// Submit a closure → returns a Future for the result
	pub fn run<F, T>(&self, f: F) -> impl std::future::Future<Output = CtResult<T>>
	where
		F: FnOnce() -> T + Send + 'static,
		T: Send + 'static,
	{
		let (res_tx, res_rx) = oneshot::channel();

		let job = Box::new(move || {
			let result = f();
			let _ignore = res_tx.send(result);
		});

		if self.jobs.send(job).is_err() {
			error!("Failed to send job to worker queue");
		}

		async move {
			res_rx.await.map_err(|_| {
				error!("Worker dropped result channel (task may have panicked)");
				Error::Internal("worker task failed".into())
			})
		}
	}

	/// Like `run`, but flattens `CtResult<CtResult<T>>` into `CtResult<T>`.
	/// Use when the closure itself returns `CtResult<T>`.
	pub fn try_run<F, T>(&self, f: F) -> impl std::future::Future<Output = CtResult<T>>
	where
		F: FnOnce() -> CtResult<T> + Send + 'static,
		T: Send + 'static,
	{
		let fut = self.run(f);
		async move { fut.await? }
	}
}

type JobQueue = Arc<Receiver<Box<dyn FnOnce() + Send>>>;

fn worker_loop(rx: &JobQueue) {
	while let Ok(job) = rx.recv() {
		if let Err(e) = std::panic::catch_unwind(std::panic::AssertUnwindSafe(job)) {
			error!("Worker thread caught panic: {:?}", e);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_run_returns_result() {
		let pool = WorkerPool::new(2);
		let value = pool.run(|| 40 + 2).await.unwrap();
		assert_eq!(value, 42);
	}

	#[tokio::test]
	async fn test_try_run_flattens_error() {
		let pool = WorkerPool::new(1);
		let res: CtResult<u32> =
			pool.try_run(|| Err(Error::RenderError("browser launch failed".into()))).await;
		assert!(matches!(res, Err(Error::RenderError(_))));
	}

	#[tokio::test]
	async fn test_panicking_job_reports_internal_error() {
		let pool = WorkerPool::new(1);
		let res: CtResult<()> = pool.run(|| panic!("boom")).await;
		assert!(matches!(res, Err(Error::Internal(_))));

		// Pool must survive the panic
		let value = pool.run(|| 7).await.unwrap();
		assert_eq!(value, 7);
	}
}

// vim: ts=4
