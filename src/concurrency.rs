use anyhow::{anyhow, bail};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;

type Job = Box<dyn FnOnce() + Send + 'static>;

struct Worker {
    id: usize,
    thread: thread::JoinHandle<()>,
}

impl Worker {
    fn new(id: usize, receiver: Arc<Mutex<Receiver<Job>>>) -> Worker {
        let thread = thread::spawn(move || {
            loop {
                let message = match receiver.lock() {
                    Ok(rx) => rx.recv(),
                    Err(_) => break,
                };
                match message {
                    Ok(job) => job(),
                    Err(_) => break,
                }
            }
            log::debug!("worker {} shutting down", id);
        });

        Worker { id, thread }
    }
}

pub struct ThreadPool {
    workers: Vec<Worker>,
    sender: Option<Sender<Job>>,
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        drop(self.sender.take());

        for worker in self.workers.drain(..) {
            if worker.thread.join().is_err() {
                log::error!("worker {} panicked", worker.id);
            }
        }
    }
}

impl ThreadPool {
    pub fn new(size: usize) -> anyhow::Result<Self> {
        if size == 0 {
            bail!("Thread pool needs at least one worker");
        }

        let (sender, receiver) = mpsc::channel();
        let receiver = Arc::new(Mutex::new(receiver));

        let mut workers = Vec::with_capacity(size);

        for id in 0..size {
            workers.push(Worker::new(id, Arc::clone(&receiver)));
        }
        log::debug!("started {} workers", size);

        Ok(ThreadPool {
            workers,
            sender: Some(sender),
        })
    }

    pub fn execute<F>(&self, f: F) -> anyhow::Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let job = Box::new(f) as Job;
        self.sender
            .as_ref()
            .ok_or_else(|| anyhow!("Thread pool is shut down"))?
            .send(job)
            .map_err(|_| anyhow!("All workers have stopped"))
    }
}
