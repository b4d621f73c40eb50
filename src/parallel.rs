//! Work distribution across the worker pool

use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use scoped_threadpool::Pool;

/// Hands out consecutive index ranges to whichever worker asks next.
pub struct Dispenser {
    index: AtomicUsize,
    len: usize,
    chunk_size: usize,
}

impl Dispenser {
    pub fn new(len: usize, chunk_size: usize) -> Dispenser {
        Dispenser {
            index: AtomicUsize::new(0),
            len,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Claims the next chunk, returning its sequence number and index range
    pub fn next(&self) -> Option<(usize, Range<usize>)> {
        let start = self.index.fetch_add(self.chunk_size, Ordering::Relaxed);

        if start < self.len {
            let end = start + self.chunk_size;
            let end = if end < self.len { end } else { self.len };

            Some((start / self.chunk_size, start..end))
        } else {
            None
        }
    }
}

/// Runs `work` for every index in `0..len` on all threads of the pool, where each call may push
/// any number of results into the provided buffer.
///
/// Every worker collects its results locally and appends them to a shared list only once it runs
/// out of chunks. Results are returned in index order regardless of which worker produced them.
/// The pool scope is a full barrier: all work has finished when this returns.
pub fn gather<T, F>(pool: &mut Pool, len: usize, chunk_size: usize, work: F) -> Vec<T>
    where T: Send, F: Fn(usize, &mut Vec<T>) + Sync {
    if len == 0 {
        return Vec::new();
    }

    let dispenser = Dispenser::new(len, chunk_size);
    let gathered: Mutex<Vec<(usize, Vec<T>)>> = Mutex::new(Vec::new());

    let threads = pool.thread_count();

    {
        let dispenser = &dispenser;
        let gathered = &gathered;
        let work = &work;

        pool.scoped(|scope| {
            for _ in 0..threads {
                scope.execute(move || {
                    let mut local = Vec::new();

                    while let Some((chunk, range)) = dispenser.next() {
                        let mut results = Vec::new();

                        for i in range {
                            work(i, &mut results);
                        }

                        local.push((chunk, results));
                    }

                    gathered.lock().append(&mut local);
                });
            }
        });
    }

    let mut chunks = gathered.into_inner();

    chunks.sort_unstable_by_key(|&(chunk, _)| chunk);

    chunks.into_iter().flat_map(|(_, results)| results).collect()
}

/// Runs `work` for every index in `0..len` on all threads of the pool, returning once all are done.
pub fn dispatch<F>(pool: &mut Pool, len: usize, chunk_size: usize, work: F) where F: Fn(usize) + Sync {
    if len == 0 {
        return;
    }

    let dispenser = Dispenser::new(len, chunk_size);

    let threads = pool.thread_count();

    let dispenser = &dispenser;
    let work = &work;

    pool.scoped(|scope| {
        for _ in 0..threads {
            scope.execute(move || {
                while let Some((_, range)) = dispenser.next() {
                    for i in range {
                        work(i);
                    }
                }
            });
        }
    });
}
