//! Contiguous work partitioning for the data-parallel phases.

/// Length of each contiguous chunk when `len` items are split across
/// `workers` chunks. `workers == 0` uses one chunk per rayon pool thread.
///
/// Never returns zero, so the result is always a valid `par_chunks` size.
pub(crate) fn chunk_len(len: usize, workers: usize) -> usize {
    let workers = if workers == 0 {
        rayon::current_num_threads()
    } else {
        workers
    };
    len.div_ceil(workers.max(1)).max(1)
}
