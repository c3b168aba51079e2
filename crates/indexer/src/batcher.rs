//! Document batching for bulk publishing

/// Accumulates documents up to a fixed batch size
pub struct DocumentBatcher<T> {
    batch: Vec<T>,
    batch_size: usize,
}

impl<T> DocumentBatcher<T> {
    /// Create a new batcher
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch: Vec::with_capacity(batch_size),
            batch_size,
        }
    }

    /// Add a document to the batch
    ///
    /// Returns Some(batch) once the batch is full and ready to publish
    pub fn push(&mut self, item: T) -> Option<Vec<T>> {
        self.batch.push(item);
        if self.batch.len() >= self.batch_size {
            Some(std::mem::take(&mut self.batch))
        } else {
            None
        }
    }

    /// Flush the current batch, returning all accumulated documents
    pub fn flush(&mut self) -> Vec<T> {
        std::mem::take(&mut self.batch)
    }

    /// Check if the batch is empty
    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }
}
