use crate::error::{Result, ViewerError};

/// Position in an account's history, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageContext {
    pub page: u64,
    pub total_pages: u64,
    pub page_size: u64,
    pub operation_count: u64,
}

impl PageContext {
    pub fn new(page: u64, operation_count: u64, page_size: u64) -> Result<Self> {
        let total_pages = operation_count.div_ceil(page_size.max(1));
        if page < 1 || page > total_pages {
            return Err(ViewerError::InvalidPage);
        }
        Ok(Self {
            page,
            total_pages,
            page_size,
            operation_count,
        })
    }

    /// History indices covered by this page as `(newest, oldest)`, both
    /// inclusive.
    pub fn window(&self) -> (u64, u64) {
        let upper = self.operation_count - (self.page - 1) * self.page_size;
        let lower = upper.saturating_sub(self.page_size);
        (upper - 1, lower)
    }

    pub fn previous(&self) -> Option<u64> {
        (self.page > 1).then(|| self.page - 1)
    }

    pub fn next(&self) -> Option<u64> {
        (self.page < self.total_pages).then(|| self.page + 1)
    }
}
