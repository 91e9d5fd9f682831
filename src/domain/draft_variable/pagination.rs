//! Page parameters and paged results for draft variable listings

use super::summary::DraftVariableSummary;
use crate::domain::DomainError;

pub const DEFAULT_PAGE: u32 = 1;
pub const MAX_PAGE: u32 = 100_000;
pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 100;

/// Validated page/limit pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    limit: u32,
}

impl Pagination {
    pub fn new(page: u32, limit: u32) -> Result<Self, DomainError> {
        if !(1..=MAX_PAGE).contains(&page) {
            return Err(DomainError::validation(format!(
                "page must be between 1 and {}, got {}",
                MAX_PAGE, page
            )));
        }

        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(DomainError::validation(format!(
                "limit must be between 1 and {}, got {}",
                MAX_LIMIT, limit
            )));
        }

        Ok(Self { page, limit })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.limit as usize
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// One page of variable summaries plus the total for the whole app
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariablePage {
    pub variables: Vec<DraftVariableSummary>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(Pagination::new(1, 1).is_ok());
        assert!(Pagination::new(MAX_PAGE, MAX_LIMIT).is_ok());
        assert!(Pagination::new(0, 20).is_err());
        assert!(Pagination::new(MAX_PAGE + 1, 20).is_err());
        assert!(Pagination::new(1, 0).is_err());
        assert!(Pagination::new(1, MAX_LIMIT + 1).is_err());
    }

    #[test]
    fn test_offset() {
        assert_eq!(Pagination::new(1, 20).unwrap().offset(), 0);
        assert_eq!(Pagination::new(3, 10).unwrap().offset(), 20);
    }

    #[test]
    fn test_default() {
        let pagination = Pagination::default();
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.limit(), 20);
    }
}
