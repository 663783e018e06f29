//! Pure blog operations: validation and pagination.

use crate::validation::{is_blank, FieldError, ValidationErrors};

/// Default page size for blog listings.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Upper bound on the page size a client may request.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Checks that title and content are both present.
///
/// Whitespace-only values count as missing.
pub fn validate_blog(title: &str, content: &str) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();
    if is_blank(title) {
        errors.push(FieldError::body("title", "Title is required"));
    }
    if is_blank(content) {
        errors.push(FieldError::body("content", "Content is required"));
    }
    ValidationErrors::check(errors)
}

/// Resolved pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
}

impl Pagination {
    /// Resolves raw query values. Missing or zero values fall back to
    /// page 1 and [`DEFAULT_PAGE_SIZE`]; the limit is capped at
    /// [`MAX_PAGE_SIZE`].
    pub fn from_query(page: Option<u64>, limit: Option<u64>) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(1);
        let limit = limit
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);
        Self { page, limit }
    }

    /// Number of documents to skip.
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Total number of pages for `total` documents.
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::from_query(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_blog_accepts_filled_fields() {
        assert!(validate_blog("Title", "Content").is_ok());
    }

    #[test]
    fn test_validate_blog_rejects_blank_title() {
        let err = validate_blog("   ", "Content").unwrap_err();

        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].msg, "Title is required");
        assert_eq!(err.errors[0].path, "title");
    }

    #[test]
    fn test_validate_blog_reports_both_fields() {
        let err = validate_blog("", "").unwrap_err();

        let paths: Vec<&str> = err.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["title", "content"]);
    }

    #[test]
    fn test_pagination_defaults() {
        let p = Pagination::from_query(None, None);

        assert_eq!(p.page, 1);
        assert_eq!(p.limit, 10);
        assert_eq!(p.skip(), 0);
    }

    #[test]
    fn test_pagination_zero_falls_back() {
        let p = Pagination::from_query(Some(0), Some(0));

        assert_eq!(p, Pagination::default());
    }

    #[test]
    fn test_pagination_caps_limit() {
        let p = Pagination::from_query(Some(2), Some(1_000));

        assert_eq!(p.limit, MAX_PAGE_SIZE);
        assert_eq!(p.skip(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_pagination_skip() {
        let p = Pagination::from_query(Some(3), Some(5));

        assert_eq!(p.skip(), 10);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let p = Pagination::from_query(None, Some(10));

        assert_eq!(p.total_pages(0), 0);
        assert_eq!(p.total_pages(10), 1);
        assert_eq!(p.total_pages(11), 2);
    }
}
