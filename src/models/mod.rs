//! Data models for ShareIt

pub mod booking;
pub mod comment;
pub mod item;
pub mod item_request;
pub mod user;

use serde::{Deserialize, Serialize};
use utoipa::IntoParams;
use validator::ValidationError;

use crate::error::{AppError, AppResult};

// Re-export commonly used types
pub use booking::{Booking, BookingDetails, BookingState, BookingStatus};
pub use comment::{Comment, CommentDetails};
pub use item::{Item, ItemDetails, ItemShort};
pub use item_request::{ItemRequest, ItemRequestDetails};
pub use user::{User, UserShort};

pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Row window of a paginated listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: i64,
    pub limit: i64,
}

impl Page {
    pub fn new(from: Option<i64>, size: Option<i64>) -> AppResult<Self> {
        let offset = from.unwrap_or(0);
        let limit = size.unwrap_or(DEFAULT_PAGE_SIZE);

        if offset < 0 {
            return Err(AppError::Validation(format!(
                "from must not be negative, got {}",
                offset
            )));
        }
        if limit < 1 {
            return Err(AppError::Validation(format!(
                "size must be positive, got {}",
                limit
            )));
        }

        Ok(Self { offset, limit })
    }

    /// Apply the window to an already ordered in-memory listing
    pub fn slice<T>(&self, rows: Vec<T>) -> Vec<T> {
        let skip = usize::try_from(self.offset).unwrap_or(usize::MAX);
        let take = usize::try_from(self.limit).unwrap_or(usize::MAX);
        rows.into_iter().skip(skip).take(take).collect()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// `from`/`size` query parameters
#[derive(Debug, Default, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Offset of the first row (default: 0)
    pub from: Option<i64>,
    /// Maximum number of rows (default: 10)
    pub size: Option<i64>,
}

impl PageQuery {
    pub fn page(&self) -> AppResult<Page> {
        Page::new(self.from, self.size)
    }
}

/// Rejects empty or whitespace-only text
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}
