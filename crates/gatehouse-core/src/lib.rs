//! # Gatehouse Core
//!
//! Foundational types shared by the Gatehouse crates:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`notice`]: One-shot user notices (flash messages) set by the gate
//!
//! # Example
//!
//! ```ignore
//! use gatehouse_core::{AppError, Notice};
//!
//! let error = AppError::not_found(anyhow::anyhow!("User not found"));
//! let notice = Notice::error("You need to sign in before continuing.");
//! let cookie_value = notice.encode();
//! ```

pub mod errors;
pub mod notice;

pub use errors::AppError;
pub use notice::{FLASH_COOKIE, Notice, NoticeLevel};
