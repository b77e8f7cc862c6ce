//! # Gatehouse Models
//!
//! Data types the request pipeline reasons about:
//!
//! - [`ids`]: Strongly-typed user identifier
//! - [`users`]: The identity record (locale, time zone, ban and admin flags)
//! - [`locale`]: Locales, the available-locales set, and time zone identifiers
//!
//! # Example
//!
//! ```ignore
//! use gatehouse_models::{AvailableLocales, TimeZoneId};
//!
//! let available = AvailableLocales::new(["en", "fr"]);
//! assert!(available.get("fr").is_some());
//! assert!(available.get("xx").is_none());
//!
//! let zone = TimeZoneId::new("Europe/Paris");
//! ```

pub mod ids;
pub mod locale;
pub mod users;

pub use ids::UserId;
pub use locale::{AvailableLocales, Locale, TimeZoneId, primary_subtag};
pub use users::{User, UserSummary};
