//! The request pipeline and the extractors handlers use to read its results.
//!
//! # Modules
//!
//! - [`pipeline`]: The middleware every route runs behind
//! - [`session`]: Signed session cookie access
//! - [`identity`]: Memoized session-to-user resolution
//! - [`context`]: Per-request context and handler extractors
//! - [`gate`]: Ordered access checks (login, ban, admin)
//! - [`admin`]: Opt-in admin check as a route layer or extractor
//! - [`locale`]: Locale negotiation and `Accept-Language` matching
//! - [`scope`]: Task-local ambient locale and time zone
//! - [`flash`]: One-shot notices left by denials
//! - [`security_headers`]: Security response headers
//!
//! # Request Flow
//!
//! 1. The session cookie is read and the request context is created
//! 2. The access gate resolves the user and runs its stages in order
//! 3. The negotiated locale becomes current for the rest of the request
//! 4. For signed-in users, their time zone becomes current inside that
//! 5. The handler runs and reads the context through extractors
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::context::{CurrentUser, MaybeUser};
//! use crate::middleware::admin::RequireAdmin;
//!
//! async fn profile(CurrentUser(user): CurrentUser) -> impl IntoResponse {
//!     // Only reached by signed-in, non-banned users
//! }
//!
//! async fn settings(_admin: RequireAdmin, CurrentUser(user): CurrentUser) -> impl IntoResponse {
//!     // Non-admins are redirected home with a notice
//! }
//! ```

pub mod admin;
pub mod context;
pub mod flash;
pub mod gate;
pub mod identity;
pub mod locale;
pub mod pipeline;
pub mod scope;
pub mod security_headers;
pub mod session;
