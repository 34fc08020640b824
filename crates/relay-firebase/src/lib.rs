//! # relay-firebase
//!
//! Firebase Authentication client for cashfree-relay.
//!
//! Implements [`relay_core::IdentityService`] over the Identity Toolkit REST
//! API, authenticating with a service account:
//!
//! 1. **ServiceAccountKey** - the credential bundle from the Firebase console
//! 2. **ServiceAccountTokenSource** - signs an RS256 assertion and trades it
//!    for an OAuth2 access token, reusing it until shortly before expiry
//! 3. **FirebaseIdentityService** - `accounts:lookup` by email
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use relay_firebase::FirebaseIdentityService;
//! use relay_core::IdentityService;
//!
//! let identity = FirebaseIdentityService::from_env()?;
//!
//! match identity.lookup_user_by_email("asha@example.com").await? {
//!     Some(user) => println!("registered as {}", user.uid),
//!     None => println!("not registered"),
//! }
//! ```

pub mod auth;
pub mod credentials;
pub mod token;

// Re-exports
pub use auth::FirebaseIdentityService;
pub use credentials::ServiceAccountKey;
pub use token::{AccessToken, ServiceAccountTokenSource};
