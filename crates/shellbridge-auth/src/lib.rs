//! Authentication for a web front-end running inside a native mobile shell.
//!
//! The native host owns the login UI and the tokens. [`MobileAuthenticator`]
//! drives it through the correlated bridge channel and republishes login and
//! logout completion as application events, so the rest of the app reacts
//! the same way it would after a browser redirect.
//!
//! # Components
//!
//! - [`authenticator`] - the `Authenticator` and `CredentialSupplier` contracts
//! - [`mobile`] - the native-shell implementation of both
//! - [`request`] - outgoing API request options decorated with credentials

pub mod authenticator;
pub mod error;
pub mod mobile;
pub mod request;

pub use authenticator::{Authenticator, CredentialSupplier};
pub use error::{AuthError, Result};
pub use mobile::MobileAuthenticator;
pub use request::RequestOptions;
