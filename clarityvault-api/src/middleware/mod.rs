/// HTTP middleware for the API server
///
/// Authentication lives in `clarityvault_shared::auth::middleware`; this
/// module holds the response hardening layers.

pub mod security;
