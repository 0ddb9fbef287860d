/// Database models for ClarityVault
///
/// - `user`: registered accounts, keyed by email
/// - `stored_file`: uploaded documents and the upload policy
///
/// Each model carries its own queries as associated functions taking a
/// `&PgPool`; [`crate::store`] wraps them behind traits for the HTTP layer.

pub mod stored_file;
pub mod user;
