/// API route handlers
///
/// - `health`: health check
/// - `users`: registration, login and profiles
/// - `files`: stored document CRUD under `/api/files`
/// - `processing`: AI document processing and video search
/// - `form`: multipart form reader shared by the POST handlers

pub mod files;
pub mod form;
pub mod health;
pub mod processing;
pub mod users;
