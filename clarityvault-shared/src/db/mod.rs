/// Database plumbing
///
/// - `pool`: PostgreSQL connection pool and connectivity probe
/// - `migrations`: embedded schema migrations
///
/// Row types and their queries live in [`crate::models`]; the trait-based
/// repositories handed to the HTTP layer live in [`crate::store`].

pub mod migrations;
pub mod pool;
