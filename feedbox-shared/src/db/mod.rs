/// Database layer for Feedbox
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management with health checks
/// - `migrations`: idempotent schema setup
///
/// Row types and their SQL live in the `models` module at crate root level;
/// validated, transactional access goes through `storage`.

pub mod migrations;
pub mod pool;
