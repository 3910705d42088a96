/// Schema setup
///
/// The schema lives in the `migrations/` directory at the workspace root and
/// is embedded at compile time. Every statement in it uses
/// `CREATE ... IF NOT EXISTS`, and sqlx records applied versions in
/// `_sqlx_migrations`, so running the setup on every startup is a no-op once
/// the schema exists.
///
/// # Example
///
/// ```no_run
/// use feedbox_shared::db::pool::{create_pool, DatabaseConfig};
/// use feedbox_shared::db::migrations::{run_migrations, get_migration_status};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pool = create_pool(&DatabaseConfig::default()).await?;
///
///     run_migrations(&pool).await?;
///
///     let status = get_migration_status(&pool).await?;
///     println!("Applied {} migrations", status.applied_migrations);
///     Ok(())
/// }
/// ```

use sqlx::{
    migrate::{MigrateDatabase, MigrateError, Migrator},
    postgres::{PgConnectOptions, PgConnection, PgPool},
    Connection, Executor, Postgres,
};
use std::str::FromStr;
use tracing::{debug, info, warn};

static MIGRATOR: Migrator = sqlx::migrate!("../migrations");

/// Migration status information
#[derive(Debug, Clone)]
pub struct MigrationStatus {
    /// Number of migrations that have been applied
    pub applied_migrations: usize,

    /// Latest applied migration version (timestamp)
    pub latest_version: Option<i64>,

    /// Whether every embedded migration has been applied
    pub is_up_to_date: bool,
}

/// Runs all pending database migrations
///
/// # Errors
///
/// Returns an error if a migration fails to execute or the database
/// connection is lost during migration.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    info!("Starting database migrations");

    match MIGRATOR.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}

/// Number of migrations embedded in this build
pub fn embedded_migrations() -> usize {
    MIGRATOR.iter().count()
}

/// Gets the current migration status
///
/// # Errors
///
/// Returns an error if the migrations table cannot be queried.
pub async fn get_migration_status(pool: &PgPool) -> Result<MigrationStatus, sqlx::Error> {
    debug!("Checking migration status");

    let table_exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = 'public'
            AND table_name = '_sqlx_migrations'
        )",
    )
    .fetch_one(pool)
    .await?;

    if !table_exists {
        debug!("Migrations table does not exist yet");
        return Ok(MigrationStatus {
            applied_migrations: 0,
            latest_version: None,
            is_up_to_date: false,
        });
    }

    let (count, latest_version): (i64, Option<i64>) = sqlx::query_as(
        "SELECT
            COUNT(*) as count,
            MAX(version) as latest_version
         FROM _sqlx_migrations
         WHERE success = true",
    )
    .fetch_one(pool)
    .await?;

    debug!(
        applied_migrations = count,
        latest_version = ?latest_version,
        "Migration status retrieved"
    );

    let applied_migrations = count as usize;

    Ok(MigrationStatus {
        applied_migrations,
        latest_version,
        is_up_to_date: applied_migrations >= embedded_migrations(),
    })
}

/// Creates the database if it doesn't exist
///
/// Useful for development and testing. In production the database should
/// already exist.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    info!("Checking if database exists");

    if !Postgres::database_exists(database_url).await? {
        info!("Database does not exist, creating it");
        Postgres::create_database(database_url).await?;
        info!("Database created successfully");
    } else {
        debug!("Database already exists");
    }

    Ok(())
}

/// Drops the database (USE WITH CAUTION!)
///
/// Permanently deletes every table and row. Only meant for throwaway
/// development and test databases. Sessions still attached to the database
/// are terminated (`WITH (FORCE)`, PostgreSQL 13+), so a pool that has not
/// fully released its connections does not make the drop fail.
pub async fn drop_database(database_url: &str) -> Result<(), sqlx::Error> {
    let options = PgConnectOptions::from_str(database_url)?;
    let name = options
        .get_database()
        .map(str::to_owned)
        .ok_or_else(|| sqlx::Error::Configuration("database URL has no database name".into()))?;

    warn!(database = %name, "Dropping database");

    let mut conn = PgConnection::connect_with(&options.database("postgres")).await?;

    // Database names cannot be bind parameters, and DROP DATABASE must go
    // through the simple query protocol
    let statement = format!(
        r#"DROP DATABASE IF EXISTS "{}" WITH (FORCE)"#,
        name.replace('"', "\"\"")
    );
    conn.execute(statement.as_str()).await?;
    conn.close().await?;

    info!(database = %name, "Database dropped successfully");
    Ok(())
}
