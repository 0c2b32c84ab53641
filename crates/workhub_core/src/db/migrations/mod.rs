//! Schema steps for the workhub store.
//!
//! # Invariants
//! - Step versions are strictly increasing, starting at 1.
//! - An upgrade applies every pending step or none of them.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_projects_tasks.sql"),
}];

/// Latest schema version known to this build.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Version currently recorded in the store.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

/// Brings the store up to [`latest_version`].
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    upgrade(conn, MIGRATIONS)
}

fn upgrade(conn: &mut Connection, steps: &[Migration]) -> DbResult<()> {
    let found = schema_version(conn)?;
    let supported = steps.last().map_or(0, |step| step.version);
    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }

    let pending: Vec<&Migration> = steps.iter().filter(|step| step.version > found).collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in &pending {
        tx.execute_batch(step.sql)
            .and_then(|()| tx.pragma_update(None, "user_version", step.version))
            .map_err(|source| DbError::MigrationFailed {
                version: step.version,
                source,
            })?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from={found} to={supported} steps={}",
        pending.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{schema_version, upgrade, Migration};
    use crate::db::DbError;
    use rusqlite::Connection;

    const STEPS: &[Migration] = &[
        Migration {
            version: 1,
            sql: "CREATE TABLE projects (uuid TEXT PRIMARY KEY);",
        },
        Migration {
            version: 2,
            sql: "ALTER TABLE projects ADD COLUMN name TEXT;",
        },
    ];

    fn table_count(conn: &Connection) -> i64 {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table';",
            [],
            |row| row.get(0),
        )
        .unwrap()
    }

    #[test]
    fn upgrade_applies_only_pending_steps() {
        let mut conn = Connection::open_in_memory().unwrap();
        upgrade(&mut conn, &STEPS[..1]).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), 1);

        upgrade(&mut conn, STEPS).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), 2);
        upgrade(&mut conn, STEPS).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), 2);
    }

    #[test]
    fn failing_step_rolls_back_the_whole_upgrade() {
        let broken = [
            STEPS[0],
            Migration {
                version: 2,
                sql: "ALTER TABLE missing ADD COLUMN name TEXT;",
            },
        ];
        let mut conn = Connection::open_in_memory().unwrap();

        match upgrade(&mut conn, &broken).unwrap_err() {
            DbError::MigrationFailed { version, .. } => assert_eq!(version, 2),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(schema_version(&conn).unwrap(), 0);
        assert_eq!(table_count(&conn), 0);
    }
}
