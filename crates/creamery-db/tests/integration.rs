use creamery_db::{create_pool, run_migrations, PoolSettings};

#[test]
fn provisioning_through_the_pool_works() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let db_path = dir.path().join("creamery.db");
    let db_path = db_path.to_str().expect("temp path should be utf-8");

    let pool = create_pool(db_path, PoolSettings::default()).expect("failed to create pool");

    {
        let conn = pool.get().expect("failed to get connection");
        let applied = run_migrations(&conn).expect("failed to run migrations");
        assert_eq!(applied, 2);
    }

    // Seed rows must be visible from a different pooled connection.
    let conn = pool.get().expect("failed to get second connection");
    let rows: i32 = conn
        .query_row("SELECT COUNT(*) FROM flavors", [], |row| row.get(0))
        .expect("failed to count flavors");
    assert_eq!(rows, 6, "fresh database should hold exactly the seed rows");
}

#[test]
fn restart_does_not_reprovision() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let db_path = dir.path().join("creamery.db");
    let db_path = db_path.to_str().expect("temp path should be utf-8");

    let pool = create_pool(db_path, PoolSettings::default()).expect("failed to create pool");
    {
        let conn = pool.get().expect("failed to get connection");
        run_migrations(&conn).expect("first provisioning should succeed");
        conn.execute("DELETE FROM flavors WHERE name = 'Coffee'", [])
            .expect("failed to delete a row");
    }
    drop(pool);

    // Simulate a process restart against the same file.
    let pool = create_pool(db_path, PoolSettings::default()).expect("failed to reopen pool");
    let conn = pool.get().expect("failed to get connection");
    let applied = run_migrations(&conn).expect("second provisioning should succeed");
    assert_eq!(applied, 0, "nothing new to apply on restart");

    let rows: i32 = conn
        .query_row("SELECT COUNT(*) FROM flavors", [], |row| row.get(0))
        .expect("failed to count flavors");
    assert_eq!(rows, 5, "operator changes must survive a restart");
}
