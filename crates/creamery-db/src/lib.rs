//! Database layer for the Creamery service.
//!
//! Provides SQLite connection pooling (via `r2d2`), WAL-mode initialization,
//! and embedded SQL migrations. The `flavors` table and its seed rows are
//! created through versioned migrations managed by this crate.
//!
//! # Design decisions
//!
//! - **SQLite with WAL mode**: no external database process required; WAL
//!   allows concurrent readers with a single writer, which matches a small
//!   read-mostly CRUD service.
//! - **`r2d2` connection pool**: bounded connection reuse instead of one
//!   long-lived handle shared by every request.
//! - **Embedded migrations**: SQL files are compiled into the binary via
//!   `include_str!` and applied at most once each, so startup is idempotent
//!   against a persistent store. Nothing is ever dropped on boot.

mod migrations;
mod pool;

pub use migrations::{run_migrations, MigrationError};
pub use pool::{create_pool, DbPool, PoolError, PoolSettings};
