//! SQL migrations, embedded at compile time so that binaries can set up
//! a database without carrying the migration files around.

#[cfg(all(feature = "postgres", not(feature = "sqlite")))]
embed_migrations!("../migrations/postgres");

#[cfg(all(feature = "sqlite", not(feature = "postgres")))]
embed_migrations!("../migrations/sqlite");

pub use self::embedded_migrations::{
    run as run_pending, run_with_output as run_pending_with_output,
};
