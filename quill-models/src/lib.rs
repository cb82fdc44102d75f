#[macro_use]
extern crate diesel;
#[macro_use]
extern crate diesel_migrations;
#[macro_use]
extern crate lazy_static;

use diesel::result::DatabaseErrorKind;

#[cfg(all(feature = "postgres", not(feature = "sqlite")))]
pub type Connection = diesel::PgConnection;

#[cfg(all(feature = "sqlite", not(feature = "postgres")))]
pub type Connection = diesel::SqliteConnection;

/// All the possible errors that can be encountered in this crate.
#[derive(Debug)]
pub enum Error {
    Conflict,
    Db(diesel::result::Error),
    DbPool(diesel::r2d2::PoolError),
    Hash(bcrypt::BcryptError),
    InvalidValue,
    NotFound,
    Unauthorized,
}

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Error::NotFound,
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                Error::Conflict
            }
            _ => Error::Db(err),
        }
    }
}

impl From<diesel::r2d2::PoolError> for Error {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        Error::DbPool(err)
    }
}

impl From<bcrypt::BcryptError> for Error {
    fn from(err: bcrypt::BcryptError) -> Self {
        Error::Hash(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Adds a function to a model, that returns the first
/// matching row for a given list of columns.
///
/// Usage: `find_by!(model_table, name_of_the_function, column1 as String, column2 as i32);`
macro_rules! find_by {
    ($table:ident, $fn:ident, $($col:ident as $type:ty),+) => {
        pub fn $fn(conn: &crate::Connection, $($col: $type),+) -> Result<Self> {
            $table::table
                $(.filter($table::$col.eq($col)))+
                .first(conn)
                .map_err(Error::from)
        }
    };
}

/// List all rows of a model, with field-based filtering.
///
/// Usage: `list_by!(model_table, name_of_the_function, column1 as String);`
macro_rules! list_by {
    ($table:ident, $fn:ident, $($col:ident as $type:ty),+) => {
        pub fn $fn(conn: &crate::Connection, $($col: $type),+) -> Result<Vec<Self>> {
            $table::table
                $(.filter($table::$col.eq($col)))+
                .load::<Self>(conn)
                .map_err(Error::from)
        }
    };
}

/// Adds a function to a model to retrieve a row by its id
///
/// Usage: `get!(model_table);`
macro_rules! get {
    ($table:ident) => {
        pub fn get(conn: &crate::Connection, id: i32) -> Result<Self> {
            $table::table
                .filter($table::id.eq(id))
                .first(conn)
                .map_err(Error::from)
        }
    };
}

/// Adds a function to a model to insert a new row
///
/// Usage: `insert!(model_table, NewModelType);`
macro_rules! insert {
    ($table:ident, $from:ty) => {
        last!($table);
        pub fn insert(conn: &crate::Connection, new: $from) -> Result<Self> {
            diesel::insert_into($table::table)
                .values(new)
                .execute(conn)
                .map_err(Error::from)?;
            Self::last(conn)
        }
    };
}

/// Returns the most recent row of a model.
///
/// Usage: `last!(model_table);`
macro_rules! last {
    ($table:ident) => {
        pub fn last(conn: &crate::Connection) -> Result<Self> {
            $table::table
                .order_by($table::id.desc())
                .first(conn)
                .map_err(Error::from)
        }
    };
}

lazy_static! {
    pub static ref CONFIG: config::Config = config::Config::default();
}

pub mod comments;
pub mod config;
pub mod db_conn;
pub mod follows;
pub mod migrations;
pub mod posts;
pub mod safe_string;
pub mod schema;
pub mod users;

#[cfg(test)]
pub(crate) mod tests {
    use crate::{db_conn, migrations::run_pending, CONFIG};
    use diesel::r2d2::ConnectionManager;
    use std::sync::Once;

    static MIGRATED: Once = Once::new();

    lazy_static! {
        static ref DB_POOL: db_conn::DbPool = db_conn::DbPool::builder()
            .max_size(2)
            .connection_customizer(Box::new(db_conn::PragmaForeignKey))
            .build(ConnectionManager::new(CONFIG.database_url.as_str()))
            .expect("Couldn't build the test connection pool");
    }

    pub(crate) fn db() -> db_conn::DbConn {
        let conn = db_conn::DbConn(DB_POOL.get().expect("Couldn't get a test connection"));
        MIGRATED.call_once(|| {
            run_pending(&*conn).expect("Couldn't run migrations on the test database");
        });
        conn
    }
}
