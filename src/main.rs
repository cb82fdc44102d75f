#![feature(proc_macro_hygiene, decl_macro)]

#[macro_use]
extern crate rocket;
#[macro_use]
extern crate rocket_contrib;

use diesel::r2d2::ConnectionManager;
use quill_models::{
    db_conn::{DbPool, PragmaForeignKey},
    Connection, CONFIG,
};

mod routes;

/// Initializes a database pool.
fn init_pool() -> Option<DbPool> {
    let manager = ConnectionManager::<Connection>::new(CONFIG.database_url.as_str());
    let mut builder = DbPool::builder().connection_customizer(Box::new(PragmaForeignKey));
    if let Some(max_size) = CONFIG.db_max_size {
        builder = builder.max_size(max_size);
    }
    if let Some(min_idle) = CONFIG.db_min_idle {
        builder = builder.min_idle(Some(min_idle));
    }
    builder.build(manager).ok()
}

fn main() {
    tracing_subscriber::fmt::init();

    match dotenv::dotenv() {
        Ok(path) => tracing::info!("Configuration read from {}", path.display()),
        Err(ref e) if e.not_found() => tracing::warn!("no .env was found"),
        e => e.map(|_| ()).unwrap(),
    }

    let dbpool = init_pool().expect("main: database pool initialization error");

    let rocket_config = CONFIG
        .rocket
        .clone()
        .expect("main: error while reading Rocket configuration");

    tracing::info!("Starting Quill on {}", CONFIG.base_url);

    rocket::custom(rocket_config)
        .mount(
            "/api/v1",
            routes![
                routes::session::create,
                routes::session::delete,
                routes::users::create,
                routes::users::details,
                routes::users::follow,
                routes::users::unfollow,
                routes::posts::list,
                routes::posts::details,
                routes::posts::create,
                routes::comments::create,
                routes::timelines::feed,
            ],
        )
        .register(catchers![
            routes::errors::bad_request,
            routes::errors::unauthorized,
            routes::errors::not_found,
            routes::errors::unprocessable_entity,
            routes::errors::server_error,
        ])
        .manage(dbpool)
        .launch();
}
