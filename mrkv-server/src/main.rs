mod routes;

use std::env;
use std::path::PathBuf;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use log::info;

use routes::SharedData;

/// Bind address used when `MRKV_BIND` is not set.
const DEFAULT_BIND: &str = "127.0.0.1:5000";

/// Corpus directory used when `MRKV_DATA_DIR` is not set.
const DEFAULT_DATA_DIR: &str = "./data";

/// Main entry point for the server.
///
/// Starts with an empty corpus shared by every worker. Corpus files are
/// loaded on demand through `/v1/load_models`.
///
/// # Notes
/// - `MRKV_BIND` overrides the bind address (default 127.0.0.1:5000).
/// - `MRKV_DATA_DIR` overrides the corpus directory (default ./data).
/// - `RUST_LOG` controls log verbosity.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let bind = env::var("MRKV_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_owned());
	let data_dir = PathBuf::from(env::var("MRKV_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_owned()));

	let shared_data = SharedData::new(data_dir).map_err(std::io::Error::other)?;
	let shared_data = web::Data::new(shared_data);

	info!("listening on {bind}, corpora in {}", shared_data.data_dir.display());
	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_data.clone())
			.configure(routes::configure)
	})
		.bind(bind)?
		.run()
		.await
}
