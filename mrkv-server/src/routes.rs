use std::path::{Component, Path, PathBuf};

use actix_web::{HttpResponse, Responder, get, put, web};
use log::{info, warn};
use serde::Deserialize;

use mrkv_core::io::list_stems;
use mrkv_core::{Corpus, CorpusConfig, CorpusError, GenerateOptions, Pattern, SharedCorpus};

/// Corpus files are `<name>.txt` in the data directory.
const CORPUS_EXTENSION: &str = "txt";

pub struct SharedData {
	pub corpus: SharedCorpus,
	pub data_dir: PathBuf,
}

impl SharedData {
	pub fn new(data_dir: PathBuf) -> Result<Self, CorpusError> {
		Ok(Self {
			corpus: SharedCorpus::new(Corpus::new(CorpusConfig::default())?),
			data_dir,
		})
	}
}

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	start: Option<String>,
	max_length: Option<usize>,
	terminator: Option<String>, // -> none, literal:<str> or regex:<pattern>
}

#[derive(Deserialize)]
struct ModelQuery {
	names: Option<String>,
	state_length: Option<usize>,
}

impl GenerateParams {
	/// Builds generation options, rejecting malformed values.
	fn options(&self) -> Result<GenerateOptions, CorpusError> {
		let mut options = GenerateOptions::default().with_max_length(self.max_length)?;

		if let Some(start) = self.start.as_deref().filter(|s| !s.trim().is_empty()) {
			options = options.with_start(start);
		}

		let terminator = match self.terminator.as_deref() {
			None => return Ok(options),
			Some(s) if s.eq_ignore_ascii_case("none") => None,
			Some(s) if s.starts_with("literal:") => Some(Pattern::literal(&s["literal:".len()..])?),
			Some(s) if s.starts_with("regex:") => Some(Pattern::regex(&s["regex:".len()..])?),
			Some(_) => {
				return Err(CorpusError::InvalidArgument(
					"Terminator must start with 'literal:' or 'regex:' or be 'none'".into(),
				));
			}
		};
		Ok(options.with_terminator(terminator))
	}
}

fn error_response(e: CorpusError) -> HttpResponse {
	if e.is_invalid_argument() {
		HttpResponse::BadRequest().body(e.to_string())
	} else {
		warn!("request failed: {e}");
		HttpResponse::InternalServerError().body(e.to_string())
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates one sentence from the shared corpus. An unknown start
/// phrase gives an empty body.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<SharedData>, query: web::Query<GenerateParams>) -> impl Responder {
	let options = match query.options() {
		Ok(o) => o,
		Err(e) => return error_response(e),
	};

	match data.corpus.generate(&options) {
		Ok(result) => HttpResponse::Ok().body(result),
		Err(e) => error_response(e),
	}
}

#[get("/v1/models")]
async fn get_models(data: web::Data<SharedData>) -> impl Responder {
	match list_stems(&data.data_dir, CORPUS_EXTENSION) {
		Ok(names) => HttpResponse::Ok().body(names.join("\n")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list models"),
	}
}

#[get("/v1/loaded_models")]
async fn get_loaded_models(data: web::Data<SharedData>) -> impl Responder {
	match data.corpus.sources() {
		Ok(names) => HttpResponse::Ok().body(names.join("\n")),
		Err(e) => error_response(e),
	}
}

#[get("/v1/size")]
async fn get_size(data: web::Data<SharedData>) -> impl Responder {
	match data.corpus.size() {
		Ok(size) => HttpResponse::Ok().body(size.to_string()),
		Err(e) => error_response(e),
	}
}

#[get("/v1/snapshot")]
async fn get_snapshot(data: web::Data<SharedData>) -> impl Responder {
	match data.corpus.snapshot() {
		Ok(snapshot) => HttpResponse::Ok().json(snapshot),
		Err(e) => error_response(e),
	}
}

/// A corpus name is a single plain file name inside the data directory.
fn is_plain_name(name: &str) -> bool {
	let mut components = Path::new(name).components();
	matches!((components.next(), components.next()), (Some(Component::Normal(_)), None))
}

/// Opens and merges the named corpus files, in order.
fn open_corpora(data_dir: &Path, names: &[String], config: CorpusConfig) -> Result<Corpus, String> {
	let mut corpus = Corpus::new(config.clone()).map_err(|e| e.to_string())?;
	for name in names {
		let model_path = data_dir.join(format!("{name}.{CORPUS_EXTENSION}"));
		let partial =
			Corpus::open_cached(&model_path, config.clone()).map_err(|e| format!("Failed to load model {name}: {e}"))?;
		corpus.merge(&partial).map_err(|e| format!("Failed to merge model: {e}"))?;
	}
	Ok(corpus)
}

/// HTTP PUT endpoint `/v1/load_models`
///
/// Replaces the shared corpus by the named corpus files, merged in order.
/// Files are read on the blocking thread pool.
#[put("/v1/load_models")]
async fn put_model(data: web::Data<SharedData>, query: web::Query<ModelQuery>) -> impl Responder {
	let query_names = match &query.names {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty model name"),
	};

	let mut config = CorpusConfig::default();
	if let Some(state_length) = query.state_length {
		config = match config.with_state_length(state_length) {
			Ok(c) => c,
			Err(e) => return error_response(e),
		};
	}

	let model_names: Vec<String> = query_names
		.split(',')
		.map(|s| s.trim())
		.filter(|s| !s.is_empty())
		.map(str::to_owned)
		.collect();
	if let Some(name) = model_names.iter().find(|name| !is_plain_name(name)) {
		return HttpResponse::BadRequest().body(format!("Invalid model name {name}"));
	}

	let data_dir = data.data_dir.clone();
	let corpus = match web::block(move || open_corpora(&data_dir, &model_names, config)).await {
		Ok(Ok(c)) => c,
		Ok(Err(message)) => return HttpResponse::InternalServerError().body(message),
		Err(e) => {
			warn!("corpus loading task failed: {e}");
			return HttpResponse::InternalServerError().body("Failed to load models");
		}
	};

	let size = corpus.size();
	if let Err(e) = data.corpus.replace(corpus) {
		return error_response(e);
	}
	info!("corpus replaced ({size} states)");
	HttpResponse::Ok().body("Models loaded successfully")
}

/// HTTP PUT endpoint `/v1/load_text`
///
/// Merges the request body (a text block) into the shared corpus.
#[put("/v1/load_text")]
async fn put_text(data: web::Data<SharedData>, body: String) -> impl Responder {
	match data.corpus.load_async(body).await {
		Ok(report) => HttpResponse::Ok().body(format!("{} learned, {} skipped", report.learned, report.skipped)),
		Err(e) => error_response(e),
	}
}

pub fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(get_generated)
		.service(get_models)
		.service(get_loaded_models)
		.service(get_size)
		.service(get_snapshot)
		.service(put_model)
		.service(put_text);
}
