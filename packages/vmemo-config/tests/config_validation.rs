use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use vmemo_config::{Config, Error};

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

fn sample_value() -> Value {
	toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.")
}

fn table_mut<'a>(value: &'a mut Value, keys: &[&str]) -> &'a mut toml::Table {
	let mut current = value;

	for key in keys {
		current = current
			.as_table_mut()
			.and_then(|table| table.get_mut(*key))
			.unwrap_or_else(|| panic!("Sample config must include {key}."));
	}

	current.as_table_mut().expect("Expected a table.")
}

fn parse(value: &Value) -> Config {
	let raw = toml::to_string(value).expect("Failed to render config.");

	toml::from_str(&raw).expect("Failed to deserialize config.")
}

fn temp_config_path() -> PathBuf {
	let nanos =
		SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.subsec_nanos()).unwrap_or(0);
	let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);

	env::temp_dir().join(format!("vmemo_config_{}_{nanos}_{counter}.toml", std::process::id()))
}

#[test]
fn sample_config_is_valid() {
	let cfg = parse(&sample_value());

	vmemo_config::validate(&cfg).expect("Sample config must validate.");
}

#[test]
fn rejects_dimension_mismatch() {
	let mut value = sample_value();

	table_mut(&mut value, &["providers", "embedding"])
		.insert("dimensions".to_string(), Value::Integer(1536));

	let result = vmemo_config::validate(&parse(&value));

	assert!(matches!(result, Err(Error::Validation { .. })));
}

#[test]
fn rejects_blank_qdrant_url() {
	let mut value = sample_value();

	table_mut(&mut value, &["storage", "qdrant"])
		.insert("url".to_string(), Value::String(" ".to_string()));

	let result = vmemo_config::validate(&parse(&value));

	assert!(matches!(result, Err(Error::Validation { .. })));
}

#[test]
fn rejects_blank_provider_api_key() {
	let mut value = sample_value();

	table_mut(&mut value, &["providers", "transcription"])
		.insert("api_key".to_string(), Value::String(String::new()));

	let result = vmemo_config::validate(&parse(&value));

	assert!(matches!(result, Err(Error::Validation { .. })));
}

#[test]
fn rejects_zero_timeout() {
	let mut value = sample_value();

	table_mut(&mut value, &["providers", "embedding"])
		.insert("timeout_ms".to_string(), Value::Integer(0));

	let result = vmemo_config::validate(&parse(&value));

	assert!(matches!(result, Err(Error::Validation { .. })));
}

#[test]
fn rejects_zero_note_limits() {
	for key in ["list_limit", "search_limit", "max_note_chars"] {
		let mut value = sample_value();

		table_mut(&mut value, &["notes"]).insert(key.to_string(), Value::Integer(0));

		let result = vmemo_config::validate(&parse(&value));

		assert!(matches!(result, Err(Error::Validation { .. })), "notes.{key} = 0 must fail");
	}
}

#[test]
fn load_normalizes_blank_qdrant_api_key() {
	let path = temp_config_path();

	fs::write(&path, SAMPLE_CONFIG_TOML).expect("Failed to write temp config.");

	let cfg = vmemo_config::load(&path).expect("Failed to load config.");

	fs::remove_file(&path).ok();

	assert!(cfg.storage.qdrant.api_key.is_none());
}

#[test]
fn load_reports_missing_file() {
	let result = vmemo_config::load(&temp_config_path());

	assert!(matches!(result, Err(Error::ReadConfig { .. })));
}
