use reqwest::header::AUTHORIZATION;
use serde_json::Map;

#[test]
fn builds_bearer_auth_header() {
	let headers =
		vmemo_providers::auth_headers("secret", &Map::new()).expect("Failed to build headers.");
	let value = headers.get(AUTHORIZATION).expect("Missing authorization header.");

	assert_eq!(value, "Bearer secret");
}

#[test]
fn applies_default_headers() {
	let mut default_headers = Map::new();

	default_headers
		.insert("x-provider-tier".to_string(), serde_json::Value::String("free".to_string()));

	let headers = vmemo_providers::auth_headers("secret", &default_headers)
		.expect("Failed to build headers.");
	let value = headers.get("x-provider-tier").expect("Missing default header.");

	assert_eq!(value, "free");
}

#[test]
fn rejects_non_string_default_headers() {
	let mut default_headers = Map::new();

	default_headers.insert("x-retries".to_string(), serde_json::Value::from(3));

	assert!(vmemo_providers::auth_headers("secret", &default_headers).is_err());
}
