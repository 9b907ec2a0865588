use std::time::Duration;

use reqwest::{
	Client,
	multipart::{Form, Part},
};
use serde_json::Value;

use crate::{Error, Result};

/// Sends MP3-encoded audio to the transcription endpoint and returns the
/// transcript text. The verbose response format is requested but only the
/// `text` field is consumed.
pub async fn transcribe(
	cfg: &vmemo_config::TranscriptionProviderConfig,
	audio: Vec<u8>,
) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let part = Part::bytes(audio).file_name("audio.mp3").mime_str("audio/mpeg")?;
	let form = Form::new()
		.part("file", part)
		.text("model", cfg.model.clone())
		.text("response_format", "verbose_json");
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.multipart(form)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_transcription_response(json)
}

fn parse_transcription_response(json: Value) -> Result<String> {
	json.get("text").and_then(|v| v.as_str()).map(|text| text.to_string()).ok_or_else(|| {
		Error::InvalidResponse {
			message: "Transcription response is missing text field.".to_string(),
		}
	})
}
