pub type ServiceResult<T, E = ServiceError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Store error: {message}")]
	Store { message: String },
}
impl From<vmemo_storage::Error> for ServiceError {
	fn from(err: vmemo_storage::Error) -> Self {
		Self::Store { message: err.to_string() }
	}
}

impl From<vmemo_providers::Error> for ServiceError {
	fn from(err: vmemo_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}
