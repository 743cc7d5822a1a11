use serde::Serialize;

/// Body returned by the relay endpoint once both publishes went through.
pub const SUCCESS: &str = "success";

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Uniform JSON error body for HTTP responses.
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}
