/// Errors from the weather provider layer.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("Weather provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Weather provider error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response body did not have the expected shape.
    #[error("Unexpected weather provider response: {0}")]
    Parse(String),
}
