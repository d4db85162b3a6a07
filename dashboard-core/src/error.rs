//! Weather lookup errors.

use thiserror::Error;

/// The one message users see for any failed lookup.
pub const LOOKUP_FAILED_MESSAGE: &str = "City not found or API error occurred";

/// Why a lookup failed. The variants exist for logs; the dashboard shows
/// [`LOOKUP_FAILED_MESSAGE`] for all of them.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("No OpenWeather API key configured")]
    MissingApiKey,

    #[error("Failed to send {endpoint} request: {source}")]
    Request {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    #[error("Failed to parse {endpoint} response: {reason}")]
    Parse {
        endpoint: &'static str,
        reason: String,
    },
}

impl FetchError {
    pub fn user_message(&self) -> &'static str {
        LOOKUP_FAILED_MESSAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_has_the_same_user_message() {
        let errors = [
            FetchError::MissingApiKey,
            FetchError::Status {
                endpoint: "weather",
                status: 404,
                body: "city not found".into(),
            },
            FetchError::Status {
                endpoint: "forecast",
                status: 401,
                body: "invalid key".into(),
            },
            FetchError::Parse {
                endpoint: "weather",
                reason: "missing field `main`".into(),
            },
        ];

        for err in &errors {
            assert_eq!(err.user_message(), LOOKUP_FAILED_MESSAGE);
        }
    }

    #[test]
    fn display_keeps_details_for_logs() {
        let err = FetchError::Status {
            endpoint: "forecast",
            status: 429,
            body: "slow down".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("forecast"));
        assert!(msg.contains("429"));
        assert!(msg.contains("slow down"));
    }
}
