use thiserror::Error;

/// Every service-client failure is normalized into one of these shapes
/// before it reaches the store: transport failures, HTTP-level
/// failures, application-level rejections (`success: false`), and
/// undecodable bodies.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("{0}")]
    Application(String),

    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Substitute a per-operation fallback when the server supplied no
    /// usable message.
    pub fn with_fallback(self, fallback: &str) -> Self {
        match self {
            ApiError::Http { status, message } if message.is_empty() => ApiError::Http {
                status,
                message: fallback.to_string(),
            },
            ApiError::Application(message) if message.is_empty() => {
                ApiError::Application(fallback.to_string())
            }
            other => other,
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Http { status: 401 | 403, .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_replaces_empty_messages_only() {
        let err = ApiError::Http {
            status: 500,
            message: String::new(),
        }
        .with_fallback("Failed to fetch notifications");
        assert_eq!(err.to_string(), "Failed to fetch notifications");

        let err = ApiError::Http {
            status: 409,
            message: "Slot already booked".to_string(),
        }
        .with_fallback("Failed to create appointment");
        assert_eq!(err.to_string(), "Slot already booked");
    }

    #[test]
    fn auth_statuses_are_flagged() {
        let unauthorized = ApiError::Http {
            status: 401,
            message: "expired".to_string(),
        };
        assert!(unauthorized.is_auth());
        assert!(!ApiError::Network("refused".to_string()).is_auth());
    }
}
