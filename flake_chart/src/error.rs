use reqwest::StatusCode;

/// Failures of a single dashboard page load.
///
/// The display text of each variant is what ends up in the error banner.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Network response was not ok ({status})")]
    UnexpectedStatus { url: String, status: StatusCode },

    #[error("Network request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Response from {url} is not valid JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected flake data: {0}")]
    Render(#[from] serde_json::Error),

    #[error("Page has no element with id '{0}'")]
    MissingContainer(String),

    #[error("Charting library failed to load: {0}")]
    ChartsUnavailable(String),
}

impl DashboardError {
    /// Whether the failure happened before any response body was read.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            DashboardError::UnexpectedStatus { .. } | DashboardError::Transport { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_part_of_message() {
        let err = DashboardError::UnexpectedStatus {
            url: "http://localhost:8080/env?env=".to_string(),
            status: StatusCode::NOT_IMPLEMENTED,
        };
        assert_eq!(
            err.to_string(),
            "Network response was not ok (501 Not Implemented)"
        );
        assert!(err.is_network());
    }

    #[test]
    fn test_render_error_from_serde() {
        let source = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let err = DashboardError::from(source);
        assert!(err.to_string().starts_with("Unexpected flake data: "));
        assert!(!err.is_network());
    }

    #[test]
    fn test_missing_container_is_not_a_payload_problem() {
        let err = DashboardError::MissingContainer("chart_div".to_string());
        assert_eq!(err.to_string(), "Page has no element with id 'chart_div'");
        assert!(!err.is_network());
    }
}
