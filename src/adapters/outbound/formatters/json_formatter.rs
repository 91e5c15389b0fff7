use crate::application::dto::TrendResponse;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use anyhow::Context;

/// JsonFormatter adapter rendering responses as a pretty-printed JSON array
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, responses: &[TrendResponse]) -> Result<String> {
        serde_json::to_string_pretty(responses).context("Failed to serialize trend report")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_response_omits_empty_sections() {
        let json = JsonFormatter::new()
            .format(&[TrendResponse::unavailable(None, "no project identity")])
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value.is_array());
        assert_eq!(value[0]["unavailableReason"], "no project identity");
        assert!(value[0].get("outcome").is_none());
        assert!(value[0].get("statistics").is_none());
    }
}
