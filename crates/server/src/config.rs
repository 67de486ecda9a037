//! Server configuration

/// Redirect targets used when `TRANSFER_TARGETS` is not set
const DEFAULT_TRANSFER_TARGETS: &str = "fc66cd13-ae36-4592-b18d-e095a8d9a481=https://palmu.demo.aaibot.link/,\
a24bd700-290a-41d8-b64a-8746ea20851b=https://testbot.demo.aaibot.link/";

/// Server configuration loaded from environment variables
pub struct Config {
    pub bind_address: String,
    pub api_key: Option<String>,
    pub cors_origins: Vec<String>,
    pub rate_limit_rps: u32,
    pub recommender_url: String,
    pub recommender_api_key: Option<String>,
    pub attributes_url: String,
    pub code_tables_path: Option<String>,
    pub http_timeout_secs: u64,
    /// Service channel id → base URL the user is sent to on session transfer
    pub transfer_targets: Vec<(String, String)>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            bind_address: std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:5055".into()),
            api_key: std::env::var("API_KEY").ok().filter(|k| !k.is_empty()),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            rate_limit_rps: std::env::var("RATE_LIMIT_RPS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|rps| *rps > 0)
                .unwrap_or(100),
            recommender_url: std::env::var("RECOMMENDER_URL")
                .unwrap_or_else(|_| "http://localhost:8000/service-recommender/v1".into()),
            recommender_api_key: std::env::var("RECOMMENDER_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            attributes_url: std::env::var("ATTRIBUTES_URL")
                .unwrap_or_else(|_| "http://localhost:8000/session-transfer/v1".into()),
            code_tables_path: std::env::var("CODE_TABLES_PATH").ok().filter(|p| !p.is_empty()),
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            transfer_targets: parse_transfer_targets(
                &std::env::var("TRANSFER_TARGETS").unwrap_or_else(|_| DEFAULT_TRANSFER_TARGETS.into()),
            ),
        }
    }
}

/// Parse `id=url,id=url`; malformed pairs are skipped
pub fn parse_transfer_targets(raw: &str) -> Vec<(String, String)> {
    raw.split(',')
        .filter_map(|pair| {
            let (id, url) = pair.split_once('=')?;
            let (id, url) = (id.trim(), url.trim());
            if id.is_empty() || url.is_empty() {
                tracing::warn!(pair, "Ignoring malformed transfer target");
                return None;
            }
            Some((id.to_string(), url.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_targets_parse() {
        let targets = parse_transfer_targets(DEFAULT_TRANSFER_TARGETS);
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].1, "https://palmu.demo.aaibot.link/");
    }

    #[test]
    fn malformed_pairs_are_skipped() {
        let targets = parse_transfer_targets("a=https://a.example/, nope ,=x, b = https://b.example/?q=1");
        assert_eq!(
            targets,
            vec![
                ("a".to_string(), "https://a.example/".to_string()),
                ("b".to_string(), "https://b.example/?q=1".to_string()),
            ]
        );
    }
}
