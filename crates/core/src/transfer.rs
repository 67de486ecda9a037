//! Session transfer links

use url::Url;

use crate::error::TokenError;

/// Query parameter carrying the access token in transfer redirect URLs
pub const ACCESS_TOKEN_PARAM: &str = "auroraai_access_token";

/// First `auroraai_access_token` value in a redirect URL
pub fn extract_access_token(redirect_url: &str) -> Result<String, TokenError> {
    let parsed = Url::parse(redirect_url.trim())
        .map_err(|e| TokenError::InvalidUrl(format!("{redirect_url}: {e}")))?;

    parsed
        .query_pairs()
        .find(|(key, _)| key == ACCESS_TOKEN_PARAM)
        .map(|(_, value)| value.into_owned())
        .ok_or(TokenError::MissingParameter(ACCESS_TOKEN_PARAM))
}

/// Link that opens `target_base` with the access token attached
pub fn transfer_link(target_base: &str, access_token: &str) -> Result<String, TokenError> {
    let mut link = Url::parse(target_base)
        .map_err(|e| TokenError::InvalidUrl(format!("{target_base}: {e}")))?;
    link.query_pairs_mut()
        .append_pair(ACCESS_TOKEN_PARAM, access_token);
    Ok(link.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_token() {
        let url = "https://bot.example/start?x=1&auroraai_access_token=abc%3D&auroraai_access_token=def";
        assert_eq!(extract_access_token(url), Ok("abc=".to_string()));
    }

    #[test]
    fn missing_token_fails() {
        assert_eq!(
            extract_access_token("https://bot.example/start?x=1"),
            Err(TokenError::MissingParameter(ACCESS_TOKEN_PARAM))
        );
    }

    #[test]
    fn garbage_url_fails() {
        assert!(matches!(
            extract_access_token("not a url"),
            Err(TokenError::InvalidUrl(_))
        ));
    }

    #[test]
    fn link_appends_token() {
        assert_eq!(
            transfer_link("https://palmu.demo.aaibot.link/", "t 1").unwrap(),
            "https://palmu.demo.aaibot.link/?auroraai_access_token=t+1"
        );
    }
}
