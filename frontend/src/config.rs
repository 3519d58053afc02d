//! Portfolio configuration, embedded at compile time

use shared::PortfolioConfig;

const PORTFOLIO_TOML: &str = include_str!("../portfolio.toml");

/// Parse the embedded `portfolio.toml`, falling back to defaults when it
/// is rejected so a bad edit never blanks the site.
pub fn load_config() -> PortfolioConfig {
    match PortfolioConfig::from_toml_str(PORTFOLIO_TOML) {
        Ok(config) => config,
        Err(error) => {
            zoon::eprintln!("portfolio.toml rejected, using defaults: {}", error);
            PortfolioConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_is_valid() {
        let config = PortfolioConfig::from_toml_str(PORTFOLIO_TOML).unwrap();
        assert_eq!(config, PortfolioConfig::default());
    }
}
