use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents the backend deployments the dashboard can connect to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Local development server.
    #[default]
    Local,
    /// A custom server URL, e.g. a remote deployment.
    Custom { api_base_url: String },
}

impl Environment {
    /// Returns the base URL of the trading server's HTTP API.
    pub fn api_base_url(&self) -> String {
        match self {
            Environment::Local => "http://localhost:5000".to_string(),
            Environment::Custom { api_base_url } => api_base_url.clone(),
        }
    }

    pub fn from_url(url: &str) -> Self {
        Environment::Custom {
            api_base_url: url.trim_end_matches('/').to_string(),
        }
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            url if url.starts_with("http://") || url.starts_with("https://") => {
                Ok(Environment::from_url(s))
            }
            _ => Err(()),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Custom { api_base_url } => write!(f, "{}", api_base_url),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.api_base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_environment() {
        assert_eq!("local".parse::<Environment>(), Ok(Environment::Local));
        assert_eq!(
            "https://trade.example.com/".parse::<Environment>(),
            Ok(Environment::Custom {
                api_base_url: "https://trade.example.com".to_string()
            })
        );
        assert!("not-a-url".parse::<Environment>().is_err());
    }
}
