//! Target endpoint settings.

use serde::{Deserialize, Serialize};

/// Default host the gRPC server listens on.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default gRPC port.
pub const DEFAULT_PORT: u16 = 50051;

/// Default form content type.
pub const DEFAULT_CONTENT_TYPE: &str = "application/grpc+proto";

/// Where the described service is reachable and how it is encoded.
///
/// # Examples
///
/// ```
/// use grpcwot_td::TdSettings;
///
/// let settings = TdSettings::default().with_port(8080);
/// assert_eq!(settings.href("Lamp", "Color"), "http://127.0.0.1:8080/Lamp/Color");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TdSettings {
    /// Host name or IP address
    pub host: String,
    /// TCP port
    pub port: u16,
    /// Content type of every form
    pub content_type: String,
}

impl Default for TdSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }
}

impl TdSettings {
    /// Sets the host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the form content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Returns the form target for an affordance of the titled thing.
    #[must_use]
    pub fn href(&self, title: &str, affordance: &str) -> String {
        format!("http://{}:{}/{title}/{affordance}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = TdSettings::default();
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.port, 50051);
        assert_eq!(settings.content_type, "application/grpc+proto");
    }

    #[test]
    fn test_href_uses_host_and_port() {
        let settings = TdSettings::default().with_host("10.0.0.7").with_port(9000);
        assert_eq!(settings.href("Oven", "Start"), "http://10.0.0.7:9000/Oven/Start");
    }
}
