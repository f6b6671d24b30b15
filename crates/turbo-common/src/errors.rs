use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures on the native side of the script bridge.
///
/// A script that the engine never finishes evaluating is not represented
/// here: it simply never completes its callback chain.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("failed to encode visit argument: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("bridge asset not found: {0}")]
    AssetNotFound(String),

    #[error("invalid bridge message: {0}")]
    InvalidMessage(String),
}

#[derive(Debug, thiserror::Error)]
pub enum TurboError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error("engine error: {0}")]
    Engine(String),

    #[error("unknown container: {0}")]
    UnknownContainer(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("logging.level = loud".into());
        assert_eq!(
            err.to_string(),
            "config validation error: logging.level = loud"
        );
    }

    #[test]
    fn bridge_error_display() {
        let err = BridgeError::AssetNotFound("js/missing.js".into());
        assert_eq!(err.to_string(), "bridge asset not found: js/missing.js");

        let err = BridgeError::InvalidMessage("expected value".into());
        assert_eq!(err.to_string(), "invalid bridge message: expected value");
    }

    #[test]
    fn bridge_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: BridgeError = serde_err.into();
        assert!(matches!(err, BridgeError::Encode(_)));
        assert!(err.to_string().starts_with("failed to encode visit argument"));
    }

    #[test]
    fn turbo_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: TurboError = config_err.into();
        assert!(matches!(err, TurboError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn turbo_error_from_bridge() {
        let err: TurboError = BridgeError::AssetNotFound("js/x.js".into()).into();
        assert!(matches!(err, TurboError::Bridge(_)));
        assert!(err.to_string().contains("js/x.js"));
    }

    #[test]
    fn turbo_error_other_variants() {
        let err = TurboError::Engine("webview gone".into());
        assert_eq!(err.to_string(), "engine error: webview gone");

        let err = TurboError::UnknownContainer("container-9".into());
        assert_eq!(err.to_string(), "unknown container: container-9");
    }
}
