use std::{env, fs};

use anyhow::{Context, Result};

use skipper_observe::LoggerConfig;

/// Process configuration, read from the environment once at startup.
///
/// | Variable        | Meaning                                    | Default |
/// |-----------------|--------------------------------------------|---------|
/// | `PORT`          | listen port                                | 80      |
/// | `AUTH_KEY`      | bearer credential                          | unset   |
/// | `AUTH_KEY_FILE` | file holding the credential (wins over `AUTH_KEY`) | unset |
/// | `WHITELIST`     | comma-separated service names              | unset   |
/// | `DOCKER_HOST`   | engine endpoint                            | local socket |
/// | `LOG_LEVEL`     | tracing filter expression                  | info    |
/// | `LOG_FORMAT`    | text / json / journald                     | text    |
///
/// An unset credential or whitelist degrades to open mode; `main` warns
/// about each, once.
#[derive(Debug)]
pub struct DeploydConfig {
    pub port: u16,
    pub credential: Option<String>,
    pub whitelist: Option<String>,
    pub docker_host: Option<String>,
    pub logger: LoggerConfig,
}

impl DeploydConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: parse_port(env::var("PORT").ok())?,
            credential: load_credential(
                env::var("AUTH_KEY_FILE").ok(),
                env::var("AUTH_KEY").ok(),
            )?,
            whitelist: non_empty(env::var("WHITELIST").ok()),
            docker_host: non_empty(env::var("DOCKER_HOST").ok()),
            logger: logger_config(env::var("LOG_LEVEL").ok(), env::var("LOG_FORMAT").ok())?,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn parse_port(value: Option<String>) -> Result<u16> {
    match non_empty(value) {
        None => Ok(80),
        Some(raw) => raw
            .parse()
            .with_context(|| format!("invalid PORT value {raw:?}")),
    }
}

/// Resolve the credential, preferring the file-based variant.
///
/// File content is trimmed of trailing line terminators only: secrets
/// mounted by orchestrators usually end with a newline, but interior
/// whitespace is part of the credential.
fn load_credential(file: Option<String>, value: Option<String>) -> Result<Option<String>> {
    if let Some(path) = non_empty(file) {
        let data =
            fs::read_to_string(&path).with_context(|| format!("reading AUTH_KEY_FILE {path:?}"))?;
        return Ok(non_empty(Some(
            data.trim_end_matches(['\r', '\n']).to_string(),
        )));
    }
    Ok(non_empty(value))
}

fn logger_config(level: Option<String>, format: Option<String>) -> Result<LoggerConfig> {
    let mut cfg = LoggerConfig::default();
    if let Some(level) = non_empty(level) {
        cfg.level = level.parse()?;
    }
    if let Some(format) = non_empty(format) {
        cfg.format = format.parse()?;
    }
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::{load_credential, logger_config, non_empty, parse_port};

    #[test]
    fn port_defaults_to_80() {
        assert_eq!(parse_port(None).unwrap(), 80);
        assert_eq!(parse_port(Some(String::new())).unwrap(), 80);
    }

    #[test]
    fn port_parses_when_set() {
        assert_eq!(parse_port(Some("8080".into())).unwrap(), 8080);
    }

    #[test]
    fn invalid_port_is_an_error() {
        assert!(parse_port(Some("eighty".into())).is_err());
        assert!(parse_port(Some("99999".into())).is_err());
    }

    #[test]
    fn empty_env_values_count_as_unset() {
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("x".into())), Some("x".to_string()));
    }

    #[test]
    fn credential_comes_from_the_plain_variable() {
        let cred = load_credential(None, Some("secret1".into())).unwrap();
        assert_eq!(cred.as_deref(), Some("secret1"));
    }

    #[test]
    fn unset_or_empty_credential_means_open_mode() {
        assert_eq!(load_credential(None, None).unwrap(), None);
        assert_eq!(load_credential(None, Some(String::new())).unwrap(), None);
    }

    #[test]
    fn credential_file_wins_and_is_trimmed_of_line_endings() {
        let path = std::env::temp_dir().join(format!("skipper-auth-{}", std::process::id()));
        std::fs::write(&path, "secret1\r\n").unwrap();

        let cred = load_credential(
            Some(path.to_string_lossy().into_owned()),
            Some("ignored".into()),
        )
        .unwrap();
        assert_eq!(cred.as_deref(), Some("secret1"));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn interior_whitespace_in_the_credential_file_is_kept() {
        let path = std::env::temp_dir().join(format!("skipper-auth-ws-{}", std::process::id()));
        std::fs::write(&path, "sec ret\n").unwrap();

        let cred = load_credential(Some(path.to_string_lossy().into_owned()), None).unwrap();
        assert_eq!(cred.as_deref(), Some("sec ret"));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_credential_file_is_an_error() {
        assert!(load_credential(Some("/nonexistent/auth-key".into()), None).is_err());
    }

    #[test]
    fn logger_config_defaults_and_overrides() {
        let cfg = logger_config(None, None).unwrap();
        assert_eq!(cfg.level.as_str(), "info");

        let cfg = logger_config(Some("debug".into()), Some("json".into())).unwrap();
        assert_eq!(cfg.level.as_str(), "debug");
        assert_eq!(cfg.format, skipper_observe::LogFormat::Json);

        assert!(logger_config(Some("nope=wat".into()), None).is_err());
        assert!(logger_config(None, Some("xml".into())).is_err());
    }
}
