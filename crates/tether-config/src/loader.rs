use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a placeholder cannot be
    /// expanded, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml_str(&raw)
    }

    /// Parse configuration from TOML text, expanding `{{ env.VAR }}` placeholders first
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is usable
    ///
    /// # Errors
    ///
    /// Returns an error if the model is empty, the base URL is not HTTP(S),
    /// or the timeout cannot be parsed
    pub fn validate(&self) -> anyhow::Result<()> {
        let engine = &self.engine;

        if engine.model.trim().is_empty() {
            anyhow::bail!("engine.model must not be empty");
        }

        if let Some(ref base_url) = engine.base_url
            && !matches!(base_url.scheme(), "http" | "https")
        {
            anyhow::bail!("engine.base_url must use http or https, got '{}'", base_url.scheme());
        }

        engine.timeout()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::time::Duration;

    use secrecy::ExposeSecret;

    use crate::{Config, EngineType, LogFormat};

    #[test]
    fn minimal_config() {
        let config = Config::from_toml_str(
            r#"
            [engine]
            type = "openai"
            model = "gpt-4o-mini"
            "#,
        )
        .unwrap();

        assert_eq!(config.engine.engine_type, EngineType::Openai);
        assert_eq!(config.engine.model, "gpt-4o-mini");
        assert!(config.engine.api_key.is_none());
        assert!(config.engine.base_url.is_none());
        assert!(config.telemetry.is_none());
    }

    #[test]
    fn full_config_with_env_key() {
        temp_env::with_var("TETHER_LOADER_KEY", Some("sk-123"), || {
            let config = Config::from_toml_str(
                r#"
                [engine]
                type = "openai"
                model = "gpt-4o"
                api_key = "{{ env.TETHER_LOADER_KEY }}"
                base_url = "http://localhost:8080/v1"
                timeout = "90s"

                [telemetry]
                filter = "tether_llm=debug"
                format = "json"
                "#,
            )
            .unwrap();

            let engine = &config.engine;
            assert_eq!(engine.api_key.as_ref().unwrap().expose_secret(), "sk-123");
            assert_eq!(engine.base_url.as_ref().unwrap().as_str(), "http://localhost:8080/v1");
            assert_eq!(engine.timeout().unwrap(), Some(Duration::from_secs(90)));

            let telemetry = config.telemetry.unwrap();
            assert_eq!(telemetry.filter.as_deref(), Some("tether_llm=debug"));
            assert_eq!(telemetry.format, LogFormat::Json);
        });
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = Config::from_toml_str(
            r#"
            [engine]
            type = "openai"
            model = "gpt-4o"
            temperature = 0.2
            "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn empty_model_is_rejected() {
        let err = Config::from_toml_str(
            r#"
            [engine]
            type = "openai"
            model = "  "
            "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("engine.model"));
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let err = Config::from_toml_str(
            r#"
            [engine]
            type = "openai"
            model = "gpt-4o"
            base_url = "ftp://example.com/v1"
            "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let err = Config::from_toml_str(
            r#"
            [engine]
            type = "openai"
            model = "gpt-4o"
            timeout = "soon"
            "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("invalid engine timeout"));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[engine]\ntype = \"openai\"\nmodel = \"gpt-4o\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.engine.model, "gpt-4o");
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load(std::path::Path::new("/nonexistent/tether.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
