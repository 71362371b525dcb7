/// Subscriber options resolved from `logging.*` settings.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub level: String,
    pub json_format: bool,
}

impl TracingConfig {
    pub fn new(environment: impl Into<String>, level: impl Into<String>, json_format: bool) -> Self {
        Self {
            environment: environment.into(),
            level: level.into(),
            json_format,
        }
    }

    /// `RUST_LOG` wins when set; otherwise the configured level applies to
    /// everything and this crate logs at debug in non-production builds.
    pub fn default_directives(&self) -> String {
        if self.environment.eq_ignore_ascii_case("prod") {
            format!("{},tower_http=info", self.level)
        } else {
            format!("{},quizzybee=debug,tower_http=debug", self.level)
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::new("Local", "info", false)
    }
}
