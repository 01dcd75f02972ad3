use std::env;
use secrecy::SecretString;

#[derive(Clone, Debug)]
pub struct Config {
    pub app_name: String,
    pub app_version: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub students_collection: String,
    pub openai_api_key: SecretString,
    pub openai_model: String,
    pub openai_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            app_name: env::var("APP_NAME").unwrap_or_else(|_| "CVP Lite".to_string()),
            app_version: env::var("APP_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string()),
            web_server_host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_server_port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8001),
            mongo_conn_string: env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGODB_DATABASE").unwrap_or_else(|_| "cvp_lite".to_string()),
            students_collection: env::var("MONGODB_COLLECTION")
                .unwrap_or_else(|_| "students".to_string()),
            openai_api_key: SecretString::from(env::var("OPENAI_API_KEY").unwrap_or_default()),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            openai_timeout_secs: env::var("OPENAI_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(60),
        }
    }

    /// Logs a warning for every setting that still carries a development default.
    /// The service keeps running: question generation degrades to the fallback bank.
    pub fn warn_on_insecure_defaults(&self) -> usize {
        use secrecy::ExposeSecret;

        let mut warnings = 0;

        if self.openai_api_key.expose_secret().trim().is_empty() {
            log::warn!("OPENAI_API_KEY is not set; every LLM call will use fallback content");
            warnings += 1;
        }

        if self.mongo_conn_string == "mongodb://localhost:27017" {
            log::warn!("MONGODB_URI is using the local default");
            warnings += 1;
        }

        warnings
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            app_name: "CVP Lite".to_string(),
            app_version: "0.0.0-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8001,
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "cvp-lite-test".to_string(),
            students_collection: "students".to_string(),
            openai_api_key: SecretString::from("test_openai_key".to_string()),
            openai_model: "gpt-test".to_string(),
            openai_timeout_secs: 5,
        }
    }
}
