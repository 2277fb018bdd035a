use std::env;

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

const DEFAULT_JWT_SECRET: &str = "dev_secret_key_change_in_production";
const MIN_JWT_SECRET_LEN: usize = 32;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionNames {
    pub quizzes: String,
    pub questions: String,
    pub answer_options: String,
}

impl Default for CollectionNames {
    fn default() -> Self {
        Self {
            quizzes: "quizzes".to_string(),
            questions: "questions".to_string(),
            answer_options: "answer_options".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub collections: CollectionNames,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = CollectionNames::default();

        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "simple-quiz".to_string()),
            collections: CollectionNames {
                quizzes: env::var("QUIZZES_COLLECTION").unwrap_or(defaults.quizzes),
                questions: env::var("QUESTIONS_COLLECTION").unwrap_or(defaults.questions),
                answer_options: env::var("ANSWER_OPTIONS_COLLECTION")
                    .unwrap_or(defaults.answer_options),
            },
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
            ),
        }
    }

    /// Rejects settings that are only acceptable on a developer machine.
    pub fn validate_for_production(&self) -> AppResult<()> {
        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEFAULT_JWT_SECRET {
            return Err(AppError::ConfigurationError(
                "JWT_SECRET is using the default value".to_string(),
            ));
        }

        if jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(AppError::ConfigurationError(format!(
                "JWT_SECRET is too short ({}), must be at least {} characters",
                jwt_secret.len(),
                MIN_JWT_SECRET_LEN
            )));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "simple-quiz-test".to_string(),
            collections: CollectionNames::default(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
        }
    }
}
