use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub storage_base_url: String,
    pub storage_api_key: String,
    pub storage_bucket: String,
    pub cors_allowed_origin: String,
    pub max_file_size_bytes: usize,
    pub seed_courses: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            database_url: var("DATABASE_URL").ok_or_else(|| "DATABASE_URL must be set".to_string())?,
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: var("PORT")
                .unwrap_or_else(|| "3001".to_string())
                .parse()
                .map_err(|_| "PORT must be a valid u16".to_string())?,
            storage_base_url: var("STORAGE_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .ok_or_else(|| "STORAGE_BASE_URL must be set".to_string())?,
            storage_api_key: var("STORAGE_API_KEY")
                .ok_or_else(|| "STORAGE_API_KEY must be set".to_string())?,
            storage_bucket: var("STORAGE_BUCKET").unwrap_or_else(|| "notes".to_string()),
            cors_allowed_origin: var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            max_file_size_bytes: var("MAX_FILE_SIZE_BYTES")
                .unwrap_or_else(|| "52428800".to_string())
                .parse()
                .map_err(|_| "MAX_FILE_SIZE_BYTES must be a valid usize".to_string())?,
            seed_courses: var("SEED_COURSES")
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn required() -> Vec<(&'static str, &'static str)> {
        vec![
            ("DATABASE_URL", "postgres://localhost/notes"),
            ("STORAGE_BASE_URL", "https://storage.example.com/"),
            ("STORAGE_API_KEY", "secret"),
        ]
    }

    #[test]
    fn test_defaults_applied() {
        let env = vars(&required());
        let config = Config::from_vars(|k| env.get(k).cloned()).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3001);
        assert_eq!(config.storage_bucket, "notes");
        assert_eq!(config.storage_base_url, "https://storage.example.com");
        assert_eq!(config.cors_allowed_origin, "http://localhost:3000");
        assert_eq!(config.max_file_size_bytes, 52428800);
        assert!(config.seed_courses.is_empty());
    }

    #[test]
    fn test_missing_database_url() {
        let env = vars(&required()[1..]);
        let err = Config::from_vars(|k| env.get(k).cloned()).unwrap_err();
        assert!(err.contains("DATABASE_URL"));
    }

    #[test]
    fn test_invalid_port() {
        let mut pairs = required();
        pairs.push(("PORT", "not-a-port"));
        let env = vars(&pairs);
        let err = Config::from_vars(|k| env.get(k).cloned()).unwrap_err();
        assert!(err.contains("PORT"));
    }

    #[test]
    fn test_seed_courses_split_and_trimmed() {
        let mut pairs = required();
        pairs.push(("SEED_COURSES", " Intro Biology, ,Linear Algebra "));
        let env = vars(&pairs);
        let config = Config::from_vars(|k| env.get(k).cloned()).unwrap();
        assert_eq!(
            config.seed_courses,
            vec!["Intro Biology".to_string(), "Linear Algebra".to_string()]
        );
    }
}
