//! Repository factory for dependency injection.

use std::str::FromStr;
use std::sync::Arc;

use super::repository::{RepositoryResult, RoutineRepository};

/// Repository backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory local repository.
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Backend from the `REPOSITORY_TYPE` environment variable, defaulting
    /// to the local in-memory backend.
    pub fn from_env() -> Self {
        std::env::var("REPOSITORY_TYPE")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(Self::Local)
    }
}

/// Centralised construction of repository instances.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance for the requested backend.
    pub fn create(repo_type: RepositoryType) -> RepositoryResult<Arc<dyn RoutineRepository>> {
        match repo_type {
            RepositoryType::Local => {
                #[cfg(feature = "local-repo")]
                {
                    Ok(Self::create_local())
                }
                #[cfg(not(feature = "local-repo"))]
                {
                    Err(super::repository::RepositoryError::configuration(
                        "Local repository feature not enabled",
                    ))
                }
            }
        }
    }

    /// Create an in-memory local repository.
    #[cfg(feature = "local-repo")]
    pub fn create_local() -> Arc<dyn RoutineRepository> {
        Arc::new(super::local::LocalRepository::new())
    }

    /// Create a repository from environment configuration.
    pub fn from_env() -> RepositoryResult<Arc<dyn RoutineRepository>> {
        Self::create(RepositoryType::from_env())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_type_parsing() {
        assert_eq!("local".parse::<RepositoryType>(), Ok(RepositoryType::Local));
        assert_eq!("LOCAL".parse::<RepositoryType>(), Ok(RepositoryType::Local));
        assert!("mysql".parse::<RepositoryType>().is_err());
    }

    #[cfg(feature = "local-repo")]
    #[test]
    fn test_create_local() {
        assert!(RepositoryFactory::create(RepositoryType::Local).is_ok());
    }
}
