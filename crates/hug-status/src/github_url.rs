//! Repository coordinates from a GitHub link

use thiserror::Error;
use url::Url;

/// Owner and repository taken from the first two path segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub owner: String,
    pub repository: String,
}

#[derive(Debug, Error)]
pub enum UrlError {
    #[error("not a valid URL: {0}")]
    Parse(#[from] url::ParseError),

    #[error("expected host {expected}, got {actual}")]
    WrongHost { expected: String, actual: String },

    #[error("URL path has no owner/repository: {0}")]
    MissingPath(String),
}

/// Parse `raw` and check that it points into a repository on `expected_host`
///
/// Anything after the repository segment is ignored, so both
/// `https://github.com/acme/widgets` and
/// `http://github.com/acme/widgets/pulls/7` yield `acme/widgets`.
pub fn parse_repository_url(raw: &str, expected_host: &str) -> Result<RepositoryRef, UrlError> {
    let url = Url::parse(raw.trim())?;

    let host = url.host_str().unwrap_or_default();
    if !host.eq_ignore_ascii_case(expected_host) {
        return Err(UrlError::WrongHost {
            expected: expected_host.to_string(),
            actual: host.to_string(),
        });
    }

    let mut segments = url
        .path_segments()
        .into_iter()
        .flatten()
        .filter(|segment| !segment.is_empty());

    match (segments.next(), segments.next()) {
        (Some(owner), Some(repository)) => Ok(RepositoryRef {
            owner: owner.to_string(),
            repository: repository.to_string(),
        }),
        _ => Err(UrlError::MissingPath(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pull_request_link() {
        let parsed = parse_repository_url("http://github.com/acme/widgets/pulls/7", "github.com")
            .unwrap();
        assert_eq!(parsed.owner, "acme");
        assert_eq!(parsed.repository, "widgets");
    }

    #[test]
    fn test_repository_link_with_trailing_slash() {
        let parsed = parse_repository_url("https://GitHub.com/acme/widgets/", "github.com")
            .unwrap();
        assert_eq!(
            parsed,
            RepositoryRef {
                owner: "acme".to_string(),
                repository: "widgets".to_string(),
            }
        );
    }

    #[test]
    fn test_wrong_host() {
        let err = parse_repository_url("https://gitlab.com/acme/widgets", "github.com")
            .unwrap_err();
        assert!(matches!(err, UrlError::WrongHost { .. }));
    }

    #[test]
    fn test_owner_only() {
        let err = parse_repository_url("https://github.com/acme", "github.com").unwrap_err();
        assert!(matches!(err, UrlError::MissingPath(_)));

        let err = parse_repository_url("https://github.com//acme", "github.com").unwrap_err();
        assert!(matches!(err, UrlError::MissingPath(_)));
    }

    #[test]
    fn test_garbage() {
        let err = parse_repository_url("not a url", "github.com").unwrap_err();
        assert!(matches!(err, UrlError::Parse(_)));
    }
}
