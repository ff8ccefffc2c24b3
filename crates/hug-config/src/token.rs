//! GitHub token resolution
//!
//! Tries, in order:
//! 1. The token from the configuration file
//! 2. `GITHUB_TOKEN`
//! 3. `GH_TOKEN`

/// Pick the GitHub token, falling back to the environment when the
/// configured one is empty
pub fn resolve_github_token(configured: &str) -> Option<String> {
    resolve_with(configured, |key| std::env::var(key).ok())
}

fn resolve_with(configured: &str, env: impl Fn(&str) -> Option<String>) -> Option<String> {
    let configured = configured.trim();
    if !configured.is_empty() {
        return Some(configured.to_string());
    }

    ["GITHUB_TOKEN", "GH_TOKEN"].into_iter().find_map(|key| {
        env(key)
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .inspect(|_| log::debug!("Using GitHub token from {}", key))
    })
}
