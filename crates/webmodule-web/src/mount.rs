//! Base path handling for mounted modules.

/// Join a module base path and a route path.
///
/// `("/main", "/")` gives `/main/`, `("/main", "/status")` gives
/// `/main/status`. An empty or `/` base leaves the route path unchanged.
pub fn join_path(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        return if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
    }

    let base = if base.starts_with('/') {
        base.to_string()
    } else {
        format!("/{}", base)
    };
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_module_root() {
        assert_eq!(join_path("/main", "/"), "/main/");
        assert_eq!(join_path("/main/", "/"), "/main/");
    }

    #[test]
    fn test_join_nested() {
        assert_eq!(join_path("/settings", "/wifi"), "/settings/wifi");
        assert_eq!(join_path("settings", "wifi"), "/settings/wifi");
    }

    #[test]
    fn test_join_empty_base() {
        assert_eq!(join_path("", "/api/status"), "/api/status");
        assert_eq!(join_path("/", "/"), "/");
        assert_eq!(join_path("", "favicon.ico"), "/favicon.ico");
    }
}
