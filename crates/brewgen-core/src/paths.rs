//! URL path helpers.

/// Extract the filename from a URL, ignoring any query string or fragment.
pub fn filename_from_url(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.split('/').next_back().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_from_url() {
        assert_eq!(
            filename_from_url("https://example.com/dl/v1.0/tool-linux.tar.gz"),
            "tool-linux.tar.gz"
        );
        assert_eq!(
            filename_from_url("https://example.com/tool.zip?token=abc#frag"),
            "tool.zip"
        );
        assert_eq!(filename_from_url("https://example.com/"), "");
        assert_eq!(filename_from_url("tool.deb"), "tool.deb");
    }
}
