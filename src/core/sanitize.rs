// src/core/sanitize.rs

/// Collapse runs of whitespace into one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Last non-empty path segment of a URL, without query or fragment.
/// `https://orcid.org/0000-0002-1825-0097/` → `0000-0002-1825-0097`
pub fn last_path_segment(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next()?;
    path.rsplit('/')
        .map(str::trim)
        .find(|seg| !seg.is_empty())
        .filter(|seg| !seg.contains(':'))
        .map(|seg| seg.to_string())
}

/// Value of `key` in the query string of `url`.
pub fn query_param(url: &str, key: &str) -> Option<String> {
    let query = url.split_once('?')?.1;
    let query = query.split('#').next().unwrap_or(query);
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_ws_collapses_and_trims() {
        assert_eq!(normalize_ws("  a \n\t b  "), "a b");
    }

    #[test]
    fn last_path_segment_variants() {
        assert_eq!(
            last_path_segment("https://orcid.org/0000-0002-1825-0097/").as_deref(),
            Some("0000-0002-1825-0097")
        );
        assert_eq!(
            last_path_segment("https://orcid.org/0000-0002-1825-0097?lang=es").as_deref(),
            Some("0000-0002-1825-0097")
        );
        assert_eq!(last_path_segment("https://"), None);
    }

    #[test]
    fn query_param_finds_key() {
        let url = "https://scholar.google.com/citations?hl=es&user=xKa-ixAAAAAJ#top";
        assert_eq!(query_param(url, "user").as_deref(), Some("xKa-ixAAAAAJ"));
        assert_eq!(query_param(url, "missing"), None);
    }
}
