//! Pagination links carried in the `Link` response header.
//!
//! Canvas paginates collections with RFC 8288 links:
//!
//! ```text
//! Link: <https://host/api/v1/courses?page=2>; rel="next",
//!       <https://host/api/v1/courses?page=1>; rel="first"
//! ```

use reqwest::header::{HeaderMap, LINK};

/// Named relation links of one collection page. Every link is an absolute URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationLinks {
    /// The page after this one
    pub next: Option<String>,
    /// The page before this one
    pub previous: Option<String>,
    /// The first page
    pub first: Option<String>,
    /// The last page, when the server is willing to compute it
    pub last: Option<String>,
    /// This page
    pub current: Option<String>,
}

impl PaginationLinks {
    /// Collect links from every `Link` header in `headers`.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut links = Self::default();
        for value in headers.get_all(LINK) {
            if let Ok(value) = value.to_str() {
                links.merge_header(value);
            }
        }
        links
    }

    /// Parse a single `Link` header value.
    pub fn parse(value: &str) -> Self {
        let mut links = Self::default();
        links.merge_header(value);
        links
    }

    /// Check if there is a page after this one.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    fn merge_header(&mut self, value: &str) {
        for entry in split_entries(value) {
            if let Some((url, rels)) = parse_entry(entry) {
                for rel in rels.split_whitespace() {
                    self.assign(rel, &url);
                }
            }
        }
    }

    fn assign(&mut self, rel: &str, url: &str) {
        let slot = match rel.to_ascii_lowercase().as_str() {
            "next" => &mut self.next,
            "prev" | "previous" => &mut self.previous,
            "first" => &mut self.first,
            "last" => &mut self.last,
            "current" => &mut self.current,
            _ => return,
        };
        if slot.is_none() {
            *slot = Some(url.to_string());
        }
    }
}

/// Split on commas that sit outside `<...>`, since URLs may contain commas.
fn split_entries(value: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut in_url = false;
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in value.char_indices() {
        match c {
            '<' if !in_quotes => in_url = true,
            '>' if !in_quotes => in_url = false,
            '"' if !in_url => in_quotes = !in_quotes,
            ',' if !in_url && !in_quotes => {
                entries.push(&value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(&value[start..]);
    entries
}

/// Parse `<url>; rel="next"; foo=bar` into the URL and its `rel` value.
fn parse_entry(entry: &str) -> Option<(String, String)> {
    let entry = entry.trim();
    let rest = entry.strip_prefix('<')?;
    let end = rest.find('>')?;
    let url = rest[..end].trim();
    if url.is_empty() {
        return None;
    }

    let rel = rest[end + 1..].split(';').find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if name.trim().eq_ignore_ascii_case("rel") {
            Some(value.trim().trim_matches('"').to_string())
        } else {
            None
        }
    })?;

    Some((url.to_string(), rel))
}
