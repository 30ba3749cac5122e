//! MediaWiki API client
//!
//! A small blocking client over the `action=query` and `action=parse`
//! endpoints: revision text for the fetch stage, section listings and
//! per-section wikitext for the WikiProject directory parser. Responses
//! are parsed defensively from `serde_json::Value` since the API shape
//! varies across wikis and versions.

mod error;

pub use error::FetchError;

use serde_json::Value;

/// User agent sent with every API request.
pub const USER_AGENT: &str = concat!("etiquetar/", env!("CARGO_PKG_VERSION"));

/// Which revision of a page to fetch text from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevisionSelect {
    /// Most recent revision (article-time text).
    Latest,
    /// First revision (draft-time text).
    First,
}

impl std::str::FromStr for RevisionSelect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "latest" => Ok(RevisionSelect::Latest),
            "first" => Ok(RevisionSelect::First),
            _ => Err(format!(
                "Unknown revision selector: {s}. Valid selectors: latest, first"
            )),
        }
    }
}

/// One revision of a page, as returned by the query API.
#[derive(Debug, Clone)]
pub struct RevisionDoc {
    pub page_title: String,
    pub rev_id: Option<u64>,
    pub text: String,
}

/// One entry of a page's section listing.
#[derive(Debug, Clone)]
pub struct SectionInfo {
    /// Heading text.
    pub line: String,
    /// Table-of-contents nesting level (1 for top-level headings).
    pub toclevel: u32,
    /// API section index, used to fetch the section's wikitext.
    pub index: String,
    /// Page the section was transcluded from.
    pub fromtitle: String,
}

/// Source of section listings and wikitext.
///
/// The directory parser works against this trait so it can be driven from
/// canned wikitext in tests.
pub trait PageSource {
    fn sections(&self, page: &str) -> error::Result<Vec<SectionInfo>>;
    fn section_wikitext(&self, page: &str, index: &str) -> error::Result<Option<String>>;
}

/// Source of revision text, keyed by page title.
///
/// The fetch stage works against this trait so its ordering and
/// drop/count behavior can be tested without a live API.
pub trait RevisionSource {
    /// Revision text for a page title; `None` when the page is missing.
    fn revision(&self, title: &str, select: RevisionSelect)
        -> error::Result<Option<RevisionDoc>>;
}

/// Blocking MediaWiki API client.
pub struct MwClient {
    api_url: String,
    client: reqwest::blocking::Client,
}

impl MwClient {
    /// Create a client for a wiki host, e.g. `https://en.wikipedia.org`.
    pub fn new(api_host: &str) -> error::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::HttpError {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            api_url: format!("{}/w/api.php", api_host.trim_end_matches('/')),
            client,
        })
    }

    fn get(&self, page: &str, params: &[(&str, &str)]) -> error::Result<Value> {
        let mut query: Vec<(&str, &str)> = vec![("format", "json"), ("formatversion", "2")];
        query.extend_from_slice(params);

        let response = self
            .client
            .get(&self.api_url)
            .query(&query)
            .send()
            .map_err(|e| FetchError::HttpError {
                message: format!("Request for {page} failed: {e}"),
            })?;

        if !response.status().is_success() {
            return Err(FetchError::HttpError {
                message: format!("API returned {} for {page}", response.status()),
            });
        }

        let body: Value = response.json().map_err(|e| FetchError::ParseError {
            page: page.to_string(),
            message: format!("invalid JSON: {e}"),
        })?;

        if let Some(err) = body.get("error") {
            let message = err
                .get("info")
                .and_then(Value::as_str)
                .unwrap_or("unspecified API error")
                .to_string();
            return Err(FetchError::ApiError {
                page: page.to_string(),
                message,
            });
        }

        Ok(body)
    }

    /// Fetch revision text for a page title, following redirects.
    ///
    /// Returns `None` when the page or the revision does not exist.
    pub fn page_revision(
        &self,
        title: &str,
        select: RevisionSelect,
    ) -> error::Result<Option<RevisionDoc>> {
        let mut params = vec![
            ("action", "query"),
            ("prop", "revisions"),
            ("rvprop", "content|ids"),
            ("rvslots", "main"),
            ("redirects", "1"),
            ("titles", title),
        ];
        if select == RevisionSelect::First {
            params.push(("rvdir", "newer"));
            params.push(("rvlimit", "1"));
        }

        let body = self.get(title, &params)?;
        Ok(parse_revision(title, &body))
    }

    /// List the sections of a page via the parse API.
    pub fn page_sections(&self, page: &str) -> error::Result<Vec<SectionInfo>> {
        let body = self.get(
            page,
            &[("action", "parse"), ("prop", "sections"), ("page", page)],
        )?;

        let sections = body
            .pointer("/parse/sections")
            .and_then(Value::as_array)
            .ok_or_else(|| FetchError::ParseError {
                page: page.to_string(),
                message: "missing 'parse.sections' array".to_string(),
            })?;

        Ok(sections.iter().filter_map(parse_section_info).collect())
    }

    /// Fetch the wikitext of a single section of a page.
    pub fn page_section_wikitext(
        &self,
        page: &str,
        index: &str,
    ) -> error::Result<Option<String>> {
        let body = self.get(
            page,
            &[
                ("action", "parse"),
                ("prop", "wikitext"),
                ("page", page),
                ("section", index),
            ],
        )?;

        Ok(body
            .pointer("/parse/wikitext")
            .and_then(wikitext_value)
            .map(String::from))
    }
}

impl PageSource for MwClient {
    fn sections(&self, page: &str) -> error::Result<Vec<SectionInfo>> {
        self.page_sections(page)
    }

    fn section_wikitext(&self, page: &str, index: &str) -> error::Result<Option<String>> {
        self.page_section_wikitext(page, index)
    }
}

impl RevisionSource for MwClient {
    fn revision(
        &self,
        title: &str,
        select: RevisionSelect,
    ) -> error::Result<Option<RevisionDoc>> {
        self.page_revision(title, select)
    }
}

impl std::fmt::Debug for MwClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MwClient")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

/// Extract the first page's first revision from a query response.
fn parse_revision(title: &str, body: &Value) -> Option<RevisionDoc> {
    let page = body.pointer("/query/pages")?.as_array()?.first()?;
    if page.get("missing").map(is_truthy).unwrap_or(false) {
        return None;
    }

    let page_title = page
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or(title)
        .to_string();
    let rev = page.get("revisions")?.as_array()?.first()?;
    let rev_id = rev.get("revid").and_then(Value::as_u64);

    // formatversion=2 with rvslots nests content under slots.main; older
    // responses put it under '*' on the revision itself.
    let text = rev
        .pointer("/slots/main/content")
        .or_else(|| rev.get("*"))
        .and_then(Value::as_str)?
        .to_string();

    Some(RevisionDoc {
        page_title,
        rev_id,
        text,
    })
}

fn parse_section_info(value: &Value) -> Option<SectionInfo> {
    Some(SectionInfo {
        line: value.get("line")?.as_str()?.to_string(),
        toclevel: value.get("toclevel")?.as_u64()? as u32,
        index: section_index(value.get("index")?)?,
        fromtitle: value
            .get("fromtitle")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

// The API emits section indexes as strings, but transcluded sections can
// carry prefixed forms ("T-3") and some wikis emit bare numbers.
fn section_index(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn wikitext_value(value: &Value) -> Option<&str> {
    // formatversion=2 gives a string, v1 wraps it as {"*": "..."}.
    value.as_str().or_else(|| value.get("*")?.as_str())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Null => false,
        _ => true,
    }
}
