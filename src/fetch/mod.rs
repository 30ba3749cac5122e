//! Article text fetching
//!
//! Augments labeled observations with revision text from a MediaWiki API
//! so the extract stage can build feature caches. Pages that are missing,
//! too short to be articles, or redirects are dropped rather than passed
//! downstream.

use std::sync::LazyLock;

use regex::Regex;

use crate::cli::{log, LogLevel};
use crate::mwapi::{FetchError, RevisionSelect, RevisionSource};
use crate::observation::Observation;
use crate::parallel::map_ordered;

static REDIRECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^#redirect").expect("Invalid redirect regex"));

/// Minimum text length for a page to count as an article.
const MIN_ARTICLE_LEN: usize = 50;

/// True when revision text does not look like an actual article.
pub fn not_an_article(text: &str) -> bool {
    text.len() < MIN_ARTICLE_LEN || REDIRECT_RE.is_match(text)
}

/// Outcome counters for a fetch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FetchStats {
    pub fetched: usize,
    pub missing: usize,
    pub skipped: usize,
}

/// Fetch revision text for every observation, preserving input order.
///
/// Observations whose page is missing or whose text fails the article
/// filter are dropped from the output and counted in the stats.
pub fn fetch_texts<S: RevisionSource + Sync>(
    source: &S,
    select: RevisionSelect,
    observations: Vec<Observation>,
    threads: usize,
    level: LogLevel,
) -> Result<(Vec<Observation>, FetchStats), FetchError> {
    enum Outcome {
        Missing,
        Skipped,
        Fetched(Observation),
    }

    let fetched = map_ordered(observations, threads, |mut obs| {
        match source.revision(&obs.page_title, select)? {
            None => {
                log(
                    level,
                    LogLevel::Verbose,
                    &format!("  ? {} (no page found)", obs.page_title),
                );
                Ok(Outcome::Missing)
            }
            Some(doc) if not_an_article(&doc.text) => {
                log(
                    level,
                    LogLevel::Verbose,
                    &format!("  - {} (not an article)", obs.page_title),
                );
                Ok(Outcome::Skipped)
            }
            Some(doc) => {
                log(
                    level,
                    LogLevel::Verbose,
                    &format!("  . {} ({} chars)", obs.page_title, doc.text.len()),
                );
                obs.text = Some(doc.text);
                Ok(Outcome::Fetched(obs))
            }
        }
    })?;

    let mut stats = FetchStats::default();
    let mut out = Vec::new();
    for item in fetched {
        match item {
            Outcome::Missing => stats.missing += 1,
            Outcome::Skipped => stats.skipped += 1,
            Outcome::Fetched(obs) => {
                stats.fetched += 1;
                out.push(obs);
            }
        }
    }
    Ok((out, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mwapi::RevisionDoc;
    use std::collections::HashMap;

    struct StubSource {
        pages: HashMap<String, String>,
    }

    impl StubSource {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(title, text)| (title.to_string(), text.to_string()))
                    .collect(),
            }
        }
    }

    impl RevisionSource for StubSource {
        fn revision(
            &self,
            title: &str,
            _select: RevisionSelect,
        ) -> Result<Option<RevisionDoc>, FetchError> {
            Ok(self.pages.get(title).map(|text| RevisionDoc {
                page_title: title.to_string(),
                rev_id: Some(1),
                text: text.clone(),
            }))
        }
    }

    fn titled(title: &str) -> Observation {
        Observation::new(title)
    }

    fn article(subject: &str) -> String {
        format!("{subject} is a subject with enough text to clear the article filter.")
    }

    #[test]
    fn test_fetch_texts_drops_and_counts() {
        let stub = StubSource::new(&[
            ("Bread", &article("Bread")),
            ("Stub", "Too short."),
            ("Old name", "#REDIRECT [[Bread]] with padding well past the length threshold."),
            ("Jazz", &article("Jazz")),
        ]);
        let observations = vec![
            titled("Bread"),
            titled("Deleted page"),
            titled("Stub"),
            titled("Old name"),
            titled("Jazz"),
        ];

        let (fetched, stats) = fetch_texts(
            &stub,
            RevisionSelect::Latest,
            observations,
            1,
            LogLevel::Quiet,
        )
        .unwrap();

        let titles: Vec<&str> = fetched.iter().map(|o| o.page_title.as_str()).collect();
        assert_eq!(titles, vec!["Bread", "Jazz"]);
        assert!(fetched[0].text.as_deref().unwrap().starts_with("Bread"));
        assert_eq!(
            stats,
            FetchStats {
                fetched: 2,
                missing: 1,
                skipped: 2,
            }
        );
    }

    #[test]
    fn test_fetch_texts_preserves_order_across_threads() {
        let titles: Vec<String> = (0..40).map(|i| format!("Page {i}")).collect();
        let pages: Vec<(String, String)> = titles
            .iter()
            .map(|t| (t.clone(), article(t)))
            .collect();
        let stub = StubSource {
            pages: pages.into_iter().collect(),
        };
        let observations: Vec<Observation> =
            titles.iter().map(|t| titled(t)).collect();

        for threads in [1, 3, 8] {
            let (fetched, stats) = fetch_texts(
                &stub,
                RevisionSelect::Latest,
                observations.clone(),
                threads,
                LogLevel::Quiet,
            )
            .unwrap();
            let got: Vec<&str> = fetched.iter().map(|o| o.page_title.as_str()).collect();
            let want: Vec<&str> = titles.iter().map(String::as_str).collect();
            assert_eq!(got, want, "order changed with {threads} threads");
            assert_eq!(stats.fetched, titles.len());
        }
    }

    #[test]
    fn test_not_an_article_short_text() {
        assert!(not_an_article("Stub."));
        assert!(!not_an_article(&"long enough text ".repeat(10)));
    }

    #[test]
    fn test_not_an_article_redirect() {
        assert!(not_an_article("#REDIRECT [[Bread]] with enough padding to pass the length check"));
        assert!(not_an_article("#redirect [[Bread]] with enough padding to pass the length check"));
    }

    #[test]
    fn test_redirect_must_lead() {
        let text = "This page mentions #redirect mid-sentence but is otherwise a real article.";
        assert!(!not_an_article(text));
    }
}
