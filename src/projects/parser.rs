//! On-wiki WikiProject directory parser
//!
//! Walks the directory root page section by section, follows each
//! top-level category to its dedicated sub-page, and extracts project
//! listings from the `Directory/WikiProject` template tables. Projects
//! whose table row carries `listed-in` are canonical elsewhere and
//! skipped; "See the full listing" sections are followed recursively.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::{Category, Entry, Project, Taxonomy};
use crate::cli::{log, LogLevel};
use crate::mwapi::{FetchError, PageSource, SectionInfo};

/// Root of the on-wiki directory.
pub const DIRECTORY_PAGE: &str = "Wikipedia:WikiProject_Council/Directory";

static MAIN_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[Wikipedia:WikiProject Council/Directory/([A-Za-z_, ]+)\|([A-Za-z_, ]+)\]\]=")
        .expect("Invalid main heading regex")
});
static LISTING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"See the full listing \[\[Wikipedia:WikiProject Council/Directory/([A-Za-z_,/ ]+)")
        .expect("Invalid listing regex")
});
static NEXT_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(.+)[=]{2,}").expect("Invalid heading regex"));
static PROJECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        "\\{\\{Wikipedia:WikiProject Council/Directory/WikiProject\n\
         \\|project = ([a-zA-Z_: -]+)\n\
         \\|shortname = ([a-zA-Z() -]+)\n\
         \\|active = (yes|no)\n([^}]*)\\}\\}",
    )
    .expect("Invalid project template regex")
});
static LISTED_IN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"listed-in = ([A-Za-z#/:_ ]+)").expect("Invalid listed-in regex"));

/// Directory parser over any [`PageSource`].
pub struct DirectoryParser<'a, S: PageSource> {
    source: &'a S,
    root: String,
    level: LogLevel,
}

impl<'a, S: PageSource> DirectoryParser<'a, S> {
    pub fn new(source: &'a S, level: LogLevel) -> Self {
        Self::with_root(source, DIRECTORY_PAGE, level)
    }

    /// Parse a directory rooted at a non-default page (other wikis).
    pub fn with_root(source: &'a S, root: impl Into<String>, level: LogLevel) -> Self {
        Self {
            source,
            root: root.into(),
            level,
        }
    }

    /// Parse the full directory into a taxonomy.
    pub fn parse(&self) -> Result<Taxonomy, FetchError> {
        log(self.level, LogLevel::Verbose, "Parsing WikiProject directory");
        let sections = self.source.sections(&self.root)?;

        let mut taxonomy = Taxonomy::new();
        let mut projects_started = false;
        for sec in &sections {
            // Top-level headings bracket the category run: everything
            // before the first category is preamble, the next one after
            // the run is the footer.
            if sec.toclevel == 1 {
                if projects_started {
                    break;
                }
                continue;
            }
            projects_started = true;

            let mut category = Category {
                name: sec.line.replace("&nbsp;", ""),
                root_url: sec.fromtitle.clone(),
                index: sec.index.clone(),
                url: None,
                topics: BTreeMap::new(),
            };

            if let Some(text) = self.source.section_wikitext(&self.root, &sec.index)? {
                if let Some(caps) = MAIN_HEADING_RE.captures(&text) {
                    let url = format!("{}/{}", self.root, &caps[1]);
                    log(
                        self.level,
                        LogLevel::Verbose,
                        &format!("  Fetching entries for section: {}", category.name),
                    );
                    match self.source.sections(&url) {
                        Ok(subsections) => {
                            let (topics, _) = self.subcategories(&url, &subsections, 0, 0)?;
                            category.url = Some(url);
                            category.topics = topics;
                        }
                        Err(e) => {
                            eprintln!("Warning: skipping {url}: {e}");
                        }
                    }
                }
            }

            taxonomy.insert(sec.line.clone(), category);
        }

        Ok(taxonomy)
    }

    /// Walk a section listing at a given nesting level.
    ///
    /// Returns the entries found plus the index of the first section that
    /// belongs to a shallower level.
    fn subcategories(
        &self,
        page: &str,
        sections: &[SectionInfo],
        start: usize,
        level: u32,
    ) -> Result<(BTreeMap<String, Entry>, usize), FetchError> {
        let mut entries = BTreeMap::new();
        let mut prev_topic: Option<String> = None;
        let mut idx = start;

        while idx < sections.len() {
            let depth = sections[idx].toclevel.saturating_sub(1);
            if depth > level {
                let (nested, next_idx) = self.subcategories(page, sections, idx, level + 1)?;
                idx = next_idx;
                if !nested.is_empty() {
                    if let Some(Entry::Category(prev)) =
                        prev_topic.as_ref().and_then(|name| entries.get_mut(name))
                    {
                        prev.topics.extend(nested);
                    }
                }
                continue;
            }
            if depth < level {
                return Ok((entries, idx));
            }

            let sec = &sections[idx];
            let entry = Category {
                name: sec.line.clone(),
                root_url: sec.fromtitle.clone(),
                index: sec.index.clone(),
                url: None,
                topics: self.section_intro_projects(page, &sec.index)?,
            };
            prev_topic = Some(entry.name.clone());
            entries.insert(entry.name.clone(), Entry::Category(entry));
            idx += 1;
        }

        Ok((entries, sections.len()))
    }

    /// Extract the projects listed in a section's intro, before any
    /// nested heading. Leaf subsections are handled by the caller.
    fn section_intro_projects(
        &self,
        page: &str,
        index: &str,
    ) -> Result<BTreeMap<String, Entry>, FetchError> {
        let Some(wikitext) = self.source.section_wikitext(page, index)? else {
            return Ok(BTreeMap::new());
        };

        // Drop the heading line, then stop at the next nested heading.
        let body = wikitext.split_once('\n').map(|(_, rest)| rest).unwrap_or("");
        let body = match NEXT_HEADING_RE.find(body) {
            Some(m) => &body[..m.start()],
            None => body,
        };

        let projects = projects_from_table(body);
        if !projects.is_empty() {
            return Ok(projects);
        }

        // No table here; the section may defer to a full listing page.
        if let Some(caps) = LISTING_RE.captures(body) {
            let listing_page = format!("{}/{}", self.root, &caps[1]);
            let sections = self.source.sections(&listing_page)?;
            let (entries, _) = self.subcategories(&listing_page, &sections, 0, 0)?;
            return Ok(entries);
        }

        Ok(BTreeMap::new())
    }
}

/// Extract individual projects from a `Directory/WikiProject` table.
fn projects_from_table(wikitext: &str) -> BTreeMap<String, Entry> {
    let mut projects = BTreeMap::new();
    for caps in PROJECT_RE.captures_iter(wikitext) {
        // A listed-in row is canonical in another category.
        if LISTED_IN_RE.is_match(&caps[4]) {
            continue;
        }
        projects.insert(
            caps[2].to_string(),
            Entry::Project(Project {
                name: caps[1].to_string(),
                shortname: caps[2].to_string(),
                active: &caps[3] == "yes",
            }),
        );
    }
    projects
}
