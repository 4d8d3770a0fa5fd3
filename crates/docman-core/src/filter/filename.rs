use super::FilterCriterion;
use crate::document::Document;
use crate::error::Result;
use crate::limits::{required_long, LongString};

/// Matches documents by filename.
///
/// Exact filters compare the whole name. Otherwise matching ignores ASCII case;
/// a pattern containing `*` must match the whole name with each `*` standing for
/// any run of characters, and a pattern without `*` matches any name containing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameFilter {
    name: LongString,
    exact: bool,
}

impl FilenameFilter {
    pub fn new(name: impl Into<String>, exact: bool) -> Result<Self> {
        Ok(Self {
            name: required_long("filename pattern", name)?,
            exact,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn is_exact(&self) -> bool {
        self.exact
    }
}

impl FilterCriterion for FilenameFilter {
    fn matches(&self, document: &Document) -> bool {
        let filename = document.filename();
        if self.exact {
            return filename == self.name.as_str();
        }

        let pattern = self.name.as_str().to_ascii_lowercase();
        let filename = filename.to_ascii_lowercase();
        if pattern.contains('*') {
            wildcard_match(&pattern, &filename)
        } else {
            filename.contains(&pattern)
        }
    }

    fn accuracy(&self, document: &Document) -> u32 {
        if self.exact {
            return 0;
        }
        let pattern_len = self.name.as_str().chars().count();
        let name_len = document.filename().chars().count();
        u32::try_from(pattern_len.abs_diff(name_len)).unwrap_or(u32::MAX)
    }

    fn describe(&self) -> String {
        if self.exact {
            format!("filename = {}", self.name)
        } else {
            format!("filename ~ {}", self.name)
        }
    }
}

/// Whole-string match where `*` matches any (possibly empty) sequence
fn wildcard_match(pattern: &str, text: &str) -> bool {
    let mut parts = pattern.split('*');
    // split always yields at least one part
    let first = parts.next().unwrap_or("");
    let Some(mut rest) = text.strip_prefix(first) else {
        return false;
    };

    let middle: Vec<&str> = parts.collect();
    let Some((last, middle)) = middle.split_last() else {
        // no `*` at all
        return rest.is_empty();
    };

    for part in middle.iter().filter(|p| !p.is_empty()) {
        match rest.find(part) {
            Some(pos) => rest = &rest[pos + part.len()..],
            None => return false,
        }
    }

    rest.len() >= last.len() && rest.ends_with(last)
}
