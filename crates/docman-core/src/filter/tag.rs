use super::FilterCriterion;
use crate::document::Document;
use crate::error::Result;
use crate::tag::Tag;

/// Matches documents carrying every listed tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    tags: Vec<Tag>,
}

impl TagFilter {
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags = names.into_iter().map(Tag::new).collect::<Result<Vec<_>>>()?;
        Ok(Self::from_tags(tags))
    }

    pub fn from_tags(tags: impl IntoIterator<Item = Tag>) -> Self {
        let mut unique: Vec<Tag> = Vec::new();
        for tag in tags {
            if !unique.contains(&tag) {
                unique.push(tag);
            }
        }
        Self { tags: unique }
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }
}

impl FilterCriterion for TagFilter {
    fn matches(&self, document: &Document) -> bool {
        self.tags.iter().all(|t| document.has_tag(t.name()))
    }

    /// Number of extra tags the document carries
    fn accuracy(&self, document: &Document) -> u32 {
        let extra = document.tags().num_elements().saturating_sub(self.tags.len());
        u32::try_from(extra).unwrap_or(u32::MAX)
    }

    fn describe(&self) -> String {
        let names: Vec<&str> = self.tags.iter().map(|t| t.name()).collect();
        format!("tags [{}]", names.join(", "))
    }
}
