use serde::{Deserialize, Serialize};

/// The static-ish content sections the storefront pulls from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    Posts,
    Jobs,
    Faqs,
    Help,
    Press,
    SizeGuide,
}

impl ContentKind {
    pub const ALL: [ContentKind; 6] = [
        ContentKind::Posts,
        ContentKind::Jobs,
        ContentKind::Faqs,
        ContentKind::Help,
        ContentKind::Press,
        ContentKind::SizeGuide,
    ];

    /// Path segment under `/api/v1/`.
    #[must_use]
    pub fn path_segment(self) -> &'static str {
        match self {
            ContentKind::Posts => "posts",
            ContentKind::Jobs => "jobs",
            ContentKind::Faqs => "faqs",
            ContentKind::Help => "help",
            ContentKind::Press => "press",
            ContentKind::SizeGuide => "size-guide",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// One blog post, job opening, FAQ, help article, press release or
/// size-guide row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub published_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_segments_are_unique() {
        let mut segments: Vec<_> = ContentKind::ALL.iter().map(|k| k.path_segment()).collect();
        segments.sort_unstable();
        segments.dedup();
        assert_eq!(segments.len(), ContentKind::ALL.len());
    }

    #[test]
    fn size_guide_uses_hyphenated_path() {
        assert_eq!(ContentKind::SizeGuide.path_segment(), "size-guide");
        assert_eq!(ContentKind::SizeGuide.to_string(), "size-guide");
    }
}
