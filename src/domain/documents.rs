use std::fmt;

/// A named JSON document in the content store.
///
/// The file name doubles as the cache key, so every logical document maps to
/// exactly one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Document {
    Games,
    Ads,
    SeoSettings,
    HomepageContent,
    FooterContent,
    FeaturedGames,
    Categories,
}

impl Document {
    pub const ALL: [Document; 7] = [
        Document::Games,
        Document::Ads,
        Document::SeoSettings,
        Document::HomepageContent,
        Document::FooterContent,
        Document::FeaturedGames,
        Document::Categories,
    ];

    pub const fn file_name(self) -> &'static str {
        match self {
            Document::Games => "games.json",
            Document::Ads => "ads.json",
            Document::SeoSettings => "seo-settings.json",
            Document::HomepageContent => "homepage-content.json",
            Document::FooterContent => "footer-content.json",
            Document::FeaturedGames => "featured-games.json",
            Document::Categories => "categories.json",
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn file_names_are_unique() {
        let names: HashSet<_> = Document::ALL.iter().map(|doc| doc.file_name()).collect();
        assert_eq!(names.len(), Document::ALL.len());
    }
}
