//! Transaction icon catalogue
//!
//! Icons are emoji images served by the emoji-datasource CDN, addressed by
//! their Unicode code point.

const ICON_BASE_URL: &str = "https://cdn.jsdelivr.net/npm/emoji-datasource-apple/img/apple/64/";

/// A named group of icons with search keywords
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconCategory {
    pub title: &'static str,
    pub icons: Vec<String>,
    pub keywords: &'static [&'static str],
}

impl IconCategory {
    fn new(title: &'static str, start: u32, end: u32, keywords: &'static [&'static str]) -> Self {
        Self {
            title,
            icons: (start..=end).map(icon_url).collect(),
            keywords,
        }
    }

    /// Case-insensitive match against the title and keywords
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&query)
            || self.keywords.iter().any(|k| k.contains(query.as_str()))
    }
}

/// URL of the icon for a code point
pub fn icon_url(code_point: u32) -> String {
    format!("{}{:x}.png", ICON_BASE_URL, code_point)
}

/// All icon categories, in display order
pub fn categories() -> Vec<IconCategory> {
    vec![
        IconCategory::new(
            "Smileys & Emotion",
            0x1F600,
            0x1F64F,
            &["smile", "happy", "sad", "face", "emotion", "cry", "laugh"],
        ),
        IconCategory::new(
            "People & Body",
            0x1F466,
            0x1F478,
            &["people", "man", "woman", "boy", "girl", "human"],
        ),
        IconCategory::new(
            "Transport",
            0x1F680,
            0x1F6C0,
            &["car", "bus", "train", "plane", "travel", "vehicle", "rocket"],
        ),
        IconCategory::new(
            "Food & Drink",
            0x1F32D,
            0x1F37F,
            &["food", "drink", "fruit", "apple", "banana", "burger", "pizza", "vegetable"],
        ),
        IconCategory::new(
            "Money & Objects",
            0x1F4B0,
            0x1F4C0,
            &["money", "cash", "dollar", "bag", "credit", "card", "office"],
        ),
        IconCategory::new(
            "Activities & Flags",
            0x1F3A0,
            0x1F3C6,
            &["activity", "sport", "game", "ball", "music", "flag", "banner"],
        ),
    ]
}

/// Categories matching a search query (all of them for an empty query)
pub fn search(query: &str) -> Vec<IconCategory> {
    categories().into_iter().filter(|c| c.matches(query)).collect()
}

/// Icon used when the user doesn't pick one: the money bag
pub fn default_icon() -> String {
    icon_url(0x1F4B0)
}
