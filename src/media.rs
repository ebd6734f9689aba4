//! Hero media items and the built-in catalogue shown when no playlist is configured.

use serde::Deserialize;

/// One rotation-eligible asset plus the caption shown over it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MediaItem {
    pub source: String,
    pub headline: String,
    #[serde(default)]
    pub subtext: Option<String>,
    #[serde(default)]
    pub cta_label: Option<String>,
}

impl MediaItem {
    pub fn new(source: impl Into<String>, headline: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            headline: headline.into(),
            subtext: None,
            cta_label: None,
        }
    }

    pub fn with_subtext(mut self, subtext: impl Into<String>) -> Self {
        self.subtext = Some(subtext.into());
        self
    }

    pub fn with_cta(mut self, label: impl Into<String>) -> Self {
        self.cta_label = Some(label.into());
        self
    }
}

const CATALOG: [(&str, &str, &str, &str); 9] = [
    ("video1.png", "3-AMS-CELMS Maintenance Services", "Delivering comprehensive services to commercial, military, and private operators.", "Learn More"),
    ("video2.png", "Expert Maintenance Teams", "Our highly trained staff ensures the highest quality service and uptime.", "Get Started"),
    ("video3.png", "Reliable & Efficient", "We provide timely maintenance to keep your operations running smoothly.", "Contact Us"),
    ("video4.png", "State-of-the-Art Facilities", "Our workshops are equipped with the latest technology for precision maintenance.", "Explore Facilities"),
    ("video5.png", "Global Reach", "We support operators worldwide with our extensive maintenance network.", "See Locations"),
    ("video6.png", "Cutting-Edge Tools", "Our team leverages the latest tools for precision and safety.", "Learn More"),
    ("video7.png", "Skilled Workforce", "Experienced engineers certified across multiple aircraft models.", "Get Started"),
    ("video8.png", "Rapid Turnaround", "Timely services to keep your operations flying smoothly.", "Contact Us"),
    ("video9.png", "Safety First", "Adhering to the highest safety and regulatory standards.", "Explore Facilities"),
];

/// The hero catalogue used when the configuration does not list its own items.
pub fn default_catalog() -> Vec<MediaItem> {
    CATALOG
        .iter()
        .map(|(source, headline, subtext, cta)| {
            MediaItem::new(*source, *headline)
                .with_subtext(*subtext)
                .with_cta(*cta)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_nine_captioned_items() {
        let items = default_catalog();
        assert_eq!(items.len(), 9);
        assert!(items.iter().all(|i| !i.headline.is_empty()));
        assert!(items.iter().all(|i| i.subtext.is_some() && i.cta_label.is_some()));
        assert_eq!(items[0].headline, "3-AMS-CELMS Maintenance Services");
    }

    #[test]
    fn optional_fields_default_to_none_when_deserialized() {
        let item: MediaItem = toml::from_str("source = \"a.png\"\nheadline = \"A\"").unwrap();
        assert_eq!(item, MediaItem::new("a.png", "A"));
    }
}
