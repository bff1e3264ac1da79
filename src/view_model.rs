use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::environment::model::{ContentId, ContentItem, ContentKind};

/// Display-ready projection of a [`ContentItem`] for one card in the grid.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContentCardViewModel {
    pub id: ContentId,
    pub kind: ContentKind,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub external_url: Option<url::Url>,
    /// Host of the outbound link, for the card footer.
    pub external_host: Option<String>,
    pub category: String,
    pub published: DateTime<Utc>,
    pub published_human: String,
    pub is_favorite: bool,
}

impl PartialEq for ContentCardViewModel {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.is_favorite == other.is_favorite
    }
}

impl Eq for ContentCardViewModel {}

impl ContentCardViewModel {
    pub fn new(item: &ContentItem) -> Self {
        let mut description = item.description.clone();
        if description.len() > 140 {
            description = description.chars().take(140).collect();
            description.push('…');
        }
        let external_host = item
            .external_url
            .as_ref()
            .and_then(|url| url.host_str())
            .map(|host| host.to_string());
        Self {
            id: item.id.clone(),
            kind: item.kind,
            title: item.title.clone(),
            description,
            image_url: item.image_url.clone(),
            external_url: item.external_url.clone(),
            external_host,
            category: item.category.clone(),
            published: item.published_at,
            published_human: format_datetime(&item.published_at),
            is_favorite: item.is_favorite,
        }
    }
}

pub fn format_datetime(date: &DateTime<Utc>) -> String {
    date.format("%b %e, %Y %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> ContentItem {
        ContentItem {
            id: ContentId::new("n1"),
            kind: ContentKind::News,
            title: "Quantum Chip".to_string(),
            description: "Short enough".to_string(),
            image_url: "https://images.example.com/n1.jpg".to_string(),
            external_url: Some("https://news.example.com/quantum".parse().unwrap()),
            category: "technology".to_string(),
            published_at: "2024-06-28T10:00:00Z".parse().unwrap(),
            is_favorite: false,
        }
    }

    #[test]
    fn test_card_carries_the_link_host() {
        let card = ContentCardViewModel::new(&item());
        assert_eq!(card.external_host.as_deref(), Some("news.example.com"));
        assert_eq!(card.published_human, "Jun 28, 2024 10:00");
    }

    #[test]
    fn test_long_descriptions_are_truncated() {
        let mut source = item();
        source.description = "x".repeat(200);
        let card = ContentCardViewModel::new(&source);
        assert_eq!(card.description.chars().count(), 141);
        assert!(card.description.ends_with('…'));
    }
}
