use std::time::Duration;

use async_trait::async_trait;

use super::model::{ContentItem, ContentProvider, Page, ProviderError};

const FEED_DELAY: Duration = Duration::from_millis(1000);
const TRENDING_DELAY: Duration = Duration::from_millis(800);
const SEARCH_DELAY: Duration = Duration::from_millis(500);

const PAGE_SIZE: usize = 4;

/// Synthetic in-memory provider. Answers after artificial delays so the
/// fetch lifecycle behaves like a remote backend without any network I/O.
pub struct MockContentProvider {
    feed: Vec<ContentItem>,
    trending: Vec<ContentItem>,
    page_size: usize,
    delayed: bool,
}

impl Default for MockContentProvider {
    fn default() -> Self {
        Self::with_delays(true)
    }
}

impl std::fmt::Debug for MockContentProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockContentProvider")
            .field("feed", &self.feed.len())
            .field("trending", &self.trending.len())
            .finish()
    }
}

impl MockContentProvider {
    /// Variant without artificial delays.
    pub fn instant() -> Self {
        Self::with_delays(false)
    }

    fn with_delays(delayed: bool) -> Self {
        let feed = serde_json::from_str(FEED_CATALOG).expect("mock feed catalog is valid JSON");
        let trending =
            serde_json::from_str(TRENDING_CATALOG).expect("mock trending catalog is valid JSON");
        Self {
            feed,
            trending,
            page_size: PAGE_SIZE,
            delayed,
        }
    }

    async fn simulate(&self, latency: Duration) {
        if self.delayed {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl ContentProvider for MockContentProvider {
    async fn fetch_page(&self, page: u32, categories: Vec<String>) -> Result<Page, ProviderError> {
        self.simulate(FEED_DELAY).await;
        let filtered: Vec<ContentItem> = self
            .feed
            .iter()
            .filter(|item| categories.is_empty() || categories.iter().any(|c| c == &item.category))
            .cloned()
            .collect();
        let start = page.saturating_sub(1) as usize * self.page_size;
        let items: Vec<ContentItem> = filtered
            .iter()
            .skip(start)
            .take(self.page_size)
            .cloned()
            .collect();
        let has_more = start + self.page_size < filtered.len();
        Ok(Page { items, has_more })
    }

    async fn fetch_trending(&self) -> Result<Vec<ContentItem>, ProviderError> {
        self.simulate(TRENDING_DELAY).await;
        Ok(self.trending.clone())
    }

    async fn search(&self, query: String) -> Result<Vec<ContentItem>, ProviderError> {
        self.simulate(SEARCH_DELAY).await;
        let needle = query.to_lowercase();
        Ok(self
            .feed
            .iter()
            .chain(self.trending.iter())
            .filter(|item| {
                item.title.to_lowercase().contains(&needle)
                    || item.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }
}

const FEED_CATALOG: &str = r##"[
  {
    "id": "n1",
    "kind": "news",
    "title": "Quantum Chip Clears Error-Correction Hurdle",
    "description": "A research lab demonstrates a logical qubit that outlives its physical parts, a long-sought milestone.",
    "image_url": "https://images.example.com/quantum-chip.jpg",
    "external_url": "https://news.example.com/quantum-chip",
    "category": "technology",
    "published_at": "2024-06-28T10:00:00Z"
  },
  {
    "id": "n2",
    "kind": "news",
    "title": "Open-Source Maintainers Push Back on AI Scrapers",
    "description": "Package registries roll out rate limits after a wave of automated crawling slowed downloads worldwide.",
    "image_url": "https://images.example.com/registry.jpg",
    "category": "technology",
    "published_at": "2024-06-28T09:15:00Z"
  },
  {
    "id": "m1",
    "kind": "movie",
    "title": "Signal Lost",
    "description": "A deep-space rescue thriller told entirely through the crew's comm transcripts.",
    "image_url": "https://images.example.com/signal-lost.jpg",
    "external_url": "https://movies.example.com/signal-lost",
    "category": "entertainment",
    "published_at": "2024-06-28T08:30:00Z"
  },
  {
    "id": "s1",
    "kind": "social",
    "title": "#BuildInPublic hits one million posts",
    "description": "Makers share revenue dashboards and launch diaries as the tag crosses a symbolic threshold.",
    "image_url": "https://images.example.com/buildinpublic.jpg",
    "category": "technology",
    "published_at": "2024-06-28T07:45:00Z"
  },
  {
    "id": "n3",
    "kind": "news",
    "title": "City League Final Decided in Extra Time",
    "description": "A stoppage-time header settles the closest title race in a decade.",
    "image_url": "https://images.example.com/league-final.jpg",
    "category": "sports",
    "published_at": "2024-06-27T21:10:00Z"
  },
  {
    "id": "m2",
    "kind": "movie",
    "title": "The Cartographer's Daughter",
    "description": "A period drama about the mapmakers who charted a coastline that kept moving.",
    "image_url": "https://images.example.com/cartographer.jpg",
    "category": "entertainment",
    "published_at": "2024-06-27T18:00:00Z"
  },
  {
    "id": "s2",
    "kind": "social",
    "title": "Marathon training threads are taking over",
    "description": "Week-by-week training logs become the most-shared format of the summer running season.",
    "image_url": "https://images.example.com/marathon.jpg",
    "category": "sports",
    "published_at": "2024-06-27T16:20:00Z"
  },
  {
    "id": "n4",
    "kind": "news",
    "title": "Coral Nursery Reports Record Survival Rates",
    "description": "Heat-tolerant fragments outperform expectations in the first large-scale reef transplant.",
    "image_url": "https://images.example.com/coral.jpg",
    "external_url": "https://news.example.com/coral-nursery",
    "category": "environment",
    "published_at": "2024-06-27T12:40:00Z"
  },
  {
    "id": "n5",
    "kind": "news",
    "title": "Compact Fusion Startup Hits Plasma Milestone",
    "description": "The reactor sustained a stable plasma for a full minute, doubling its previous best run.",
    "image_url": "https://images.example.com/fusion.jpg",
    "category": "technology",
    "published_at": "2024-06-27T09:05:00Z"
  }
]"##;

const TRENDING_CATALOG: &str = r##"[
  {
    "id": "t1",
    "kind": "news",
    "title": "Climate Summit Agrees on Grid Storage Fund",
    "description": "Delegates back a joint fund for long-duration storage after a marathon final session.",
    "image_url": "https://images.example.com/summit.jpg",
    "external_url": "https://news.example.com/summit-fund",
    "category": "environment",
    "published_at": "2024-06-28T11:00:00Z"
  },
  {
    "id": "t2",
    "kind": "movie",
    "title": "Harbor Lights Breaks Opening-Weekend Records",
    "description": "The ensemble drama posts the biggest summer opening since the pandemic.",
    "image_url": "https://images.example.com/harbor-lights.jpg",
    "category": "entertainment",
    "published_at": "2024-06-28T10:30:00Z"
  },
  {
    "id": "t3",
    "kind": "social",
    "title": "#RepairDontReplace trends after teardown video",
    "description": "A ten-minute laptop repair clip sparks a wave of fix-it-yourself posts.",
    "image_url": "https://images.example.com/repair.jpg",
    "category": "technology",
    "published_at": "2024-06-28T09:50:00Z"
  },
  {
    "id": "t4",
    "kind": "news",
    "title": "Transfer Window Opens with a Record Bid",
    "description": "The fee for the young midfielder eclipses last year's record within hours.",
    "image_url": "https://images.example.com/transfer.jpg",
    "category": "sports",
    "published_at": "2024-06-28T08:10:00Z"
  }
]"##;
