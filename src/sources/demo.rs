use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use crate::models::PropertyRecord;
use crate::sources::traits::PropertySource;

/// The five demo listings shipped with the app, embedded as JSON
const SEED_JSON: &str = r#"[
  {
    "id": 101,
    "name": "Oceanview Villa",
    "location": "Malibu, California",
    "price": 4500000,
    "size": 4500,
    "rating": 4.8,
    "bedrooms": 5,
    "bathrooms": 4,
    "image": "https://images.unsplash.com/photo-1512917774080-9991f1c4c750?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
    "description": "Stunning modern villa with panoramic ocean views. Features infinity pool, home theater, and smart home system."
  },
  {
    "id": 102,
    "name": "Downtown Penthouse",
    "location": "New York, NY",
    "price": 3200000,
    "size": 3200,
    "rating": 4.6,
    "bedrooms": 3,
    "bathrooms": 3,
    "image": "https://images.unsplash.com/photo-1493809842364-78817add7ffb?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
    "description": "Luxury penthouse in the heart of Manhattan. Floor-to-ceiling windows, private rooftop terrace, and 24/7 concierge."
  },
  {
    "id": 103,
    "name": "Mountain Retreat",
    "location": "Aspen, Colorado",
    "price": 2800000,
    "size": 5200,
    "rating": 4.9,
    "bedrooms": 6,
    "bathrooms": 5,
    "image": "https://images.unsplash.com/photo-1519643381401-22c77e60520e?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
    "description": "Rustic luxury in the Rocky Mountains. Features ski-in/ski-out access, heated floors, and a private hot tub."
  },
  {
    "id": 104,
    "name": "Historic Mansion",
    "location": "Charleston, South Carolina",
    "price": 3800000,
    "size": 6800,
    "rating": 4.7,
    "bedrooms": 7,
    "bathrooms": 6,
    "image": "https://images.unsplash.com/photo-1560518883-ce09059eeffa?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
    "description": "Exquisitely restored antebellum mansion with modern amenities. Formal gardens, carriage house, and original details."
  },
  {
    "id": 105,
    "name": "Beachfront Estate",
    "location": "Miami, Florida",
    "price": 5200000,
    "size": 5800,
    "rating": 4.9,
    "bedrooms": 8,
    "bathrooms": 7,
    "image": "https://images.unsplash.com/photo-1513558161293-cdaf765ed2fd?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
    "description": "Ultra-luxury beachfront compound with private dock, tennis court, and spa facilities."
  }
]"#;

/// Built-in demo source so a session can start with something to query
pub struct DemoSeed;

impl DemoSeed {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DemoSeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PropertySource for DemoSeed {
    async fn load(&self) -> Result<Vec<PropertyRecord>> {
        let records: Vec<PropertyRecord> =
            serde_json::from_str(SEED_JSON).context("Failed to parse embedded demo listings")?;
        debug!("Loaded {} demo listings", records.len());
        Ok(records)
    }

    fn source_name(&self) -> &'static str {
        "demo-seed"
    }
}
