use serde::Serialize;
use serde_json::{Number, Value};

use crate::property::{HotelClass, Property};
use crate::query::SearchQuery;

/// At most this many upstream properties are looked at per search.
pub const MAX_HOTELS: usize = 10;
/// At most this many source images are looked at per property.
pub const MAX_IMAGES: usize = 6;

/// Simplified hotel listing handed back to callers.
///
/// Missing upstream data stays `null` here; nothing is rejected for being partial.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelRecord {
    pub name: String,
    pub description: String,
    pub property_token: String,
    pub rating: Option<f64>,
    pub review_count: Option<u64>,
    pub stars: Option<HotelClass>,
    /// Nightly price display string, e.g. `"$152"`.
    pub price: Option<String>,
    pub price_per_night: Option<Number>,
    pub total_price: Option<Number>,
    pub currency: String,
    pub location: HotelLocation,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub check_in: String,
    pub check_out: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelLocation {
    pub address: String,
    pub neighborhood: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl HotelRecord {
    pub fn from_property(prop: Property, query: &SearchQuery) -> Self {
        let images = prop.image_urls(MAX_IMAGES);
        let gps = prop.gps_coordinates.unwrap_or_default();
        let (price, price_per_night) = match prop.rate_per_night {
            Some(rate) => (rate.lowest, rate.extracted_lowest),
            None => (None, None),
        };

        HotelRecord {
            name: prop.name.unwrap_or_else(|| "Unknown".to_string()),
            description: prop.description.unwrap_or_default(),
            property_token: prop.property_token.unwrap_or_default(),
            rating: prop.overall_rating,
            review_count: prop.reviews,
            stars: prop.hotel_class,
            price,
            price_per_night,
            total_price: prop.total_rate.and_then(|rate| rate.extracted_lowest),
            currency: query.currency.clone(),
            location: HotelLocation {
                address: prop.address.unwrap_or_default(),
                neighborhood: prop.neighborhood.unwrap_or_default(),
                latitude: gps.latitude,
                longitude: gps.longitude,
            },
            amenities: prop.amenities,
            images,
            check_in: query.stay.check_in.clone(),
            check_out: query.stay.check_out.clone(),
        }
    }

    /// Unrated records always pass.
    pub fn meets_rating(&self, min_rating: Option<f64>) -> bool {
        match (min_rating, self.rating) {
            (Some(min), Some(rating)) => rating >= min,
            _ => true,
        }
    }
}

/// Turns the upstream `properties` array into hotel records.
///
/// Only the first `MAX_HOTELS` entries are considered, in upstream order.
/// Each one is fully extracted before the rating filter runs on it. A field
/// of the wrong type only blanks that field; entries that are not objects
/// at all are skipped.
pub fn normalize(properties: &[Value], query: &SearchQuery) -> Vec<HotelRecord> {
    let mut hotels = Vec::new();

    for (idx, raw) in properties.iter().take(MAX_HOTELS).enumerate() {
        let prop = match Property::from_value(raw) {
            Ok(prop) => prop,
            Err(e) => {
                tracing::warn!("Skipping property {}: {}", idx + 1, e);
                continue;
            }
        };

        tracing::debug!(
            "Processing property {}: {} ({} raw images)",
            idx + 1,
            prop.name.as_deref().unwrap_or("Unknown"),
            prop.images.len()
        );

        let hotel = HotelRecord::from_property(prop, query);
        tracing::debug!("  Extracted images: {:?}", hotel.images);

        if !hotel.meets_rating(query.min_rating) {
            tracing::debug!(
                "  Skipped due to rating filter (rating={:?}, min={:?})",
                hotel.rating,
                query.min_rating
            );
            continue;
        }

        hotels.push(hotel);
    }

    hotels
}
