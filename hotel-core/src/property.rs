use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::lenient::{each_or_default, each_valid, or_default};

/// One entry of the upstream `properties` array.
///
/// Every field is optional and decoded on its own: the upstream omits
/// whatever it does not know about a listing, sometimes sends an explicit
/// `null`, and now and then a value of an unexpected type. Any of those
/// leaves just that field empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Property {
    #[serde(deserialize_with = "or_default")]
    pub name: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub description: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub property_token: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub overall_rating: Option<f64>,
    #[serde(deserialize_with = "or_default")]
    pub reviews: Option<u64>,
    #[serde(deserialize_with = "or_default")]
    pub hotel_class: Option<HotelClass>,
    #[serde(deserialize_with = "or_default")]
    pub address: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub neighborhood: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub gps_coordinates: Option<GpsCoordinates>,
    #[serde(deserialize_with = "each_valid")]
    pub amenities: Vec<String>,
    /// Unreadable images keep their slot so the image limit still counts them.
    #[serde(deserialize_with = "each_or_default")]
    pub images: Vec<PropertyImage>,
    #[serde(deserialize_with = "or_default")]
    pub rate_per_night: Option<Rate>,
    #[serde(deserialize_with = "or_default")]
    pub total_rate: Option<Rate>,
}

impl Property {
    /// Fails only when `value` is not a JSON object.
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        if !value.is_object() {
            return Err(serde_json::Error::custom(format!(
                "expected a property object, found {}",
                kind(value)
            )));
        }
        Property::deserialize(value)
    }

    /// Image URLs in source order: up to `limit` source images are looked at,
    /// each yielding its thumbnail or else its original. Images with neither
    /// are dropped, so fewer than `limit` URLs may come back.
    pub fn image_urls(&self, limit: usize) -> Vec<String> {
        self.images
            .iter()
            .take(limit)
            .filter_map(PropertyImage::url)
            .map(str::to_string)
            .collect()
    }
}

/// Star class as sent upstream: a number (`4`) or a label (`"4-star hotel"`).
/// Numbers are kept as sent, so `4` does not come back as `4.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HotelClass {
    Stars(Number),
    Label(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GpsCoordinates {
    #[serde(deserialize_with = "or_default")]
    pub latitude: Option<f64>,
    #[serde(deserialize_with = "or_default")]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PropertyImage {
    #[serde(deserialize_with = "or_default")]
    pub thumbnail: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub original_image: Option<String>,
}

impl PropertyImage {
    pub fn url(&self) -> Option<&str> {
        non_empty(&self.thumbnail).or_else(|| non_empty(&self.original_image))
    }
}

/// `rate_per_night` / `total_rate` object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Rate {
    /// Display string, e.g. `"$152"`.
    #[serde(deserialize_with = "or_default")]
    pub lowest: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub extracted_lowest: Option<Number>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
