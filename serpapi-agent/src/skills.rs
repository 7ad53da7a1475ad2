//! Skill dispatch: skill id -> operation -> JSON result.
//!
//! Every failure a skill can hit (bad input, missing credential, upstream
//! trouble) comes back as `{"success": false, "error": ...}`. Nothing here
//! surfaces as a protocol error.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use hotel_core::{
    normalize, DetailsParams, DetailsQuery, HotelRecord, SearchParams, SearchQuery,
};

use crate::serpapi::{SerpApiClient, SerpApiError};

pub const SEARCH_HOTELS_LIVE: &str = "search-hotels-live";
pub const GET_HOTEL_DETAILS: &str = "get-hotel-details";
pub const SOURCE: &str = "Google Hotels via SerpAPI";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skill {
    SearchHotelsLive,
    GetHotelDetails,
}

impl Skill {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            SEARCH_HOTELS_LIVE => Some(Skill::SearchHotelsLive),
            GET_HOTEL_DETAILS => Some(Skill::GetHotelDetails),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Skill::SearchHotelsLive => SEARCH_HOTELS_LIVE,
            Skill::GetHotelDetails => GET_HOTEL_DETAILS,
        }
    }
}

#[derive(Debug, Error)]
pub enum SkillError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Upstream(#[from] SerpApiError),
}

impl SkillError {
    fn invalid_params(skill: Skill, cause: serde_json::Error) -> Self {
        SkillError::Validation(format!("Invalid parameters for {}: {}", skill.id(), cause))
    }

    /// Message for the result payload. Configuration and validation
    /// problems read as-is; anything else is prefixed with what failed.
    fn result_message(&self, skill: Skill) -> String {
        match (self, skill) {
            (SkillError::Validation(msg), _) => msg.clone(),
            (SkillError::Upstream(SerpApiError::NotConfigured), _) => self.to_string(),
            (SkillError::Upstream(e @ SerpApiError::Http { .. }), Skill::SearchHotelsLive) => {
                e.to_string()
            }
            (SkillError::Upstream(e), Skill::SearchHotelsLive) => {
                format!("Failed to search hotels: {}", e)
            }
            (SkillError::Upstream(e), Skill::GetHotelDetails) => {
                format!("Failed to get hotel details: {}", e)
            }
        }
    }
}

/// Standard skill response: `success` plus either `error` or the payload
/// fields inlined next to it.
#[derive(Debug, Serialize)]
pub struct SkillResult<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub data: Option<T>,
}

impl<T: Serialize> SkillResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            data: None,
        }
    }

    pub fn into_value(self) -> Value {
        serde_json::to_value(&self).unwrap_or_else(|e| {
            json!({
                "success": false,
                "error": format!("Failed to serialize skill result: {}", e),
            })
        })
    }
}

/// Payload of a successful `search-hotels-live`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelListing {
    pub destination: String,
    pub check_in: String,
    pub check_out: String,
    pub hotel_count: usize,
    pub hotels: Vec<HotelRecord>,
    pub source: &'static str,
}

/// Payload of a successful `get-hotel-details`: the upstream document as-is.
#[derive(Debug, Serialize)]
pub struct HotelDetails {
    pub hotel: Value,
    pub source: &'static str,
}

#[derive(Debug, Clone)]
pub struct HotelSkills {
    client: SerpApiClient,
}

impl HotelSkills {
    pub fn new(client: SerpApiClient) -> Self {
        Self { client }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    /// Runs the skill named `skill_id`. Unknown ids are a failed result,
    /// not an error.
    pub async fn execute(&self, skill_id: &str, params: Value) -> Value {
        tracing::info!("Executing skill: {}", skill_id);

        match Skill::from_id(skill_id) {
            Some(Skill::SearchHotelsLive) => self.search_hotels_live(params).await.into_value(),
            Some(Skill::GetHotelDetails) => self.get_hotel_details(params).await.into_value(),
            None => {
                tracing::warn!("Unknown skill requested: {}", skill_id);
                SkillResult::<Value>::failure(format!("Unknown skill: {}", skill_id)).into_value()
            }
        }
    }

    pub async fn search_hotels_live(&self, params: Value) -> SkillResult<HotelListing> {
        tracing::info!("SEARCH HOTELS LIVE - REQUEST RECEIVED");
        tracing::debug!("Input params: {}", params);

        match self.search(params).await {
            Ok(listing) => {
                tracing::info!("Success: True, Hotels found: {}", listing.hotel_count);
                for hotel in &listing.hotels {
                    tracing::info!(
                        "  - {}: {} images, price={:?}",
                        hotel.name,
                        hotel.images.len(),
                        hotel.price
                    );
                }
                SkillResult::ok(listing)
            }
            Err(e) => {
                tracing::error!("search-hotels-live failed: {}", e);
                SkillResult::failure(e.result_message(Skill::SearchHotelsLive))
            }
        }
    }

    pub async fn get_hotel_details(&self, params: Value) -> SkillResult<HotelDetails> {
        tracing::info!("GET HOTEL DETAILS - REQUEST RECEIVED");
        tracing::debug!("Input params: {}", params);

        match self.details(params).await {
            Ok(details) => {
                tracing::info!("GET HOTEL DETAILS - RESPONSE SUCCESS");
                SkillResult::ok(details)
            }
            Err(e) => {
                tracing::error!("get-hotel-details failed: {}", e);
                SkillResult::failure(e.result_message(Skill::GetHotelDetails))
            }
        }
    }

    async fn search(&self, params: Value) -> Result<HotelListing, SkillError> {
        let params: SearchParams = serde_json::from_value(params)
            .map_err(|e| SkillError::invalid_params(Skill::SearchHotelsLive, e))?;
        let query = SearchQuery::from_params(params, today());

        let data = self.client.search_hotels(&query).await?;
        let properties = data
            .get("properties")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        tracing::info!("Found {} properties in response", properties.len());

        let hotels = normalize(properties, &query);

        Ok(HotelListing {
            hotel_count: hotels.len(),
            hotels,
            destination: query.destination,
            check_in: query.stay.check_in,
            check_out: query.stay.check_out,
            source: SOURCE,
        })
    }

    async fn details(&self, params: Value) -> Result<HotelDetails, SkillError> {
        let params: DetailsParams = serde_json::from_value(params)
            .map_err(|e| SkillError::invalid_params(Skill::GetHotelDetails, e))?;
        let query = DetailsQuery::from_params(params, today()).ok_or_else(|| {
            tracing::warn!("Property token is required but not provided");
            SkillError::Validation("Property token is required".to_string())
        })?;

        let hotel = self.client.hotel_details(&query).await?;
        Ok(HotelDetails {
            hotel,
            source: SOURCE,
        })
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
