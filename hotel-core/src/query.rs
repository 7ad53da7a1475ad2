use chrono::{Duration, NaiveDate};
use serde::Deserialize;

use crate::lenient::{count, number, or_default};

pub const ENGINE: &str = "google_hotels";
pub const LANGUAGE: &str = "en";
pub const COUNTRY: &str = "us";
pub const DEFAULT_ADULTS: u32 = 2;
pub const DEFAULT_CURRENCY: &str = "USD";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Input of the `search-hotels-live` skill, as sent by the caller.
///
/// Only `destination` is strict. Numbers may arrive as numeric strings, and
/// a null or unreadable optional field counts as not given.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub destination: String,
    #[serde(default, deserialize_with = "or_default")]
    pub check_in_date: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub check_out_date: Option<String>,
    /// Whole non-negative counts only; anything else falls back to the default.
    #[serde(default, deserialize_with = "count")]
    pub adults: Option<u32>,
    #[serde(default, deserialize_with = "or_default")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "number")]
    pub min_price: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub max_price: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub min_rating: Option<f64>,
}

/// Input of the `get-hotel-details` skill.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetailsParams {
    #[serde(deserialize_with = "or_default")]
    pub property_token: String,
    #[serde(deserialize_with = "or_default")]
    pub check_in_date: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub check_out_date: Option<String>,
}

/// Check-in / check-out pair, both `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stay {
    pub check_in: String,
    pub check_out: String,
}

/// Fills in missing (or empty) dates: check-in defaults to tomorrow,
/// check-out to three days from `today`. Given dates pass through untouched.
pub fn resolve_stay(check_in: Option<&str>, check_out: Option<&str>, today: NaiveDate) -> Stay {
    let or_offset = |given: Option<&str>, days: i64| match given.filter(|d| !d.is_empty()) {
        Some(date) => date.to_string(),
        None => (today + Duration::days(days)).format(DATE_FORMAT).to_string(),
    };

    Stay {
        check_in: or_offset(check_in, 1),
        check_out: or_offset(check_out, 3),
    }
}

/// Upstream price filter. Both bounds travel as one `price=min,max`
/// parameter; a single bound travels on its own.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceFilter {
    Range { min: f64, max: f64 },
    Min(f64),
    Max(f64),
}

impl PriceFilter {
    /// A bound of zero counts as not given. Other values, negative ones
    /// included, are forwarded for the upstream to judge.
    pub fn from_bounds(min: Option<f64>, max: Option<f64>) -> Option<Self> {
        let min = min.filter(|p| *p != 0.0);
        let max = max.filter(|p| *p != 0.0);
        match (min, max) {
            (Some(min), Some(max)) => Some(PriceFilter::Range { min, max }),
            (Some(min), None) => Some(PriceFilter::Min(min)),
            (None, Some(max)) => Some(PriceFilter::Max(max)),
            (None, None) => None,
        }
    }

    pub fn query_pair(&self) -> (&'static str, String) {
        match self {
            PriceFilter::Range { min, max } => ("price", format!("{},{}", min, max)),
            PriceFilter::Min(min) => ("min_price", min.to_string()),
            PriceFilter::Max(max) => ("max_price", max.to_string()),
        }
    }
}

/// A fully resolved hotel search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub destination: String,
    pub stay: Stay,
    pub adults: u32,
    pub currency: String,
    pub price: Option<PriceFilter>,
    /// Applied client-side after normalization, never sent upstream.
    pub min_rating: Option<f64>,
}

impl SearchQuery {
    pub fn from_params(params: SearchParams, today: NaiveDate) -> Self {
        let stay = resolve_stay(
            params.check_in_date.as_deref(),
            params.check_out_date.as_deref(),
            today,
        );

        Self {
            destination: params.destination,
            stay,
            adults: params.adults.unwrap_or(DEFAULT_ADULTS),
            currency: params
                .currency
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            price: PriceFilter::from_bounds(params.min_price, params.max_price),
            min_rating: params.min_rating,
        }
    }

    /// Upstream query parameters, credential excluded.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("engine", ENGINE.to_string()),
            ("q", self.destination.clone()),
            ("check_in_date", self.stay.check_in.clone()),
            ("check_out_date", self.stay.check_out.clone()),
            ("adults", self.adults.to_string()),
            ("currency", self.currency.clone()),
            ("hl", LANGUAGE.to_string()),
            ("gl", COUNTRY.to_string()),
        ];
        if let Some(price) = &self.price {
            pairs.push(price.query_pair());
        }
        pairs
    }
}

/// A resolved property detail lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailsQuery {
    pub property_token: String,
    pub stay: Stay,
}

impl DetailsQuery {
    /// `None` when the property token is empty.
    pub fn from_params(params: DetailsParams, today: NaiveDate) -> Option<Self> {
        if params.property_token.is_empty() {
            return None;
        }
        let stay = resolve_stay(
            params.check_in_date.as_deref(),
            params.check_out_date.as_deref(),
            today,
        );
        Some(Self {
            property_token: params.property_token,
            stay,
        })
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("engine", ENGINE.to_string()),
            ("property_token", self.property_token.clone()),
            ("check_in_date", self.stay.check_in.clone()),
            ("check_out_date", self.stay.check_out.clone()),
            ("hl", LANGUAGE.to_string()),
            ("gl", COUNTRY.to_string()),
        ]
    }
}
