//! Hotel search core: no networking, no server state.
//!
//! - `query`: caller parameters -> upstream query string (date defaults, price filter)
//! - `property`: the upstream's loosely-typed property entry as an optional-field record
//! - `listing`: property entries -> normalized `HotelRecord`s (cap, images, rating filter)

mod lenient;
pub mod listing;
pub mod property;
pub mod query;

pub use listing::{normalize, HotelLocation, HotelRecord, MAX_HOTELS, MAX_IMAGES};
pub use property::{GpsCoordinates, HotelClass, Property, PropertyImage, Rate};
pub use query::{
    resolve_stay, DetailsParams, DetailsQuery, PriceFilter, SearchParams, SearchQuery, Stay,
};
