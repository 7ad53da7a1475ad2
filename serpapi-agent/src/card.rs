use serde_json::json;

use a2a_protocol::{AgentCapabilities, AgentCard, AgentSkill};

use crate::config::{AgentConfig, AGENT_NAME};
use crate::skills::{GET_HOTEL_DETAILS, SEARCH_HOTELS_LIVE};

pub const AGENT_VERSION: &str = "1.0.0";

/// Capability document advertised for discovery.
pub fn agent_card(config: &AgentConfig) -> AgentCard {
    AgentCard {
        name: AGENT_NAME.to_string(),
        description:
            "A specialized agent for searching real hotel data using Google Hotels via SerpAPI"
                .to_string(),
        url: config.public_url.clone(),
        version: AGENT_VERSION.to_string(),
        capabilities: AgentCapabilities {
            streaming: false,
            push_notifications: false,
        },
        skills: vec![search_hotels_skill(), hotel_details_skill()],
        default_input_modes: vec!["text".to_string()],
        default_output_modes: vec!["text".to_string()],
    }
}

fn search_hotels_skill() -> AgentSkill {
    AgentSkill {
        id: SEARCH_HOTELS_LIVE.to_string(),
        name: "Search Hotels Live".to_string(),
        description:
            "Search for real hotels using Google Hotels API. Returns live pricing and availability."
                .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "destination": {
                    "type": "string",
                    "description": "City or destination to search for hotels (e.g., 'Paris', 'New York')"
                },
                "checkInDate": {
                    "type": "string",
                    "description": "Check-in date in YYYY-MM-DD format"
                },
                "checkOutDate": {
                    "type": "string",
                    "description": "Check-out date in YYYY-MM-DD format"
                },
                "adults": {
                    "type": "integer",
                    "description": "Number of adults (default: 2)"
                },
                "currency": {
                    "type": "string",
                    "description": "Currency code (default: USD)"
                },
                "minPrice": {
                    "type": "integer",
                    "description": "Minimum price filter"
                },
                "maxPrice": {
                    "type": "integer",
                    "description": "Maximum price filter"
                },
                "minRating": {
                    "type": "number",
                    "description": "Minimum rating filter (e.g., 4.0)"
                }
            },
            "required": ["destination"]
        }),
    }
}

fn hotel_details_skill() -> AgentSkill {
    AgentSkill {
        id: GET_HOTEL_DETAILS.to_string(),
        name: "Get Hotel Details".to_string(),
        description:
            "Get detailed information about a specific hotel including amenities, reviews, and photos."
                .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "propertyToken": {
                    "type": "string",
                    "description": "The property token from search results"
                },
                "checkInDate": {
                    "type": "string",
                    "description": "Check-in date in YYYY-MM-DD format"
                },
                "checkOutDate": {
                    "type": "string",
                    "description": "Check-out date in YYYY-MM-DD format"
                }
            },
            "required": ["propertyToken"]
        }),
    }
}
