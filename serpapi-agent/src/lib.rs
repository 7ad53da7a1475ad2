//! SerpAPI hotel agent library.
//! Exposes the agent card, the JSON-RPC task endpoint and the hotel skills
//! for reuse by the server binary and tests.

pub mod card;
pub mod config;
pub mod serpapi;
pub mod server;
pub mod skills;
pub mod task_store;

pub use card::agent_card;
pub use config::AgentConfig;
pub use serpapi::{SerpApiClient, SerpApiError};
pub use server::{dispatch, router, AppState};
pub use skills::{HotelSkills, Skill, SkillError, SkillResult};
pub use task_store::TaskStore;
