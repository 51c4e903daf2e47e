pub mod crew;
pub mod executor;
pub mod roster;
pub mod tasks;
pub mod types;

#[cfg(test)]
mod test_support;

pub use crew::{Crew, CrewError};
pub use executor::AgentExecutor;
pub use types::*;
