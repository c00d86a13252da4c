pub mod stats;
pub mod utils;

pub mod entity_sentiment;
pub mod sentiment;
pub mod token_classification;
