pub mod classifier;
pub mod cli;
pub mod ctx;
pub mod error;
pub mod insight;
pub mod io;
pub mod pipeline;
pub mod questionnaire;
pub mod schema;
pub mod services;
pub mod survival;
