pub mod convert;
pub mod detector;
pub mod engine;
pub mod inference;
pub mod parser;
pub mod pipeline;
pub mod rules;
pub mod validator;

pub use crate::domain::model::{Deck, DeckReport, ValidationRequest, ValidationResponse};
pub use crate::domain::ports::{CardLookup, ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
