// Adapters layer: concrete implementations for external systems.

pub mod scryfall;

pub use scryfall::ScryfallClient;
