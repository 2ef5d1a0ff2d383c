/// Reader and writer contracts
pub mod item;

/// Culture-specific number and date rules
pub mod locale;

/// Column resolution and field maps
pub mod mapping;

/// Record model: descriptors, values and field conversions
pub mod record;

/// Text sinks and sources
pub mod stream;
