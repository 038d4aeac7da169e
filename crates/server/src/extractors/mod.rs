pub mod path_extractor;
pub mod validation_extractor;
