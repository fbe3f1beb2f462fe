mod knowledge_base;
mod prediction;

pub use knowledge_base::{lookup, DiseaseInfo, DiseaseLabel};
pub use prediction::{format_confidence, PredictionResult};
