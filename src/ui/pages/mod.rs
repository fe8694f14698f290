pub mod model;
pub mod predict;

pub use model::ModelPage;
pub use predict::PredictPage;
