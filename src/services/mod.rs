pub mod catalog;
pub mod matrix;
pub mod model;
pub mod recommendations;
pub mod similarity;

pub use catalog::Catalog;
pub use matrix::{ItemIndex, UserIndex, UserItemMatrix};
pub use model::{ModelStats, RecommendationModel};
pub use recommendations::{
    find_similar, recommend, recommend_scored, Recommendations, DEFAULT_TOP_N, MAX_TOP_N,
};
pub use similarity::{cosine_similarity, SimilarityTable};
