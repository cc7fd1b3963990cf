//! Vector index over job embeddings and its on-disk hand-off files
//!
//! - [`FlatIndex`]: exact inner-product search over unit vectors (cosine similarity)
//! - [`IndexBundle`]: the index file plus its positional metadata sidecar
//! - [`build_index`]: jobs export -> embeddings -> index + sidecar

pub mod builder;
pub mod flat;
pub mod store;

pub use builder::build_index;
pub use builder::BuildReport;
pub use flat::FlatIndex;
pub use flat::SearchHit;
pub use store::IndexBundle;
pub use store::IndexHeader;
