pub mod extractor;
pub mod fetch;
pub mod normalize;
pub mod source;
pub mod types;

pub use extractor::extract;
pub use fetch::RemoteFetchCache;
pub use source::{find_dataset, load_videos};
pub use types::{CommentRecord, VideoRecord};
