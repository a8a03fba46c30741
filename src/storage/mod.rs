pub mod reader;
pub mod writer;

pub use reader::read_comments;
pub use writer::CommentWriter;
