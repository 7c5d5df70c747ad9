mod error;
mod operations;
mod requests;
mod types;

pub use error::CommentError;
pub use operations::{validate_annotation, validate_comment, validate_comment_id};
pub use requests::{CreateCommentRequest, UpdateCommentRequest, UpdateField};
pub use types::{Annotation, Comment, CommentId, MAX_COMMENT_ID_BYTES};
