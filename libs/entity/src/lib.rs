pub mod option;
pub mod post;

pub mod prelude {
    pub use crate::option::{ContentType, Platform, PostType};
    pub use crate::post::{AnalyzedPost, PostRecord};
}
