pub mod core;
pub mod csvrec;
pub mod export;
pub mod extract;
pub mod grouping;
pub mod merge;
pub mod ocr;
pub mod pipeline;
pub mod refine;

pub use crate::core::fields::FieldRecord;
pub use crate::core::geometry::BBox;
pub use crate::core::model::{MergedRecord, Section, SectionedGroups, Token};
