pub mod frontmatter;

pub use frontmatter::{parse_document, parse_frontmatter_value, ParsedDocument};
