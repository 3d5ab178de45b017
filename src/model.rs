mod bbox;
mod document;
mod node;

pub use self::bbox::BoundingBox;
pub use self::document::{
    classify, self_link_href, CollectionEntry, Collections, Container, ContentEntry, Document,
    LandingPage, Link,
};
pub use self::node::{Node, NodeKind, Stratum};
