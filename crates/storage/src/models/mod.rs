mod link_type;
mod member;
mod point_transaction;
mod project;
mod slug;
mod tier;
mod vote;

pub use link_type::ProjectLinkType;
pub use member::Member;
pub use point_transaction::{PointSource, PointTransaction, UnknownPointSource};
pub use project::{Project, ProjectWithVotes};
pub use slug::{InvalidSlug, MIN_SLUG_LEN, Slug, is_valid_slug, slugify};
pub use tier::PointTier;
pub use vote::Vote;
