//! Common IANA link relation names

pub const ALTERNATE: &str = "alternate";
pub const COLLECTION: &str = "collection";
pub const DESCRIBED_BY: &str = "describedby";
pub const EDIT: &str = "edit";
pub const FIRST: &str = "first";
pub const ITEM: &str = "item";
pub const LAST: &str = "last";
pub const NEXT: &str = "next";
pub const PREV: &str = "prev";
pub const RELATED: &str = "related";
pub const SELF: &str = "self";
pub const UP: &str = "up";
