//! # Model Module
//!
//! Value types shared by every invocation style: the [Item] a caller posts,
//! the [Draft] the service hands back and the [Container] pairing both.
//!
//! All three are plain immutable values compared by content. "Changing" an
//! item means building a new one, see [Item::with_category].
use crate::draft::derive_draft;

/// Input value identifying a user and the category they post under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Item {
    pub user_id: String,
    pub category: String,
}

impl Item {
    pub fn new(user_id: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            category: category.into(),
        }
    }

    /// Returns a new item with the same user and the given category.
    pub fn with_category(&self, category: impl Into<String>) -> Self {
        Self {
            user_id: self.user_id.clone(),
            category: category.into(),
        }
    }

    /// Derives the [Draft] for this item, see [derive_draft].
    pub fn to_draft(&self) -> Draft {
        derive_draft(self)
    }
}

/// Value produced from an [Item], carrying its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Draft {
    pub id: String,
}

impl Draft {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl From<&Item> for Draft {
    fn from(item: &Item) -> Self {
        derive_draft(item)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub item: Item,
    pub draft: Draft,
}

impl Container {
    pub fn new(item: Item, draft: Draft) -> Self {
        Self { item, draft }
    }

    /// Pairs `item` with the draft derived from it.
    pub fn from_item(item: Item) -> Self {
        let draft = derive_draft(&item);
        Self { item, draft }
    }
}
