//! Identifier derivation for drafts.
use crate::model::{Draft, Item};

/// Prefix shared by every derived draft identifier.
pub const DRAFT_ID_PREFIX: &str = "adId";

/// Derives the [Draft] for `item`.
///
/// The identifier is `"adId_{user_id}_{category}"`. Pure and total: the
/// output depends only on the two fields of `item`.
pub fn derive_draft(item: &Item) -> Draft {
    Draft::new(format!(
        "{DRAFT_ID_PREFIX}_{}_{}",
        item.user_id, item.category
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("userId", "adCategory", "adId_userId_adCategory" ; "regular item")]
    #[test_case("1234", "fake_category", "adId_1234_fake_category" ; "numeric user")]
    #[test_case("", "", "adId__" ; "empty fields")]
    #[test_case("a_b", "c", "adId_a_b_c" ; "separator inside user id")]
    fn derives_prefixed_identifier(user_id: &str, category: &str, expected: &str) {
        let draft = derive_draft(&Item::new(user_id, category));

        assert_eq!(draft.id, expected);
    }

    #[test]
    fn all_entry_points_agree() {
        let item = Item::new("userId", "adCategory");

        assert_eq!(item.to_draft(), derive_draft(&item));
        assert_eq!(Draft::from(&item), derive_draft(&item));
    }
}
