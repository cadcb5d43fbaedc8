mod common;

use common::{calls, item, Call, RecordingService};
use itempost::{
    error::{ServiceError, REPLACE_FAILED_MESSAGE},
    model::{Container, Draft, Item},
    service::{BlockingService, ItemService, FAILURE_CATEGORY},
    services::Services,
};
use test_case::test_case;

#[test]
fn create_scenario() {
    let service = BlockingService::new();

    let result = service.create(&item());

    assert_eq!(result, Draft::new("adId_userId_adCategory"));
}

#[test]
fn create_is_idempotent_by_value() {
    let service = BlockingService::new();

    let first = service.create(&item());
    let second = service.create(&item());

    assert_eq!(first, second);
}

#[test_case(Item::new("userId", "adCategory") ; "scenario item")]
#[test_case(Item::new("", "") ; "empty item")]
#[test_case(Item::new("1234", "fake_category") ; "other item")]
fn replace_always_fails_with_fixed_message(input: Item) {
    let service = BlockingService::new();

    let result = service.replace(&input);

    assert_eq!(result, Err(ServiceError::replace_failed()));
    assert_eq!(result.unwrap_err().to_string(), REPLACE_FAILED_MESSAGE);
}

#[test]
fn replace_failure_leaves_later_calls_unaffected() {
    let service = BlockingService::new();

    let _ = service.replace(&item());

    assert_eq!(service.create(&item()), item().to_draft());
}

#[test_case("userId", "adCategory" ; "scenario item")]
#[test_case("someone", FAILURE_CATEGORY ; "already reset")]
fn reset_category_keeps_user_and_writes_marker(user_id: &str, category: &str) {
    let service = BlockingService::new();

    let result = service.reset_category(&Item::new(user_id, category));

    assert_eq!(result, Item::new(user_id, FAILURE_CATEGORY));
}

#[test]
fn partially_stubbed_double() {
    let canned = Item::new("id", "id");
    let service = RecordingService::with_replace_answer(canned.clone());
    let log = service.log();

    let result = (service.replace(&item()), service.create(&item()));

    assert_eq!(result, (Ok(canned), item().to_draft()));
    assert_eq!(
        calls(&log),
        vec![Call::Replace(item()), Call::Create(item())]
    );
}

#[test]
fn services_expose_the_shared_core() {
    let services = Services::default();

    let container = Container::new(item(), services.blocking().create(&item()));

    assert_eq!(container, Container::from_item(item()));
}

fn post_all(service: &impl ItemService, items: &[Item]) -> Vec<Draft> {
    items.iter().map(|item| service.create(item)).collect()
}

#[test]
fn callers_accept_any_item_service() {
    let items = vec![item(), Item::new("userId2", "adCategory2")];
    let double = RecordingService::new();
    let log = double.log();

    let drafts = post_all(&double, &items);

    assert_eq!(drafts, post_all(&BlockingService::new(), &items));
    assert_eq!(
        calls(&log),
        items.into_iter().map(Call::Create).collect::<Vec<_>>()
    );
}
