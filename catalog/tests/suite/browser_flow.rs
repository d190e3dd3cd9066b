use std::sync::Arc;

use estate_catalog::Action;
use estate_catalog::Browser;
use estate_catalog::Category;
use estate_catalog::Envelope;
use estate_catalog::ModeKind;
use estate_catalog::NoticeTone;
use estate_catalog::Ownership;
use estate_catalog::PropertyGroup;
use estate_catalog::PropertyType;
use estate_catalog::RangeField;
use estate_catalog::RecordCategory;
use estate_catalog::Session;
use estate_catalog::SessionConfig;
use estate_catalog::SnapshotBackend;
use pretty_assertions::assert_eq;

use super::catalog;

const SALE_OFFICE: Category = Category::new(Ownership::Sale, PropertyType::Office);

async fn started() -> (Browser, Arc<SnapshotBackend>) {
    let backend = Arc::new(SnapshotBackend::new(catalog()));
    let session = Session::new(SessionConfig::default()).expect("valid config");
    let mut browser = Browser::start(session, backend.clone());
    browser.settle().await;
    (browser, backend)
}

fn visible_ids(browser: &Browser) -> Vec<String> {
    browser
        .session()
        .visible_records()
        .into_iter()
        .map(|record| record.listing.id)
        .collect()
}

#[tokio::test]
async fn start_shows_whole_catalog_in_canonical_order() {
    let (mut browser, _) = started().await;
    assert_eq!(browser.in_flight(), 0);
    assert!(browser.take_notices().is_empty());

    let view = browser.session().page_view();
    assert_eq!(view.mode, ModeKind::All);
    assert_eq!(view.total, 5);
    assert_eq!(
        visible_ids(&browser),
        vec!["so-1", "so-2", "sa-1", "rl-1", "rv-1"]
    );
    assert!(!view.has_next);
    assert_eq!(view.records.len(), 5);
}

#[tokio::test]
async fn switching_group_seeds_filters_from_new_bounds() {
    let (mut browser, _) = started().await;
    browser.dispatch(Action::SelectGroup(PropertyGroup::Commercial));
    assert_eq!(browser.in_flight(), 1);
    browser.settle().await;

    let session = browser.session();
    assert_eq!(session.category(), SALE_OFFICE);
    assert_eq!(
        session.bounds().and_then(|b| b.get(RangeField::RoomCount)),
        Some(Envelope { min: 2.0, max: 5.0 })
    );
    let rooms = session.filters().get(RangeField::RoomCount).expect("seeded");
    assert_eq!((rooms.lo.as_str(), rooms.hi.as_str()), ("2", "5"));
}

#[tokio::test]
async fn filter_then_delete_updates_results_and_catalog() {
    let (mut browser, backend) = started().await;
    browser.dispatch(Action::SelectGroup(PropertyGroup::Commercial));
    browser.settle().await;

    browser.dispatch(Action::SetRange {
        field: RangeField::RoomCount,
        lo: "3".into(),
        hi: String::new(),
    });
    browser.dispatch(Action::ApplyFilters);
    browser.settle().await;
    assert_eq!(browser.session().mode().kind(), ModeKind::Filter);
    assert_eq!(visible_ids(&browser), vec!["so-2"]);
    let view = browser.session().page_view();
    assert_eq!(view.records[0].category, RecordCategory::Known(SALE_OFFICE));

    browser.dispatch(Action::Delete { id: "so-2".into() });
    browser.settle().await;
    let notices = browser.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message, "Deleted successfully");
    assert_eq!(notices[0].tone, NoticeTone::Success);
    assert!(visible_ids(&browser).is_empty());
    assert_eq!(browser.session().catalog().len(), 4);
    assert_eq!(backend.snapshot().await.len(), 4);
}

#[tokio::test]
async fn keyword_search_then_show_all() {
    let (mut browser, _) = started().await;
    browser.dispatch(Action::SetKeyword("road".into()));
    browser.dispatch(Action::Search);
    browser.settle().await;

    assert_eq!(browser.session().mode().kind(), ModeKind::Search);
    assert_eq!(visible_ids(&browser), vec!["so-1", "rv-1"]);

    browser.dispatch(Action::ShowAll);
    assert_eq!(browser.session().keyword(), "");
    assert_eq!(browser.session().page_view().total, 5);
}

#[tokio::test]
async fn empty_keyword_searches_current_category() {
    let (mut browser, _) = started().await;
    browser.dispatch(Action::SelectOwnership(Ownership::Rent));
    browser.dispatch(Action::SelectGroup(PropertyGroup::Land));
    browser.dispatch(Action::Search);
    browser.settle().await;
    assert_eq!(visible_ids(&browser), vec!["rl-1"]);
}

#[tokio::test]
async fn deleting_unreconciled_record_reports_failure() {
    let (mut browser, _) = started().await;
    browser.dispatch(Action::Delete { id: "missing".into() });
    browser.settle().await;

    let notices = browser.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message, "Delete failed");
    assert_eq!(notices[0].status, Some(404));
    assert_eq!(notices[0].tone, NoticeTone::Error);
    assert_eq!(browser.session().catalog().len(), 5);
}
