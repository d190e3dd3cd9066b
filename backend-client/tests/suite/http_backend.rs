use estate_backend_client::HttpCatalogBackend;
use estate_catalog::CatalogBackend;
use estate_catalog::CatalogError;
use estate_catalog::Category;
use estate_catalog::Envelope;
use estate_catalog::FilterState;
use estate_catalog::ListingDraft;
use estate_catalog::Ownership;
use estate_catalog::PageRequest;
use estate_catalog::PropertyType;
use estate_catalog::RangeField;
use estate_catalog::RecordCategory;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::body_partial_json;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::matchers::query_param;
use wiremock::matchers::query_param_is_missing;

const ROOT: &str = "/api/v1/real-estate";

fn backend(server: &MockServer) -> HttpCatalogBackend {
    HttpCatalogBackend::new(&format!("{}{ROOT}", server.uri())).expect("valid base")
}

fn office_json(id: &str, rooms: i64) -> serde_json::Value {
    json!({
        "id": id,
        "roomCount": rooms,
        "data": {
            "address": "9 Tower Lane",
            "email": "tower@example.com",
            "area": 240.0,
            "fullPrice": 410000.0,
            "ownerFullName": "Reza Kamali"
        }
    })
}

#[tokio::test]
async fn list_all_reads_nested_dataset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ROOT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sale": {"commercial": {"office": [office_json("so-1", 2)], "shop": []}},
            "rent": {}
        })))
        .mount(&server)
        .await;

    let snapshot = backend(&server).list_all().await.expect("list");
    assert_eq!(snapshot.len(), 1);
    let office = Category::new(Ownership::Sale, PropertyType::Office);
    assert_eq!(snapshot.bucket(office)[0].room_count, Some(2));
}

#[tokio::test]
async fn bounds_keep_only_reported_applicable_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{ROOT}/stats")))
        .and(query_param("ownership", "rent"))
        .and(query_param("propertyType", "villa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "minArea": 120.0, "maxArea": 300.0,
            "minPrice": 800.0, "maxPrice": 1800.0,
            "minMortgagePrice": null, "maxMortgagePrice": null,
            "minRoomCount": null, "maxRoomCount": null,
            "minFloorCount": null, "maxFloorCount": null,
            "minYardArea": 10.0, "maxYardArea": 60.0
        })))
        .mount(&server)
        .await;

    let villa = Category::new(Ownership::Rent, PropertyType::Villa);
    let bounds = backend(&server).bounds(villa).await.expect("bounds");
    let fields: Vec<RangeField> = bounds.iter().map(|(field, _)| field).collect();
    assert_eq!(
        fields,
        vec![RangeField::Price, RangeField::Area, RangeField::YardArea]
    );
    assert_eq!(
        bounds.get(RangeField::YardArea),
        Some(Envelope { min: 10.0, max: 60.0 })
    );
}

#[tokio::test]
async fn filter_sends_category_ranges_and_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{ROOT}/filter")))
        .and(query_param("ownership", "sale"))
        .and(query_param("propertyType", "office"))
        .and(query_param("minRoomCount", "4"))
        .and(query_param_is_missing("maxRoomCount"))
        .and(query_param("page", "0"))
        .and(query_param("size", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([office_json("so-2", 5)])))
        .expect(1)
        .mount(&server)
        .await;

    let office = Category::new(Ownership::Sale, PropertyType::Office);
    let mut filters = FilterState::default();
    filters.set_range(RangeField::RoomCount, "3.7", "");
    let ranges = filters.to_query(office, None);
    let results = backend(&server)
        .filter(office, &ranges, PageRequest::first(1000))
        .await
        .expect("filter");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "so-2");
}

#[tokio::test]
async fn keyword_search_hits_keyword_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{ROOT}/search/keyword")))
        .and(query_param("keyword", "tower lane"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([office_json("so-2", 5)])))
        .mount(&server)
        .await;

    let results = backend(&server)
        .search_by_keyword("tower lane", PageRequest::first(50))
        .await
        .expect("search");
    assert_eq!(results[0].data.owner_full_name, "Reza Kamali");
}

#[tokio::test]
async fn client_error_carries_service_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{ROOT}/search")))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid ownership"})),
        )
        .mount(&server)
        .await;

    let err = backend(&server)
        .search_by_category(
            Category::new(Ownership::Sale, PropertyType::Land),
            PageRequest::first(5),
        )
        .await
        .expect_err("rejected");
    assert_eq!(
        err,
        CatalogError::Rejected {
            status: 400,
            message: Some("Invalid ownership".to_string()),
        }
    );
}

#[tokio::test]
async fn server_error_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{ROOT}/stats")))
        .respond_with(ResponseTemplate::new(500).set_body_json(
            json!({"message": "An unexpected error occurred: disk full"}),
        ))
        .mount(&server)
        .await;

    let err = backend(&server)
        .bounds(Category::new(Ownership::Sale, PropertyType::Villa))
        .await
        .expect_err("unavailable");
    assert_eq!(err.status(), Some(500));
    assert!(!err.is_client_error());
    assert_eq!(
        err.service_message(),
        Some("An unexpected error occurred: disk full")
    );
}

#[tokio::test]
async fn delete_of_unknown_record_uses_sentinel_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("{ROOT}/unknown/unknown/ghost")))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{ROOT}/sale/office/so-1")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = backend(&server);
    let err = client
        .delete_listing(RecordCategory::Unknown, "ghost")
        .await
        .expect_err("not found");
    assert_eq!(
        err,
        CatalogError::Rejected {
            status: 404,
            message: None,
        }
    );

    let office = Category::new(Ownership::Sale, PropertyType::Office);
    client
        .delete_listing(RecordCategory::Known(office), "so-1")
        .await
        .expect("deleted");
}

#[tokio::test]
async fn create_posts_to_taxonomy_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{ROOT}/rent/commercial/shop")))
        .and(body_partial_json(json!({
            "roomCount": 2,
            "data": {"rentPrice": 650.0, "mortgagePrice": 4000.0}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(office_json("new-1", 2)))
        .expect(1)
        .mount(&server)
        .await;

    let draft = ListingDraft {
        address: "Market Row".into(),
        email: "shop@example.com".into(),
        area: Some(45.0),
        owner_full_name: "Parisa Azizi".into(),
        rent_price: Some(650.0),
        mortgage_price: Some(4000.0),
        room_count: Some(2),
        ..Default::default()
    };
    let created = backend(&server)
        .create_listing(Category::new(Ownership::Rent, PropertyType::Shop), &draft)
        .await
        .expect("created");
    assert_eq!(created.id, "new-1");
}

#[tokio::test]
async fn unreachable_service_has_no_status() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let client = HttpCatalogBackend::new(&format!("http://127.0.0.1:{port}{ROOT}")).expect("valid base");

    let err = client.list_all().await.expect_err("connection refused");
    assert!(matches!(err, CatalogError::Unavailable { status: None, .. }));
}

#[test]
fn rejects_unparsable_base() {
    assert!(matches!(
        HttpCatalogBackend::new("not a url"),
        Err(CatalogError::InvalidConfig(_))
    ));
}
