// tests/api_fixtures.rs
//! Recorded API responses parsed into the domain model and converted.

mod common;

use common::{titled, Fixture};
use notion2docs::{
    number_list_items, page_document, parse_blocks_pagination, parse_page_response, ApiResponse,
    AppError, Block, LinkTarget, MemoryWorkspace, NotionErrorCode, PageId, PageKind, PluginContext,
};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;

const ROW_ID: &str = "9f3a1c2e-5b7d-4e8f-a1b2-c3d4e5f60718";
const LINKED_ID: &str = "7e6d5c4b-3a29-4817-8695-a4b3c2d1e0f9";

fn ok(body: &str) -> ApiResponse<String> {
    ApiResponse {
        data: body.to_string(),
        status: StatusCode::OK,
        url: "https://api.notion.com/v1/fixture".to_string(),
    }
}

#[test]
fn database_rows_parse_with_their_properties() {
    let page = parse_page_response(ok(include_str!("fixtures/api/page_database_row.json")))
        .unwrap();

    assert_eq!(page.id.as_str(), ROW_ID);
    assert_eq!(page.kind, PageKind::Database);
    assert_eq!(page.name_or_title(), "Install: the CLI");
    assert_eq!(page.status(), Some("Publish"));
    assert_eq!(page.slug(), "/install");
    assert_eq!(page.keywords(), None);
}

#[test]
fn block_listings_keep_their_cursor_and_unknown_types() {
    let listing =
        parse_blocks_pagination(ok(include_str!("fixtures/api/block_children.json"))).unwrap();

    assert!(listing.has_more);
    assert_eq!(
        listing.next_cursor.as_deref(),
        Some("b0000000-0000-4000-8000-000000000006")
    );
    let types: Vec<&str> = listing.results.iter().map(Block::block_type).collect();
    assert_eq!(
        types,
        vec![
            "heading_1",
            "callout",
            "numbered_list_item",
            "numbered_list_item",
            "link_to_page",
            "unsupported",
        ]
    );
    match &listing.results[4] {
        Block::LinkToPage(link) => {
            assert_eq!(link.target, LinkTarget::Page(PageId::from_api(LINKED_ID)))
        }
        other => panic!("expected link_to_page, got {:?}", other),
    }
}

#[test]
fn error_bodies_map_to_typed_codes() {
    let response = ApiResponse {
        data: r#"{"object":"error","status":404,"code":"object_not_found","message":"Could not find page"}"#
            .to_string(),
        status: StatusCode::NOT_FOUND,
        url: "https://api.notion.com/v1/pages/x".to_string(),
    };
    match parse_page_response(response).unwrap_err() {
        AppError::NotionService { code, message, .. } => {
            assert_eq!(code, NotionErrorCode::ObjectNotFound);
            assert_eq!(message, "Could not find page");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn recorded_page_converts_to_a_document() {
    let page = parse_page_response(ok(include_str!("fixtures/api/page_database_row.json")))
        .unwrap();
    let mut blocks =
        parse_blocks_pagination(ok(include_str!("fixtures/api/block_children.json")))
            .unwrap()
            .results;
    number_list_items(&mut blocks);

    let mut fx = Fixture::new(MemoryWorkspace::new());
    fx.pages = vec![page, titled(LINKED_ID, PageKind::Outline, "Reference")];

    let mut ctx = PluginContext::for_page(fx.run(), &fx.pages[0]);
    let document = page_document(&mut ctx, blocks).await.unwrap();

    insta::assert_snapshot!(document, @r"
    ---
    title: Install- the CLI
    sidebar_position: 0
    slug: /install
    ---

    # Getting started {#b0000000000040008000000000000001}

    :::caution

    Back up first.

    :::

    1. Download
    2. Run it

    [Reference](/7e6d5c4b-3a29-4817-8695-a4b3c2d1e0f9)
    ");
}
