//! Integration tests for parsing Zendesk Support data.
//!
//! These tests validate that the zendesk-support models decode realistic
//! list responses through the shared page decoder.

use std::fs;
use std::path::PathBuf;
use zendesk_support::{
    Page, PageRequest, SearchResult, Ticket, TicketPriority, TicketStatus, TicketType, User,
    UserRole,
};

/// Get the path to the test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn load_fixture(name: &str) -> Vec<u8> {
    let fixture_path = fixtures_dir().join(name);
    fs::read(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture at {}: {}",
            fixture_path.display(),
            e
        )
    })
}

#[test]
fn test_deserialize_ticket_cursor_page() {
    let body = load_fixture("tickets_page.json");
    let page: Page<Ticket> = Page::from_json(&body, "tickets")
        .unwrap_or_else(|e| panic!("Failed to decode tickets page: {e}"));

    assert_eq!(page.len(), 3, "Expected 3 tickets in test data");

    let first = &page.items[0];
    assert_eq!(first.id.get(), 35436);
    assert_eq!(first.ticket_type, Some(TicketType::Incident));
    assert_eq!(first.priority, Some(TicketPriority::High));
    assert_eq!(first.status, Some(TicketStatus::Open));
    assert_eq!(first.collaborator_ids.len(), 2);
    assert_eq!(first.custom_fields.len(), 3);
    assert!(first.custom_fields[2].value.is_null());

    // Null priority and unknown statuses decode leniently.
    assert_eq!(page.items[1].priority, None);
    assert_eq!(page.items[2].status, Some(TicketStatus::Unknown));
    assert!(page.items[2].due_at.is_some());
}

#[test]
fn test_ticket_page_cursor_navigation() {
    let body = load_fixture("tickets_page.json");
    let page: Page<Ticket> = Page::from_json(&body, "tickets").unwrap();

    assert!(page.has_more());
    let current = PageRequest::first_cursor(3);
    match page.next_request(&current) {
        Some(PageRequest::Cursor(next)) => {
            assert_eq!(next.after.as_deref(), Some("xxx"));
            assert_eq!(next.size, Some(3));
        }
        other => panic!("Expected a cursor request, got {other:?}"),
    }
    assert!(page.links.and_then(|links| links.next).is_some());
}

#[test]
fn test_deserialize_user_offset_page() {
    let body = load_fixture("users_page.json");
    let page: Page<User> = Page::from_json(&body, "users")
        .unwrap_or_else(|e| panic!("Failed to decode users page: {e}"));

    assert_eq!(page.len(), 3);
    assert_eq!(page.count, Some(7));
    assert!(page.has_more());
    assert!(page.previous_page.is_none());

    let agent = &page.items[0];
    assert_eq!(agent.role, Some(UserRole::Agent));
    assert_eq!(agent.restricted_agent, Some(true));
    assert_eq!(agent.user_fields["user_dropdown"], "option_1");
    let photo = agent.photo.as_ref().expect("agent has a photo");
    assert_eq!(photo.thumbnails.len(), 1);

    assert_eq!(page.items[1].role, Some(UserRole::EndUser));
    assert!(page.items[1].photo.is_none());
    assert!(page.items[2].suspended);
    assert!(page.items[2].email.is_none());
}

#[test]
fn test_all_users_have_names() {
    let body = load_fixture("users_page.json");
    let page: Page<User> = Page::from_json(&body, "users").unwrap();

    for user in &page {
        assert!(!user.name.is_empty(), "User {} has no name", user.id);
    }
}

#[test]
fn test_deserialize_search_results() {
    let body = load_fixture("search_results.json");
    let page: Page<SearchResult> = Page::from_json(&body, "results")
        .unwrap_or_else(|e| panic!("Failed to decode search results: {e}"));

    let kinds: Vec<&str> = page.iter().map(SearchResult::result_type).collect();
    assert_eq!(kinds, vec!["ticket", "user", "organization", "group", "entry"]);
    assert!(!page.has_more());

    match &page.items[2] {
        SearchResult::Organization(org) => assert!(org.shared_tickets),
        other => panic!("Expected an organization, got {other:?}"),
    }
}

#[test]
fn test_missing_collection_key_is_an_error() {
    let body = load_fixture("users_page.json");
    let result: zendesk_support::Result<Page<Ticket>> = Page::from_json(&body, "tickets");
    assert!(matches!(result, Err(zendesk_support::Error::ParseError(_))));
}
