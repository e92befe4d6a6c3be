use std::future::ready;

use plmigrate::{
    Res,
    pagination::{MAX_PAGES, fetch_all_pages},
    types::Page,
};

// Serves `0..size` in pages, where `size` can change from call to call.
fn page_of(offset: u32, limit: u32, size: u32) -> Page<u32> {
    Page {
        items: (offset..size.min(offset + limit)).collect(),
        total: size,
    }
}

#[tokio::test]
async fn test_fetches_ceil_total_over_page_size() {
    for (total, limit, expected_calls) in [(250, 100, 3), (200, 100, 2), (1, 50, 1), (99, 1, 99)] {
        let mut offsets = Vec::new();

        let items = fetch_all_pages(limit, |offset, limit| {
            offsets.push(offset);
            ready(Res::Ok(page_of(offset, limit, total)))
        })
        .await
        .unwrap();

        assert_eq!(offsets.len(), expected_calls, "total {} limit {}", total, limit);
        assert_eq!(items, (0..total).collect::<Vec<u32>>());
    }
}

#[tokio::test]
async fn test_offsets_advance_by_limit() {
    let mut calls = Vec::new();

    fetch_all_pages(100, |offset, limit| {
        calls.push((offset, limit));
        ready(Res::Ok(page_of(offset, limit, 250)))
    })
    .await
    .unwrap();

    assert_eq!(calls, vec![(0, 100), (100, 100), (200, 100)]);
}

#[tokio::test]
async fn test_empty_collection_is_requested_once() {
    let mut calls = 0;

    let items: Vec<u32> = fetch_all_pages(50, |offset, limit| {
        calls += 1;
        ready(Res::Ok(page_of(offset, limit, 0)))
    })
    .await
    .unwrap();

    assert_eq!(calls, 1);
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_follows_total_that_shrinks() {
    let mut sizes = vec![300, 150].into_iter();
    let mut calls = 0;

    let items = fetch_all_pages(100, |offset, limit| {
        calls += 1;
        let size = sizes.next().unwrap_or(150);
        ready(Res::Ok(page_of(offset, limit, size)))
    })
    .await
    .unwrap();

    // Second response reports 150, so no third request is made
    assert_eq!(calls, 2);
    assert_eq!(items.len(), 150);
}

#[tokio::test]
async fn test_follows_total_that_grows() {
    let mut sizes = vec![100, 250, 250].into_iter();
    let mut calls = 0;

    let items = fetch_all_pages(100, |offset, limit| {
        calls += 1;
        let size = sizes.next().unwrap_or(250);
        ready(Res::Ok(page_of(offset, limit, size)))
    })
    .await
    .unwrap();

    // First page claims 100 items and ends the loop right away
    assert_eq!(calls, 1);
    assert_eq!(items.len(), 100);

    let mut sizes = vec![150, 250, 250].into_iter();
    let mut calls = 0;
    let items = fetch_all_pages(100, |offset, limit| {
        calls += 1;
        let size = sizes.next().unwrap_or(250);
        ready(Res::Ok(page_of(offset, limit, size)))
    })
    .await
    .unwrap();

    assert_eq!(calls, 3);
    assert_eq!(items, (0..250).collect::<Vec<u32>>());
}

#[tokio::test]
async fn test_propagates_page_error() {
    let mut calls = 0;

    let result: Res<Vec<u32>> = fetch_all_pages(100, |offset, limit| {
        calls += 1;
        if offset == 100 {
            ready(Err("service unavailable".into()))
        } else {
            ready(Ok(page_of(offset, limit, 500)))
        }
    })
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "service unavailable");
    assert_eq!(calls, 2);
}

#[tokio::test]
async fn test_gives_up_when_total_is_never_reached() {
    let mut calls = 0;

    let result: Res<Vec<u32>> = fetch_all_pages(1, |_, _| {
        calls += 1;
        ready(Ok(Page {
            items: Vec::new(),
            total: u32::MAX,
        }))
    })
    .await;

    assert!(result.is_err());
    assert_eq!(calls, MAX_PAGES);
}
