use std::future::Future;

use crate::{Res, types::Page};

/// Upper bound on page requests for a single enumeration. A service whose
/// reported `total` keeps growing would otherwise be enumerated forever.
pub const MAX_PAGES: u32 = 10_000;

/// Collects every item of an offset/limit paginated collection.
///
/// The first page is always requested. After each page the offset advances by
/// `limit` and the loop stops once the offset reaches the `total` reported by the
/// most recent response, so a collection that shrinks or grows while it is
/// being read is followed rather than truncated to its initial size.
///
/// # Errors
///
/// Propagates the first error returned by `fetch_page`, and fails after
/// [`MAX_PAGES`] requests without reaching the reported total.
///
/// # Example
///
/// ```
/// let playlists = fetch_all_pages(50, |offset, limit| {
///     source.list_user_playlists(&user.id, offset, limit)
/// })
/// .await?;
/// ```
pub async fn fetch_all_pages<T, F, Fut>(limit: u32, mut fetch_page: F) -> Res<Vec<T>>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Res<Page<T>>>,
{
    let limit = limit.max(1);
    let mut items: Vec<T> = Vec::new();
    let mut offset: u32 = 0;

    for _ in 0..MAX_PAGES {
        let page = fetch_page(offset, limit).await?;
        items.extend(page.items);
        offset = offset.saturating_add(limit);

        if offset >= page.total {
            return Ok(items);
        }
    }

    Err(format!(
        "gave up after {} pages, the collection never reached its reported size",
        MAX_PAGES
    )
    .into())
}
