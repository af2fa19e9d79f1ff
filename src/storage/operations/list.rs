use crate::error::Result;
use crate::storage::constants::LIST_PAGE_SIZE;
use futures::stream::TryStreamExt;
use opendal::{EntryMode, Operator};

/// One page of a paginated flat listing.
///
/// `next_cursor` is an opaque continuation token: present when another page
/// must be fetched, absent when the listing is exhausted. A short (or even
/// empty) `names` vector with a present cursor is still a valid page.
pub struct ListPage {
    pub names: Vec<String>,
    pub next_cursor: Option<String>,
}

/// Trait for fetching one page of blob names at a time.
pub trait PageLister {
    /// Fetch the page following `cursor`, or the first page when `cursor`
    /// is `None`. Pages hold at most [`LIST_PAGE_SIZE`] entries.
    async fn list_page(&self, cursor: Option<String>) -> Result<ListPage>;
}

/// Drain a paginated listing, invoking `f` for every blob name in order.
///
/// Carries the continuation cursor between calls and terminates only when a
/// page comes back without one. Returns the total number of names seen.
pub async fn drain_pages<L, F>(lister: &L, mut f: F) -> Result<usize>
where
    L: PageLister,
    F: FnMut(&str),
{
    let mut cursor: Option<String> = None;
    let mut total = 0;
    loop {
        let page = lister.list_page(cursor.take()).await?;
        for name in &page.names {
            f(name);
            total += 1;
        }
        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }
    Ok(total)
}

/// Implementation of PageLister for OpenDAL Operator.
///
/// The cursor encodes how many raw entries previous pages consumed; it is
/// opaque to callers and needs no service-side listing capability beyond a
/// flat recursive walk. Hierarchical non-file entries are filtered out of
/// `names` but still advance the cursor.
pub struct OpenDalPageLister {
    operator: Operator,
}

impl OpenDalPageLister {
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }
}

impl PageLister for OpenDalPageLister {
    async fn list_page(&self, cursor: Option<String>) -> Result<ListPage> {
        let offset: usize = cursor.as_deref().and_then(|c| c.parse().ok()).unwrap_or(0);

        let mut lister = self.operator.lister_with("/").recursive(true).await?;

        let mut skipped = 0usize;
        while skipped < offset {
            if lister.try_next().await?.is_none() {
                return Ok(ListPage {
                    names: Vec::new(),
                    next_cursor: None,
                });
            }
            skipped += 1;
        }

        let mut names = Vec::new();
        let mut raw_count = 0usize;
        while raw_count < LIST_PAGE_SIZE {
            let Some(entry) = lister.try_next().await? else {
                break;
            };
            raw_count += 1;
            if entry.metadata().mode() == EntryMode::FILE {
                names.push(entry.path().trim_start_matches('/').to_string());
            }
        }

        // A full raw page may be followed by more entries; a short one is not.
        let next_cursor = if raw_count == LIST_PAGE_SIZE {
            Some((offset + raw_count).to_string())
        } else {
            None
        };

        Ok(ListPage { names, next_cursor })
    }
}
