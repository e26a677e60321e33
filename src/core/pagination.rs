use std::cmp::Ordering;
use crate::core::error::DiscoveryError;
use crate::models::PaginationMeta;

/// Order two scored rows: nearest first, then by session id
#[inline]
pub fn by_distance_then_session(
    a_distance: f64,
    a_session: &str,
    b_distance: f64,
    b_session: &str,
) -> Ordering {
    a_distance
        .total_cmp(&b_distance)
        .then_with(|| a_session.cmp(b_session))
}

/// Compute pagination metadata for `total_count` rows
///
/// `total_pages` is the integer ceiling of `total_count / page_size`, so zero
/// rows give zero pages. Out-of-range pages are valid and simply empty.
pub fn pagination_meta(
    total_count: u64,
    page: u32,
    page_size: u32,
) -> Result<PaginationMeta, DiscoveryError> {
    if page < 1 || page_size < 1 {
        return Err(DiscoveryError::InvalidPagination { page, page_size });
    }

    let size = u64::from(page_size);
    let total_pages = (total_count + size - 1) / size;

    Ok(PaginationMeta {
        page,
        page_size,
        total_count,
        total_pages,
        has_previous: page > 1,
        has_next: u64::from(page) * size < total_count,
    })
}

/// Sort rows by distance (ties by session id) and cut out one page
///
/// `key` exposes the distance and session id of a row.
pub fn paginate<T, F>(
    mut rows: Vec<T>,
    page: u32,
    page_size: u32,
    key: F,
) -> Result<(PaginationMeta, Vec<T>), DiscoveryError>
where
    F: Fn(&T) -> (f64, &str),
{
    let meta = pagination_meta(rows.len() as u64, page, page_size)?;

    rows.sort_by(|a, b| {
        let (a_distance, a_session) = key(a);
        let (b_distance, b_session) = key(b);
        by_distance_then_session(a_distance, a_session, b_distance, b_session)
    });

    let start = (page as usize - 1).saturating_mul(page_size as usize);
    if start >= rows.len() {
        return Ok((meta, Vec::new()));
    }
    let end = start.saturating_add(page_size as usize).min(rows.len());

    let items = rows.drain(start..end).collect();
    Ok((meta, items))
}
