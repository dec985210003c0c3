// View set construction from the configured URL list
use super::view::View;

/// Build a fresh view set from a comma-separated URL list.
///
/// Empty tokens are skipped; duplicates are kept as distinct views. Ids are
/// assigned from zero in input order.
pub fn build_view_set(raw_urls: &str) -> Vec<View> {
    raw_urls
        .split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .enumerate()
        .map(|(id, url)| View::new(id as u32, url.to_string()))
        .collect()
}

pub fn view_by_id_mut(views: &mut [View], id: u32) -> Option<&mut View> {
    views.iter_mut().find(|v| v.id == id)
}

/// Views plus every cached job, regardless of expansion
pub fn row_count(views: &[View]) -> usize {
    views.iter().map(|v| 1 + v.jobs.len()).sum()
}
