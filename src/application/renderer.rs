// Renderer - rebuilds the visible list from the current view set
use crate::application::host::ListSurface;
use crate::domain::list_row::ListRow;
use crate::domain::view::View;
use crate::domain::view_set::row_count;

/// Rows for the whole view set: one header per view, followed by its jobs
/// when expanded. Order is view creation order, then job order as polled.
pub fn render_rows(views: &[View]) -> Vec<ListRow> {
    let mut rows = Vec::new();

    for view in views {
        rows.push(ListRow::Header {
            view_id: view.id,
            url: view.url.clone(),
            color: view.color.clone(),
            expanded: view.expanded,
        });

        if view.expanded {
            rows.extend(view.jobs.iter().map(|job| ListRow::Job {
                name: job.name.clone(),
                url: job.url.clone(),
                color: job.color.clone(),
            }));
        }
    }

    rows
}

/// Apply a poll result to the view set, matched by URL. With duplicate URLs
/// the entry with the same id is preferred. Returns false when no view has
/// the URL any more.
pub fn apply_update(views: &mut [View], updated: View) -> bool {
    let index = views
        .iter()
        .position(|v| v.url == updated.url && v.id == updated.id)
        .or_else(|| views.iter().position(|v| v.url == updated.url));

    match index {
        Some(index) => {
            views[index].apply_poll(updated);
            true
        }
        None => false,
    }
}

/// Clear the surface and append every row
pub fn draw(surface: &mut dyn ListSurface, views: &[View]) -> usize {
    let rows = render_rows(views);
    let count = rows.len();

    surface.remove_all_elements();
    for row in rows {
        surface.append_element(row);
    }
    surface.present(row_count(views));

    count
}
