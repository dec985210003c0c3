// HTML page wrapping the rendered list items
use crate::domain::list_row::{escape_markup, ListMetrics};
use crate::infrastructure::list_surface::ListSnapshot;

pub const LIST_WIDTH: u32 = 240;
pub const ITEM_HEIGHT: u32 = 20;
pub const VIEWPORT_HEIGHT: u32 = 400;

const TOGGLE_SCRIPT: &str = r#"<script>
function toggleViewCollapse(id) {
  fetch('/views/' + id + '/toggle', { method: 'POST' }).then(function () { location.reload(); });
}
</script>"#;

pub fn render_page(snapshot: &ListSnapshot, scroll_value: u32) -> String {
    let icon_x = LIST_WIDTH - 30;
    let metrics = ListMetrics::compute(snapshot.row_count, ITEM_HEIGHT, VIEWPORT_HEIGHT, scroll_value);

    let items: String = snapshot
        .rows
        .iter()
        .map(|row| row.to_markup(icon_x))
        .collect::<Vec<_>>()
        .join("\n");

    let last_poll = snapshot
        .last_poll_time
        .as_deref()
        .map(escape_markup)
        .unwrap_or_else(|| "never".to_string());

    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset='utf-8'><title>Hudson views</title>{TOGGLE_SCRIPT}</head>\n\
         <body>\n<div id='content' style='width:{LIST_WIDTH}px;height:{VIEWPORT_HEIGHT}px;overflow-y:{overflow}'>\n\
         <div id='contentListbox' style='height:{height}px;margin-top:{offset}px'>\n{items}\n</div>\n</div>\n\
         <div id='lastPollTime'>{last_poll}</div>\n<a href='/options'>Options</a>\n</body>\n</html>\n",
        overflow = if metrics.scrollbar_visible { "scroll" } else { "hidden" },
        height = metrics.list_height,
        offset = metrics.list_y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::list_row::ListRow;

    #[test]
    fn test_page_lists_items_in_order() {
        let snapshot = ListSnapshot {
            rows: vec![
                ListRow::Header {
                    view_id: 0,
                    url: "http://a/view".into(),
                    color: "blue".into(),
                    expanded: true,
                },
                ListRow::Job {
                    name: "core".into(),
                    url: "http://a/job/core/".into(),
                    color: "blue".into(),
                },
            ],
            last_poll_time: Some("9:05".into()),
            row_count: 2,
        };

        let page = render_page(&snapshot, 0);
        let header_at = page.find("toggleViewCollapse(0)'>[-]").unwrap();
        let job_at = page.find(">core</a>").unwrap();
        assert!(header_at < job_at);
        assert!(page.contains("<div id='lastPollTime'>9:05</div>"));
        assert!(page.contains("overflow-y:hidden"));
        assert!(page.contains("x='210'"));
    }

    #[test]
    fn test_empty_page() {
        let page = render_page(&ListSnapshot::default(), 0);
        assert!(page.contains("<div id='lastPollTime'>never</div>"));
        assert!(!page.contains("<item"));
    }

    #[test]
    fn test_collapsed_jobs_count_towards_scroll_area() {
        let snapshot = ListSnapshot {
            rows: vec![ListRow::Header {
                view_id: 0,
                url: "http://a/view".into(),
                color: "red".into(),
                expanded: false,
            }],
            last_poll_time: None,
            row_count: 25,
        };

        let page = render_page(&snapshot, 0);
        assert!(page.contains("overflow-y:scroll"));
        assert!(page.contains("height:500px"));
    }
}
