// Rows of the rendered view list and their item markup
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListRow {
    Header {
        view_id: u32,
        url: String,
        color: String,
        expanded: bool,
    },
    Job {
        name: String,
        url: String,
        color: String,
    },
}

impl ListRow {
    /// Item markup for this row; `icon_x` is the horizontal offset of the
    /// status icon.
    pub fn to_markup(&self, icon_x: u32) -> String {
        match self {
            ListRow::Header {
                view_id,
                url,
                color,
                expanded,
            } => {
                let toggle = if *expanded { "[-]" } else { "[+]" };
                let url = escape_markup(url);
                format!(
                    "<item name='{url}' background='#AAAAAA'>\
                     <a width='20' height='16' x='0' onclick='toggleViewCollapse({view_id})'>{toggle}</a>\
                     <a width='100' height='16' x='20' href='{url}'>{url}</a>\
                     {icon}</item>",
                    icon = status_icon(&format!("{url}Img"), color, icon_x),
                )
            }
            ListRow::Job { name, url, color } => {
                let name = escape_markup(name);
                format!(
                    "<item name='{name}' valign='center'>\
                     <a width='120' height='16' x='0' href='{url}'>{name}</a>\
                     {icon}</item>",
                    url = escape_markup(url),
                    icon = status_icon(&format!("{name}Img"), color, icon_x),
                )
            }
        }
    }
}

fn status_icon(name: &str, color: &str, x: u32) -> String {
    format!(
        "<img name='{name}' width='16' height='16' x='{x}' y='2' src='images/{}.gif'/>",
        escape_markup(color)
    )
}

/// Escape text for use inside item markup text and single-quoted attributes
pub fn escape_markup(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Geometry of the scrolled list, derived from the row count and viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListMetrics {
    pub list_height: u32,
    pub scroll_max: u32,
    pub scrollbar_visible: bool,
    pub list_y: i64,
}

impl ListMetrics {
    pub fn compute(rows: usize, item_height: u32, viewport_height: u32, scroll_value: u32) -> Self {
        let content_height = (rows as u32).saturating_mul(item_height);
        let list_height = content_height.max(viewport_height);
        Self {
            list_height,
            scroll_max: list_height - viewport_height,
            // padded out to the viewport means nothing to scroll
            scrollbar_visible: list_height <= content_height,
            list_y: (-(scroll_value as i64)).min(0),
        }
    }
}
