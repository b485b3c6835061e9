// src/specs/playlist.rs
//! Spec for one YouTube playlist page.
//!
//! Rows are `<tr>` elements; the title cell is `<td class="pl-video-title">` and its
//! first `<a>` holds the video title. Rows without that cell (headers, "load more")
//! are skipped. Titles come back in page order, uncleaned.

use crate::config::consts::PLAYLIST_URL;
use crate::core::html::{Doc, has_class, inner_after_open_tag, opener};
use crate::core::sanitize::text_of;
use crate::core::Fetch;
use crate::error::Result;

/// Raw page HTML; parsing is separate so the page can be cached as fetched.
pub fn fetch(net: &dyn Fetch, playlist_id: &str) -> Result<String> {
    net.get(PLAYLIST_URL, &[("list", playlist_id)])
}

pub fn parse_videos(html: &str) -> Vec<String> {
    let doc = Doc::new(html);
    let mut out = Vec::new();

    for row in doc.blocks("<tr", "</tr>") {
        let cells = Doc::new(row);
        let Some(cell) = cells
            .blocks("<td", "</td>")
            .into_iter()
            .find(|td| has_class(opener(td), "pl-video-title"))
        else {
            continue;
        };
        let cell = Doc::new(cell);
        if let Some((s, e)) = cell.next_block("<a", "</a>", 0) {
            let title = text_of(inner_after_open_tag(&cell.as_str()[s..e]));
            if !title.is_empty() {
                out.push(title);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_in_page_order() {
        let page = r#"
          <table id="pl-video-table">
            <tr class="pl-video yt-uix-tile" data-title="x">
              <td class="pl-video-handle"></td>
              <td class="pl-video-title">
                <a class="pl-video-title-link" href="/watch?v=1">
                  &quot;אדום&quot; בשפת הסימנים הישראלית - המכון לקידום החרש
                </a>
                <div class="pl-video-owner">by <a href="/user/x">המכון</a></div>
              </td>
            </tr>
            <tr class="pl-video"><td class="pl-video-title"><a href="/watch?v=2">כחול</a></td></tr>
            <tr><td class="pl-video-index">3</td></tr>
          </table>"#;
        assert_eq!(
            parse_videos(page),
            vec![s!("\"אדום\" בשפת הסימנים הישראלית - המכון לקידום החרש"), s!("כחול")]
        );
    }

    #[test]
    fn page_without_table() {
        assert!(parse_videos("<html><body>consent wall</body></html>").is_empty());
    }
}
