use anyhow::{Context, Result};
use scraper::{ElementRef, Html};
use url::Url;

use crate::api::forum::ForumClient;
use crate::models::VersionRecord;
use crate::utils::html::{absolute_url, attr, select_all, select_first, text_of};
use crate::utils::to_iso_date;

// The history table always opens with a row that isn't a release.
const LEADING_ROWS: usize = 1;
// "<score> out of 5 (<n> ratings)": score is out of 5, the editor wants 0-100.
const STAR_SCALE: f64 = 0.05 * 400.0;

/// Fetches a project's version history, optionally narrowed to one file id.
///
/// Only the history page itself can fail the call; filename lookups fall
/// back to a placeholder.
pub async fn fetch_versions(
    client: &ForumClient,
    project_id: u32,
    file_id: Option<&str>,
) -> Result<Vec<VersionRecord>> {
    let html = client
        .history_page(project_id)
        .await
        .with_context(|| format!("Failed to fetch version history for project {}", project_id))?;

    let mut versions = parse_history(&html, client.base_url());
    if let Some(file_id) = file_id {
        versions.retain(|version| version.file_id.as_deref() == Some(file_id));
    }

    for version in &mut versions {
        if let Some(link) = &version.download_link {
            version.file_name = Some(client.file_name(link).await);
        }
    }

    Ok(versions)
}

/// Extracts every release row of a history page, in page order.
/// `file_name` is left unset; it needs a request of its own.
pub fn parse_history(html: &str, base: &Url) -> Vec<VersionRecord> {
    let document = Html::parse_document(html);

    select_all(document.root_element(), ".dataList-row")
        .into_iter()
        .filter_map(|row| {
            let cells = select_all(row, ".dataList-cell");
            if cells.is_empty() {
                None
            } else {
                Some(parse_row(&cells, base))
            }
        })
        .skip(LEADING_ROWS)
        .collect()
}

fn parse_row(cells: &[ElementRef<'_>], base: &Url) -> VersionRecord {
    let cell_text = |i: usize| cells.get(i).map(|cell| text_of(*cell)).unwrap_or_default();

    let rating_text = cell_text(3);
    let link = cells
        .get(4)
        .and_then(|cell| select_first(*cell, "a"))
        .and_then(|a| attr(a, "href"))
        .and_then(|href| absolute_url(base, href));

    VersionRecord {
        file_version: cell_text(0),
        release_date: to_iso_date(&cell_text(1)),
        download_count: cell_text(2),
        rating: format_rating(&rating_text).unwrap_or(rating_text),
        file_id: link.as_ref().and_then(file_id_from_link),
        download_link: link.map(String::from),
        file_name: None,
    }
}

/// `"4.5 out of 5 (2 ratings)"` -> `"90"`, `"4.33 out of 5 ..."` -> `"86.60"`.
///
/// `None` when the text doesn't have that shape.
pub fn format_rating(text: &str) -> Option<String> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() < 3 {
        return None;
    }

    let score: f64 = parts[0].parse().ok()?;
    let stars = score * STAR_SCALE;
    if !stars.is_finite() {
        return None;
    }

    if stars.fract() == 0.0 {
        Some(format!("{}", stars as i64))
    } else {
        Some(format!("{:.2}", stars))
    }
}

/// Download links look like `/forum/downloads/<slug>.<id>/download?...`;
/// the id is what follows the first `.` of the fourth path segment.
pub fn file_id_from_link(link: &Url) -> Option<String> {
    link.path()
        .split('/')
        .nth(3)?
        .split('.')
        .nth(1)
        .filter(|id| !id.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HISTORY: &str = r#"
        <div class="dataList">
          <table class="dataList-table">
            <tr class="dataList-row dataList-row--header dataList-row--noHover">
              <th class="dataList-cell">Version</th>
              <th class="dataList-cell">Release date</th>
              <th class="dataList-cell">Downloads</th>
              <th class="dataList-cell">Rating</th>
              <th class="dataList-cell"></th>
            </tr>
            <tr class="dataList-row">
              <td class="dataList-cell">1.2</td>
              <td class="dataList-cell"><time class="u-dt">Jul 21, 2024</time></td>
              <td class="dataList-cell">1,204</td>
              <td class="dataList-cell">4.50 out of 5 (2 ratings)</td>
              <td class="dataList-cell"><a href="/forum/downloads/woody-woods.12/download?version=88">Download</a></td>
            </tr>
            <tr class="dataList-row">
              <td class="dataList-cell">1.1</td>
              <td class="dataList-cell">sometime</td>
              <td class="dataList-cell">530</td>
              <td class="dataList-cell">0.00 star(s) 0 ratings</td>
              <td class="dataList-cell"><a href="/forum/downloads/woody-woods.13/download">Download</a></td>
            </tr>
            <tr class="dataList-row">
              <td class="dataList-cell">1.0</td>
              <td class="dataList-cell">Jan 02, 2023</td>
              <td class="dataList-cell">12</td>
              <td class="dataList-cell">No ratings</td>
              <td class="dataList-cell">Unavailable</td>
            </tr>
          </table>
        </div>
    "#;

    fn base() -> Url {
        Url::parse("https://mariopartylegacy.com/forum/").unwrap()
    }

    #[test]
    fn test_parse_history() {
        let versions = parse_history(HISTORY, &base());
        assert_eq!(versions.len(), 3);

        let first = &versions[0];
        assert_eq!(first.file_version, "1.2");
        assert_eq!(first.release_date.as_deref(), Some("2024-07-21"));
        assert_eq!(first.download_count, "1,204");
        assert_eq!(first.rating, "90");
        assert_eq!(
            first.download_link.as_deref(),
            Some("https://mariopartylegacy.com/forum/downloads/woody-woods.12/download?version=88")
        );
        assert_eq!(first.file_id.as_deref(), Some("12"));
        assert_eq!(first.file_name, None);
    }

    #[test]
    fn test_parse_history_degrades_per_cell() {
        let versions = parse_history(HISTORY, &base());

        assert_eq!(versions[1].release_date, None);
        assert_eq!(versions[1].rating, "0");

        let last = &versions[2];
        assert_eq!(last.release_date.as_deref(), Some("2023-01-02"));
        assert_eq!(last.rating, "No ratings");
        assert_eq!(last.download_link, None);
        assert_eq!(last.file_id, None);
    }

    #[test]
    fn test_first_row_is_always_dropped() {
        let row = |v: &str| {
            format!(
                r#"<tr class="dataList-row"><td class="dataList-cell">{v}</td></tr>"#
            )
        };

        let one = format!("<table>{}</table>", row("a"));
        assert!(parse_history(&one, &base()).is_empty());

        let three = format!("<table>{}{}{}</table>", row("a"), row("b"), row("c"));
        let versions = parse_history(&three, &base());
        let names: Vec<_> = versions.iter().map(|v| v.file_version.as_str()).collect();
        assert_eq!(names, ["b", "c"]);
        assert_eq!(versions[0].download_count, "");
    }

    #[test]
    fn test_format_rating() {
        assert_eq!(format_rating("5 out of 5 (1 rating)").as_deref(), Some("100"));
        assert_eq!(format_rating("4.50 out of 5 (2 ratings)").as_deref(), Some("90"));
        assert_eq!(format_rating("4.33 out of 5 (3 ratings)").as_deref(), Some("86.60"));
        assert_eq!(format_rating("3.25 out of 5 (4 ratings)").as_deref(), Some("65"));
        assert_eq!(format_rating("4.50 out"), None);
        assert_eq!(format_rating("great out of 5"), None);
        assert_eq!(format_rating(""), None);
    }

    #[test]
    fn test_format_rating_matches_score_times_twenty() {
        for score in [0.0_f64, 1.0, 2.5, 3.75, 4.2, 4.9] {
            let text = format!("{} out of 5 (7 ratings)", score);
            let expected = score * 20.0;
            let formatted = format_rating(&text).unwrap();
            if expected.fract() == 0.0 {
                assert_eq!(formatted, format!("{}", expected as i64));
            } else {
                assert_eq!(formatted, format!("{:.2}", expected));
            }
        }
    }

    #[test]
    fn test_file_id_from_link() {
        let link = Url::parse("https://mariopartylegacy.com/forum/downloads/woody-woods.12/download").unwrap();
        assert_eq!(file_id_from_link(&link).as_deref(), Some("12"));

        let link = Url::parse("https://mariopartylegacy.com/forum/downloads/").unwrap();
        assert_eq!(file_id_from_link(&link), None);

        let link = Url::parse("https://mariopartylegacy.com/forum/downloads/12/download").unwrap();
        assert_eq!(file_id_from_link(&link), None);
    }
}
