use anyhow::{Context, Result};
use log::debug;
use scraper::{ElementRef, Html};
use url::Url;

use crate::api::forum::ForumClient;
use crate::models::BoardSummary;
use crate::utils::html::{absolute_url, attr, first_text, select_all, text_of};

pub const DEFAULT_MAX: usize = 50;
/// Upper bound on listing pages fetched for one request, whatever `max` is.
pub const MAX_PAGES: usize = 100;

/// Walks the downloads listing from page 1 until `max` boards are collected,
/// a page comes back empty, or [`MAX_PAGES`] pages have been fetched.
pub async fn fetch_top_boards(client: &ForumClient, max: usize) -> Result<Vec<BoardSummary>> {
    let mut boards = Vec::new();

    for page in 1..=MAX_PAGES {
        if boards.len() >= max {
            break;
        }

        let html = client
            .listing_page(page)
            .await
            .with_context(|| format!("Failed to fetch listing page {}", page))?;

        let entries = parse_listing(&html, client.base_url());
        if entries.is_empty() {
            debug!("Listing page {} is empty, stopping", page);
            break;
        }
        boards.extend(entries);
    }

    boards.truncate(max);
    Ok(boards)
}

pub fn parse_listing(html: &str, base: &Url) -> Vec<BoardSummary> {
    let document = Html::parse_document(html);

    select_all(document.root_element(), ".structItem--resource")
        .into_iter()
        .map(|entry| parse_entry(entry, base))
        .collect()
}

fn parse_entry(entry: ElementRef<'_>, base: &Url) -> BoardSummary {
    // Prefix labels are links too; the resource link comes last.
    let title_link = select_all(entry, ".structItem-title a").into_iter().last();

    let mut board = BoardSummary {
        name: title_link.map(text_of).filter(|name| !name.is_empty()),
        link: title_link
            .and_then(|a| attr(a, "href"))
            .and_then(|href| absolute_url(base, href))
            .map(String::from),
        creator: attr(entry, "data-author")
            .map(String::from)
            .or_else(|| first_text(entry, ".username")),
        ..Default::default()
    };

    for pair in select_all(entry, "dl") {
        let (Some(label), Some(value)) = (first_text(pair, "dt"), first_text(pair, "dd")) else {
            continue;
        };
        let label = label.to_lowercase();

        let slot = if label.contains("downloads") {
            &mut board.downloads
        } else if label.contains("views") {
            &mut board.views
        } else if label.contains("version") {
            &mut board.version
        } else if label.contains("updated") {
            &mut board.updated
        } else {
            continue;
        };
        slot.get_or_insert(value);
    }

    if board.version.is_none() {
        board.version = first_text(entry, ".structItem-title .u-muted");
    }

    board
}
