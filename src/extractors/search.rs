use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use scraper::{ElementRef, Html};

use crate::api::forum::ForumClient;
use crate::models::{GameId, ProjectSummary};
use crate::utils::html::{attr, select_all};
use crate::utils::split_lines;

// ".../downloads/woody-woods.12/" -> 12
static PROJECT_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/downloads/[^/]*\.(\d+)/").expect("valid project link regex"));

/// Keyword search over the forum's downloads, optionally limited to one game.
pub async fn search_projects(
    client: &ForumClient,
    term: &str,
    game: Option<GameId>,
) -> Result<Vec<ProjectSummary>> {
    let html = client
        .search_page(term)
        .await
        .with_context(|| format!("Failed to search the forum for '{}'", term))?;

    Ok(parse_search(&html, game))
}

/// Results in page order. Hits without a project id or a game prefix are skipped.
pub fn parse_search(html: &str, game: Option<GameId>) -> Vec<ProjectSummary> {
    let document = Html::parse_document(html);

    select_all(document.root_element(), "h3.contentRow-title")
        .into_iter()
        .filter_map(parse_result)
        .filter(|summary| game.map_or(true, |game| summary.game_id == game))
        .collect()
}

fn parse_result(title: ElementRef<'_>) -> Option<ProjectSummary> {
    let (link, project_id) = select_all(title, "a")
        .into_iter()
        .find_map(|a| Some((a, project_id_from_href(attr(a, "href")?)?)))?;

    let text = link.text().collect::<String>();
    let (game_id, rest) = GameId::split_title(text.trim())?;
    let name = split_lines(rest).first().copied().unwrap_or_default().trim().to_string();

    Some(ProjectSummary {
        name,
        game_id,
        project_id,
    })
}

pub fn project_id_from_href(href: &str) -> Option<u32> {
    PROJECT_LINK_RE.captures(href)?.get(1)?.as_str().parse().ok()
}
