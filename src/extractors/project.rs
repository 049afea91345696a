use std::sync::LazyLock;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use regex::Regex;
use scraper::{ElementRef, Html};
use url::Url;

use crate::api::forum::ForumClient;
use crate::models::{
    CustomEvents, CustomMusic, Difficulty, GameId, N64Support, ProjectDetail, Vocabulary,
};
use crate::utils::html::{absolute_url, attr, first_text, select_all, select_first};
use crate::utils::{parse_int, split_lines, to_iso_date};

// "<intro>   Spoiler <hidden>   <outro>" once the description's lines are joined.
static SPOILER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)(.*?)   Spoiler\s*(.*?)\s*   (.*)").expect("valid spoiler regex")
});

pub async fn fetch_project(client: &ForumClient, project_id: u32) -> Result<ProjectDetail> {
    let html = client
        .project_page(project_id)
        .await
        .with_context(|| format!("Failed to fetch project page for project {}", project_id))?;

    Ok(parse_project(&html, project_id, client.base_url()))
}

/// Builds a [`ProjectDetail`] from a detail page. Each field is looked up on
/// its own; whatever is missing stays `None`.
pub fn parse_project(html: &str, project_id: u32, base: &Url) -> ProjectDetail {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let mut detail = ProjectDetail {
        id: project_id,
        ..Default::default()
    };

    if let Some(title) = first_text(root, "h1.p-title-value") {
        if let Some((game, name)) = GameId::split_title(&title) {
            detail.game_id = Some(game);
            detail.name = Some(name.to_string());
        }
    }

    detail.author = first_text(root, "a.username.u-concealed");
    detail.creation_date = select_first(root, "time.u-dt").and_then(creation_date);

    detail.difficulty = lookup_field::<Difficulty>(root, "board_difficulty");
    detail.recommended_turns = custom_field(root, "board_turns").as_deref().and_then(parse_int);
    detail.custom_events = lookup_field::<CustomEvents>(root, "board_events");
    detail.custom_music = lookup_field::<CustomMusic>(root, "board_music");
    detail.playable_on_n64 = lookup_field::<N64Support>(root, "board_hardware");
    detail.space_count = custom_field(root, "board_spaces").as_deref().and_then(parse_int);
    detail.theme = custom_field(root, "board_theme");

    detail.description = select_first(root, "div.bbWrapper").map(description);
    detail.icon = icon_url(root, base);

    detail
}

/// Value cell of one of the board's custom fields.
fn custom_field(root: ElementRef<'_>, name: &str) -> Option<String> {
    first_text(root, &format!(r#"dl[data-field="{}"] dd"#, name))
}

fn lookup_field<T: Vocabulary>(root: ElementRef<'_>, name: &str) -> Option<T> {
    custom_field(root, name).as_deref().and_then(T::lookup)
}

fn creation_date(time: ElementRef<'_>) -> Option<String> {
    let text = time.text().collect::<String>();
    to_iso_date(&text).or_else(|| {
        // datetime="2024-07-21T18:03:11-0400"
        let stamp = attr(time, "datetime")?.get(..10)?;
        NaiveDate::parse_from_str(stamp, "%Y-%m-%d")
            .ok()
            .map(|date| date.to_string())
    })
}

fn description(body: ElementRef<'_>) -> String {
    let text = body.text().collect::<String>();
    let joined = split_lines(text.trim()).join(" ");
    strip_spoiler(&joined)
}

/// Drops the hidden part of a spoiler block, keeping the text around it.
pub fn strip_spoiler(text: &str) -> String {
    match SPOILER_RE.captures(text) {
        Some(caps) => format!("{} {}", caps[1].trim(), caps[3].trim()),
        None => text.to_string(),
    }
}

/// First avatar image in the page's content rows, without query or fragment.
fn icon_url(root: ElementRef<'_>, base: &Url) -> Option<String> {
    select_all(root, "div.contentRow.contentRow--hideFigureNarrow")
        .into_iter()
        .find_map(|row| {
            let img = select_first(row, "span.contentRow-figure img")?;
            let mut url = absolute_url(base, attr(img, "src")?)?;
            url.set_query(None);
            url.set_fragment(None);
            Some(url.to_string())
        })
}
