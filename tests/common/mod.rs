//! A fake forum serving canned downloads pages, plus helpers to run the API
//! against it on localhost.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Query, State};
use axum::http::header::CONTENT_DISPOSITION;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;

use party_planner_api::api::forum::ForumClient;
use party_planner_api::routes;

pub const HISTORY: &str = r#"
<html><body>
  <table class="dataList-table">
    <tr class="dataList-row dataList-row--header dataList-row--noHover">
      <th class="dataList-cell">Version</th>
      <th class="dataList-cell">Release date</th>
      <th class="dataList-cell">Downloads</th>
      <th class="dataList-cell">Rating</th>
      <th class="dataList-cell"></th>
    </tr>
    <tr class="dataList-row">
      <td class="dataList-cell">2.0</td>
      <td class="dataList-cell"><time class="u-dt">Mar 3, 2024</time></td>
      <td class="dataList-cell">310</td>
      <td class="dataList-cell">4.00 out of 5 (3 ratings)</td>
      <td class="dataList-cell"><a href="/forum/downloads/woody-woods.88/download">Download</a></td>
    </tr>
    <tr class="dataList-row">
      <td class="dataList-cell">1.0</td>
      <td class="dataList-cell"><time class="u-dt">Jul 21, 2023</time></td>
      <td class="dataList-cell">1,204</td>
      <td class="dataList-cell">4.33 out of 5 (6 ratings)</td>
      <td class="dataList-cell"><a href="/forum/downloads/woody-woods.87/download">Download</a></td>
    </tr>
  </table>
</body></html>
"#;

pub const PROJECT: &str = r#"
<html><body>
  <h1 class="p-title-value">MP3 Woody Woods</h1>
  <a href="/forum/members/nayla.4/" class="username u-concealed">Nayla</a>
  <time class="u-dt">Jul 21, 2023</time>
  <div class="contentRow contentRow--hideFigureNarrow">
    <span class="contentRow-figure"><img src="/forum/data/resource_icons/0/12.jpg?1721599391"></span>
  </div>
  <dl data-field="board_difficulty"><dt>Difficulty</dt><dd>Average</dd></dl>
  <dl data-field="board_turns"><dt>Turns</dt><dd>20</dd></dl>
  <dl data-field="board_events"><dt>Events</dt><dd>Yes</dd></dl>
  <dl data-field="board_music"><dt>Music</dt><dd>Yes</dd></dl>
  <dl data-field="board_hardware"><dt>N64</dt><dd>No</dd></dl>
  <dl data-field="board_theme"><dt>Theme</dt><dd>Forest</dd></dl>
  <div class="bbWrapper">A board in the woods.


Spoiler
Boo lives in the hollow tree.


Good luck!</div>
</body></html>
"#;

pub const SEARCH: &str = r#"
<html><body>
  <ol class="block-body">
    <li class="block-row"><h3 class="contentRow-title">
      <a href="/forum/downloads/mp3-woody-woods.12/">MP3 Woody Woods</a></h3></li>
    <li class="block-row"><h3 class="contentRow-title">
      <a href="/forum/downloads/mp1-woody-lake.31/">MP1 Woody Lake</a></h3></li>
    <li class="block-row"><h3 class="contentRow-title">
      <a href="/forum/threads/woody-chat.5/">MP3 Woody chat</a></h3></li>
  </ol>
</body></html>
"#;

/// Request counters and listing shape of one fake forum.
#[derive(Default)]
pub struct FakeForum {
    /// Listing pages with entries; later pages come back empty.
    pub listing_pages: usize,
    pub per_page: usize,
    pub listing_fetches: AtomicUsize,
    pub head_requests: AtomicUsize,
}

impl FakeForum {
    pub fn with_listing(listing_pages: usize, per_page: usize) -> Self {
        Self {
            listing_pages,
            per_page,
            ..Default::default()
        }
    }

    pub fn listing_fetches(&self) -> usize {
        self.listing_fetches.load(Ordering::SeqCst)
    }

    pub fn head_requests(&self) -> usize {
        self.head_requests.load(Ordering::SeqCst)
    }

    fn listing(&self, page: usize) -> String {
        let mut html = String::from(r#"<html><body><div class="structItemContainer">"#);
        if page <= self.listing_pages {
            for i in 0..self.per_page {
                let id = page * 1000 + i;
                html.push_str(&format!(
                    r#"<div class="structItem structItem--resource" data-author="author{id}">
                         <div class="structItem-title"><a href="/forum/downloads/board.{id}/">MP1 Board {id}</a></div>
                         <dl class="pairs"><dt>Downloads</dt><dd>{i}</dd></dl>
                       </div>"#
                ));
            }
        }
        html.push_str("</div></body></html>");
        html
    }
}

async fn handle(
    State(forum): State<Arc<FakeForum>>,
    method: Method,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if method == Method::HEAD {
        forum.head_requests.fetch_add(1, Ordering::SeqCst);
    }

    match uri.path() {
        "/forum/downloads/12/history" => Html(HISTORY).into_response(),
        "/forum/downloads/12/" => Html(PROJECT).into_response(),
        "/forum/downloads/500/" | "/forum/downloads/500/history" => {
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
        "/forum/downloads/woody-woods.88/download" => (
            [(CONTENT_DISPOSITION, r#"attachment; filename="woody_woods_v2.zip""#)],
            "zip",
        )
            .into_response(),
        "/forum/downloads/woody-woods.87/download" => "zip".into_response(),
        "/forum/search/search" if query.get("t").map(String::as_str) == Some("resource") => {
            Html(SEARCH).into_response()
        }
        "/forum/downloads/" => {
            forum.listing_fetches.fetch_add(1, Ordering::SeqCst);
            let page = query
                .get("page")
                .and_then(|p| p.parse().ok())
                .unwrap_or(1);
            Html(forum.listing(page)).into_response()
        }
        "/plain" => ([("x-upstream", "yes")], "hello from upstream").into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn spawn(app: Router) -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    Ok(format!("http://{}", addr))
}

/// Handles to a running fake forum and the API pointed at it.
pub struct TestApp {
    pub api: String,
    pub forum_root: String,
    pub forum: Arc<FakeForum>,
}

impl TestApp {
    pub async fn start(forum: FakeForum) -> Result<Self> {
        let forum = Arc::new(forum);
        let forum_root = spawn(Router::new().fallback(handle).with_state(forum.clone())).await?;

        let client = ForumClient::with_base_url(&format!("{}/forum/", forum_root))?;
        let api = spawn(routes::router(client)).await?;

        Ok(Self {
            api,
            forum_root,
            forum,
        })
    }

    pub async fn get(&self, path: &str) -> Result<(StatusCode, serde_json::Value)> {
        let response = reqwest::get(format!("{}{}", self.api, path)).await?;
        let status = response.status();
        let body = response.json().await?;
        Ok((status, body))
    }
}
