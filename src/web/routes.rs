use crate::config::Config;
use crate::error::Result;
use crate::services::GolosNode;
use crate::utils::helpers::{parse_page, strip_at};
use crate::views::templates::IndexTemplate;
use crate::views::{load_account_page, load_comment_page, render_account_page, render_comment_page};
use actix_web::{
    get,
    http::header::{self, ContentType},
    web::{self, Data},
    HttpResponse,
};
use askama::Template;
use chrono::Utc;
use log::error;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<String>,
}

fn html_response(rendered: Result<String>) -> HttpResponse {
    match rendered {
        Ok(body) => HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(body),
        Err(e) => {
            error!("Failed to render page: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/")]
pub async fn index(query: web::Query<SearchQuery>) -> HttpResponse {
    if let Some(username) = query.username.as_deref().map(str::trim) {
        if !username.is_empty() {
            return HttpResponse::Found()
                .insert_header((header::LOCATION, format!("/@{}", strip_at(username))))
                .finish();
        }
    }
    html_response(
        IndexTemplate {
            error: String::new(),
        }
        .render()
        .map_err(Into::into),
    )
}

#[get("/{username}")]
pub async fn profile(
    config: Data<Arc<Config>>,
    username: web::Path<String>,
    query: web::Query<PageQuery>,
) -> HttpResponse {
    let page = parse_page(query.page.as_deref());
    let now = Utc::now().naive_utc();
    let result = match GolosNode::connect(&config) {
        Ok(node) => load_account_page(&node, &config, &username, page, now).await,
        Err(e) => Err(e),
    };
    html_response(render_account_page(strip_at(&username), result))
}

async fn comment_response(config: &Config, username: &str, permlink: &str) -> HttpResponse {
    let result = match GolosNode::connect(config) {
        Ok(node) => load_comment_page(&node, config, username, permlink).await,
        Err(e) => Err(e),
    };
    html_response(render_comment_page(result))
}

#[get("/{username}/{permlink}")]
pub async fn comment(
    config: Data<Arc<Config>>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (username, permlink) = path.into_inner();
    comment_response(&config, &username, &permlink).await
}

#[get("/{category}/{username}/{permlink}")]
pub async fn categorized_comment(
    config: Data<Arc<Config>>,
    path: web::Path<(String, String, String)>,
) -> HttpResponse {
    let (_category, username, permlink) = path.into_inner();
    comment_response(&config, &username, &permlink).await
}
