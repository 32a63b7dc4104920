//! `/posts` and `/search` endpoints.
use std::sync::Arc;

use log::debug;
use reqwest::Method;

use super::path_with;
use crate::errors::ClientError;
use crate::http::{HttpClient, Query};
use crate::models::{ListPostsParams, Post, PostInput, SearchParams};

#[derive(Debug, Clone)]
pub struct Posts {
    http: Arc<HttpClient>,
}

impl Posts {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// GET /posts - List posts, one page at a time.
    pub async fn list(&self, params: &ListPostsParams) -> Result<Vec<Post>, ClientError> {
        debug!(
            "posts.list page={} limit={} category={:?} published={:?}",
            params.page, params.limit, params.category, params.published
        );
        let mut query: Query = vec![
            ("page", params.page.to_string()),
            ("limit", params.limit.to_string()),
        ];
        if let Some(category) = params.category.as_deref().filter(|c| !c.is_empty()) {
            query.push(("category", category.to_string()));
        }
        if let Some(published) = params.published {
            query.push(("published", published.to_string()));
        }
        self.http
            .execute(Method::GET, "/posts", &query, None, None)
            .await?
            .into_data()
    }

    /// GET /posts/{id_or_slug} - Fetch a single post.
    pub async fn get(&self, id_or_slug: &str) -> Result<Post, ClientError> {
        debug!("posts.get id_or_slug={}", id_or_slug);
        self.http
            .execute(Method::GET, &path_with("/posts", id_or_slug), &[], None, None)
            .await?
            .into_data()
    }

    /// POST /posts - Create a post.
    pub async fn create(&self, post: &PostInput) -> Result<Post, ClientError> {
        debug!("posts.create title={:?}", post.title);
        let body = serde_json::to_value(post)?;
        self.http
            .execute(Method::POST, "/posts", &[], Some(&body), None)
            .await?
            .into_data()
    }

    /// PUT /posts/{id} - Update a post. Only the fields set in `post` change.
    pub async fn update(&self, id: &str, post: &PostInput) -> Result<Post, ClientError> {
        debug!("posts.update id={}", id);
        let body = serde_json::to_value(post)?;
        self.http
            .execute(Method::PUT, &path_with("/posts", id), &[], Some(&body), None)
            .await?
            .into_data()
    }

    /// DELETE /posts/{id} - Delete a post.
    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        debug!("posts.delete id={}", id);
        self.http
            .execute(Method::DELETE, &path_with("/posts", id), &[], None, None)
            .await?;
        Ok(())
    }

    /// GET /search - Full-text search over posts.
    pub async fn search(&self, params: &SearchParams) -> Result<Vec<Post>, ClientError> {
        debug!(
            "posts.search query={} limit={} category={:?}",
            params.query, params.limit, params.category
        );
        let mut query: Query = vec![
            ("q", params.query.clone()),
            ("limit", params.limit.to_string()),
        ];
        if let Some(category) = params.category.as_deref().filter(|c| !c.is_empty()) {
            query.push(("category", category.to_string()));
        }
        self.http
            .execute(Method::GET, "/search", &query, None, None)
            .await?
            .into_data()
    }
}
