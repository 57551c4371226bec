//! Post entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dates::parse_calendar_date;
use crate::models::not_blank;
use crate::status::{MediaType, Platform, PostStatus};
use crate::types::{ClientId, PostId, Timestamp};

/// A note left on a post by the agency or the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    pub text: String,
    pub date: Timestamp,
}

/// A planned or published social-media item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub client_id: ClientId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub caption: Option<String>,
    /// Primary media reference.
    #[serde(default)]
    pub media_url: Option<String>,
    /// Additional media references, in display order.
    #[serde(default)]
    pub media_urls: Vec<String>,
    #[serde(default)]
    pub media_type: MediaType,
    /// Raw scheduled date. May be missing or malformed.
    #[serde(default)]
    pub scheduled_date: Option<String>,
    /// `HH:MM`, free text.
    #[serde(default)]
    pub scheduled_time: Option<String>,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Post {
    /// The scheduled calendar day, or `None` when absent or unparseable.
    pub fn scheduled_day(&self) -> Option<NaiveDate> {
        self.scheduled_date.as_deref().and_then(parse_calendar_date)
    }

    /// Every media reference, primary first. Empty references are skipped.
    pub fn media(&self) -> Vec<&str> {
        self.media_url
            .iter()
            .chain(self.media_urls.iter())
            .map(String::as_str)
            .filter(|url| !url.is_empty())
            .collect()
    }
}

/// DTO for creating a new post.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePost {
    pub client_id: ClientId,
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default)]
    pub media_urls: Vec<String>,
    #[serde(default)]
    pub media_type: MediaType,
    #[validate(custom(function = "not_blank"))]
    pub scheduled_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<String>,
    /// Defaults to `idea` if omitted.
    #[serde(default)]
    pub status: PostStatus,
    /// Defaults to `instagram` if omitted.
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// DTO for updating an existing post. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_urls: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<Comment>>,
}

impl UpdatePost {
    /// A partial update that only sets the status.
    pub fn status(status: PostStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// A partial update that replaces the comment list.
    pub fn comments(comments: Vec<Comment>) -> Self {
        Self {
            comments: Some(comments),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(json: serde_json::Value) -> Post {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn sparse_post_uses_form_defaults() {
        let p = post(serde_json::json!({"id": "p1", "client_id": "c1"}));
        assert_eq!(p.status, PostStatus::Idea);
        assert_eq!(p.platform, Platform::Instagram);
        assert_eq!(p.media_type, MediaType::Image);
        assert!(p.comments.is_empty());
    }

    #[test]
    fn scheduled_day_parses_or_is_none() {
        let ok = post(serde_json::json!({"id": "p1", "client_id": "c1", "scheduled_date": "2024-03-15"}));
        assert_eq!(ok.scheduled_day(), NaiveDate::from_ymd_opt(2024, 3, 15));

        let bad = post(serde_json::json!({"id": "p2", "client_id": "c1", "scheduled_date": "soon"}));
        assert_eq!(bad.scheduled_day(), None);

        let missing = post(serde_json::json!({"id": "p3", "client_id": "c1"}));
        assert_eq!(missing.scheduled_day(), None);
    }

    #[test]
    fn media_lists_primary_first_and_skips_empty() {
        let p = post(serde_json::json!({
            "id": "p1",
            "client_id": "c1",
            "media_url": "https://cdn/a.jpg",
            "media_urls": ["", "https://cdn/b.jpg"]
        }));
        assert_eq!(p.media(), vec!["https://cdn/a.jpg", "https://cdn/b.jpg"]);
    }

    #[test]
    fn status_update_is_partial() {
        let json = serde_json::to_value(UpdatePost::status(PostStatus::Approved)).unwrap();
        assert_eq!(json, serde_json::json!({"status": "approved"}));
    }

    #[test]
    fn create_requires_title_and_date() {
        let input: CreatePost = serde_json::from_value(serde_json::json!({
            "client_id": "c1",
            "title": " ",
            "scheduled_date": ""
        }))
        .unwrap();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
        assert!(errors.field_errors().contains_key("scheduled_date"));
    }
}
