use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Slug {
    pub current: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ImageAsset {
    #[serde(rename = "_ref")]
    pub reference: String,

    #[serde(rename = "_type", default = "reference_type")]
    pub kind: String,
}

fn reference_type() -> String {
    String::from("reference")
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MainImage {
    pub asset: ImageAsset,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// A blog post as held by the content store.
///
/// `content` is a rich-text document the gateway never looks inside.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub slug: Slug,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_image: Option<MainImage>,
    #[serde(default)]
    pub content: Value,

    #[serde(default, with = "time::serde::rfc3339::option")]
    pub published_at: Option<OffsetDateTime>,

    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

/// Listing projection of a post.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub slug: Slug,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_image: Option<MainImage>,

    #[serde(default, with = "time::serde::rfc3339::option")]
    pub published_at: Option<OffsetDateTime>,
}

impl From<Post> for PostSummary {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            author: post.author,
            excerpt: post.excerpt,
            main_image: post.main_image,
            published_at: post.published_at,
        }
    }
}

/// Listing order shared by every store: newest publish date first, undated
/// posts last, ties broken by id.
pub fn newest_first(a: &PostSummary, b: &PostSummary) -> Ordering {
    match (a.published_at, b.published_at) {
        (Some(a_at), Some(b_at)) => b_at.cmp(&a_at).then_with(|| a.id.cmp(&b.id)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    }
}

/// Top-level fields to overwrite on a post. Absent fields stay untouched and
/// provided fields replace the stored value wholesale.
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.excerpt.is_none()
    }

    /// Names of the fields this patch sets, in a fixed order.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.title.is_some() {
            names.push("title");
        }
        if self.content.is_some() {
            names.push("content");
        }
        if self.excerpt.is_some() {
            names.push("excerpt");
        }
        names
    }

    pub fn apply_to(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(excerpt) = self.excerpt {
            post.excerpt = excerpt;
        }
    }
}

// === gateway request/response models === //

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostArgs {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub admin_token: Option<String>,
}

impl UpdatePostArgs {
    /// Collects the provided update fields. Empty strings count as absent, and
    /// a `content` of `null`, `false`, `0` or `""` does too. Empty arrays and
    /// objects are still updates.
    pub fn patch(&self) -> PostPatch {
        PostPatch {
            title: non_empty(&self.title),
            content: self.content.clone().filter(is_truthy),
            excerpt: non_empty(&self.excerpt),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeletePostArgs {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub admin_token: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct UpdatePostResponse {
    pub message: String,
    pub post: Post,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DeletePostResponse {
    pub message: String,
    pub deleted_id: String,
}

pub fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn update_args_read_camel_case_body() {
        let args: UpdatePostArgs = serde_json::from_value(json!({
            "slug": "hello-world",
            "title": "New Title",
            "adminToken": "secret"
        }))
        .unwrap();

        assert_eq!(args.slug.as_deref(), Some("hello-world"));
        assert_eq!(args.admin_token.as_deref(), Some("secret"));
        assert_eq!(args.patch().field_names(), vec!["title"]);
    }

    #[test]
    fn empty_strings_and_null_content_are_not_updates() {
        let args: UpdatePostArgs = serde_json::from_value(json!({
            "slug": "hello-world",
            "title": "",
            "excerpt": "",
            "content": null,
            "adminToken": "secret"
        }))
        .unwrap();

        assert!(args.patch().is_empty());
    }

    #[test]
    fn falsy_content_is_not_an_update() {
        for content in [json!(""), json!(false), json!(0), json!(0.0)] {
            let args: UpdatePostArgs = serde_json::from_value(json!({
                "slug": "hello-world",
                "content": content.clone(),
                "adminToken": "secret"
            }))
            .unwrap();

            assert!(args.patch().is_empty(), "content {} counted as an update", content);
        }
    }

    #[test]
    fn empty_content_array_or_object_is_an_update() {
        for content in [json!([]), json!({}), json!("text"), json!(1)] {
            let args: UpdatePostArgs =
                serde_json::from_value(json!({ "slug": "a", "content": content.clone() })).unwrap();

            assert_eq!(args.patch().content, Some(content));
        }
    }

    #[test]
    fn listing_order_puts_undated_last() {
        let summary = |id: &str, at: Option<OffsetDateTime>| PostSummary {
            id: id.into(),
            title: String::new(),
            slug: Slug { current: id.into() },
            author: String::new(),
            excerpt: String::new(),
            main_image: None,
            published_at: at,
        };

        let mut posts = vec![
            summary("c", None),
            summary("a", Some(time::macros::datetime!(2023-01-01 00:00 UTC))),
            summary("d", Some(time::macros::datetime!(2024-01-01 00:00 UTC))),
            summary("b", None),
        ];
        posts.sort_by(newest_first);

        let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["d", "a", "b", "c"]);
    }

    #[test]
    fn patch_replaces_content_wholesale() {
        let mut post: Post = serde_json::from_value(json!({
            "id": "01HJ4T9031ZWV6N8XM17Z9XV9C",
            "title": "Hello",
            "slug": { "current": "hello-world" },
            "author": "Ada",
            "excerpt": "Short",
            "content": [{ "_type": "block", "children": [{ "text": "one" }, { "text": "two" }] }]
        }))
        .unwrap();

        PostPatch {
            content: Some(json!([{ "_type": "block", "children": [{ "text": "three" }] }])),
            ..Default::default()
        }
        .apply_to(&mut post);

        assert_eq!(
            post.content,
            json!([{ "_type": "block", "children": [{ "text": "three" }] }])
        );
        assert_eq!(post.title, "Hello");
        assert_eq!(post.excerpt, "Short");
    }

    #[test]
    fn post_serializes_with_camel_case_timestamps() {
        let post: Post = serde_json::from_value(json!({
            "id": "01HJ4T9031ZWV6N8XM17Z9XV9C",
            "title": "Hello",
            "slug": { "current": "hello-world" },
            "publishedAt": "2024-01-02T03:04:05Z",
            "mainImage": { "asset": { "_ref": "image-abc-200x200-png" } }
        }))
        .unwrap();

        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["publishedAt"], json!("2024-01-02T03:04:05Z"));
        assert_eq!(value["mainImage"]["asset"]["_type"], json!("reference"));
        assert_eq!(value["createdAt"], Value::Null);
    }
}
