/// Table holding every blog post document.
pub const BLOG_TABLE: &str = "blog";

pub const MSG_METHOD_NOT_ALLOWED: &str = "Method not allowed";
pub const MSG_INVALID_BODY: &str = "Invalid request body";
pub const MSG_SLUG_REQUIRED: &str = "Slug is required";
pub const MSG_TOKEN_REQUIRED: &str = "Admin token is required";
pub const MSG_SERVER_CONFIG: &str = "Server configuration error";
pub const MSG_INVALID_TOKEN: &str = "Invalid admin token";
pub const MSG_FIELD_REQUIRED: &str =
    "At least one field to update (title, content, or excerpt) is required";
pub const MSG_POST_NOT_FOUND: &str = "Blog post not found";

pub const MSG_UPDATE_FAILED: &str = "Failed to update blog post";
pub const MSG_DELETE_FAILED: &str = "Failed to delete blog post";
pub const MSG_FETCH_FAILED: &str = "Failed to fetch blog posts";

pub const MSG_UPDATED: &str = "Blog post updated successfully";
pub const MSG_DELETED: &str = "Blog post deleted successfully";
