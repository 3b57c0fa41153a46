pub mod c_admin;
pub mod c_posts;
