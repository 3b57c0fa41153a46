pub mod constants;
pub mod db;
pub mod errors;
pub mod utils;

pub mod models {
    pub mod admin;
    pub mod meta;
    pub mod post;
}

pub mod repos {
    pub mod r_memory;
    pub mod r_posts;
}

pub mod services {
    pub mod s_posts;
}
