pub mod app;
pub mod config;
pub mod demo_seeder;
pub mod error;
pub mod db {
    pub mod article_repository;
    pub mod catalog_repository;
    pub mod comment_repository;
    pub mod models;
    pub mod query;
    pub mod timestamp;
}
pub mod api {
    pub mod articles;
    pub mod catalog;
    pub mod comments;
    pub mod errors;
    pub mod health;
}

#[cfg(test)]
mod test_support;
