pub mod comment;
pub mod community;
pub mod flair;
pub mod ledger;
pub mod models;
pub mod post;
pub mod routes;
pub mod search;
pub mod store;
pub mod tree;
pub mod vote;
