pub mod comment;
pub mod community;
pub mod link_flair;
pub mod post;
pub mod vote;
