//! 유스케이스 모음.

pub mod analyze_pr;
pub mod inspect_config;
pub mod review_pr;
