//! Interface layer
//! CLI 파싱, 의존성 조립, HTTP 서비스 진입점.

pub mod cli;
pub mod composition;
pub mod server;
