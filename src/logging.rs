//! 로그 초기화
//!
//! `RUST_LOG` 환경변수가 있으면 그것을, 없으면 `info` (`--verbose` 시 `debug`).
//! 로그는 stderr로, 진행 상황 출력은 stdout으로 나간다.

use tracing_subscriber::{fmt, EnvFilter};

pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    // 이미 초기화된 경우 무시
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init();
}
