use tracing_subscriber::EnvFilter;

/// `RUST_LOG`를 따르는 fmt 구독자를 설치한다. 기본 레벨은 warn이다.
/// 이미 설치되어 있으면 아무 것도 하지 않는다.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
