use crate::config::Config;

pub fn get_snapshot_path() -> std::path::PathBuf {
    std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("snapshots")
}

/// Read a saved page from `snapshots/inputs/<platform>/<name>`
pub fn fixture(platform: &str, name: &str) -> String {
    let path = get_snapshot_path().join("inputs").join(platform).join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("cannot read fixture {}: {}", path.display(), err))
}

/// A configuration that points the kuaishou page rewrite at a local server
pub struct TestEnv {
    pub config: Config,
}

impl TestEnv {
    pub fn new() -> Self {
        let mut config = Config::default();
        config.http.timeout_secs = 5;
        Self { config }
    }

    pub fn kuaishou_rewrite(mut self, from: impl ToString, to: impl ToString) -> Self {
        self.config.kuaishou.rewrite_from = from.to_string();
        self.config.kuaishou.rewrite_to = to.to_string();
        self
    }

    pub fn stream_downloads(mut self) -> Self {
        self.config.download.stream = true;
        self
    }
}
