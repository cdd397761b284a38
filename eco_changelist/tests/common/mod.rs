use std::path::PathBuf;
use std::sync::OnceLock;

use tempfile::TempDir;

/// Route `tracing` output to the test harness once per test binary.
pub fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A scratch directory holding an original and an optimized snapshot.
pub struct Workspace {
    pub dir: TempDir,
    pub original: PathBuf,
    pub optimized: PathBuf,
    pub output: PathBuf,
}

impl Workspace {
    pub fn new(original: &str, optimized: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let original_path = dir.path().join("original.def");
        let optimized_path = dir.path().join("optimized.def");
        std::fs::write(&original_path, original).expect("write original");
        std::fs::write(&optimized_path, optimized).expect("write optimized");
        Self {
            output: dir.path().join("changelist.txt"),
            original: original_path,
            optimized: optimized_path,
            dir,
        }
    }
}
