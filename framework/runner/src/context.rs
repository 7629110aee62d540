/// Immutable configuration for one baseline generation run.
///
/// Created once at startup from the command line and passed by reference to every
/// component that needs it. There is no way to mutate it after construction.
#[derive(Debug, Clone)]
pub struct RunContext {
    txn_count: u64,
    thread_count: usize,
    workspace: String,
}

impl RunContext {
    pub fn new(txn_count: u64, thread_count: usize, workspace: String) -> Self {
        Self {
            txn_count,
            thread_count,
            workspace,
        }
    }

    /// The number of transactions the target application should generate.
    pub fn txn_count(&self) -> u64 {
        self.txn_count
    }

    /// The number of threads the target application should run with.
    pub fn thread_count(&self) -> usize {
        self.thread_count
    }

    /// The absolute path prefix to strip from generated artifacts.
    ///
    /// Profiling artifacts embed absolute paths from the machine that produced them.
    /// Every occurrence of this prefix is removed before an artifact lands in a
    /// fixture so that fixtures compare equal across machines.
    pub fn workspace(&self) -> &str {
        &self.workspace
    }
}
