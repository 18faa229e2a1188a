/// How sibling fields and list elements are scheduled.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ExecutionStrategy {
    /// One field after another, in query order.
    #[default]
    Serial,
    /// Sibling fields and list elements run on the rayon thread pool.
    /// Response order and error order stay those of the query.
    Parallel,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExecutionOptions {
    pub strategy: ExecutionStrategy,
    /// Depth limit enforced during validation. `None` or `0` disables it.
    pub max_depth: Option<usize>,
}

impl ExecutionOptions {
    pub fn parallel() -> Self {
        Self {
            strategy: ExecutionStrategy::Parallel,
            ..Self::default()
        }
    }
}
