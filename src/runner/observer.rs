use crate::runner::types::RunState;

/// 运行状态观察者，每次发布后收到一份完整快照
///
/// 观察者只会看到完整的快照，不会看到更新到一半的条目。
/// 任何 `Fn(&RunState) + Send + Sync` 闭包都可以直接作为观察者。
///
/// # 示例
///
/// ```no_run
/// use rucheck::registry::TestRegistry;
/// use rucheck::runner::{RunController, RunState};
///
/// # #[tokio::main]
/// # async fn main() {
/// let controller = RunController::new(TestRegistry::sample())
///     .with_observer(|state: &RunState| {
///         for result in &state.results {
///             println!("{} · {}", result.title, result.status);
///         }
///     });
///
/// controller.run().await;
/// # }
/// ```
pub trait RunObserver: Send + Sync {
    /// 控制器每次发布新状态时同步调用
    fn on_publish(&self, state: &RunState);
}

impl<F> RunObserver for F
where
    F: Fn(&RunState) + Send + Sync,
{
    fn on_publish(&self, state: &RunState) {
        self(state)
    }
}
