use crate::registry::{TaskError, TaskResult, TestDefinition, TestRegistry};
use crate::runner::observer::RunObserver;
use crate::runner::types::{RunState, TestResult};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

/// 按注册顺序逐个执行检查，并在每次状态变化后发布快照
///
/// `RunState` 只归控制器所有，外部只能通过 [`RunController::snapshot`]
/// 或注册的 [`RunObserver`] 读取。
pub struct RunController {
    registry: TestRegistry,
    state: Mutex<RunState>,
    observers: Vec<Arc<dyn RunObserver>>,
}

impl RunController {
    pub fn new(registry: TestRegistry) -> Self {
        let state = RunState::initial(&registry);
        Self {
            registry,
            state: Mutex::new(state),
            observers: Vec::new(),
        }
    }

    /// 注册观察者，每次发布都会收到完整快照
    pub fn with_observer<O: RunObserver + 'static>(mut self, observer: O) -> Self {
        self.observers.push(Arc::new(observer));
        self
    }

    pub fn registry(&self) -> &TestRegistry {
        &self.registry
    }

    /// 当前状态的副本
    pub fn snapshot(&self) -> RunState {
        self.lock_state().clone()
    }

    pub fn is_running(&self) -> bool {
        self.lock_state().is_running
    }

    /// 执行一轮检查
    ///
    /// 已有一轮在执行时直接忽略并返回 `false`。任务失败或 panic 都只影响
    /// 对应检查的结果，本方法本身从不失败。
    pub async fn run(&self) -> bool {
        let Some(_active) = self.begin_run() else {
            warn!("Run requested while another run is active, ignoring");
            return false;
        };

        info!("Running {} checks", self.registry.len());

        for (index, definition) in self.registry.list().iter().enumerate() {
            let mut result = TestResult::running(definition);
            debug!(id = definition.id(), "Check running");
            self.publish_result(index, result.clone());

            let start = Instant::now();
            match execute(definition).await {
                Ok(()) => {
                    result.pass(start.elapsed());
                    debug!(id = definition.id(), "Check passed");
                }
                Err(e) => {
                    warn!(id = definition.id(), error = %e, "Check failed");
                    result.fail(e.describe(), start.elapsed());
                }
            }

            self.publish_result(index, result);
        }

        info!("Run finished");
        true
    }

    /// 把所有结果恢复为 Idle
    ///
    /// 执行过程中调用会被忽略并返回 `false`。
    pub fn reset(&self) -> bool {
        let snapshot = {
            let mut state = self.lock_state();
            if state.is_running {
                warn!("Reset requested while a run is active, ignoring");
                return false;
            }
            *state = RunState::initial(&self.registry);
            state.clone()
        };

        debug!("Run state reset");
        self.notify(&snapshot);
        true
    }

    /// 检查并设置运行标记，成功时返回在 drop 时清除标记的守卫
    fn begin_run(&self) -> Option<ActiveRun<'_>> {
        let snapshot = {
            let mut state = self.lock_state();
            if state.is_running {
                return None;
            }
            state.is_running = true;
            state.clone()
        };

        self.notify(&snapshot);
        Some(ActiveRun { controller: self })
    }

    fn publish_result(&self, index: usize, result: TestResult) {
        self.publish(|state| {
            if let Some(slot) = state.results.get_mut(index) {
                *slot = result;
            }
        });
    }

    /// 在锁内修改状态，锁外通知观察者
    fn publish(&self, update: impl FnOnce(&mut RunState)) {
        let snapshot = {
            let mut state = self.lock_state();
            update(&mut state);
            state.clone()
        };
        self.notify(&snapshot);
    }

    fn notify(&self, snapshot: &RunState) {
        for observer in &self.observers {
            observer.on_publish(snapshot);
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, RunState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// 一轮执行的守卫，结束（包括 future 被丢弃）时清除运行标记
struct ActiveRun<'a> {
    controller: &'a RunController,
}

impl Drop for ActiveRun<'_> {
    fn drop(&mut self) {
        self.controller.publish(|state| state.is_running = false);
    }
}

/// 执行单个任务
///
/// 任务在独立的 tokio task 中运行，这样 panic 也能被捕获为失败。
/// 调用方的 future 被丢弃时任务随之中止，不会在后台继续执行。
async fn execute(definition: &TestDefinition) -> TaskResult {
    let mut task = AbortOnDrop(tokio::spawn(definition.invoke()));
    match (&mut task.0).await {
        Ok(outcome) => outcome,
        Err(e) => Err(join_error_to_task_error(e)),
    }
}

/// drop 时中止所持有的 tokio task
struct AbortOnDrop(JoinHandle<TaskResult>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

fn join_error_to_task_error(err: JoinError) -> TaskError {
    if !err.is_panic() {
        return TaskError::opaque();
    }

    let payload = err.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        TaskError::new(*message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        TaskError::new(message.clone())
    } else {
        TaskError::opaque()
    }
}
