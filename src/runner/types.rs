use crate::registry::{TestDefinition, TestRegistry};
use std::fmt;
use std::time::Duration;

pub const LOG_STARTING: &str = "Starting...";
pub const LOG_COMPLETED: &str = "Completed successfully";

/// 检查状态
///
/// 只允许 `Idle → Running → {Passed, Failed}`，回到 `Idle` 只能通过 reset。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestStatus {
    Idle,
    Running,
    Passed,
    Failed,
}

impl TestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Idle => "idle",
            TestStatus::Running => "running",
            TestStatus::Passed => "passed",
            TestStatus::Failed => "failed",
        }
    }

    /// 是否已到达终态
    pub fn is_terminal(&self) -> bool {
        matches!(self, TestStatus::Passed | TestStatus::Failed)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单个检查在当前轮次中的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResult {
    /// 检查 ID（来自定义）
    pub id: String,

    /// 显示标题（来自定义）
    pub title: String,

    /// 当前状态
    pub status: TestStatus,

    /// 日志，同一轮内只追加
    pub logs: Vec<String>,

    /// 错误消息，仅在 Failed 时存在
    pub error: Option<String>,

    /// 任务耗时，仅在终态时存在
    pub elapsed: Option<Duration>,
}

impl TestResult {
    pub fn idle(definition: &TestDefinition) -> Self {
        Self {
            id: definition.id().to_string(),
            title: definition.title().to_string(),
            status: TestStatus::Idle,
            logs: Vec::new(),
            error: None,
            elapsed: None,
        }
    }

    pub fn running(definition: &TestDefinition) -> Self {
        Self {
            status: TestStatus::Running,
            logs: vec![LOG_STARTING.to_string()],
            ..Self::idle(definition)
        }
    }

    /// Running → Passed
    pub fn pass(&mut self, elapsed: Duration) {
        debug_assert_eq!(self.status, TestStatus::Running);
        self.status = TestStatus::Passed;
        self.logs.push(LOG_COMPLETED.to_string());
        self.elapsed = Some(elapsed);
    }

    /// Running → Failed，`message` 必须非空
    pub fn fail(&mut self, message: &str, elapsed: Duration) {
        debug_assert_eq!(self.status, TestStatus::Running);
        debug_assert!(!message.is_empty());
        self.status = TestStatus::Failed;
        self.error = Some(message.to_string());
        self.logs.push(format!("Error: {}", message));
        self.elapsed = Some(elapsed);
    }
}

/// 所有检查结果加上运行标记，展示层的唯一数据源
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    pub results: Vec<TestResult>,
    pub is_running: bool,
}

impl RunState {
    /// 每个定义对应一个 Idle 结果
    pub fn initial(registry: &TestRegistry) -> Self {
        Self {
            results: registry.list().iter().map(TestResult::idle).collect(),
            is_running: false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&TestResult> {
        self.results.iter().find(|r| r.id == id)
    }

    /// 是否有检查失败
    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|r| r.status == TestStatus::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition() -> TestDefinition {
        TestDefinition::sync("a", "Check A", || Ok(()))
    }

    #[test]
    fn test_running_result() {
        let result = TestResult::running(&definition());
        assert_eq!(result.status, TestStatus::Running);
        assert_eq!(result.logs, vec!["Starting..."]);
        assert_eq!(result.error, None);
        assert_eq!(result.title, "Check A");
    }

    #[test]
    fn test_pass_and_fail_transitions() {
        let mut passed = TestResult::running(&definition());
        passed.pass(Duration::from_millis(3));
        assert_eq!(passed.status, TestStatus::Passed);
        assert_eq!(passed.logs.last().map(String::as_str), Some("Completed successfully"));
        assert_eq!(passed.error, None);

        let mut failed = TestResult::running(&definition());
        failed.fail("boom", Duration::from_millis(1));
        assert_eq!(failed.status, TestStatus::Failed);
        assert_eq!(failed.error.as_deref(), Some("boom"));
        assert_eq!(failed.logs, vec!["Starting...", "Error: boom"]);
    }

    #[test]
    fn test_status_vocabulary() {
        assert_eq!(TestStatus::Idle.to_string(), "idle");
        assert_eq!(TestStatus::Running.to_string(), "running");
        assert!(TestStatus::Passed.is_terminal());
        assert!(TestStatus::Failed.is_terminal());
        assert!(!TestStatus::Running.is_terminal());
    }
}
