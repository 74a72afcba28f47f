use crate::config::ReportConfig;
use crate::runner::observer::RunObserver;
use crate::runner::types::{RunState, TestResult, TestStatus};
use colored::Colorize;
use std::sync::{Mutex, PoisonError};

/// 初始基线：Idle 且没有日志
const IDLE_BASELINE: (TestStatus, usize) = (TestStatus::Idle, 0);

/// 实时输出进度的观察者
///
/// 每次发布只打印状态或日志发生变化的检查项。
pub struct LiveReporter {
    verbose: bool,
    color: bool,
    /// 上一次看到的 (状态, 日志条数)
    seen: Mutex<Vec<(TestStatus, usize)>>,
}

impl LiveReporter {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            verbose: config.verbose,
            color: config.color,
            seen: Mutex::new(Vec::new()),
        }
    }

    /// 渲染完整视图
    pub fn render(&self, state: &RunState) -> String {
        state
            .results
            .iter()
            .map(|result| self.render_result(result))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// 渲染单个检查：标题行、日志列表、错误详情
    pub fn render_result(&self, result: &TestResult) -> String {
        let mut lines = vec![format!(
            "{} · {}",
            self.paint_title(&result.title),
            self.status_label(result)
        )];

        for log in &result.logs {
            lines.push(format!("  - {}", log));
        }

        if let Some(error) = &result.error {
            let label = if self.color {
                "Error detail".red().bold().to_string()
            } else {
                "Error detail".to_string()
            };
            lines.push(format!("  {}: {}", label, error));
        }

        lines.join("\n")
    }

    /// 状态显示文案
    fn status_label(&self, result: &TestResult) -> String {
        let mut label = match result.status {
            TestStatus::Idle => "idle".to_string(),
            TestStatus::Running => "running".to_string(),
            TestStatus::Passed => "passed ✅".to_string(),
            TestStatus::Failed => "failed ❌".to_string(),
        };

        if self.verbose
            && let Some(elapsed) = result.elapsed
        {
            label.push_str(&format!(" ({}ms)", elapsed.as_millis()));
        }

        if !self.color {
            return label;
        }
        match result.status {
            TestStatus::Idle => label.dimmed().to_string(),
            TestStatus::Running => label.cyan().to_string(),
            TestStatus::Passed => label.green().to_string(),
            TestStatus::Failed => label.red().to_string(),
        }
    }

    fn paint_title(&self, title: &str) -> String {
        if self.color {
            title.bold().to_string()
        } else {
            title.to_string()
        }
    }

    /// 计算相对上一次快照发生变化的检查项下标
    ///
    /// 尚未见过的条目按 Idle 且无日志处理，初始的 Idle 条目不会重复输出。
    fn changed_indices(&self, state: &RunState) -> Vec<usize> {
        let mut seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);
        let current: Vec<(TestStatus, usize)> = state
            .results
            .iter()
            .map(|r| (r.status, r.logs.len()))
            .collect();

        let changed = current
            .iter()
            .enumerate()
            .filter(|(i, entry)| {
                seen.get(*i).copied().unwrap_or(IDLE_BASELINE) != **entry
            })
            .map(|(i, _)| i)
            .collect();

        *seen = current;
        changed
    }
}

impl RunObserver for LiveReporter {
    fn on_publish(&self, state: &RunState) {
        for index in self.changed_indices(state) {
            if let Some(result) = state.results.get(index) {
                println!("{}", self.render_result(result));
            }
        }
    }
}

impl Default for LiveReporter {
    fn default() -> Self {
        Self::new(&ReportConfig::default())
    }
}
