use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;

/// 无法提取错误信息时使用的兜底文案
pub const UNKNOWN_FAILURE: &str = "Unknown failure";

/// 检查任务失败
///
/// 断言失败和意外错误不做区分，统一用这一个类型表示。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", self.describe())]
pub struct TaskError {
    message: Option<String>,
}

impl TaskError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// 不携带任何信息的失败
    pub fn opaque() -> Self {
        Self { message: None }
    }

    /// 原始错误信息（空字符串视为没有信息）
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }

    /// 面向用户的错误描述，保证非空
    pub fn describe(&self) -> &str {
        self.message().unwrap_or(UNKNOWN_FAILURE)
    }
}

impl From<String> for TaskError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for TaskError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<anyhow::Error> for TaskError {
    fn from(err: anyhow::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// 任务执行结果
pub type TaskResult = std::result::Result<(), TaskError>;

/// 统一的任务 future，同步和异步任务都包装成这一种
pub type TaskFuture = Pin<Box<dyn Future<Output = TaskResult> + Send + 'static>>;

type TaskFn = Arc<dyn Fn() -> TaskFuture + Send + Sync>;

/// 单个检查项的定义，创建后不可变
#[derive(Clone)]
pub struct TestDefinition {
    id: String,
    title: String,
    task: TaskFn,
}

impl TestDefinition {
    /// 同步检查：函数返回时即完成
    pub fn sync<F>(id: impl Into<String>, title: impl Into<String>, task: F) -> Self
    where
        F: Fn() -> TaskResult + Send + Sync + 'static,
    {
        let task = Arc::new(task);
        Self {
            id: id.into(),
            title: title.into(),
            task: Arc::new(move || -> TaskFuture {
                let task = Arc::clone(&task);
                Box::pin(async move { (*task)() })
            }),
        }
    }

    /// 异步检查：返回的 future 完成时即完成
    pub fn asynchronous<F, Fut>(id: impl Into<String>, title: impl Into<String>, task: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = TaskResult> + Send + 'static,
    {
        Self {
            id: id.into(),
            title: title.into(),
            task: Arc::new(move || -> TaskFuture { Box::pin(task()) }),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// 生成一次任务执行的 future
    pub fn invoke(&self) -> TaskFuture {
        (self.task)()
    }
}

impl fmt::Debug for TestDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestDefinition")
            .field("id", &self.id)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_error_describe() {
        assert_eq!(TaskError::new("boom").describe(), "boom");
        assert_eq!(TaskError::opaque().describe(), UNKNOWN_FAILURE);
        assert_eq!(TaskError::new("").describe(), UNKNOWN_FAILURE);
        assert_eq!(TaskError::new("").message(), None);
        assert_eq!(TaskError::from("bad").to_string(), "bad");
        assert_eq!(TaskError::opaque().to_string(), UNKNOWN_FAILURE);

        // 可以作为标准错误类型使用
        let boxed: Box<dyn std::error::Error> = Box::new(TaskError::new("boxed"));
        assert_eq!(boxed.to_string(), "boxed");
    }

    #[tokio::test]
    async fn test_sync_and_async_invoke() {
        let ok = TestDefinition::sync("ok", "Ok", || Ok(()));
        assert_eq!(ok.invoke().await, Ok(()));

        let failing = TestDefinition::asynchronous("fail", "Fail", || async {
            Err(TaskError::new("nope"))
        });
        assert_eq!(failing.invoke().await, Err(TaskError::new("nope")));

        // 每次调用都生成新的 future，可以重复执行
        assert!(failing.invoke().await.is_err());
        assert_eq!(failing.id(), "fail");
        assert_eq!(failing.title(), "Fail");
    }
}
