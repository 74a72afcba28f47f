use crate::host::Element;
use crate::registry::types::{TaskError, TaskResult, TestDefinition};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

/// 默认注册的三个检查：同步计算、异步等待、宿主对象属性
pub fn sample_tests() -> Vec<TestDefinition> {
    vec![
        TestDefinition::sync("math", "Math computations remain precise", math_sum),
        TestDefinition::asynchronous("async", "Async flows resolve in order", async_tracker),
        TestDefinition::sync("dom", "Browser APIs behave as expected", element_dataset),
    ]
}

fn math_sum() -> TaskResult {
    let total: u64 = (1..=1000u64).sum();

    if total != 500_500 {
        return Err(TaskError::new(format!(
            "Expected 500500 but received {}",
            total
        )));
    }
    Ok(())
}

async fn async_tracker() -> TaskResult {
    let tracker = Arc::new(Mutex::new(Vec::new()));

    let push_after = |ms: u64, value: u32| {
        let tracker = Arc::clone(&tracker);
        async move {
            sleep(Duration::from_millis(ms)).await;
            tracker
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(value);
        }
    };

    tokio::join!(push_after(20, 1), push_after(10, 2), push_after(5, 3));

    let len = tracker.lock().unwrap_or_else(PoisonError::into_inner).len();
    if len != 3 {
        return Err(TaskError::new("Expected three entries in tracker."));
    }
    Ok(())
}

fn element_dataset() -> TaskResult {
    let mut div = Element::create("div");
    div.dataset_mut().insert("test".to_string(), "ready".to_string());

    if div.dataset().get("test").is_none_or(|v| v.is_empty()) {
        return Err(TaskError::new("Dataset assignment failed."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sample_checks_pass() {
        for test in sample_tests() {
            assert_eq!(test.invoke().await, Ok(()), "check {} failed", test.id());
        }
    }
}
