pub mod samples;
pub mod types;

pub use types::{TaskError, TaskFuture, TaskResult, TestDefinition, UNKNOWN_FAILURE};

use crate::Result;
use crate::error::RucheckError;
use std::collections::HashSet;

/// 有序、不可变的检查项列表
#[derive(Debug, Clone)]
pub struct TestRegistry {
    tests: Vec<TestDefinition>,
}

impl TestRegistry {
    /// 构建注册表，拒绝空列表和重复 ID
    pub fn new(tests: Vec<TestDefinition>) -> Result<Self> {
        if tests.is_empty() {
            return Err(RucheckError::EmptyRegistry);
        }

        let mut seen = HashSet::new();
        for test in &tests {
            if !seen.insert(test.id()) {
                return Err(RucheckError::DuplicateTestId(test.id().to_string()));
            }
        }

        Ok(Self { tests })
    }

    /// 内置的三个示例检查
    pub fn sample() -> Self {
        Self {
            tests: samples::sample_tests(),
        }
    }

    /// 按注册顺序返回所有检查项
    pub fn list(&self) -> &[TestDefinition] {
        &self.tests
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}
