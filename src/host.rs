use std::collections::HashMap;

/// 宿主环境提供的可变属性对象
///
/// 对应浏览器里的 DOM 元素：一个标签名加一组 `data-*` 属性。
#[derive(Debug, Clone, Default)]
pub struct Element {
    tag_name: String,
    dataset: HashMap<String, String>,
}

impl Element {
    pub fn create(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            dataset: HashMap::new(),
        }
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn dataset(&self) -> &HashMap<String, String> {
        &self.dataset
    }

    pub fn dataset_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.dataset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_roundtrip() {
        let mut el = Element::create("div");
        assert_eq!(el.tag_name(), "div");
        assert!(el.dataset().is_empty());

        el.dataset_mut().insert("test".into(), "ready".into());
        assert_eq!(el.dataset().get("test").map(String::as_str), Some("ready"));
    }
}
