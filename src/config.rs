use crate::Result;
use crate::error::RucheckError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// 输出相关配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// 显示每个检查的耗时
    pub verbose: bool,

    /// 彩色输出
    pub color: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            color: true,
        }
    }
}

/// 完整的配置文件
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub report: ReportConfig,
}

/// 配置文件加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置文件名
    const CONFIG_FILE: &'static str = "rucheck.toml";

    /// 从指定路径加载配置文件
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RucheckError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Ok(toml::from_str(&content)?)
    }

    /// 查找并加载配置文件
    /// 查找顺序：
    /// 1. 当前目录及其父目录
    /// 2. 用户配置目录 ~/.config/rucheck/
    ///
    /// 找不到时返回 `None`，找到但解析失败时返回错误
    pub fn find_and_load() -> Result<Option<Config>> {
        if let Some(path) = Self::find_in_current_dir() {
            return Self::load_from_path(path).map(Some);
        }

        if let Some(path) = Self::find_in_user_dir() {
            return Self::load_from_path(path).map(Some);
        }

        Ok(None)
    }

    fn find_in_current_dir() -> Option<std::path::PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let config_path = current.join(Self::CONFIG_FILE);
            if config_path.exists() {
                return Some(config_path);
            }

            // 尝试父目录
            if !current.pop() {
                break;
            }
        }

        None
    }

    fn find_in_user_dir() -> Option<std::path::PathBuf> {
        let home = dirs::home_dir()?;
        let config_path = home.join(".config").join("rucheck").join(Self::CONFIG_FILE);
        config_path.exists().then_some(config_path)
    }

    /// 应用 CLI 覆盖（优先级最高）
    pub fn apply_cli_overrides(config: &mut Config, verbose: bool, no_color: bool) {
        if verbose {
            config.report.verbose = true;
        }
        if no_color {
            config.report.color = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_from_path() {
        let config_content = r#"
[report]
verbose = true
color = false
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = ConfigLoader::load_from_path(temp_file.path()).unwrap();
        assert!(config.report.verbose);
        assert!(!config.report.color);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = toml::from_str("[report]\nverbose = true\n").unwrap();
        assert!(config.report.verbose);
        assert!(config.report.color);

        let empty: Config = toml::from_str("").unwrap();
        assert_eq!(empty, Config::default());
    }

    #[test]
    fn test_invalid_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[report]\nverbose = \"yes\"\n").unwrap();
        temp_file.flush().unwrap();

        let result = ConfigLoader::load_from_path(temp_file.path());
        assert!(matches!(result, Err(RucheckError::TomlError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = ConfigLoader::load_from_path("/nonexistent/rucheck.toml");
        assert!(matches!(result, Err(RucheckError::ConfigError(_))));
    }

    #[test]
    fn test_apply_cli_overrides() {
        let mut config = Config::default();
        ConfigLoader::apply_cli_overrides(&mut config, true, true);
        assert!(config.report.verbose);
        assert!(!config.report.color);

        // 未指定的标志不改变配置
        let mut config = Config {
            report: ReportConfig {
                verbose: true,
                color: true,
            },
        };
        ConfigLoader::apply_cli_overrides(&mut config, false, false);
        assert!(config.report.verbose);
        assert!(config.report.color);
    }
}
