use clap::{Parser, Subcommand};
use colored::Colorize;
use inquire::Select;
use rucheck::config::Config;
use rucheck::registry::TestRegistry;
use rucheck::runner::{LiveReporter, RunController};
use std::fmt;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, anyhow::Error>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// 指定配置文件（默认自动查找 rucheck.toml）
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// 显示每个检查的耗时
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 关闭彩色输出
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 执行一轮检查后退出，有失败时返回非零状态码
    Run,
    /// 列出所有检查
    List,
}

/// 交互菜单中的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Run,
    Reset,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::Run => "Run Tests",
            Action::Reset => "Reset",
            Action::Quit => "Quit",
        };
        f.write_str(label)
    }
}

/// 可选操作，Reset 只在空闲时提供
fn available_actions(is_running: bool) -> Vec<Action> {
    if is_running {
        vec![Action::Quit]
    } else {
        vec![Action::Run, Action::Reset, Action::Quit]
    }
}

fn build_controller(config: &Config) -> RunController {
    RunController::new(TestRegistry::sample()).with_observer(LiveReporter::new(&config.report))
}

/// 执行一轮，返回是否全部通过
pub async fn run_once(config: &Config) -> bool {
    let controller = build_controller(config);
    println!(
        "\nRunning {} checks...\n",
        controller.registry().len().to_string().bold()
    );

    controller.run().await;
    !controller.snapshot().has_failures()
}

pub fn list() {
    for test in TestRegistry::sample().list() {
        println!(" {} {}", test.id().cyan(), test.title());
    }
}

/// 交互模式：重复选择 Run / Reset，直到 Quit
pub async fn interactive(config: &Config) -> Result<()> {
    let controller = build_controller(config);
    let reporter = LiveReporter::new(&config.report);
    println!("{}\n", reporter.render(&controller.snapshot()));

    loop {
        let options = available_actions(controller.is_running());
        let action = tokio::task::spawn_blocking(move || {
            Select::new("Agentic Test Harness", options)
                .with_help_message("↑↓ to move, enter to select")
                .prompt()
        })
        .await?;

        let action = match action {
            Ok(action) => action,
            Err(
                inquire::InquireError::OperationCanceled
                | inquire::InquireError::OperationInterrupted,
            ) => break,
            Err(e) => return Err(anyhow::anyhow!("Interaction failed: {}", e)),
        };

        match action {
            Action::Run => {
                println!();
                controller.run().await;
                println!();
            }
            Action::Reset => {
                println!();
                controller.reset();
                println!();
            }
            Action::Quit => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_offered_only_when_idle() {
        assert_eq!(
            available_actions(false),
            vec![Action::Run, Action::Reset, Action::Quit]
        );
        assert!(!available_actions(true).contains(&Action::Reset));
    }

    #[test]
    fn test_parse_run_with_flags() {
        let cli = Cli::parse_from(["rucheck", "run", "--verbose", "--no-color"]);
        assert!(matches!(cli.command, Some(Commands::Run)));
        assert!(cli.verbose);
        assert!(cli.no_color);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_default_is_interactive() {
        let cli = Cli::parse_from(["rucheck"]);
        assert!(cli.command.is_none());
    }

    #[tokio::test]
    async fn test_run_once_sample_passes() {
        let config = Config {
            report: rucheck::config::ReportConfig {
                verbose: false,
                color: false,
            },
        };
        assert!(run_once(&config).await);
    }
}
