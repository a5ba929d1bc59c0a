//! 控制台表现层
//!
//! 一个最小可玩的终端前端：只读状态机快照、只提交 start / 答案两种意图，
//! 所有界面内容来自 `Screen` 渲染描述

use crate::config::Config;
use crate::game::{QuizEngine, Screen};
use crate::models::Question;
use crate::services::ConsoleFeedback;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

/// 定时任务运行期间的快照轮询间隔
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// 应用主结构
pub struct App {
    engine: QuizEngine,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let engine = QuizEngine::new(&config, Arc::new(ConsoleFeedback));

        Ok(Self { engine })
    }

    /// 运行应用主循环
    ///
    /// 标准输入到达 EOF 时直接退出
    pub async fn run(&self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        // 已经画过的题目编号，避免轮询时重复刷屏
        let mut shown_question: Option<u32> = None;
        let mut feedback_shown = false;

        loop {
            match Screen::from_snapshot(&self.engine.snapshot()) {
                Screen::Intro { total_questions } => {
                    print_intro(total_questions);
                    if lines.next_line().await?.is_none() {
                        return Ok(());
                    }
                    self.engine.start().await;
                }

                Screen::Loading => {
                    tokio::time::sleep(POLL_INTERVAL).await;
                }

                Screen::Playing {
                    question,
                    question_number,
                    total_questions,
                    score,
                    pending_result,
                    locked,
                } => {
                    if let Some(is_correct) = pending_result {
                        if !feedback_shown {
                            feedback_shown = true;
                            if is_correct {
                                println!("\n🎉 Đúng rồi!");
                            } else {
                                println!("\n😅 Sai mất rồi! Đáp án là {}.", question.correct_answer);
                            }
                        }
                    }

                    if locked {
                        // 等两段定时器走完
                        tokio::time::sleep(POLL_INTERVAL).await;
                        continue;
                    }

                    if shown_question != Some(question.id) {
                        shown_question = Some(question.id);
                        feedback_shown = false;
                        print_question(&question, question_number, total_questions, score);
                    }

                    let Some(line) = lines.next_line().await? else {
                        return Ok(());
                    };
                    match parse_choice(line.trim(), &question) {
                        Some(option) => self.engine.submit_answer(option),
                        None => println!("👉 Chọn 1-4 nhé!"),
                    }
                }

                Screen::Finished {
                    score,
                    total_questions,
                    percentage,
                    message,
                } => {
                    shown_question = None;
                    feedback_shown = false;
                    print_finished(score, total_questions, percentage, message);

                    let Some(line) = lines.next_line().await? else {
                        return Ok(());
                    };
                    if line.trim().eq_ignore_ascii_case("y") {
                        self.engine.start().await;
                    } else {
                        info!("👋 退出程序");
                        return Ok(());
                    }
                }

                Screen::Error => {
                    println!("\n😢 Có lỗi xảy ra. Nhấn Enter để thử lại, gõ q để thoát.");
                    let Some(line) = lines.next_line().await? else {
                        return Ok(());
                    };
                    if line.trim().eq_ignore_ascii_case("q") {
                        return Ok(());
                    }
                    self.engine.start().await;
                }
            }
        }
    }
}

/// 把输入的序号（1-4）换算成对应的选项值
fn parse_choice(input: &str, question: &Question) -> Option<u8> {
    let number: usize = input.parse().ok()?;
    if (1..=question.options.len()).contains(&number) {
        Some(question.options[number - 1])
    } else {
        None
    }
}

// ========== 界面输出 ==========

fn print_intro(total_questions: usize) {
    println!("\n{}", "=".repeat(46));
    println!("  🧮  Bé Vui Học Toán  🧮");
    println!("{}", "=".repeat(46));
    println!(
        "  Cùng làm {} phép tính cộng trừ trong phạm vi 10 nhé!",
        total_questions
    );
    println!("\n  ▶ Nhấn Enter để bắt đầu");
}

fn print_question(question: &Question, number: usize, total: usize, score: usize) {
    println!("\n{}", "─".repeat(46));
    println!("  Câu {} / {}   ⭐ {}", number, total, score);
    println!("{}", "─".repeat(46));
    println!("  {}  {}", question.visual_type.emoji(), question.text);
    for (i, option) in question.options.iter().enumerate() {
        println!("    {}. {}", i + 1, option);
    }
    println!("  Bé chọn (1-4):");
}

fn print_finished(score: usize, total: usize, percentage: f64, message: &str) {
    println!("\n{}", "=".repeat(46));
    println!("  🏆 Hoàn thành!");
    println!("{}", "=".repeat(46));
    println!("  Điểm số: {} / {} ({:.0}%)", score, total, percentage);
    println!("  {}", message);
    println!("\n  🔄 Chơi lại? (y/n)");
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - Bé Vui Học Toán 口算练习");
    info!("📊 每局题目数: {}", config.question_count);
    if config.llm_api_key.is_some() {
        info!("🤖 LLM 出题已启用 (模型: {})", config.llm_model_name);
    } else {
        info!("🎲 未配置 LLM_API_KEY，使用本地算法出题");
    }
    info!("{}", "=".repeat(60));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Operator, VisualType};

    fn sample_question() -> Question {
        Question {
            id: 0,
            text: "2 + 3 = ?".to_string(),
            num1: 2,
            num2: 3,
            operator: Operator::Add,
            correct_answer: 5,
            options: vec![4, 5, 6, 7],
            visual_type: VisualType::Apples,
            is_word_problem: false,
        }
    }

    #[test]
    fn test_parse_choice_maps_to_option_value() {
        let q = sample_question();
        assert_eq!(parse_choice("1", &q), Some(4));
        assert_eq!(parse_choice("2", &q), Some(5));
        assert_eq!(parse_choice("4", &q), Some(7));
    }

    #[test]
    fn test_parse_choice_rejects_out_of_range() {
        let q = sample_question();
        assert_eq!(parse_choice("0", &q), None);
        assert_eq!(parse_choice("5", &q), None);
        assert_eq!(parse_choice("abc", &q), None);
        assert_eq!(parse_choice("", &q), None);
    }
}
