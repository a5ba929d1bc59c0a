//! 渲染描述
//!
//! 把阶段 + 快照映射成纯数据的"该画什么"。
//! 表现层只消费 `Screen`，不需要理解状态机的内部规则

use crate::game::engine::Snapshot;
use crate::game::session::Phase;
use crate::models::{praise_message, Question};

/// 一帧该画的内容
#[derive(Debug, Clone)]
pub enum Screen {
    /// 开始界面
    Intro { total_questions: usize },
    /// 出题中
    Loading,
    /// 答题界面
    Playing {
        question: Question,
        /// 从 1 开始的题号
        question_number: usize,
        total_questions: usize,
        score: usize,
        pending_result: Option<bool>,
        locked: bool,
    },
    /// 结算界面
    Finished {
        score: usize,
        total_questions: usize,
        percentage: f64,
        message: &'static str,
    },
    /// 错误界面（重新 start 即可重试）
    Error,
}

impl Screen {
    /// 阶段 → 渲染描述的纯映射
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        match snapshot.phase {
            Phase::Intro => Screen::Intro {
                total_questions: snapshot.total_questions,
            },
            Phase::Loading => Screen::Loading,
            Phase::Playing => match &snapshot.question {
                Some(question) => Screen::Playing {
                    question: question.clone(),
                    question_number: snapshot.current_index + 1,
                    total_questions: snapshot.total_questions,
                    score: snapshot.score,
                    pending_result: snapshot.pending_result,
                    locked: snapshot.locked,
                },
                // playing 阶段一定有当前题，缺了说明状态已坏
                None => Screen::Error,
            },
            Phase::Finished => {
                let total = snapshot.total_questions;
                let percentage = if total == 0 {
                    0.0
                } else {
                    snapshot.score as f64 / total as f64 * 100.0
                };
                Screen::Finished {
                    score: snapshot.score,
                    total_questions: total,
                    percentage,
                    message: praise_message(snapshot.score, total),
                }
            }
            Phase::Error => Screen::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(phase: Phase) -> Snapshot {
        Snapshot {
            phase,
            score: 0,
            current_index: 0,
            total_questions: 30,
            question: None,
            pending_result: None,
            locked: false,
        }
    }

    #[test]
    fn test_intro_screen() {
        match Screen::from_snapshot(&snapshot(Phase::Intro)) {
            Screen::Intro { total_questions } => assert_eq!(total_questions, 30),
            other => panic!("期望 Intro，实际 {:?}", other),
        }
    }

    #[test]
    fn test_finished_screen_has_message_and_percentage() {
        let mut s = snapshot(Phase::Finished);
        s.score = 24;
        match Screen::from_snapshot(&s) {
            Screen::Finished {
                score,
                percentage,
                message,
                ..
            } => {
                assert_eq!(score, 24);
                assert!((percentage - 80.0).abs() < 1e-9);
                assert_eq!(message, "Giỏi quá! Bé làm rất tốt!");
            }
            other => panic!("期望 Finished，实际 {:?}", other),
        }
    }

    #[test]
    fn test_playing_without_question_degrades_to_error() {
        // 防御：playing 快照里没有当前题时降级为错误界面
        match Screen::from_snapshot(&snapshot(Phase::Playing)) {
            Screen::Error => {}
            other => panic!("期望 Error，实际 {:?}", other),
        }
    }
}
