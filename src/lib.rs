//! # Kids Math Quiz
//!
//! 面向一年级小朋友的口算练习核心（10 以内加减法，"Bé Vui Học Toán"）
//!
//! ## 架构设计
//!
//! 本系统采用分层架构，下层不依赖上层：
//!
//! ### ① 数据层（Models）
//! - `models/` - 纯数据类型
//! - `Question` - 题目（生成后不可变），含四个选项和插图类型
//! - `praise_message` - 结算评语的固定分档
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心游戏流程
//! - `GeneratorService` - 出题能力（LLM 远程一次尝试 + 本地算法兜底）
//! - `LlmService` - LLM 调用能力
//! - `FeedbackEffects` - 音效反馈能力（发后不管）
//!
//! ### ③ 游戏层（Game）
//! - `game/` - 状态机与会话
//! - `QuizSession` - 一局游戏的全部可变状态，由状态机独占
//! - `QuizEngine` - 状态机（intro → loading → playing → finished），
//!   两段式答题反馈定时（300ms 揭晓 + 1500ms 停留）
//! - `Screen` - 阶段 → 渲染描述的纯映射
//!
//! ### ④ 表现层（App）
//! - `app.rs` - 控制台驱动，只读快照、只提交意图

pub mod app;
pub mod config;
pub mod error;
pub mod game;
pub mod logger;
pub mod models;
pub mod services;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use game::{Phase, QuizEngine, QuizSession, Screen, Snapshot};
pub use models::{praise_message, Operator, Question, VisualType};
pub use services::{ConsoleFeedback, FeedbackEffects, GeneratorService, SilentFeedback};
