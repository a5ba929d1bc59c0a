//! 游戏会话
//!
//! 一局游戏的全部可变状态，由 `QuizEngine` 独占持有；
//! 表现层只能通过快照读取，不能直接改

use crate::models::Question;

/// 游戏阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// 开始界面
    Intro,
    /// 出题中（等待生成服务返回，期间不接受任何输入）
    Loading,
    /// 答题中
    Playing,
    /// 结算界面（只能通过重新开始离开）
    Finished,
    /// 出题同步失败的终态（按出题契约实际到不了，留作防御）
    Error,
}

/// 一局游戏的可变状态，生命周期 = 一次完整的游玩
#[derive(Debug)]
pub struct QuizSession {
    pub phase: Phase,
    /// 本局题目序列，进入 playing 前一次性写入，之后不再变
    pub questions: Vec<Question>,
    /// 当前题目下标，在 playing 阶段单调递增
    pub current_index: usize,
    /// 答对数，单调不减
    pub score: usize,
    /// 最近一次作答的对错，只在反馈浮层窗口内有值
    pub pending_result: Option<bool>,
    /// 答案处理中的输入锁，挡住重复提交
    pub locked: bool,
    /// 局次编号：每次重开局递增，用来作废上一局还没触发的定时任务
    pub epoch: u64,
}

impl QuizSession {
    pub fn new() -> Self {
        Self {
            phase: Phase::Intro,
            questions: Vec::new(),
            current_index: 0,
            score: 0,
            pending_result: None,
            locked: false,
            epoch: 0,
        }
    }

    /// 当前题目（仅 playing 阶段有意义）
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}
