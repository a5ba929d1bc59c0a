//! 音效反馈 - 业务能力层
//!
//! 三个提示音都是"发后不管"：播放失败不影响游戏状态，也不向调用方报错

use tracing::info;

/// 音效反馈接口
///
/// 状态机在揭晓对错和通关时触发对应提示音
pub trait FeedbackEffects: Send + Sync {
    /// 答对提示音
    fn play_success(&self);
    /// 答错提示音
    fn play_error(&self);
    /// 通关号角
    fn play_victory_fanfare(&self);
}

/// 控制台反馈
///
/// 没有音频设备时的默认实现，用日志行代替提示音
pub struct ConsoleFeedback;

impl FeedbackEffects for ConsoleFeedback {
    fn play_success(&self) {
        info!("🔔 叮~（答对提示音）");
    }

    fn play_error(&self) {
        info!("🔕 嘟~（答错提示音）");
    }

    fn play_victory_fanfare(&self) {
        info!("🎺 哒哒哒哒~（胜利号角）");
    }
}

/// 静音反馈（测试用）
pub struct SilentFeedback;

impl FeedbackEffects for SilentFeedback {
    fn play_success(&self) {}
    fn play_error(&self) {}
    fn play_victory_fanfare(&self) {}
}
