//! 游戏状态机
//!
//! 状态流转：intro → loading → playing → finished，重开局永远经由 loading 重进；
//! error 只在出题同步失败时从 loading 进入（防御路径）。
//!
//! 每次提交答案会安排两段定时：
//! - 300ms 后揭晓对错（写 pending_result、加分、放提示音）
//! - 从提交起 1800ms 后收尾（清浮层、解锁、进下一题或结算）
//!
//! 两个偏移量是产品固定值。定时任务带着安排它的局次编号，
//! 重开局后旧任务发现编号不对就直接放弃，不会碰新局的状态。

use crate::config::Config;
use crate::game::session::{Phase, QuizSession};
use crate::models::Question;
use crate::services::{FeedbackEffects, GeneratorService};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// 选中高亮单独展示的时长
const REVEAL_DELAY: Duration = Duration::from_millis(300);
/// 从提交到进入下一题的总时长（300ms 高亮 + 1500ms 对错浮层）
const ADVANCE_DELAY: Duration = Duration::from_millis(1800);

/// 表现层快照
///
/// 状态机对外暴露的全部只读信息
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub phase: Phase,
    pub score: usize,
    pub current_index: usize,
    /// playing/finished 阶段是本局实际题数，其余阶段是配置的题数
    pub total_questions: usize,
    /// 当前题目（仅 playing 阶段有值）
    pub question: Option<Question>,
    pub pending_result: Option<bool>,
    pub locked: bool,
}

/// 游戏状态机
///
/// 表现层的全部入口就是 `start()` 和 `submit_answer()`，
/// 其余都通过 `snapshot()` 只读
pub struct QuizEngine {
    session: Arc<Mutex<QuizSession>>,
    generator: GeneratorService,
    feedback: Arc<dyn FeedbackEffects>,
    question_count: usize,
}

impl QuizEngine {
    /// 从配置创建状态机
    pub fn new(config: &Config, feedback: Arc<dyn FeedbackEffects>) -> Self {
        Self::with_generator(GeneratorService::new(config), config.question_count, feedback)
    }

    /// 指定出题服务和题数创建状态机（测试或离线场景）
    pub fn with_generator(
        generator: GeneratorService,
        question_count: usize,
        feedback: Arc<dyn FeedbackEffects>,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(QuizSession::new())),
            generator,
            feedback,
            question_count,
        }
    }

    /// 开始（或重新开始）一局
    ///
    /// 仅在 intro / finished / error 阶段有效，其余阶段调用是无操作；
    /// loading 期间的重复调用会被 phase 检查挡掉
    pub async fn start(&self) {
        {
            let mut session = self.session.lock();
            if !matches!(
                session.phase,
                Phase::Intro | Phase::Finished | Phase::Error
            ) {
                debug!("start() 在 {:?} 阶段被忽略", session.phase);
                return;
            }

            session.phase = Phase::Loading;
            session.questions.clear();
            session.current_index = 0;
            session.score = 0;
            session.pending_result = None;
            session.locked = false;
            // 作废上一局的所有定时任务
            session.epoch += 1;
        }

        // 出题服务对外不失败，loading 期间唯一的挂起点
        let questions = self.generator.generate(self.question_count).await;

        let mut session = self.session.lock();
        if questions.len() != self.question_count {
            // 防御路径：按出题契约到不了这里
            warn!(
                "❌ 出题数量异常（需要 {}，实际 {}），进入错误界面",
                self.question_count,
                questions.len()
            );
            session.phase = Phase::Error;
            return;
        }

        info!("🎮 开始答题，共 {} 道", questions.len());
        session.questions = questions;
        session.phase = Phase::Playing;
    }

    /// 提交答案
    ///
    /// 只在 playing 且未锁定时生效；重复提交、不在选项里的值都是无操作。
    /// 生效后立即上锁并安排两段定时任务，本函数不等待它们完成。
    pub fn submit_answer(&self, option: u8) {
        let (is_correct, epoch) = {
            let mut session = self.session.lock();
            if session.phase != Phase::Playing || session.locked {
                debug!(
                    "忽略提交: phase={:?} locked={}",
                    session.phase, session.locked
                );
                return;
            }

            let (valid, is_correct) = match session.current_question() {
                Some(question) => (
                    question.is_valid_option(option),
                    option == question.correct_answer,
                ),
                None => (false, false),
            };
            if !valid {
                debug!("忽略提交: 选项 {} 不属于当前题目", option);
                return;
            }

            session.locked = true;
            (is_correct, session.epoch)
        };

        let session = Arc::clone(&self.session);
        let feedback = Arc::clone(&self.feedback);

        tokio::spawn(async move {
            // 第一段：先让选中高亮单独展示 300ms，再揭晓对错
            sleep(REVEAL_DELAY).await;
            {
                let mut s = session.lock();
                if s.epoch != epoch {
                    debug!("上一局的揭晓任务已作废");
                    return;
                }

                s.pending_result = Some(is_correct);
                if is_correct {
                    s.score += 1;
                    feedback.play_success();
                } else {
                    feedback.play_error();
                }
            }

            // 第二段：对错浮层再停留 1500ms，然后收尾
            sleep(ADVANCE_DELAY - REVEAL_DELAY).await;
            let mut s = session.lock();
            if s.epoch != epoch {
                debug!("上一局的收尾任务已作废");
                return;
            }

            s.pending_result = None;
            s.locked = false;

            if s.current_index + 1 < s.questions.len() {
                s.current_index += 1;
            } else {
                s.phase = Phase::Finished;
                info!("🏁 全部题目完成，得分 {}/{}", s.score, s.questions.len());
                feedback.play_victory_fanfare();
            }
        });
    }

    /// 读取当前状态快照
    pub fn snapshot(&self) -> Snapshot {
        let session = self.session.lock();
        let total_questions = if session.questions.is_empty() {
            self.question_count
        } else {
            session.questions.len()
        };

        Snapshot {
            phase: session.phase,
            score: session.score,
            current_index: session.current_index,
            total_questions,
            question: session.current_question().cloned(),
            pending_result: session.pending_result,
            locked: session.locked,
        }
    }
}
