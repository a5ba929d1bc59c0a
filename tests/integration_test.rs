//! 端到端场景测试
//!
//! 全部走本地出题路径，不需要网络；
//! 定时相关的用例在暂停的 tokio 时钟下运行，300ms / 1800ms 两个偏移量按精确值断言

use kids_math_quiz::{GeneratorService, Phase, Question, QuizEngine, Screen, SilentFeedback};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

fn test_engine(question_count: usize) -> QuizEngine {
    QuizEngine::with_generator(
        GeneratorService::local_only(),
        question_count,
        Arc::new(SilentFeedback),
    )
}

/// 提交答案并等到两段定时器都走完
async fn resolve_submission(engine: &QuizEngine, option: u8) {
    engine.submit_answer(option);
    sleep(Duration::from_millis(1900)).await;
}

fn wrong_option(question: &Question) -> u8 {
    question
        .options
        .iter()
        .copied()
        .find(|&o| o != question.correct_answer)
        .expect("四个互不相同的选项里总有错误项")
}

/// 远程出题被禁用时，generate(5) 必须经由本地算法返回 5 道合法题目
#[tokio::test]
async fn test_forced_fallback_produces_well_formed_questions() {
    let generator = GeneratorService::local_only();
    let questions = generator.generate(5).await;

    assert_eq!(questions.len(), 5);
    for (i, q) in questions.iter().enumerate() {
        assert_eq!(q.id, i as u32);
        assert_eq!(q.options.len(), 4);
        assert!(q.options.contains(&q.correct_answer));
        q.validate()
            .unwrap_or_else(|e| panic!("第 {} 道题不合法: {}", i, e));
    }
}

/// 3 道题答对 2 道：最终得分 2、进入结算、评语落在鼓励档
#[tokio::test(start_paused = true)]
async fn test_full_play_through_two_of_three() {
    let engine = test_engine(3);
    engine.start().await;
    assert_eq!(engine.snapshot().phase, Phase::Playing);

    for round in 0..3 {
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.current_index, round);

        let question = snapshot.question.expect("playing 阶段应有当前题");
        let option = if round < 2 {
            question.correct_answer
        } else {
            wrong_option(&question)
        };
        resolve_submission(&engine, option).await;
    }

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.phase, Phase::Finished);
    assert_eq!(snapshot.score, 2);

    match Screen::from_snapshot(&snapshot) {
        Screen::Finished { message, .. } => {
            // 2/3 ≈ 66.7%，落在 ≥50% 的鼓励档
            assert_eq!(message, "Cố gắng lên! Bé làm được mà!");
        }
        other => panic!("期望结算界面，实际 {:?}", other),
    }
}

/// 两段定时：300ms 后才揭晓对错，1800ms 后才清浮层并前进
#[tokio::test(start_paused = true)]
async fn test_two_stage_feedback_timing() {
    let engine = test_engine(2);
    engine.start().await;

    let question = engine.snapshot().question.expect("应有当前题");
    engine.submit_answer(question.correct_answer);

    // 提交后立即上锁，但 300ms 内还没有揭晓
    sleep(Duration::from_millis(200)).await;
    let snapshot = engine.snapshot();
    assert!(snapshot.locked);
    assert_eq!(snapshot.pending_result, None);
    assert_eq!(snapshot.score, 0);

    // 过了 300ms：揭晓对错并加分，但还没前进
    sleep(Duration::from_millis(150)).await;
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.pending_result, Some(true));
    assert_eq!(snapshot.score, 1);
    assert_eq!(snapshot.current_index, 0);
    assert!(snapshot.locked);

    // 过了 1800ms：浮层清空、解锁、进入下一题
    sleep(Duration::from_millis(1600)).await;
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.pending_result, None);
    assert!(!snapshot.locked);
    assert_eq!(snapshot.current_index, 1);
}

/// 锁定期间的第二次提交对得分和进度都没有影响
#[tokio::test(start_paused = true)]
async fn test_reentrancy_guard_blocks_second_submission() {
    let engine = test_engine(2);
    engine.start().await;

    let question = engine.snapshot().question.expect("应有当前题");
    engine.submit_answer(question.correct_answer);
    // 锁定中，重复提交（哪怕还是正确答案）是无操作
    engine.submit_answer(question.correct_answer);
    engine.submit_answer(wrong_option(&question));

    sleep(Duration::from_millis(1900)).await;

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.score, 1, "重复提交不应重复计分");
    assert_eq!(snapshot.current_index, 1, "重复提交不应多次前进");
    assert_eq!(snapshot.phase, Phase::Playing);
}

/// 从结算界面重开局：得分与进度归零，重新进入答题
#[tokio::test(start_paused = true)]
async fn test_restart_resets_session() {
    let engine = test_engine(2);
    engine.start().await;

    for _ in 0..2 {
        let question = engine.snapshot().question.expect("应有当前题");
        resolve_submission(&engine, question.correct_answer).await;
    }

    let finished = engine.snapshot();
    assert_eq!(finished.phase, Phase::Finished);
    assert_eq!(finished.score, 2);

    engine.start().await;

    let fresh = engine.snapshot();
    assert_eq!(fresh.phase, Phase::Playing);
    assert_eq!(fresh.score, 0);
    assert_eq!(fresh.current_index, 0);
    assert!(!fresh.locked);
    assert_eq!(fresh.pending_result, None);
}

/// 一局之内 current_index 和 score 单调不减，结束后 score 不超过题数
#[tokio::test(start_paused = true)]
async fn test_monotonicity_and_termination() {
    let total = 4;
    let engine = test_engine(total);
    engine.start().await;

    let mut last_index = 0;
    let mut last_score = 0;

    for _ in 0..total {
        let snapshot = engine.snapshot();
        assert!(snapshot.current_index >= last_index);
        assert!(snapshot.score >= last_score);
        last_index = snapshot.current_index;
        last_score = snapshot.score;

        let question = snapshot.question.expect("playing 阶段应有当前题");
        resolve_submission(&engine, question.correct_answer).await;
    }

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.phase, Phase::Finished);
    assert!(snapshot.score <= total);
    assert_eq!(snapshot.score, total, "全部答对时应拿满分");
}
