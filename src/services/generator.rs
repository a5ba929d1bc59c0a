//! 题目生成服务 - 业务能力层
//!
//! 出题只有两条路径：
//! - 远程：配置了 API 密钥时调用 LLM 生成一次，不重试
//! - 本地：算法出题，远程的任何失败（网络、格式、校验）都静默回退到这里
//!
//! 对外契约：`generate(count)` 不会失败，永远返回恰好 `count` 道合法题目

use crate::config::Config;
use crate::error::{AppError, AppResult, GenerationError};
use crate::models::{Operator, Question, VisualType};
use crate::services::llm_service::LlmService;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

const GENERATION_SYSTEM_MESSAGE: &str = "You are a math teacher creating arithmetic \
    questions for Vietnamese first grade students. Reply with a bare JSON array only, \
    no explanations and no markdown fences.";

/// 题目生成服务
pub struct GeneratorService {
    llm: Option<LlmService>,
}

impl GeneratorService {
    /// 从配置创建出题服务
    pub fn new(config: &Config) -> Self {
        let llm = LlmService::from_config(config);
        if llm.is_none() {
            info!("未配置 LLM_API_KEY，本局将使用本地算法出题");
        }
        Self { llm }
    }

    /// 仅本地出题（测试或离线场景）
    pub fn local_only() -> Self {
        Self { llm: None }
    }

    /// 生成题目序列
    ///
    /// # 参数
    /// - `count`: 题目数量（调用方保证大于 0）
    ///
    /// # 返回
    /// 恰好 `count` 道合法题目；远程失败时自动回退，不向调用方暴露错误
    pub async fn generate(&self, count: usize) -> Vec<Question> {
        if let Some(llm) = &self.llm {
            info!("🤖 正在请求 LLM 生成 {} 道题目 (模型: {})...", count, llm.model_name());
            match self.generate_remote(llm, count).await {
                Ok(questions) => {
                    info!("✓ LLM 出题成功，共 {} 道", questions.len());
                    return questions;
                }
                Err(e) => {
                    warn!("⚠️ LLM 出题失败，回退到本地算法: {}", e);
                }
            }
        }

        generate_local(count)
    }

    /// 远程出题：一次 LLM 调用 + 严格校验
    async fn generate_remote(&self, llm: &LlmService, count: usize) -> AppResult<Vec<Question>> {
        let prompt = build_generation_prompt(count);
        let response = llm
            .send_to_llm(&prompt, Some(GENERATION_SYSTEM_MESSAGE))
            .await?;
        parse_generated_questions(&response, count)
    }
}

/// 构建出题提示词
fn build_generation_prompt(count: usize) -> String {
    format!(
        r#"Generate {count} math questions for 1st grade students (approx 6 years old) in Vietnamese.
The range is within 10 (sum <= 10, subtraction result >= 0).

Requirements:
1. Mixed types: 70% simple equations (e.g., "3 + 2 = ?"), 30% simple word problems (e.g., "Có 3 quả táo...").
2. Vary the visual items suggestions (apples, stars, cats, cookies).
3. For word problems, ensure the language is simple and natural for a Vietnamese child.
4. Ensure 'options' contains the correct answer and 3 incorrect but plausible answers in 0-10.

Return a JSON array of exactly {count} objects with this shape:
{{"id": 0, "text": "3 + 2 = ?", "num1": 3, "num2": 2, "operator": "+", "correctAnswer": 5, "options": [4, 5, 6, 7], "visualType": "apples", "isWordProblem": false}}

"operator" is "+" or "-"; "visualType" is one of "apples", "stars", "cats", "cookies"."#
    )
}

/// 解析并校验 LLM 返回的题目列表
///
/// 任何一条不合格都整体判失败，由调用方回退到本地算法
fn parse_generated_questions(response: &str, count: usize) -> AppResult<Vec<Question>> {
    let payload = strip_code_fences(response);
    let mut questions: Vec<Question> = serde_json::from_str(payload)?;

    if questions.is_empty() {
        return Err(AppError::Generation(GenerationError::EmptyPayload));
    }
    if questions.len() < count {
        return Err(AppError::Generation(GenerationError::NotEnoughQuestions {
            expected: count,
            actual: questions.len(),
        }));
    }
    // 多给的直接丢弃
    questions.truncate(count);

    for (index, question) in questions.iter_mut().enumerate() {
        question
            .validate()
            .map_err(|reason| AppError::invalid_question(index, reason))?;
        // LLM 给的编号不可信，统一改成序列位置
        question.id = index as u32;
    }

    debug!("LLM 返回的 {} 道题目全部通过校验", questions.len());
    Ok(questions)
}

/// 去掉 LLM 偶尔包裹的 markdown 代码块标记
fn strip_code_fences(response: &str) -> &str {
    let trimmed = response.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix("```").unwrap_or(trimmed);
    trimmed.trim()
}

/// 本地算法出题
///
/// 约束：
/// - 加法：num1 ∈ [0,5]、num2 ∈ [0, 10-num1]，保证和不超过 10
/// - 减法：num1 ∈ [1,10]、num2 ∈ [0, num1]，保证差不为负
///
/// 本地路径只出纯算式，不出应用题
pub fn generate_local(count: usize) -> Vec<Question> {
    info!("🎲 使用本地算法生成 {} 道题目", count);

    let mut rng = rand::thread_rng();
    let mut questions = Vec::with_capacity(count);

    for i in 0..count {
        let is_addition = rng.gen_bool(0.5);

        let (num1, num2, operator, correct_answer) = if is_addition {
            let num1 = rng.gen_range(0..=5u8);
            let num2 = rng.gen_range(0..=(10 - num1));
            (num1, num2, Operator::Add, num1 + num2)
        } else {
            let num1 = rng.gen_range(1..=10u8);
            let num2 = rng.gen_range(0..=num1);
            (num1, num2, Operator::Subtract, num1 - num2)
        };

        let options = build_options(correct_answer, &mut rng);
        let visual_type = VisualType::ALL[rng.gen_range(0..VisualType::ALL.len())];

        questions.push(Question {
            id: i as u32,
            text: format!("{} {} {} = ?", num1, operator, num2),
            num1,
            num2,
            operator,
            correct_answer,
            options,
            visual_type,
            is_word_problem: false,
        });
    }

    questions
}

/// 生成 4 个互不相同的选项（含正确答案），再做一次均匀洗牌
///
/// 选项空间有 11 个值而只取 4 个，循环必然终止
fn build_options(correct_answer: u8, rng: &mut impl Rng) -> Vec<u8> {
    let mut options = vec![correct_answer];
    while options.len() < 4 {
        let candidate = rng.gen_range(0..=10u8);
        if !options.contains(&candidate) {
            options.push(candidate);
        }
    }
    options.shuffle(rng);
    options
}
