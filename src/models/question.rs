use serde::{Deserialize, Serialize};
use std::fmt;

/// 数值上限：所有操作数、答案、选项都在 10 以内
pub const MAX_VALUE: u8 = 10;

/// 运算符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
}

impl Operator {
    /// 计算运算结果，减法下溢时返回 None
    pub fn apply(&self, num1: u8, num2: u8) -> Option<u8> {
        match self {
            Operator::Add => num1.checked_add(num2),
            Operator::Subtract => num1.checked_sub(num2),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// 插图类型：答题界面用哪套图标展示操作数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualType {
    Apples,
    Stars,
    Cats,
    Cookies,
}

impl VisualType {
    pub const ALL: [VisualType; 4] = [
        VisualType::Apples,
        VisualType::Stars,
        VisualType::Cats,
        VisualType::Cookies,
    ];

    pub fn emoji(&self) -> &'static str {
        match self {
            VisualType::Apples => "🍎",
            VisualType::Stars => "⭐",
            VisualType::Cats => "🐱",
            VisualType::Cookies => "🍪",
        }
    }
}

/// 单个题目（生成后不可变）
///
/// 字段命名和序列化格式与 LLM 出题接口的 JSON 保持一致
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// 在本局题目序列中的编号（从 0 开始），仅局内唯一
    pub id: u32,
    /// 展示文本：纯算式或一小段应用题
    pub text: String,
    pub num1: u8,
    pub num2: u8,
    pub operator: Operator,
    pub correct_answer: u8,
    /// 恰好 4 个互不相同的选项，包含正确答案
    pub options: Vec<u8>,
    pub visual_type: VisualType,
    /// 是否应用题（纯展示提示，本地算法永远为 false）
    pub is_word_problem: bool,
}

impl Question {
    /// 校验题目是否满足出题约束
    ///
    /// LLM 返回的数据必须逐条通过校验，任何一条失败都会整体回退到本地算法
    pub fn validate(&self) -> Result<(), String> {
        if self.options.len() != 4 {
            return Err(format!("选项数量应为 4，实际 {}", self.options.len()));
        }

        for i in 0..self.options.len() {
            for j in (i + 1)..self.options.len() {
                if self.options[i] == self.options[j] {
                    return Err(format!("选项存在重复值 {}", self.options[i]));
                }
            }
        }

        if !self.options.contains(&self.correct_answer) {
            return Err(format!("正确答案 {} 不在选项中", self.correct_answer));
        }

        match self.operator.apply(self.num1, self.num2) {
            Some(result) if result == self.correct_answer => {}
            Some(result) => {
                return Err(format!(
                    "答案 {} 与算式 {} {} {} 的结果 {} 不一致",
                    self.correct_answer, self.num1, self.operator, self.num2, result
                ));
            }
            None => {
                return Err(format!("算式 {} - {} 结果为负数", self.num1, self.num2));
            }
        }

        if self.num1 > MAX_VALUE || self.num2 > MAX_VALUE || self.correct_answer > MAX_VALUE {
            return Err("数值超出 10 以内范围".to_string());
        }

        Ok(())
    }

    /// 选项值是否属于本题
    pub fn is_valid_option(&self, option: u8) -> bool {
        self.options.contains(&option)
    }
}
