/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 每局题目数量
    pub question_count: usize,
    // --- LLM 配置 ---
    /// API 密钥；缺失时直接走本地算法出题，不视为错误
    pub llm_api_key: Option<String>,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            question_count: 30,
            llm_api_key: None,
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-2.5-flash".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            question_count: std::env::var("QUESTION_COUNT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.question_count),
            llm_api_key: std::env::var("LLM_API_KEY").ok().filter(|v| !v.trim().is_empty()),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
        }
    }
}
