//! 结算评语
//!
//! 分档阈值（100 / 80 / 50）是产品固定值，不做配置

/// 根据得分返回结算界面的评语文案
pub fn praise_message(score: usize, total: usize) -> &'static str {
    let percentage = if total == 0 {
        0.0
    } else {
        score as f64 / total as f64 * 100.0
    };

    if percentage >= 100.0 {
        "Xuất sắc! Bé là thiên tài!"
    } else if percentage >= 80.0 {
        "Giỏi quá! Bé làm rất tốt!"
    } else if percentage >= 50.0 {
        "Cố gắng lên! Bé làm được mà!"
    } else {
        "Luyện tập thêm nhé!"
    }
}
