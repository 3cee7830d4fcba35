//! Prompt templates for question generation.
//!
//! The output format requested here is exactly what `quiz::parser` expects;
//! the two must stay in sync.

/// Prompt for a four-option multiple-choice question about a genre.
pub fn multiple_choice_prompt(genre: &str) -> String {
  format!(
    "日本の歴史の「{genre}」に関する4択問題を1つ生成してください。
以下の形式で出力してください：
質問：
選択肢1：
選択肢2：
選択肢3：
選択肢4：
正解：（数字のみ）
ジャンル：{genre}
"
  )
}

/// Prompt for a free-response question with a structured model answer.
pub fn written_prompt(genre: &str) -> String {
  format!(
    "日本の歴史の「{genre}」に関する記述式の問題を1つ生成してください。

以下の条件を満たす問題を生成してください：
1. 歴史的な出来事の因果関係や影響を説明させる問題
2. 時代背景や社会状況との関連を考察させる問題
3. 単なる年号や人物名ではなく、歴史的な意義や評価を問う問題
4. 複数の視点から考察できる問題

以下の形式で必ず出力してください：
---
質問：（歴史的考察を促す問い）

模範解答：
・歴史的事実の説明：
（100字以内で記述）

・社会的背景：
（100字以内で記述）

・影響と意義：
（100字以内で記述）

・具体例：
（100字以内で記述）
---

ジャンル：{genre}
"
  )
}
