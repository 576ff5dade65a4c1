//! Prompt construction for the two assistant calls: tag suggestion for a
//! single banner image, and a sales-facing trend summary over search hits.

use bannerkb_model::{BannerRecord, SearchFilter};

pub const TAGGING_SYSTEM_PROMPT: &str = r#"# あなたの役割
あなたはプロの広告クリエイティブアナリストです。
アップロードされたバナー画像を分析し、指定されたデータモデルに基づいて分類タグを提案してください。

# タグの定義（辞書）
分析の際は、必ず以下の「選択肢」の中から最も適切なものだけを選んでください。
辞書にない単語は使用しないでください。

* visual_type: ["人物写真（単体）", "人物写真（複数）", "イラスト", "テキストのみ", "商品・風景写真", "その他"]
* main_color: ["青系", "赤・オレンジ系", "緑系", "黄系", "紫系", "ピンク系", "モノクロ・黒", "白ベース・カラフル"]
* atmosphere: ["明るい・元気", "真面目・信頼・プロフェッショナル", "スタイリッシュ・先進的", "優しい・安心・温かい", "クール・かっこいい", "シニア向け・落ち着いた", "インパクト重視"]
* main_appeal: ["未経験歓迎", "高収入・高時給", "シフト自由・選べる", "Wワーク・副業OK", "リモートワーク・在宅OK", "駅チカ・通勤便利", "主婦・主夫歓迎", "シニア活躍中", "ミドル活躍中", "オープニングスタッフ", "資格取得支援", "土日祝休み", "正社員登用あり", "髪色・服装自由", "短時間・短期OK"]

# 出力形式
以下のJSON形式で、分析結果のみを回答してください。
* visual_type, main_color, atmosphere は、辞書から**1つ**だけ選んでください。
* main_appeal は、辞書から該当するものを**複数**（配列形式で）選んでください。該当なしの場合は空の配列 `[]` としてください。
* 解説や前置きは一切不要です。

{
  "visual_type": "（ここに選択肢から1つ）",
  "main_color": "（ここに選択肢から1つ）",
  "atmosphere": "（ここに選択肢から1つ）",
  "main_appeal": ["（ここに選択肢から複数）"]
}"#;

pub const TREND_SYSTEM_PROMPT: &str = r#"# あなたの役割
あなたは優秀な広告営業コンサルタント兼データアナリストです。

# 背景
営業担当者が、クライアントへの新規提案資料を作成するために、過去のIndeedバナー広告の成功実績（CTRトップ）を検索しました。

# あなたのタスク
以下の「トップ実績バナーの分析データ」を読み解き、このクライアントに提案すべき「成功の傾向」を分析してください。
そして、営業担当者がそのまま提案資料に使えるような、簡潔な「分析サマリー」を作成してください。

# 分析サマリーの作成ルール
* データ（JSON）に基づき、事実ベースで分析してください。
* 「クリエイティブ（ビジュアル）」「色味」「メイン訴求」の3つの観点で傾向をまとめてください。
* 営業担当者がクライアントにそのまま見せられるよう、プロフェッショナルかつ分かりやすい言葉遣いをしてください。
* 「〜のようです」「〜と考えられます」といった曖昧な表現は避け、「〜の傾向があります」「〜が効果的です」と断定的に記述してください。

# 出力フォーマット
## {職種名}・{雇用形態} 向けバナーの成功傾向

過去のCTR上位実績を分析した結果、以下の成功パターンが確認できました。

1.  **クリエイティブ（ビジュアル）:**
    （実績データに基づく傾向を記述）

2.  **色味:**
    （実績データに基づく傾向を記述）

3.  **メイン訴求:**
    （実績データに基づく傾向を記述）"#;

pub fn tagging_user_prompt(image_url: &str, extracted_text: Option<&str>) -> String {
    let text = match extracted_text {
        Some(t) if !t.trim().is_empty() => t,
        _ => "なし",
    };
    format!(
        "# 分析対象\n画像URL: {image_url}\n画像から抽出されたテキスト: {text}\n\n上記のバナー画像を分析し、JSON形式でタグを提案してください。"
    )
}

pub fn trend_user_prompt(filter: &SearchFilter, hits: &[BannerRecord]) -> String {
    let company = filter.company_name.as_deref().unwrap_or("全企業");
    let job_title = filter.job_title.as_deref().unwrap_or("指定職種");
    let employment = if filter.employment_types.is_empty() {
        "全雇用形態".to_string()
    } else {
        filter.employment_types.join("・")
    };
    let areas = if filter.areas.is_empty() {
        "全国".to_string()
    } else {
        filter.areas.join("、")
    };

    let analysis: Vec<serde_json::Value> = hits
        .iter()
        .map(|b| {
            serde_json::json!({
                "company_name": b.company_name,
                "job_title": b.job_title,
                "impressions": b.impressions,
                "clicks": b.clicks,
                "ctr": b.ctr,
                "visual_type": b.visual_type,
                "main_color": b.main_color,
                "atmosphere": b.atmosphere,
                "main_appeal": b.main_appeals,
            })
        })
        .collect();
    let data = serde_json::to_string_pretty(&analysis).unwrap_or_else(|_| "[]".to_string());

    format!(
        "# 検索条件\n- 企業名: {company}\n- 求人: {job_title}\n- 雇用形態: {employment}\n- エリア: {areas}\n- 検索結果件数: {count}件\n\n# トップ実績バナーの分析データ（JSON形式）\n{data}\n\n上記のデータを分析し、営業提案用のサマリーを作成してください。",
        count = hits.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagging_prompt_defaults_missing_text() {
        let p = tagging_user_prompt("https://example.com/a.png", None);
        assert!(p.contains("画像URL: https://example.com/a.png"));
        assert!(p.contains("抽出されたテキスト: なし"));
    }

    #[test]
    fn trend_prompt_defaults_empty_filters() {
        let filter = SearchFilter::default();
        let p = trend_user_prompt(&filter, &[]);
        assert!(p.contains("企業名: 全企業"));
        assert!(p.contains("雇用形態: 全雇用形態"));
        assert!(p.contains("エリア: 全国"));
        assert!(p.contains("検索結果件数: 0件"));
    }
}
