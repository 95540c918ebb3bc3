//! バックグラウンドタスクからUIループへ送るイベント。

use crate::grounding::{GroundedContent, LegalPage};

/// UIループが受け取るイベント。
#[derive(Clone, Debug)]
pub enum AppEvent {
    /// テンプレートの疑似ダウンロード進捗（0..=100）。
    TemplateSync { template_id: String, percent: f32 },
    /// スプラッシュの待ち時間が終わった。
    SplashElapsed,
    /// 疑似生成が終わった。
    GenerationFinished,
    /// 規約ページの要約取得結果。
    LegalLoaded {
        page: LegalPage,
        result: Result<GroundedContent, String>,
    },
}
