//! レイアウト計算のヘルパー関数

use ratatui::prelude::*;

/// 画面全体の領域
pub struct MainLayout {
    /// タイトル行
    pub header: Rect,
    /// 画面本体
    pub body: Rect,
    /// 下部タブバー（表示しない画面ではNone）
    pub tab_bar: Option<Rect>,
    /// HELPバー
    pub help_bar: Rect,
    /// STATUSバー
    pub status_bar: Rect,
}

/// 本体を一覧とプレビューに分けた領域
pub struct BodyLayout {
    /// チップ（カテゴリ/フィルタ）行
    pub chips: Rect,
    /// 一覧
    pub list: Rect,
    /// 右側のプレビュー
    pub preview: Rect,
}

/// 画面を Header + Body + (TabBar) + HELP + STATUS に分割
pub fn create_main_layout(area: Rect, with_tab_bar: bool) -> MainLayout {
    let tab_height = if with_tab_bar { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),          // Header
            Constraint::Min(1),             // Body
            Constraint::Length(tab_height), // TabBar
            Constraint::Length(3),          // HELPバー
            Constraint::Length(3),          // STATUSバー
        ])
        .split(area);

    MainLayout {
        header: chunks[0],
        body: chunks[1],
        tab_bar: with_tab_bar.then_some(chunks[2]),
        help_bar: chunks[3],
        status_bar: chunks[4],
    }
}

/// Bodyをチップ行と、一覧 60% + プレビュー 40% に分割
pub fn create_body_layout(area: Rect) -> BodyLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    BodyLayout {
        chips: rows[0],
        list: cols[0],
        preview: cols[1],
    }
}

/// 中央配置のポップアップ領域を計算
pub fn centered_popup(area: Rect, width_percent: u16, height: u16) -> Rect {
    // 縦方向の余白を作り、中央行を取り出す。
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    // 横方向も中央に寄せる。
    let side = (100 - width_percent.min(100)) / 2;
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(side),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(side),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_bar_is_optional() {
        let area = Rect::new(0, 0, 80, 40);
        let with = create_main_layout(area, true);
        let without = create_main_layout(area, false);
        assert!(with.tab_bar.is_some());
        assert!(without.tab_bar.is_none());
        assert!(without.body.height > with.body.height);
    }

    #[test]
    fn test_popup_is_inside_area() {
        let area = Rect::new(0, 0, 100, 30);
        let popup = centered_popup(area, 60, 9);
        assert_eq!(popup.height, 9);
        assert!(popup.x > 0 && popup.right() < area.right());
    }
}
