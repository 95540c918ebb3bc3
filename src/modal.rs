//! 画面上に重ねて表示するダイアログ。

use ratatui::{
    layout::Alignment,
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::{i18n, layout::centered_popup};

/// 表示中のダイアログ種別
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Modal {
    /// 生成開始の完了通知
    GenerationSuccess { template_name: String },
    /// 素材削除の確認
    ConfirmDelete { asset_id: String, asset_name: String },
}

impl Modal {
    /// タイトル・本文・確定/取消ボタンのラベルを返す。
    fn texts(&self, locale: &str) -> (String, String, String, String) {
        match self {
            Modal::GenerationSuccess { template_name } => (
                i18n::t(locale, "modal_success_title").to_string(),
                i18n::t_name(locale, "modal_success_body", template_name),
                i18n::t(locale, "btn_view_assets").to_string(),
                i18n::t(locale, "btn_continue").to_string(),
            ),
            Modal::ConfirmDelete { asset_name, .. } => (
                i18n::t(locale, "delete_title").to_string(),
                i18n::t_name(locale, "confirm_delete", asset_name),
                i18n::t(locale, "btn_confirm").to_string(),
                i18n::t(locale, "btn_cancel").to_string(),
            ),
        }
    }
}

/// ダイアログをポップアップとして描画
pub fn render_modal(f: &mut Frame, modal: &Modal, locale: &str, accent: Color) {
    let area = centered_popup(f.area(), 60, 9);
    let (title, body, confirm, cancel) = modal.texts(locale);

    // 既存の描画を消して背景にする。
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(accent));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    // 本文
    let text = Paragraph::new(body)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(text, rows[0]);

    // ボタン行
    let buttons = Line::from(vec![
        Span::styled(
            format!("[Enter] {confirm}"),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled(format!("[Esc] {cancel}"), Style::default().fg(Color::Gray)),
    ]);
    f.render_widget(Paragraph::new(buttons).alignment(Alignment::Center), rows[1]);
}
