//! 画面ごとのローカル状態（画面に入るたびに初期化される）。

use std::collections::HashMap;

use crate::{
    catalog::{ASSET_FILTERS, Asset, AssetFilter, CATEGORIES, Category, Template},
    grounding::{GroundedContent, LegalPage},
    modal::Modal,
    nav::Screen,
};

/// テンプレート一覧の状態。
#[derive(Clone, Debug, Default)]
pub struct LibraryView {
    /// 選択中のカテゴリ位置。
    pub category: usize,
    /// 絞り込み後の一覧での選択位置。
    pub selected: usize,
    /// テンプレートID → 疑似ダウンロード進捗。
    pub sync: HashMap<String, f32>,
}

impl LibraryView {
    pub fn category(&self) -> &'static Category {
        &CATEGORIES[self.category.min(CATEGORIES.len() - 1)]
    }

    /// 現在のカテゴリに一致するテンプレート。
    pub fn visible<'a>(&self, templates: &'a [Template]) -> Vec<&'a Template> {
        let cat = self.category();
        templates.iter().filter(|t| cat.accepts(t)).collect()
    }

    pub fn progress(&self, template_id: &str) -> f32 {
        self.sync.get(template_id).copied().unwrap_or(0.0)
    }

    /// ダウンロードが終わったテンプレートだけ選択できる。
    pub fn is_loaded(&self, template_id: &str) -> bool {
        self.progress(template_id) >= 100.0
    }
}

/// アップロード画面の状態。
#[derive(Clone, Debug, Default)]
pub struct UploadView {
    /// 疑似生成中かどうか。
    pub generating: bool,
}

/// 素材一覧の状態。
#[derive(Clone, Debug, Default)]
pub struct AssetsView {
    pub filter: usize,
    pub selected: usize,
}

impl AssetsView {
    pub fn filter(&self) -> AssetFilter {
        ASSET_FILTERS[self.filter.min(ASSET_FILTERS.len() - 1)]
    }

    pub fn visible<'a>(&self, assets: &'a [Asset]) -> Vec<&'a Asset> {
        let f = self.filter();
        assets.iter().filter(|a| f.accepts(a)).collect()
    }

    /// 削除後などに選択位置を一覧の範囲へ戻す。
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

/// 規約ページの読み込み状態。
#[derive(Clone, Debug)]
pub enum LegalState {
    Loading,
    Loaded(GroundedContent),
    /// 取得失敗。固定のメッセージを表示する。
    Failed,
}

/// 規約ページの状態。
#[derive(Clone, Debug)]
pub struct LegalView {
    pub page: LegalPage,
    pub state: LegalState,
    pub selected_source: usize,
}

impl LegalView {
    pub fn new(page: LegalPage) -> Self {
        Self {
            page,
            state: LegalState::Loading,
            selected_source: 0,
        }
    }
}

/// 画面と規約ページ種別の対応。
pub fn legal_page_for(screen: Screen) -> Option<LegalPage> {
    match screen {
        Screen::PrivacyPolicy => Some(LegalPage::Privacy),
        Screen::UserAgreement => Some(LegalPage::Agreement),
        _ => None,
    }
}

/// 設定画面の項目。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsItem {
    Profile,
    Recharge,
    Privacy,
    Agreement,
    Language,
    DarkMode,
    Contact,
    About,
}

impl SettingsItem {
    /// 表示順の項目一覧。
    pub const ALL: [SettingsItem; 8] = [
        SettingsItem::Profile,
        SettingsItem::Recharge,
        SettingsItem::Privacy,
        SettingsItem::Agreement,
        SettingsItem::Language,
        SettingsItem::DarkMode,
        SettingsItem::Contact,
        SettingsItem::About,
    ];

    /// 項目が属するセクション見出し。
    pub fn section_key(self) -> &'static str {
        match self {
            SettingsItem::Profile | SettingsItem::Recharge => "label_profile",
            SettingsItem::Privacy | SettingsItem::Agreement => "label_legal",
            SettingsItem::Language | SettingsItem::DarkMode => "label_general",
            SettingsItem::Contact | SettingsItem::About => "label_support",
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            SettingsItem::Profile => "label_profile",
            SettingsItem::Recharge => "btn_recharge",
            SettingsItem::Privacy => "label_privacy",
            SettingsItem::Agreement => "label_agreement",
            SettingsItem::Language => "label_lang",
            SettingsItem::DarkMode => "label_darkmode",
            SettingsItem::Contact => "label_contact",
            SettingsItem::About => "label_about",
        }
    }

    /// 遷移先の画面。ダークモードはトグルなので遷移しない。
    pub fn target(self) -> Option<Screen> {
        match self {
            SettingsItem::Profile => Some(Screen::Profile),
            SettingsItem::Recharge => Some(Screen::Pro),
            SettingsItem::Privacy => Some(Screen::PrivacyPolicy),
            SettingsItem::Agreement => Some(Screen::UserAgreement),
            SettingsItem::Language => Some(Screen::Language),
            SettingsItem::DarkMode => None,
            SettingsItem::Contact => Some(Screen::ContactUs),
            SettingsItem::About => Some(Screen::AboutUs),
        }
    }
}

/// 全画面分のローカル状態。
#[derive(Clone, Debug, Default)]
pub struct ViewState {
    pub library: LibraryView,
    pub upload: UploadView,
    pub assets: AssetsView,
    /// 設定画面の選択行。
    pub settings_selected: usize,
    /// プロフィール画面で保存前に選んでいるアバター位置。
    pub profile_pending: usize,
    /// 購入画面の選択パッケージ。
    pub pro_selected: usize,
    /// 言語画面のカーソル位置。
    pub language_selected: usize,
    /// 規約ページ（該当画面でのみSome）。
    pub legal: Option<LegalView>,
    /// 表示中のダイアログ。
    pub modal: Option<Modal>,
}

/// 一覧のカーソルを1つ上へ移動する。
pub fn step_up(idx: &mut usize) {
    *idx = idx.saturating_sub(1);
}

/// 一覧のカーソルを1つ下へ移動する（末尾で止まる）。
pub fn step_down(idx: &mut usize, len: usize) {
    if *idx + 1 < len {
        *idx += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn test_library_visible_follows_category() {
        let tpls = catalog::templates();
        let mut v = LibraryView::default();
        assert_eq!(v.visible(&tpls).len(), 6);
        v.category = 2; // 清新
        let names: Vec<_> = v.visible(&tpls).iter().map(|t| t.name.clone()).collect();
        assert_eq!(names, vec!["夏日微风".to_string()]);
    }

    #[test]
    fn test_template_loaded_only_at_100() {
        let mut v = LibraryView::default();
        assert!(!v.is_loaded("1"));
        v.sync.insert("1".into(), 99.9);
        assert!(!v.is_loaded("1"));
        v.sync.insert("1".into(), 100.0);
        assert!(v.is_loaded("1"));
    }

    #[test]
    fn test_assets_clamp() {
        let mut v = AssetsView { filter: 0, selected: 3 };
        v.clamp(2);
        assert_eq!(v.selected, 1);
        v.clamp(0);
        assert_eq!(v.selected, 0);
    }

    #[test]
    fn test_step_bounds() {
        let mut i = 0;
        step_up(&mut i);
        assert_eq!(i, 0);
        step_down(&mut i, 2);
        step_down(&mut i, 2);
        assert_eq!(i, 1);
    }

    #[test]
    fn test_every_settings_target_returns_to_settings() {
        for item in SettingsItem::ALL {
            if let Some(screen) = item.target() {
                assert_eq!(screen.back_target(), Some(Screen::Settings));
            }
        }
    }
}
